//! `StoryContext`: the ephemeral snapshot handed to every composer.
//!
//! Every reading is independently optional. A missing value means the source
//! was down, slow or unconfigured, and composers must read it as "unknown"
//! rather than as an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::season::SeasonInfo;

// ─── Weather ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
  pub temp_high:    Option<f64>,
  pub temp_low:     Option<f64>,
  pub temp_current: Option<f64>,
  /// Short condition code, e.g. `"Clouds"` or `"Rain"`.
  pub condition:    Option<String>,
  pub description:  Option<String>,
  pub humidity:     Option<f64>,
  pub wind_speed:   Option<f64>,
  pub sunrise:      Option<DateTime<Utc>>,
  pub sunset:       Option<DateTime<Utc>>,
  /// Set when the reading is a seasonal estimate rather than an observation.
  #[serde(default)]
  pub estimated:    bool,
}

impl Weather {
  /// One-line human summary, e.g. `"Overcast clouds. High of 41F, low of 33F"`.
  pub fn summary(&self) -> String {
    let description = self
      .description
      .as_deref()
      .or(self.condition.as_deref())
      .map(capitalize);

    let temps = match (self.temp_high, self.temp_low, self.temp_current) {
      (Some(high), Some(low), _) => {
        Some(format!("High of {high:.0}F, low of {low:.0}F"))
      }
      (_, _, Some(current)) => Some(format!("Currently {current:.0}F")),
      _ => None,
    };

    match (description, temps) {
      (Some(d), Some(t)) => format!("{d}. {t}"),
      (Some(d), None) => d,
      (None, Some(t)) => t,
      (None, None) => "Conditions unknown".to_string(),
    }
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

// ─── Tide ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TideState {
  Rising,
  Falling,
  High,
  Low,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tide {
  pub state:     Option<TideState>,
  pub next_time: Option<DateTime<Utc>>,
  pub height_ft: Option<f64>,
  #[serde(default)]
  pub estimated: bool,
}

// ─── Environmental domains ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WaveEnergy {
  Calm,
  Light,
  Moderate,
  Rough,
  High,
}

impl WaveEnergy {
  pub fn from_height_ft(height: f64) -> Self {
    match height {
      h if h < 1.0 => WaveEnergy::Calm,
      h if h < 3.0 => WaveEnergy::Light,
      h if h < 6.0 => WaveEnergy::Moderate,
      h if h < 10.0 => WaveEnergy::Rough,
      _ => WaveEnergy::High,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waves {
  pub significant_height_ft: Option<f64>,
  pub peak_period_s:         Option<f64>,
  /// Compass direction the swell arrives from, e.g. `"NE"`.
  pub direction:             Option<String>,
  pub energy:                Option<WaveEnergy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TempAnomaly {
  Warmer,
  Normal,
  Cooler,
}

/// Long-run monthly sea-surface normals for the Gulf of Maine shelf, °F.
const SST_NORMALS_F: [f64; 12] =
  [38.0, 36.0, 38.0, 44.0, 52.0, 60.0, 66.0, 68.0, 64.0, 56.0, 48.0, 42.0];

impl TempAnomaly {
  /// Compare a reading against the monthly normal, with a ±3 °F dead band.
  pub fn classify(temp_f: f64, month: u32) -> Self {
    let normal = SST_NORMALS_F[(month.clamp(1, 12) - 1) as usize];
    match temp_f - normal {
      diff if diff > 3.0 => TempAnomaly::Warmer,
      diff if diff < -3.0 => TempAnomaly::Cooler,
      _ => TempAnomaly::Normal,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeaSurface {
  pub temp_f:  Option<f64>,
  pub anomaly: Option<TempAnomaly>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BloomLevel {
  Normal,
  Elevated,
  Bloom,
}

impl BloomLevel {
  pub fn from_chlorophyll(mg_m3: f64) -> Self {
    match mg_m3 {
      c if c < 2.0 => BloomLevel::Normal,
      c if c < 5.0 => BloomLevel::Elevated,
      _ => BloomLevel::Bloom,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OceanColor {
  pub chlorophyll_mg_m3: Option<f64>,
  pub bloom:             Option<BloomLevel>,
  #[serde(default)]
  pub estimated:         bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlgaeStatus {
  None,
  Watch,
  Warning,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmfulAlgae {
  pub status:  Option<AlgaeStatus>,
  pub species: Option<String>,
  pub area:    Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
  Good,
  Moderate,
  #[strum(serialize = "Unhealthy for Sensitive Groups")]
  UnhealthyForSensitiveGroups,
  Unhealthy,
  #[strum(serialize = "Very Unhealthy")]
  VeryUnhealthy,
  Hazardous,
}

impl AqiCategory {
  /// EPA category bands.
  pub fn from_aqi(aqi: u32) -> Self {
    match aqi {
      0..=50 => AqiCategory::Good,
      51..=100 => AqiCategory::Moderate,
      101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
      151..=200 => AqiCategory::Unhealthy,
      201..=300 => AqiCategory::VeryUnhealthy,
      _ => AqiCategory::Hazardous,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
  pub aqi:               Option<u32>,
  pub category:          Option<AqiCategory>,
  pub pm25_aqi:          Option<u32>,
  pub ozone_aqi:         Option<u32>,
  pub primary_pollutant: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SmokeLevel {
  None,
  Light,
  Moderate,
  Heavy,
}

impl SmokeLevel {
  /// Infer wildfire smoke from fine-particulate AQI. Elevated PM2.5 outside
  /// fire season is more likely local than smoke, so it only rates `Light`.
  pub fn from_pm25(pm25_aqi: u32, month: u32) -> Self {
    let fire_season = (6..=10).contains(&month);
    match pm25_aqi {
      a if a > 150 => SmokeLevel::Heavy,
      a if a > 100 && fire_season => SmokeLevel::Moderate,
      a if a > 100 => SmokeLevel::Light,
      _ => SmokeLevel::None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Smoke {
  pub level:    Option<SmokeLevel>,
  pub pm25_aqi: Option<u32>,
}

impl Smoke {
  /// Smoke is inferred from fine particulates; there is no direct feed.
  /// `None` when the reading has no PM2.5 value.
  pub fn from_air_quality(air: &AirQuality, month: u32) -> Option<Self> {
    let pm25 = air.pm25_aqi?;
    Some(Self {
      level:    Some(SmokeLevel::from_pm25(pm25, month)),
      pm25_aqi: Some(pm25),
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VegetationPhase {
  Dormant,
  EarlyGreen,
  Greening,
  Peak,
  Senescent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vegetation {
  pub ndvi:  Option<f64>,
  pub phase: Option<VegetationPhase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SnowExtent {
  None,
  Patchy,
  Continuous,
}

impl SnowExtent {
  pub fn from_depth_in(depth: f64) -> Self {
    match depth {
      d if d < 0.1 => SnowExtent::None,
      d if d < 1.0 => SnowExtent::Patchy,
      _ => SnowExtent::Continuous,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowCover {
  pub depth_in: Option<f64>,
  pub extent:   Option<SnowExtent>,
}

/// US Drought Monitor categories, D0 (abnormally dry) through D4.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum DroughtLevel {
  D0,
  D1,
  D2,
  D3,
  D4,
}

impl DroughtLevel {
  pub fn name(self) -> &'static str {
    match self {
      DroughtLevel::D0 => "Abnormally Dry",
      DroughtLevel::D1 => "Moderate Drought",
      DroughtLevel::D2 => "Severe Drought",
      DroughtLevel::D3 => "Extreme Drought",
      DroughtLevel::D4 => "Exceptional Drought",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drought {
  pub level:        Option<DroughtLevel>,
  pub percent_area: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErosionSite {
  pub name:  String,
  pub trend: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoastalErosion {
  pub hotspots: Vec<ErosionSite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkyWindow {
  Evening,
  Morning,
  AllNight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSighting {
  pub name:   String,
  pub window: SkyWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Planets {
  pub visible: Vec<PlanetSighting>,
  /// Three or more naked-eye planets up on the same night.
  pub parade:  bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeteorShower {
  pub name:          Option<String>,
  pub peak_tonight:  Option<bool>,
  pub expected_rate: Option<String>,
  pub radiant:       Option<String>,
}

/// The sparse bag of environmental readings. Each domain is fetched
/// independently and may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environmental {
  pub waves:           Option<Waves>,
  pub sea_surface:     Option<SeaSurface>,
  pub ocean_color:     Option<OceanColor>,
  pub harmful_algae:   Option<HarmfulAlgae>,
  pub air_quality:     Option<AirQuality>,
  pub smoke:           Option<Smoke>,
  pub vegetation:      Option<Vegetation>,
  pub snow:            Option<SnowCover>,
  pub drought:         Option<Drought>,
  pub coastal_erosion: Option<CoastalErosion>,
  pub planets:         Option<Planets>,
  pub meteor_shower:   Option<MeteorShower>,
}

impl Environmental {
  /// Short lines describing only the readings worth mentioning. Quiet
  /// domains (no smoke, no algae, no snow) are left out.
  pub fn highlights(&self) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(w) = &self.waves
      && let Some(energy) = w.energy
    {
      let dir = w.direction.as_deref().map(|d| format!(" from the {d}"));
      out.push(format!("Seas {energy}{}", dir.unwrap_or_default()));
    }
    if let Some(anomaly) = self.sea_surface.as_ref().and_then(|s| s.anomaly)
      && anomaly != TempAnomaly::Normal
    {
      out.push(format!("Sea surface {anomaly} than usual for the month"));
    }
    if let Some(bloom) = self.ocean_color.as_ref().and_then(|o| o.bloom)
      && bloom != BloomLevel::Normal
    {
      out.push(format!("Plankton {bloom} in the bay"));
    }
    if let Some(hab) = &self.harmful_algae
      && let Some(status) = hab.status
      && status != AlgaeStatus::None
    {
      let species = hab.species.as_deref().unwrap_or("harmful algae");
      out.push(format!("Shellfish {status} for {species}"));
    }
    if let Some(category) = self.air_quality.as_ref().and_then(|a| a.category)
    {
      out.push(format!("Air quality {category}"));
    }
    if let Some(level) = self.smoke.as_ref().and_then(|s| s.level)
      && level != SmokeLevel::None
    {
      out.push(format!("{} wildfire smoke haze", capitalize(&level.to_string())));
    }
    if let Some(phase) = self.vegetation.as_ref().and_then(|v| v.phase) {
      out.push(format!("Vegetation {}", phase.to_string().replace('_', " ")));
    }
    if let Some(extent) = self.snow.as_ref().and_then(|s| s.extent)
      && extent != SnowExtent::None
    {
      out.push(format!("Snow cover {extent}"));
    }
    if let Some(level) = self.drought.as_ref().and_then(|d| d.level) {
      out.push(format!("{} in the county", level.name()));
    }
    if let Some(erosion) = &self.coastal_erosion {
      for site in &erosion.hotspots {
        out.push(format!("{} {}", site.name, site.trend));
      }
    }
    if let Some(planets) = &self.planets
      && !planets.visible.is_empty()
    {
      let names: Vec<&str> =
        planets.visible.iter().map(|p| p.name.as_str()).collect();
      let lead = if planets.parade { "Planet parade" } else { "Planets up" };
      out.push(format!("{lead}: {}", names.join(", ")));
    }
    if let Some(shower) = &self.meteor_shower
      && let Some(name) = &shower.name
    {
      let when = if shower.peak_tonight == Some(true) {
        "peaks tonight"
      } else {
        "active"
      };
      out.push(format!("{name} meteor shower {when}"));
    }

    out
  }
}

// ─── Field notes ─────────────────────────────────────────────────────────────

/// One recent eBird report from the county.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirdSighting {
  pub common_name:     String,
  pub scientific_name: Option<String>,
  pub location:        Option<String>,
  pub observed_at:     Option<String>,
  pub count:           Option<u32>,
}

/// The current forecast period for the coast, with any active alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineForecast {
  /// Forecast period name, e.g. `"Tonight"`.
  pub period:     Option<String>,
  pub conditions: Option<String>,
  pub wind:       Option<String>,
  #[serde(default)]
  pub alerts:     Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
  #[strum(serialize = "very low")]
  VeryLow,
  #[strum(serialize = "low")]
  Low,
  #[strum(serialize = "normal")]
  Normal,
  #[strum(serialize = "high")]
  High,
  #[strum(serialize = "flood stage")]
  FloodStage,
}

impl FlowStatus {
  pub fn from_discharge_cfs(cfs: f64) -> Self {
    match cfs {
      q if q < 10.0 => FlowStatus::VeryLow,
      q if q < 50.0 => FlowStatus::Low,
      q if q < 150.0 => FlowStatus::Normal,
      q if q < 500.0 => FlowStatus::High,
      _ => FlowStatus::FloodStage,
    }
  }
}

/// Latest reading from the river gauge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiverFlow {
  pub site:            Option<String>,
  pub discharge_cfs:   Option<f64>,
  pub gauge_height_ft: Option<f64>,
  pub status:          Option<FlowStatus>,
}

/// Readings that colour a chapter but never get a fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldNotes {
  #[serde(default)]
  pub birds:  Vec<BirdSighting>,
  pub marine: Option<MarineForecast>,
  pub river:  Option<RiverFlow>,
}

impl FieldNotes {
  pub fn is_empty(&self) -> bool {
    self.birds.is_empty() && self.marine.is_none() && self.river.is_none()
  }
}

// ─── Recent chapters ─────────────────────────────────────────────────────────

/// Enough of an earlier chapter for a composer to avoid retelling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentChapter {
  pub date:    NaiveDate,
  pub title:   String,
  /// The chapter's first sentence.
  pub opening: String,
}

// ─── News ────────────────────────────────────────────────────────────────────

/// The slice of a [`NewsItem`](crate::news::NewsItem) a composer may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsBrief {
  pub id:          i64,
  pub headline:    String,
  pub summary:     String,
  pub article_url: String,
}

// ─── Context ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryContext {
  pub date:            NaiveDate,
  pub weather:         Option<Weather>,
  pub tide:            Option<Tide>,
  pub season:          SeasonInfo,
  #[serde(default)]
  pub environmental:   Environmental,
  #[serde(default, skip_serializing_if = "FieldNotes::is_empty")]
  pub field_notes:     FieldNotes,
  /// Most recent first.
  #[serde(default)]
  pub news_items:      Vec<NewsBrief>,
  /// Chapters before this date, newest first.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub recent_chapters: Vec<RecentChapter>,
}

impl StoryContext {
  /// A context carrying nothing but the calendar.
  pub fn bare(date: NaiveDate) -> Self {
    Self {
      date,
      weather: None,
      tide: None,
      season: SeasonInfo::for_date(date),
      environmental: Environmental::default(),
      field_notes: FieldNotes::default(),
      news_items: Vec::new(),
      recent_chapters: Vec::new(),
    }
  }

  pub fn condition(&self) -> Option<&str> {
    self.weather.as_ref().and_then(|w| w.condition.as_deref())
  }

  pub fn tide_state(&self) -> Option<TideState> {
    self.tide.as_ref().and_then(|t| t.state)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weather_summary_forms() {
    let mut w = Weather {
      description: Some("overcast clouds".into()),
      temp_high: Some(41.2),
      temp_low: Some(33.0),
      ..Default::default()
    };
    assert_eq!(w.summary(), "Overcast clouds. High of 41F, low of 33F");

    w.temp_high = None;
    w.temp_current = Some(40.0);
    assert_eq!(w.summary(), "Overcast clouds. Currently 40F");

    assert_eq!(Weather::default().summary(), "Conditions unknown");
  }

  #[test]
  fn classification_bands() {
    assert_eq!(WaveEnergy::from_height_ft(0.5), WaveEnergy::Calm);
    assert_eq!(WaveEnergy::from_height_ft(3.0), WaveEnergy::Moderate);
    assert_eq!(WaveEnergy::from_height_ft(12.0), WaveEnergy::High);
    assert_eq!(TempAnomaly::classify(72.0, 8), TempAnomaly::Warmer);
    assert_eq!(TempAnomaly::classify(37.0, 1), TempAnomaly::Normal);
    assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
    assert_eq!(AqiCategory::from_aqi(101), AqiCategory::UnhealthyForSensitiveGroups);
    assert_eq!(SmokeLevel::from_pm25(120, 7), SmokeLevel::Moderate);
    assert_eq!(SmokeLevel::from_pm25(120, 1), SmokeLevel::Light);
    assert_eq!(SmokeLevel::from_pm25(160, 1), SmokeLevel::Heavy);
    assert_eq!(SnowExtent::from_depth_in(0.5), SnowExtent::Patchy);
    assert_eq!(BloomLevel::from_chlorophyll(5.0), BloomLevel::Bloom);
  }

  #[test]
  fn smoke_follows_fire_season() {
    let air = AirQuality { pm25_aqi: Some(120), ..Default::default() };
    let july = Smoke::from_air_quality(&air, 7).unwrap();
    assert_eq!(july.level, Some(SmokeLevel::Moderate));
    assert_eq!(july.pm25_aqi, Some(120));
    assert!(Smoke::from_air_quality(&AirQuality::default(), 7).is_none());
  }

  #[test]
  fn highlights_skip_quiet_domains() {
    let env = Environmental {
      smoke: Some(Smoke { level: Some(SmokeLevel::None), pm25_aqi: Some(12) }),
      harmful_algae: Some(HarmfulAlgae {
        status: Some(AlgaeStatus::None),
        ..Default::default()
      }),
      meteor_shower: Some(MeteorShower {
        name: Some("Geminids".into()),
        peak_tonight: Some(true),
        ..Default::default()
      }),
      ..Default::default()
    };
    assert_eq!(env.highlights(), vec!["Geminids meteor shower peaks tonight"]);
  }

  #[test]
  fn river_flow_bands() {
    assert_eq!(FlowStatus::from_discharge_cfs(4.0), FlowStatus::VeryLow);
    assert_eq!(FlowStatus::from_discharge_cfs(92.0), FlowStatus::Normal);
    assert_eq!(FlowStatus::from_discharge_cfs(820.0), FlowStatus::FloodStage);
    assert_eq!(FlowStatus::FloodStage.to_string(), "flood stage");
  }

  #[test]
  fn older_snapshots_without_field_notes_still_load() {
    let bare = StoryContext::bare(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    let mut json = serde_json::to_value(&bare).unwrap();
    assert!(json.get("field_notes").is_none());
    assert!(json.get("recent_chapters").is_none());

    json.as_object_mut().unwrap().remove("news_items");
    let back: StoryContext = serde_json::from_value(json).unwrap();
    assert_eq!(back, bare);
  }

  #[test]
  fn tide_state_round_trips_lowercase() {
    assert_eq!(TideState::High.to_string(), "high");
    assert_eq!("Falling".parse::<TideState>().unwrap(), TideState::Falling);
    assert_eq!(
      serde_json::to_string(&TideState::Rising).unwrap(),
      "\"rising\""
    );
  }
}
