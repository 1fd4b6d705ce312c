//! Sea state, water temperature, plankton and shellfish advisories.
//!
//! Waves and sea-surface temperature come from the NDBC realtime buoy feed,
//! read once and shared through [`BuoyCache`].
//! Ocean colour and harmful algal blooms have no credential-free feed and
//! are estimated from the calendar.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use tidings_core::{
  context::{
    AlgaeStatus, BloomLevel, HarmfulAlgae, OceanColor, SeaSurface, TempAnomaly,
    WaveEnergy, Waves,
  },
  season::Season,
};
use tokio::sync::Mutex;

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig},
  http::{get_text, join},
};

const SOURCE: &str = "ndbc";
const FEET_PER_METER: f64 = 3.28084;
/// NDBC publishes at most every ten minutes.
const BUOY_TTL: Duration = Duration::from_secs(10 * 60);

// ─── Buoy feed ───────────────────────────────────────────────────────────────

/// The newest reading of each column, from an NDBC `realtime2` text file.
///
/// The file starts with two `#` header lines (names, then units) followed
/// by rows newest-first. `MM` marks a missing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BuoyReading {
  pub wave_height_m:   Option<f64>,
  pub dominant_period: Option<f64>,
  pub wave_dir_deg:    Option<f64>,
  pub water_temp_c:    Option<f64>,
}

pub(crate) fn parse_buoy(text: &str) -> Result<BuoyReading> {
  let mut lines = text.lines();
  let header = lines
    .next()
    .filter(|l| l.starts_with('#'))
    .ok_or(SourceError::Decode(SOURCE, "missing header".into()))?;
  let columns: Vec<&str> = header.trim_start_matches('#').split_whitespace().collect();
  let index = |name: &str| columns.iter().position(|c| *c == name);

  let rows: Vec<Vec<&str>> = lines
    .filter(|l| !l.starts_with('#'))
    .map(|l| l.split_whitespace().collect())
    .collect();

  // Newest row that has a value for `name`.
  let latest = |name: &str| -> Option<f64> {
    let idx = index(name)?;
    rows
      .iter()
      .filter_map(|row| row.get(idx))
      .find(|v| **v != "MM")
      .and_then(|v| v.parse().ok())
  };

  Ok(BuoyReading {
    wave_height_m:   latest("WVHT"),
    dominant_period: latest("DPD"),
    wave_dir_deg:    latest("MWD"),
    water_temp_c:    latest("WTMP"),
  })
}

async fn buoy(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
) -> Result<BuoyReading> {
  let path = format!("/data/realtime2/{}.txt", location.ndbc_station);
  let text = get_text(client.get(join(&config.endpoints.ndbc, &path)), SOURCE).await?;
  parse_buoy(&text)
}

/// The last buoy reading, shared by every clone of the signal client.
///
/// Callers queue on the lock, so concurrent requests for waves and water
/// temperature make one fetch between them. Failures are not cached.
#[derive(Debug, Clone, Default)]
pub(crate) struct BuoyCache {
  latest: Arc<Mutex<Option<(Instant, BuoyReading)>>>,
}

impl BuoyCache {
  pub(crate) async fn reading(
    &self,
    client: &Client,
    config: &SourcesConfig,
    location: &Location,
  ) -> Result<BuoyReading> {
    let mut latest = self.latest.lock().await;
    if let Some((fetched_at, reading)) = latest.as_ref()
      && fetched_at.elapsed() < BUOY_TTL
    {
      return Ok(reading.clone());
    }
    let reading = buoy(client, config, location).await?;
    *latest = Some((Instant::now(), reading.clone()));
    Ok(reading)
  }
}

pub(crate) fn compass(degrees: f64) -> &'static str {
  const POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW",
    "W", "WNW", "NW", "NNW",
  ];
  let idx = (degrees.rem_euclid(360.0) / 22.5).round() as usize % 16;
  POINTS[idx]
}

pub(crate) fn waves(reading: &BuoyReading) -> Option<Waves> {
  let height_m = reading.wave_height_m?;
  let height_ft = (height_m * FEET_PER_METER * 10.0).round() / 10.0;

  Some(Waves {
    significant_height_ft: Some(height_ft),
    peak_period_s:         reading.dominant_period,
    direction:             reading.wave_dir_deg.map(|d| compass(d).to_string()),
    energy:                Some(WaveEnergy::from_height_ft(height_ft)),
  })
}

pub(crate) fn sea_surface(reading: &BuoyReading, date: NaiveDate) -> Option<SeaSurface> {
  reading.water_temp_c.map(|c| {
    let temp_f = (c * 9.0 / 5.0 + 32.0).round();
    SeaSurface {
      temp_f:  Some(temp_f),
      anomaly: Some(TempAnomaly::classify(temp_f, date.month())),
    }
  })
}

// ─── Calendar estimates ──────────────────────────────────────────────────────

/// Typical Gulf of Maine chlorophyll by season.
pub(crate) fn ocean_color(date: NaiveDate) -> OceanColor {
  let (chlorophyll, bloom) = match Season::for_date(date) {
    Season::Spring => (3.0, BloomLevel::Elevated),
    Season::Summer => (1.5, BloomLevel::Normal),
    Season::Autumn => (2.5, BloomLevel::Elevated),
    Season::Winter => (0.8, BloomLevel::Normal),
  };
  OceanColor {
    chlorophyll_mg_m3: Some(chlorophyll),
    bloom:             Some(bloom),
    estimated:         true,
  }
}

const HAB_MONTHS: std::ops::RangeInclusive<u32> = 7..=10;

pub(crate) fn harmful_algae(date: NaiveDate) -> HarmfulAlgae {
  if !HAB_MONTHS.contains(&date.month()) {
    return HarmfulAlgae {
      status: Some(AlgaeStatus::None),
      ..Default::default()
    };
  }
  HarmfulAlgae {
    status:  Some(AlgaeStatus::Watch),
    species: Some("Alexandrium catenella".to_string()),
    area:    Some("Massachusetts Bay".to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
#yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
2025 01 05 14 50 270  5.0  7.0    MM    MM    MM  MM 1015.2   1.5   4.2  -3.1   MM   MM    MM
2025 01 05 14 20 270  5.0  7.0   0.8     6   4.5 100 1015.3   1.4   4.3  -3.0   MM   MM    MM
";

  #[test]
  fn buoy_skips_missing_values() {
    let r = parse_buoy(SAMPLE).unwrap();
    assert_eq!(r.wave_height_m, Some(0.8));
    assert_eq!(r.dominant_period, Some(6.0));
    assert_eq!(r.wave_dir_deg, Some(100.0));
    assert_eq!(r.water_temp_c, Some(4.2));
  }

  #[test]
  fn buoy_without_header_is_rejected() {
    assert!(parse_buoy("2025 01 05 14 50").is_err());
  }

  #[test]
  fn reading_converts_to_feet_and_fahrenheit() {
    let r = parse_buoy(SAMPLE).unwrap();
    let w = waves(&r).unwrap();
    assert_eq!(w.significant_height_ft, Some(2.6));
    assert_eq!(w.direction.as_deref(), Some("E"));

    let jan = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    assert_eq!(sea_surface(&r, jan).unwrap().temp_f, Some(40.0));
  }

  #[test]
  fn missing_wave_height_means_no_waves() {
    let r = BuoyReading { water_temp_c: Some(4.2), ..Default::default() };
    assert!(waves(&r).is_none());
  }

  #[test]
  fn compass_points() {
    assert_eq!(compass(0.0), "N");
    assert_eq!(compass(100.0), "E");
    assert_eq!(compass(350.0), "N");
    assert_eq!(compass(225.0), "SW");
  }

  #[test]
  fn algae_watch_only_in_late_summer() {
    let jan = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let aug = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
    assert_eq!(harmful_algae(jan).status, Some(AlgaeStatus::None));
    assert_eq!(harmful_algae(aug).status, Some(AlgaeStatus::Watch));
    assert_eq!(harmful_algae(aug).species.as_deref(), Some("Alexandrium catenella"));
  }

  #[test]
  fn spring_plankton_is_elevated() {
    let may = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let c = ocean_color(may);
    assert_eq!(c.bloom, Some(BloomLevel::Elevated));
    assert!(c.estimated);
  }
}
