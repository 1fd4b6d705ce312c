//! Drought, snow, vegetation and shoreline change.

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde_json::Value;
use tidings_core::{
  context::{
    CoastalErosion, Drought, DroughtLevel, ErosionSite, SnowCover, SnowExtent,
    Vegetation, VegetationPhase,
  },
  season::Season,
};

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig},
  http::{get_json, join},
};

// ─── Drought ─────────────────────────────────────────────────────────────────

const DROUGHT: &str = "drought-monitor";

/// Worst category with nonzero coverage in the latest weekly row. USDM
/// reports percentages as numbers or as numeric strings depending on the
/// endpoint version, so both are accepted.
pub(crate) fn worst_category(rows: &[Value]) -> Option<Drought> {
  let latest = rows.last()?;
  let pct = |key: &str| -> f64 {
    match latest.get(key) {
      Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
      Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
      _ => 0.0,
    }
  };

  let found = [
    ("D4", DroughtLevel::D4),
    ("D3", DroughtLevel::D3),
    ("D2", DroughtLevel::D2),
    ("D1", DroughtLevel::D1),
    ("D0", DroughtLevel::D0),
  ]
  .into_iter()
  .map(|(key, level)| (level, pct(key)))
  .find(|(_, p)| *p > 0.0);

  Some(match found {
    Some((level, percent)) => Drought {
      level:        Some(level),
      percent_area: Some(percent),
    },
    None => Drought { level: None, percent_area: Some(0.0) },
  })
}

pub(crate) async fn drought(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<Drought>> {
  let day = date.format("%Y-%m-%d").to_string();
  let req = client
    .get(join(
      &config.endpoints.drought,
      "/api/CountyStatistics/GetDroughtSeverityStatisticsByAreaPercent",
    ))
    .header(reqwest::header::ACCEPT, "application/json")
    .query(&[
      ("aoi", location.drought_fips.as_str()),
      ("startdate", day.as_str()),
      ("enddate", day.as_str()),
      ("statisticsType", "1"),
    ]);
  let rows: Vec<Value> = get_json(req, DROUGHT).await?;
  if rows.is_empty() {
    return Err(SourceError::NoData(DROUGHT));
  }
  Ok(worst_category(&rows))
}

// ─── Snow ────────────────────────────────────────────────────────────────────

/// Typical coastal Essex County snow depth by month, in inches.
fn typical_snow_depth(month: u32) -> f64 {
  match month {
    1 => 2.0,
    2 => 3.0,
    3 => 0.5,
    12 => 0.5,
    _ => 0.0,
  }
}

pub(crate) fn snow(date: NaiveDate) -> SnowCover {
  let depth = typical_snow_depth(date.month());
  SnowCover {
    depth_in: Some(depth),
    extent:   Some(SnowExtent::from_depth_in(depth)),
  }
}

// ─── Vegetation ──────────────────────────────────────────────────────────────

const NDVI_MONTHLY_ADJUSTMENT: [f64; 12] =
  [-0.1, -0.05, 0.0, 0.1, 0.15, 0.1, 0.0, -0.05, -0.1, -0.15, -0.2, -0.1];

pub(crate) fn vegetation(date: NaiveDate) -> Vegetation {
  let (low, high, phase) = match Season::for_date(date) {
    Season::Winter => (0.1, 0.25, VegetationPhase::Dormant),
    Season::Spring => (0.3, 0.5, VegetationPhase::Greening),
    Season::Summer => (0.6, 0.8, VegetationPhase::Peak),
    Season::Autumn => (0.3, 0.5, VegetationPhase::Senescent),
  };
  let month = date.month();
  let adjusted = (low + high) / 2.0 + NDVI_MONTHLY_ADJUSTMENT[(month - 1) as usize];
  let ndvi = (adjusted.clamp(0.0, 1.0) * 100.0).round() / 100.0;

  let phase = match month {
    3 => VegetationPhase::EarlyGreen,
    4 | 5 => VegetationPhase::Greening,
    10 | 11 => VegetationPhase::Senescent,
    _ => phase,
  };

  Vegetation { ndvi: Some(ndvi), phase: Some(phase) }
}

// ─── Coastal erosion ─────────────────────────────────────────────────────────

/// Shoreline segments under active change. This moves on the scale of
/// storms and years, so a static list is current enough.
pub(crate) fn coastal_erosion() -> CoastalErosion {
  let site = |name: &str, trend: &str| ErosionSite {
    name:  name.to_string(),
    trend: trend.to_string(),
  };
  CoastalErosion {
    hotspots: vec![
      site("Plum Island", "eroding"),
      site("Castle Neck dunes", "shifting with the seasons"),
    ],
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
  }

  #[test]
  fn worst_drought_category_with_coverage() {
    let rows = vec![
      json!({ "D0": 80.0, "D1": 40.0, "D2": 0, "D3": 0, "D4": 0 }),
      json!({ "D0": "100.00", "D1": "62.5", "D2": "12.1", "D3": "0.00", "D4": "0.00" }),
    ];
    let d = worst_category(&rows).unwrap();
    assert_eq!(d.level, Some(DroughtLevel::D2));
    assert_eq!(d.percent_area, Some(12.1));
  }

  #[test]
  fn no_coverage_is_no_drought() {
    let rows = vec![json!({ "None": 100.0, "D0": 0, "D1": 0 })];
    let d = worst_category(&rows).unwrap();
    assert_eq!(d.level, None);
    assert!(worst_category(&[]).is_none());
  }

  #[test]
  fn vegetation_follows_the_year() {
    let jan = vegetation(date(1, 15));
    assert_eq!(jan.phase, Some(VegetationPhase::Dormant));
    assert!((jan.ndvi.unwrap() - 0.075).abs() < 0.01);

    assert_eq!(vegetation(date(3, 10)).phase, Some(VegetationPhase::EarlyGreen));
    assert_eq!(vegetation(date(7, 15)).phase, Some(VegetationPhase::Peak));
    assert_eq!(vegetation(date(7, 15)).ndvi, Some(0.7));
    assert_eq!(vegetation(date(10, 15)).phase, Some(VegetationPhase::Senescent));
  }

  #[test]
  fn snow_only_in_winter() {
    assert_eq!(snow(date(2, 1)).extent, Some(SnowExtent::Continuous));
    assert_eq!(snow(date(12, 5)).extent, Some(SnowExtent::Patchy));
    assert_eq!(snow(date(7, 5)).extent, Some(SnowExtent::None));
  }
}
