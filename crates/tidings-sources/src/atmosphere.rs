//! Air quality from EPA AirNow, and the smoke estimate derived from it.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tidings_core::context::{AirQuality, AqiCategory};

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig, secret},
  http::{get_json, is_today, join},
};

const SOURCE: &str = "airnow";
const RADIUS_MILES: &str = "25";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Observation {
  #[serde(rename = "ParameterName", default)]
  parameter: String,
  #[serde(rename = "AQI")]
  aqi:       Option<i64>,
}

/// Fold AirNow's per-pollutant observations into one reading. The worst
/// pollutant sets the overall AQI.
pub(crate) fn summarise(observations: &[Observation]) -> Option<AirQuality> {
  let mut reading = AirQuality::default();
  let mut worst: Option<(u32, &str)> = None;

  for obs in observations {
    let Some(aqi) = obs.aqi.and_then(|a| u32::try_from(a).ok()) else {
      continue;
    };
    let param = obs.parameter.to_ascii_uppercase();
    let name = if param.contains("PM2.5") {
      reading.pm25_aqi = Some(aqi);
      "PM2.5"
    } else if param.contains("OZONE") || param.contains("O3") {
      reading.ozone_aqi = Some(aqi);
      "Ozone"
    } else {
      continue;
    };
    if worst.is_none_or(|(w, _)| aqi > w) {
      worst = Some((aqi, name));
    }
  }

  let (aqi, pollutant) = worst?;
  reading.aqi = Some(aqi);
  reading.category = Some(AqiCategory::from_aqi(aqi));
  reading.primary_pollutant = Some(pollutant.to_string());
  Some(reading)
}

pub(crate) async fn air_quality(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<AirQuality>> {
  let key = secret(&config.airnow_api_key)
    .ok_or(SourceError::MissingCredentials(SOURCE))?;
  // The current-observation feed only describes today.
  if !is_today(date) {
    return Ok(None);
  }

  let req = client
    .get(join(&config.endpoints.airnow, "/aq/observation/latLong/current/"))
    .query(&[
      ("format", "application/json".to_string()),
      ("latitude", location.latitude.to_string()),
      ("longitude", location.longitude.to_string()),
      ("distance", RADIUS_MILES.to_string()),
      ("API_KEY", key.to_string()),
    ]);
  let observations: Vec<Observation> = get_json(req, SOURCE).await?;
  Ok(summarise(&observations))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn obs(parameter: &str, aqi: Option<i64>) -> Observation {
    Observation { parameter: parameter.to_string(), aqi }
  }

  #[test]
  fn worst_pollutant_wins() {
    let air = summarise(&[obs("O3", Some(38)), obs("PM2.5", Some(112))]).unwrap();
    assert_eq!(air.aqi, Some(112));
    assert_eq!(air.category, Some(AqiCategory::UnhealthyForSensitiveGroups));
    assert_eq!(air.primary_pollutant.as_deref(), Some("PM2.5"));
    assert_eq!(air.ozone_aqi, Some(38));
  }

  #[test]
  fn nothing_usable_is_none() {
    assert!(summarise(&[]).is_none());
    assert!(summarise(&[obs("PM10", Some(20)), obs("O3", None)]).is_none());
  }
}
