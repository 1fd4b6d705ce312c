//! Settings for the signal clients and the AI composer.
//!
//! Every field has a default, so an empty config section is valid. Secrets
//! default to `None`, and a source without its key reports
//! [`SourceError::MissingCredentials`](crate::SourceError::MissingCredentials).

use serde::{Deserialize, Serialize};

/// The fixed place the chapters are about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
  pub name:         String,
  pub latitude:     f64,
  pub longitude:    f64,
  /// NOAA CO-OPS tide prediction station.
  pub tide_station: String,
  /// NDBC buoy for waves and water temperature.
  pub ndbc_station: String,
  /// County FIPS code for the drought monitor.
  pub drought_fips: String,
  /// USGS stream gauge on the town's river.
  pub river_gauge:  String,
  /// eBird region code for bird sightings.
  pub ebird_region: String,
}

impl Default for Location {
  fn default() -> Self {
    Self {
      name:         "Ipswich, MA".to_string(),
      latitude:     42.6792,
      longitude:    -70.8417,
      tide_station: "8440452".to_string(),
      ndbc_station: "44098".to_string(),
      drought_fips: "25009".to_string(),
      river_gauge:  "01101500".to_string(),
      ebird_region: "US-MA-009".to_string(),
    }
  }
}

/// Base URLs for every remote source. Overridden in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
  pub weather: String,
  pub tide:    String,
  pub ndbc:    String,
  pub airnow:  String,
  pub drought: String,
  pub ebird:   String,
  pub nws:     String,
  pub usgs:    String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      weather: "https://api.openweathermap.org".to_string(),
      tide:    "https://api.tidesandcurrents.noaa.gov".to_string(),
      ndbc:    "https://www.ndbc.noaa.gov".to_string(),
      airnow:  "https://www.airnowapi.org".to_string(),
      drought: "https://usdmdataservices.unl.edu".to_string(),
      ebird:   "https://api.ebird.org".to_string(),
      nws:     "https://api.weather.gov".to_string(),
      usgs:    "https://waterservices.usgs.gov".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
  pub weather_api_key: Option<String>,
  pub airnow_api_key:  Option<String>,
  pub ebird_api_key:   Option<String>,
  /// Per-request HTTP timeout.
  pub timeout_secs:    u64,
  pub endpoints:       Endpoints,
}

impl Default for SourcesConfig {
  fn default() -> Self {
    Self {
      weather_api_key: None,
      airnow_api_key:  None,
      ebird_api_key:   None,
      timeout_secs:    15,
      endpoints:       Endpoints::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
  pub api_key:        Option<String>,
  pub model:          String,
  pub max_tokens:     u32,
  pub timeout_secs:   u64,
  pub base_url:       String,
  pub max_body_chars: usize,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      api_key:        None,
      model:          "claude-sonnet-4-20250514".to_string(),
      max_tokens:     1024,
      timeout_secs:   60,
      base_url:       "https://api.anthropic.com".to_string(),
      max_body_chars: 4000,
    }
  }
}

/// Treat blank secrets the same as missing ones, so `KEY=""` in the
/// environment does not count as configured.
pub(crate) fn secret(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
