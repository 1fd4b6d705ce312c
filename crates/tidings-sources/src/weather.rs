//! Current conditions from OpenWeatherMap.
//!
//! Only the current observation is available without a paid plan, so any
//! date other than today yields `Ok(None)` and the aggregator's seasonal
//! estimate takes over.

use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tidings_core::context::Weather;

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig, secret},
  http::{get_json, is_today, join},
};

const SOURCE: &str = "openweathermap";

#[derive(Debug, Deserialize)]
struct Response {
  main:    Option<Main>,
  #[serde(default)]
  weather: Vec<Condition>,
  wind:    Option<Wind>,
  sys:     Option<Sys>,
}

#[derive(Debug, Deserialize)]
struct Main {
  temp:     Option<f64>,
  temp_max: Option<f64>,
  temp_min: Option<f64>,
  humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
  main:        Option<String>,
  description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Wind {
  speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Sys {
  sunrise: Option<i64>,
  sunset:  Option<i64>,
}

impl From<Response> for Weather {
  fn from(r: Response) -> Self {
    let main = r.main.as_ref();
    let condition = r.weather.into_iter().next();
    let sys = r.sys.as_ref();
    let at = |secs: Option<i64>| {
      secs.filter(|s| *s > 0).and_then(|s| DateTime::from_timestamp(s, 0))
    };

    Weather {
      temp_high:    main.and_then(|m| m.temp_max),
      temp_low:     main.and_then(|m| m.temp_min),
      temp_current: main.and_then(|m| m.temp),
      condition:    condition.as_ref().and_then(|c| c.main.clone()),
      description:  condition.and_then(|c| c.description),
      humidity:     main.and_then(|m| m.humidity),
      wind_speed:   r.wind.and_then(|w| w.speed),
      sunrise:      at(sys.and_then(|s| s.sunrise)),
      sunset:       at(sys.and_then(|s| s.sunset)),
      estimated:    false,
    }
  }
}

pub(crate) async fn fetch(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<Weather>> {
  let key = secret(&config.weather_api_key)
    .ok_or(SourceError::MissingCredentials(SOURCE))?;
  if !is_today(date) {
    return Ok(None);
  }

  let req = client
    .get(join(&config.endpoints.weather, "/data/2.5/weather"))
    .query(&[
      ("lat", location.latitude.to_string()),
      ("lon", location.longitude.to_string()),
      ("appid", key.to_string()),
      ("units", "imperial".to_string()),
    ]);
  let resp: Response = get_json(req, SOURCE).await?;
  Ok(Some(resp.into()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_payload_keeps_what_it_has() {
    let json = serde_json::json!({
      "main": { "temp": 33.4, "temp_max": 36.0, "temp_min": 29.1, "humidity": 71 },
      "weather": [{ "main": "Snow", "description": "light snow" }],
      "sys": { "sunrise": 1736079000, "sunset": 0 }
    });
    let resp: Response = serde_json::from_value(json).unwrap();
    let w = Weather::from(resp);

    assert_eq!(w.temp_high, Some(36.0));
    assert_eq!(w.condition.as_deref(), Some("Snow"));
    assert_eq!(w.description.as_deref(), Some("light snow"));
    assert_eq!(w.wind_speed, None);
    assert!(w.sunrise.is_some());
    assert!(w.sunset.is_none());
    assert!(!w.estimated);
  }
}
