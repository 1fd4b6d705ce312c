//! Field notes: recent bird sightings from eBird, the current NWS forecast
//! period with active alerts, and the USGS river gauge.
//!
//! All three report the present, so any date other than today yields
//! `Ok(None)` without a request.

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, header::ACCEPT};
use serde::Deserialize;
use tidings_core::{
  chapter::snippet,
  context::{BirdSighting, FlowStatus, MarineForecast, RiverFlow},
};

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig, secret},
  http::{get_json, is_today, join},
};

// ─── Birds ───────────────────────────────────────────────────────────────────

const EBIRD: &str = "ebird";
const SIGHTING_DAYS: &str = "3";
const MAX_SIGHTINGS: &str = "5";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Observation {
  com_name: String,
  sci_name: Option<String>,
  loc_name: Option<String>,
  obs_dt:   Option<String>,
  how_many: Option<u32>,
}

impl From<Observation> for BirdSighting {
  fn from(o: Observation) -> Self {
    BirdSighting {
      common_name:     o.com_name,
      scientific_name: o.sci_name,
      location:        o.loc_name,
      observed_at:     o.obs_dt,
      count:           o.how_many,
    }
  }
}

pub(crate) async fn bird_sightings(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<Vec<BirdSighting>>> {
  let key = secret(&config.ebird_api_key)
    .ok_or(SourceError::MissingCredentials(EBIRD))?;
  if !is_today(date) {
    return Ok(None);
  }

  let path = format!("/v2/data/obs/{}/recent", location.ebird_region);
  let req = client
    .get(join(&config.endpoints.ebird, &path))
    .header("x-ebirdapitoken", key)
    .query(&[("back", SIGHTING_DAYS), ("maxResults", MAX_SIGHTINGS)]);
  let observations: Vec<Observation> = get_json(req, EBIRD).await?;

  let sightings: Vec<BirdSighting> = observations.into_iter().map(Into::into).collect();
  Ok((!sightings.is_empty()).then_some(sightings))
}

// ─── Forecast ────────────────────────────────────────────────────────────────

const NWS: &str = "nws";
const GEO_JSON: &str = "application/geo+json";
const CONDITIONS_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Point {
  properties: PointProperties,
}

#[derive(Debug, Deserialize)]
struct PointProperties {
  /// Absolute URL of the gridpoint forecast.
  forecast: String,
}

#[derive(Debug, Deserialize)]
struct Forecast {
  properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
  #[serde(default)]
  periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Period {
  name:              Option<String>,
  detailed_forecast: Option<String>,
  wind_speed:        Option<String>,
}

#[derive(Debug, Deserialize)]
struct Alerts {
  #[serde(default)]
  features: Vec<Alert>,
}

#[derive(Debug, Deserialize)]
struct Alert {
  properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
struct AlertProperties {
  event: Option<String>,
}

fn coordinates(location: &Location) -> String {
  format!("{:.4},{:.4}", location.latitude, location.longitude)
}

fn geo_json(req: RequestBuilder) -> RequestBuilder {
  req.header(ACCEPT, GEO_JSON)
}

pub(crate) async fn marine_forecast(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<MarineForecast>> {
  if !is_today(date) {
    return Ok(None);
  }

  let path = format!("/points/{}", coordinates(location));
  let point: Point = get_json(geo_json(client.get(join(&config.endpoints.nws, &path))), NWS).await?;
  let forecast: Forecast = get_json(geo_json(client.get(&point.properties.forecast)), NWS).await?;

  let Some(current) = forecast.properties.periods.into_iter().next() else {
    return Ok(None);
  };
  let alerts = active_alerts(client, config, location).await;

  Ok(Some(MarineForecast {
    period:     current.name,
    conditions: current
      .detailed_forecast
      .map(|text| snippet(&text, CONDITIONS_CHARS)),
    wind:       current.wind_speed,
    alerts,
  }))
}

/// Names of the alerts in effect. A failed lookup is logged and reads as
/// none, so the forecast itself still arrives.
async fn active_alerts(client: &Client, config: &SourcesConfig, location: &Location) -> Vec<String> {
  let point = coordinates(location);
  let req = geo_json(
    client
      .get(join(&config.endpoints.nws, "/alerts/active"))
      .query(&[("point", point.as_str())]),
  );
  match get_json::<Alerts>(req, NWS).await {
    Ok(alerts) => alerts
      .features
      .into_iter()
      .filter_map(|a| a.properties.event)
      .filter(|event| !event.trim().is_empty())
      .collect(),
    Err(e) => {
      tracing::debug!(error = %e, "could not load alerts");
      Vec::new()
    }
  }
}

// ─── River ───────────────────────────────────────────────────────────────────

const USGS: &str = "usgs";
const DISCHARGE: &str = "00060";
const GAUGE_HEIGHT: &str = "00065";
/// USGS marks a missing sample with this value unless the series says
/// otherwise.
const NO_DATA: f64 = -999_999.0;

#[derive(Debug, Deserialize)]
pub(crate) struct Instantaneous {
  value: Series,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Series {
  #[serde(default)]
  time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSeries {
  source_info: Option<SourceInfo>,
  variable:    Variable,
  #[serde(default)]
  values:      Vec<Samples>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceInfo {
  site_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Variable {
  #[serde(default)]
  variable_code: Vec<Code>,
  no_data_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Code {
  value: String,
}

#[derive(Debug, Deserialize)]
struct Samples {
  #[serde(default)]
  value: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
  value: String,
}

impl TimeSeries {
  fn code(&self) -> Option<&str> {
    self.variable.variable_code.first().map(|c| c.value.as_str())
  }

  /// Newest sample that is a real measurement.
  fn latest(&self) -> Option<f64> {
    let missing = self.variable.no_data_value.unwrap_or(NO_DATA);
    self
      .values
      .first()?
      .value
      .iter()
      .rev()
      .filter_map(|s| s.value.trim().parse::<f64>().ok())
      .find(|v| *v != missing)
  }
}

pub(crate) fn river_reading(response: &Instantaneous) -> Option<RiverFlow> {
  let series = &response.value.time_series;
  let latest = |code: &str| {
    series
      .iter()
      .find(|s| s.code() == Some(code))
      .and_then(TimeSeries::latest)
  };

  let discharge_cfs = latest(DISCHARGE);
  let gauge_height_ft = latest(GAUGE_HEIGHT);
  if discharge_cfs.is_none() && gauge_height_ft.is_none() {
    return None;
  }

  Some(RiverFlow {
    site: series
      .iter()
      .find_map(|s| s.source_info.as_ref()?.site_name.clone()),
    discharge_cfs,
    gauge_height_ft,
    status: discharge_cfs.map(FlowStatus::from_discharge_cfs),
  })
}

pub(crate) async fn river_flow(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<RiverFlow>> {
  if !is_today(date) {
    return Ok(None);
  }

  let parameters = format!("{DISCHARGE},{GAUGE_HEIGHT}");
  let req = client
    .get(join(&config.endpoints.usgs, "/nwis/iv/"))
    .query(&[
      ("format", "json"),
      ("sites", location.river_gauge.as_str()),
      ("parameterCd", parameters.as_str()),
      ("siteStatus", "active"),
    ]);
  let response: Instantaneous = get_json(req, USGS).await?;
  Ok(river_reading(&response))
}
