//! High/low tide predictions from NOAA CO-OPS.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tidings_core::context::{Tide, TideState};

use crate::{
  Result, SourceError,
  config::{Location, SourcesConfig},
  http::{get_json, join},
};

const SOURCE: &str = "noaa-coops";

#[derive(Debug, Deserialize)]
struct Response {
  #[serde(default)]
  predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Deserialize)]
struct Prediction {
  /// `YYYY-MM-DD HH:MM`, GMT.
  t:    String,
  /// Height in feet above MLLW, as a string.
  v:    String,
  /// `H` or `L`.
  #[serde(rename = "type")]
  kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TideEvent {
  pub at:        DateTime<Utc>,
  pub height_ft: f64,
  pub high:      bool,
}

impl TryFrom<Prediction> for TideEvent {
  type Error = SourceError;

  fn try_from(p: Prediction) -> Result<Self> {
    let at = NaiveDateTime::parse_from_str(&p.t, "%Y-%m-%d %H:%M")
      .map_err(|e| SourceError::Decode(SOURCE, format!("time {:?}: {e}", p.t)))?
      .and_utc();
    let height_ft = p
      .v
      .trim()
      .parse()
      .map_err(|e| SourceError::Decode(SOURCE, format!("height {:?}: {e}", p.v)))?;
    Ok(Self { at, height_ft, high: p.kind.eq_ignore_ascii_case("H") })
  }
}

/// Derive the tide state at `reference` from a list of predicted extremes.
///
/// The event nearest `reference` sets the state: approaching a high means
/// rising, having passed one means falling, and the reverse for lows. The
/// first event after `reference` supplies the next time and height.
pub(crate) fn tide_at(events: &[TideEvent], reference: DateTime<Utc>) -> Option<Tide> {
  let closest = events
    .iter()
    .min_by_key(|e| (e.at - reference).num_seconds().abs())?;

  let state = match (closest.at > reference, closest.high) {
    (true, true) | (false, false) => TideState::Rising,
    (true, false) | (false, true) => TideState::Falling,
  };

  let next = events
    .iter()
    .filter(|e| e.at > reference)
    .min_by_key(|e| e.at);

  Some(Tide {
    state:     Some(state),
    next_time: next.map(|e| e.at),
    height_ft: next.map(|e| e.height_ft),
    estimated: false,
  })
}

/// The instant a day's tide is described at: now for today, otherwise
/// local midday.
fn reference_instant(date: NaiveDate) -> DateTime<Utc> {
  if date == Local::now().date_naive() {
    return Utc::now();
  }
  let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
  noon
    .and_local_timezone(Local)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|| noon.and_utc())
}

pub(crate) async fn fetch(
  client: &Client,
  config: &SourcesConfig,
  location: &Location,
  date: NaiveDate,
) -> Result<Option<Tide>> {
  // The window runs into the next day so a late-evening reference still
  // has a next event. There is none after the last representable date.
  let next_day = date
    .checked_add_days(Days::new(1))
    .ok_or(SourceError::NoData(SOURCE))?;
  let begin = date.format("%Y%m%d").to_string();
  let end = next_day.format("%Y%m%d").to_string();

  let req = client
    .get(join(&config.endpoints.tide, "/api/prod/datagetter"))
    .query(&[
      ("product", "predictions"),
      ("datum", "MLLW"),
      ("units", "english"),
      ("time_zone", "gmt"),
      ("interval", "hilo"),
      ("format", "json"),
      ("station", location.tide_station.as_str()),
      ("begin_date", begin.as_str()),
      ("end_date", end.as_str()),
    ]);
  let resp: Response = get_json(req, SOURCE).await?;

  let events = resp
    .predictions
    .into_iter()
    .map(TideEvent::try_from)
    .collect::<Result<Vec<_>>>()?;
  if events.is_empty() {
    return Err(SourceError::NoData(SOURCE));
  }

  Ok(tide_at(&events, reference_instant(date)))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(t: &str, v: &str, kind: &str) -> TideEvent {
    TideEvent::try_from(Prediction {
      t:    t.to_string(),
      v:    v.to_string(),
      kind: kind.to_string(),
    })
    .unwrap()
  }

  fn at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap().and_utc()
  }

  fn day() -> Vec<TideEvent> {
    vec![
      event("2025-01-05 03:10", "9.4", "H"),
      event("2025-01-05 09:25", "0.3", "L"),
      event("2025-01-05 15:40", "8.9", "H"),
      event("2025-01-05 21:50", "-0.2", "L"),
    ]
  }

  #[test]
  fn approaching_high_is_rising() {
    let tide = tide_at(&day(), at("2025-01-05 14:30")).unwrap();
    assert_eq!(tide.state, Some(TideState::Rising));
    assert_eq!(tide.height_ft, Some(8.9));
    assert_eq!(tide.next_time, Some(at("2025-01-05 15:40")));
  }

  #[test]
  fn just_past_high_is_falling() {
    let tide = tide_at(&day(), at("2025-01-05 04:00")).unwrap();
    assert_eq!(tide.state, Some(TideState::Falling));
    assert_eq!(tide.next_time, Some(at("2025-01-05 09:25")));
  }

  #[test]
  fn around_lows() {
    assert_eq!(
      tide_at(&day(), at("2025-01-05 09:00")).unwrap().state,
      Some(TideState::Falling)
    );
    assert_eq!(
      tide_at(&day(), at("2025-01-05 10:00")).unwrap().state,
      Some(TideState::Rising)
    );
  }

  #[test]
  fn after_last_event_has_no_next() {
    let tide = tide_at(&day(), at("2025-01-05 23:30")).unwrap();
    assert_eq!(tide.state, Some(TideState::Rising));
    assert_eq!(tide.next_time, None);
    assert!(tide_at(&[], at("2025-01-05 23:30")).is_none());
  }

  #[test]
  fn bad_height_is_a_decode_error() {
    let bad = TideEvent::try_from(Prediction {
      t:    "2025-01-05 03:10".into(),
      v:    "n/a".into(),
      kind: "H".into(),
    });
    assert!(matches!(bad, Err(SourceError::Decode(..))));
  }
}
