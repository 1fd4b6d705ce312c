//! Stand-ins used when weather or tide sources give nothing.

use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};
use tidings_core::context::{Tide, TideState, Weather};

/// Typical coastal conditions for the month, marked as an estimate.
pub fn seasonal_weather(date: NaiveDate) -> Weather {
  let (condition, description, low, high) = match date.month() {
    12 | 1 | 2 => ("Cold", "cold winter day along the coast", 28.0, 38.0),
    3..=5 => ("Mild", "cool spring day with sea breeze", 45.0, 58.0),
    6..=8 => ("Warm", "warm summer day by the shore", 68.0, 82.0),
    _ => ("Cool", "crisp autumn day in New England", 48.0, 62.0),
  };
  Weather {
    temp_high: Some(high),
    temp_low: Some(low),
    temp_current: Some((low + high) / 2.0),
    condition: Some(condition.to_string()),
    description: Some(description.to_string()),
    estimated: true,
    ..Default::default()
  }
}

/// Mean semidiurnal period in days.
const TIDAL_PERIOD_DAYS: f64 = 0.517;
const MEAN_HEIGHT_FT: f64 = 5.0;
const BASE_RANGE_FT: f64 = 4.5;
const LUNAR_MONTH_DAYS: f64 = 29.5;

/// A rough semidiurnal tide for `date`, with a spring/neap swing over the
/// lunar month. Good enough to colour prose; never a navigation aid.
pub fn simulated_tide(date: NaiveDate) -> Tide {
  let day = f64::from(date.ordinal());
  let cycle = day * TAU / TIDAL_PERIOD_DAYS;
  let level = (cycle.sin() + 1.0) / 2.0;

  let state = if level > 0.75 {
    TideState::High
  } else if level > 0.5 {
    TideState::Falling
  } else if level > 0.25 {
    TideState::Low
  } else {
    TideState::Rising
  };

  let lunar = (day % LUNAR_MONTH_DAYS) * TAU / (LUNAR_MONTH_DAYS / 2.0);
  let amplitude = BASE_RANGE_FT * (0.7 + 0.3 * lunar.cos().abs());
  let height = MEAN_HEIGHT_FT + amplitude * cycle.sin();

  Tide {
    state:     Some(state),
    next_time: None,
    height_ft: Some((height * 10.0).round() / 10.0),
    estimated: true,
  }
}
