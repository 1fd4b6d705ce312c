//! Season and calendar arithmetic.
//!
//! Seasons follow the astronomical calendar rather than meteorological
//! months, so 20 March is the first day of spring and 21 December the first
//! day of winter.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

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
#[strum(ascii_case_insensitive)]
pub enum Season {
  Winter,
  Spring,
  Summer,
  Autumn,
}

impl Season {
  /// The astronomical season containing `date`.
  pub fn for_date(date: NaiveDate) -> Self {
    match (date.month(), date.day()) {
      (12, d) if d >= 21 => Season::Winter,
      (1 | 2, _) => Season::Winter,
      (3, d) if d < 20 => Season::Winter,
      (3..=5, _) => Season::Spring,
      (6, d) if d < 21 => Season::Spring,
      (6..=8, _) => Season::Summer,
      (9, d) if d < 22 => Season::Summer,
      _ => Season::Autumn,
    }
  }

  pub fn as_lower(self) -> &'static str {
    match self {
      Season::Winter => "winter",
      Season::Spring => "spring",
      Season::Summer => "summer",
      Season::Autumn => "autumn",
    }
  }
}

/// Coarse day length, used to colour prose rather than compute daylight.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayLength {
  Short,
  Medium,
  Long,
}

impl DayLength {
  pub fn for_month(month: u32) -> Self {
    match month {
      11 | 12 | 1 | 2 => DayLength::Short,
      5..=8 => DayLength::Long,
      _ => DayLength::Medium,
    }
  }
}

/// Everything the engine knows about a date without asking anyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonInfo {
  pub name:        Season,
  pub month_name:  String,
  pub day_of_week: String,
  pub day_length:  DayLength,
  pub date:        NaiveDate,
}

impl SeasonInfo {
  pub fn for_date(date: NaiveDate) -> Self {
    Self {
      name:        Season::for_date(date),
      month_name:  date.format("%B").to_string(),
      day_of_week: date.format("%A").to_string(),
      day_length:  DayLength::for_month(date.month()),
      date,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn astronomical_boundaries() {
    assert_eq!(Season::for_date(d(2025, 3, 19)), Season::Winter);
    assert_eq!(Season::for_date(d(2025, 3, 20)), Season::Spring);
    assert_eq!(Season::for_date(d(2025, 6, 20)), Season::Spring);
    assert_eq!(Season::for_date(d(2025, 6, 21)), Season::Summer);
    assert_eq!(Season::for_date(d(2025, 9, 21)), Season::Summer);
    assert_eq!(Season::for_date(d(2025, 9, 22)), Season::Autumn);
    assert_eq!(Season::for_date(d(2025, 12, 20)), Season::Autumn);
    assert_eq!(Season::for_date(d(2025, 12, 21)), Season::Winter);
    assert_eq!(Season::for_date(d(2026, 1, 15)), Season::Winter);
  }

  #[test]
  fn season_info_names() {
    let info = SeasonInfo::for_date(d(2025, 1, 15));
    assert_eq!(info.month_name, "January");
    assert_eq!(info.day_of_week, "Wednesday");
    assert_eq!(info.day_length, DayLength::Short);
    assert_eq!(info.name, Season::Winter);
  }

  #[test]
  fn season_parses_case_insensitively() {
    assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
    assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Autumn);
    assert!("fall".parse::<Season>().is_err());
  }
}
