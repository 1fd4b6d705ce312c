//! Planets and meteor showers from static calendars.
//!
//! Peak dates drift by a day or so from year to year; the calendars keep
//! month and day only and are applied to whatever year is asked about.

use chrono::{Datelike, Days, NaiveDate};
use tidings_core::context::{MeteorShower, PlanetSighting, Planets, SkyWindow};

// ─── Meteor showers ──────────────────────────────────────────────────────────

struct Shower {
  name:       &'static str,
  /// (month, day) of the first and last peak nights.
  peak_start: (u32, u32),
  peak_end:   (u32, u32),
  rate:       &'static str,
  radiant:    &'static str,
}

const SHOWERS: &[Shower] = &[
  Shower { name: "Quadrantids", peak_start: (1, 3), peak_end: (1, 4), rate: "60-120 per hour", radiant: "Boötes" },
  Shower { name: "Lyrids", peak_start: (4, 21), peak_end: (4, 23), rate: "10-20 per hour", radiant: "Lyra" },
  Shower { name: "Eta Aquariids", peak_start: (5, 5), peak_end: (5, 7), rate: "20-40 per hour", radiant: "Aquarius" },
  Shower { name: "Delta Aquariids", peak_start: (7, 28), peak_end: (7, 30), rate: "15-20 per hour", radiant: "Aquarius" },
  Shower { name: "Perseids", peak_start: (8, 11), peak_end: (8, 13), rate: "50-100 per hour", radiant: "Perseus" },
  Shower { name: "Draconids", peak_start: (10, 8), peak_end: (10, 9), rate: "5-10 per hour", radiant: "Draco" },
  Shower { name: "Orionids", peak_start: (10, 20), peak_end: (10, 22), rate: "15-20 per hour", radiant: "Orion" },
  Shower { name: "Taurids", peak_start: (11, 4), peak_end: (11, 12), rate: "5-10 per hour", radiant: "Taurus" },
  Shower { name: "Leonids", peak_start: (11, 17), peak_end: (11, 18), rate: "10-15 per hour", radiant: "Leo" },
  Shower { name: "Geminids", peak_start: (12, 13), peak_end: (12, 14), rate: "120-150 per hour", radiant: "Gemini" },
  Shower { name: "Ursids", peak_start: (12, 21), peak_end: (12, 23), rate: "5-10 per hour", radiant: "Ursa Minor" },
];

/// Days either side of the peak during which a shower counts as active.
const ACTIVITY_WINDOW_DAYS: u64 = 3;

impl Shower {
  /// Peak window in `year`, or `None` if the calendar date does not exist.
  fn peak_in(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, self.peak_start.0, self.peak_start.1)?;
    let end = NaiveDate::from_ymd_opt(year, self.peak_end.0, self.peak_end.1)?;
    Some((start, end))
  }

  /// Whether `date` falls in the peak window widened by the activity
  /// window. The widening clamps at the ends of the calendar.
  fn active_on(peak: (NaiveDate, NaiveDate), date: NaiveDate) -> bool {
    let window = Days::new(ACTIVITY_WINDOW_DAYS);
    let from = peak.0.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
    let until = peak.1.checked_add_days(window).unwrap_or(NaiveDate::MAX);
    from <= date && date <= until
  }
}

pub(crate) fn meteor_shower(date: NaiveDate) -> Option<MeteorShower> {
  // Neighbouring years catch windows that straddle New Year.
  let year = date.year();
  let (shower, peak) = [year.checked_sub(1), Some(year), year.checked_add(1)]
    .into_iter()
    .flatten()
    .flat_map(|year| {
      SHOWERS
        .iter()
        .filter_map(move |s| s.peak_in(year).map(|peak| (s, peak)))
    })
    .find(|(_, peak)| Shower::active_on(*peak, date))?;

  let peak_tonight = peak.0 <= date && date <= peak.1;
  let expected_rate = if peak_tonight {
    shower.rate.to_string()
  } else {
    format!("building to {}", shower.rate)
  };

  Some(MeteorShower {
    name:          Some(shower.name.to_string()),
    peak_tonight:  Some(peak_tonight),
    expected_rate: Some(expected_rate),
    radiant:       Some(shower.radiant.to_string()),
  })
}

// ─── Planets ─────────────────────────────────────────────────────────────────

/// Inclusive (start month, start day, end month, end day).
type Span = (u32, u32, u32, u32);

struct Visibility {
  planet:    &'static str,
  evening:   &'static [Span],
  morning:   &'static [Span],
  all_night: &'static [Span],
}

const VISIBILITY: &[Visibility] = &[
  Visibility {
    planet:    "Mercury",
    evening:   &[(1, 15, 2, 15), (5, 1, 5, 31), (8, 20, 9, 20), (12, 10, 12, 31)],
    morning:   &[(3, 1, 3, 31), (7, 1, 7, 20), (10, 15, 11, 15)],
    all_night: &[],
  },
  Visibility {
    planet:    "Venus",
    evening:   &[(1, 1, 3, 20)],
    morning:   &[(4, 15, 12, 31)],
    all_night: &[],
  },
  Visibility {
    planet:    "Mars",
    evening:   &[(1, 1, 6, 30)],
    morning:   &[(9, 1, 12, 31)],
    all_night: &[],
  },
  Visibility {
    planet:    "Jupiter",
    evening:   &[(1, 1, 5, 15)],
    morning:   &[(7, 1, 9, 30)],
    all_night: &[(10, 1, 12, 31)],
  },
  Visibility {
    planet:    "Saturn",
    evening:   &[(1, 1, 2, 28)],
    morning:   &[(6, 1, 8, 31)],
    all_night: &[(9, 1, 10, 31)],
  },
];

/// Planets needed in one part of the night to call it a parade.
const PARADE_MIN: usize = 3;

fn within(date: NaiveDate, spans: &[Span]) -> bool {
  let md = (date.month(), date.day());
  spans.iter().any(|&(sm, sd, em, ed)| {
    let (start, end) = ((sm, sd), (em, ed));
    if start <= end {
      start <= md && md <= end
    } else {
      md >= start || md <= end
    }
  })
}

pub(crate) fn planets(date: NaiveDate) -> Planets {
  let visible: Vec<PlanetSighting> = VISIBILITY
    .iter()
    .filter_map(|v| {
      let window = if within(date, v.evening) {
        SkyWindow::Evening
      } else if within(date, v.morning) {
        SkyWindow::Morning
      } else if within(date, v.all_night) {
        SkyWindow::AllNight
      } else {
        return None;
      };
      Some(PlanetSighting { name: v.planet.to_string(), window })
    })
    .collect();

  let count = |w: SkyWindow| {
    visible
      .iter()
      .filter(|p| p.window == w || p.window == SkyWindow::AllNight)
      .count()
  };
  let parade = count(SkyWindow::Evening) >= PARADE_MIN
    || count(SkyWindow::Morning) >= PARADE_MIN;

  Planets { visible, parade }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn perseids_peak_and_shoulder() {
    let peak = meteor_shower(date(2025, 8, 12)).unwrap();
    assert_eq!(peak.name.as_deref(), Some("Perseids"));
    assert_eq!(peak.peak_tonight, Some(true));
    assert_eq!(peak.expected_rate.as_deref(), Some("50-100 per hour"));

    let early = meteor_shower(date(2025, 8, 9)).unwrap();
    assert_eq!(early.peak_tonight, Some(false));
    assert!(early.expected_rate.unwrap().starts_with("building to"));

    assert!(meteor_shower(date(2025, 8, 20)).is_none());
  }

  #[test]
  fn quadrantids_reach_back_into_december() {
    let s = meteor_shower(date(2025, 12, 31)).unwrap();
    assert_eq!(s.name.as_deref(), Some("Quadrantids"));
    assert_eq!(s.peak_tonight, Some(false));
  }

  #[test]
  fn calendar_extremes_do_not_overflow() {
    assert!(meteor_shower(NaiveDate::MAX).is_none());
    // The Quadrantid window reaches back to the first day there is.
    assert!(meteor_shower(NaiveDate::MIN).is_some());
    assert!(!planets(NaiveDate::MAX).visible.is_empty());
  }

  #[test]
  fn january_evening_parade() {
    let p = planets(date(2025, 1, 20));
    let names: Vec<&str> = p.visible.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Mercury", "Venus", "Mars", "Jupiter", "Saturn"]);
    assert!(p.visible.iter().all(|s| s.window == SkyWindow::Evening));
    assert!(p.parade);
  }

  #[test]
  fn all_night_counts_toward_both_windows() {
    let p = planets(date(2025, 10, 5));
    let jupiter = p.visible.iter().find(|s| s.name == "Jupiter").unwrap();
    assert_eq!(jupiter.window, SkyWindow::AllNight);
    // Venus and Mars in the morning plus Jupiter and Saturn all night.
    assert!(p.parade);
  }
}
