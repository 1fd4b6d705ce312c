//! Chapters: one persisted narrative per calendar date.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  ComposerKind, Composition, StoryContext,
  context::{RecentChapter, TideState},
  season::Season,
};

/// Conditions copied into the chapter at generation time. These never track
/// later changes to the live context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionsSnapshot {
  pub weather_summary: Option<String>,
  pub condition:       Option<String>,
  pub temp_high:       Option<f64>,
  pub temp_low:        Option<f64>,
  pub tide_state:      Option<TideState>,
  pub season:          Season,
  pub month_name:      String,
  pub day_of_week:     String,
}

impl ConditionsSnapshot {
  pub fn of(context: &StoryContext) -> Self {
    let weather = context.weather.as_ref();
    Self {
      weather_summary: weather.map(|w| w.summary()),
      condition:       weather.and_then(|w| w.condition.clone()),
      temp_high:       weather.and_then(|w| w.temp_high),
      temp_low:        weather.and_then(|w| w.temp_low),
      tide_state:      context.tide_state(),
      season:          context.season.name,
      month_name:      context.season.month_name.clone(),
      day_of_week:     context.season.day_of_week.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
  pub id:                 Uuid,
  pub chapter_date:       NaiveDate,
  pub title:              String,
  pub body:               String,
  pub snapshot:           ConditionsSnapshot,
  pub used_news_item_ids: BTreeSet<i64>,
  pub composed_by:        ComposerKind,
  /// The full context the chapter was composed from.
  pub context:            StoryContext,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         Option<DateTime<Utc>>,
}

/// Input to [`ChapterStore::save`](crate::store::ChapterStore::save).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChapter {
  pub chapter_date:       NaiveDate,
  pub title:              String,
  pub body:               String,
  pub snapshot:           ConditionsSnapshot,
  pub used_news_item_ids: BTreeSet<i64>,
  pub composed_by:        ComposerKind,
  pub context:            StoryContext,
}

impl NewChapter {
  pub fn from_composition(
    context: StoryContext,
    composition: Composition,
    composed_by: ComposerKind,
  ) -> Self {
    Self {
      chapter_date: context.date,
      title: composition.title,
      body: composition.body,
      snapshot: ConditionsSnapshot::of(&context),
      used_news_item_ids: composition.used_news_item_ids,
      composed_by,
      context,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
  Created,
  Replaced,
}

/// Archive listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
  pub id:           Uuid,
  pub chapter_date: NaiveDate,
  pub title:        String,
  pub snippet:      String,
  pub season:       Season,
}

/// Length budget for archive snippets.
pub const SNIPPET_CHARS: usize = 100;

impl ChapterSummary {
  pub fn of(chapter: &Chapter) -> Self {
    Self {
      id:           chapter.id,
      chapter_date: chapter.chapter_date,
      title:        chapter.title.clone(),
      snippet:      snippet(&chapter.body, SNIPPET_CHARS),
      season:       chapter.snapshot.season,
    }
  }
}

/// Length budget for a recent chapter's opening line.
pub const OPENING_CHARS: usize = 150;

impl RecentChapter {
  pub fn of(chapter: &Chapter) -> Self {
    Self {
      date:    chapter.chapter_date,
      title:   chapter.title.clone(),
      opening: opening(&chapter.body, OPENING_CHARS),
    }
  }
}

/// The first sentence of `body`, cut like a [`snippet`].
pub fn opening(body: &str, max: usize) -> String {
  let first = body.split_once('.').map_or(body, |(head, _)| head).trim();
  if first.is_empty() {
    return String::new();
  }
  snippet(&format!("{first}."), max)
}

/// Cut `body` to at most `max` characters at a word boundary, appending
/// `"..."` when anything was dropped.
pub fn snippet(body: &str, max: usize) -> String {
  let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
  if flat.chars().count() <= max {
    return flat;
  }
  let cut: String = flat.chars().take(max).collect();
  let trimmed = match cut.rfind(' ') {
    Some(idx) if idx > 0 => &cut[..idx],
    _ => cut.as_str(),
  };
  format!("{}...", trimmed.trim_end_matches([',', ';', ':', '.']))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// 1-based.
  pub page:      u32,
  pub page_size: u32,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { page: 1, page_size: 10 }
  }
}

impl PageRequest {
  pub const MAX_PAGE_SIZE: u32 = 50;

  pub fn offset(&self) -> u64 {
    u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivePage {
  pub items:     Vec<ChapterSummary>,
  pub total:     u64,
  pub page:      u32,
  pub page_size: u32,
  pub has_more:  bool,
}
