//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings with fixed microsecond precision, so they
//! order correctly as text. Dates are `YYYY-MM-DD`. Structured chapter fields
//! are compact JSON.

use std::{collections::BTreeSet, str::FromStr as _};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use tidings_core::{
  ComposerKind,
  chapter::{
    Chapter, ChapterSummary, ConditionsSnapshot, SNIPPET_CHARS, snippet,
  },
  news::NewsItem,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Encoding(format!("bad timestamp {s:?}: {e}")))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Encoding(format!("bad date {s:?}: {e}")))
}

// ─── ComposerKind ────────────────────────────────────────────────────────────

pub fn encode_kind(kind: ComposerKind) -> String { kind.to_string() }

pub fn decode_kind(s: &str) -> Result<ComposerKind> {
  ComposerKind::from_str(s)
    .map_err(|_| Error::Encoding(format!("unknown composer: {s:?}")))
}

// ─── News ids ────────────────────────────────────────────────────────────────

pub fn encode_ids(ids: &BTreeSet<i64>) -> Result<String> {
  Ok(serde_json::to_string(ids)?)
}

pub fn decode_ids(s: &str) -> Result<BTreeSet<i64>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const NEWS_COLUMNS: &str = "news_item_id, headline, summary, article_url, \
                                author, published_at, fetched_at";

/// Raw values read directly from a `news_items` row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNewsItem {
  pub news_item_id: i64,
  pub headline:     String,
  pub summary:      String,
  pub article_url:  String,
  pub author:       Option<String>,
  pub published_at: Option<String>,
  pub fetched_at:   String,
}

impl RawNewsItem {
  /// Read a row selected with [`NEWS_COLUMNS`].
  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      news_item_id: row.get(0)?,
      headline:     row.get(1)?,
      summary:      row.get(2)?,
      article_url:  row.get(3)?,
      author:       row.get(4)?,
      published_at: row.get(5)?,
      fetched_at:   row.get(6)?,
    })
  }

  pub fn into_item(self) -> Result<NewsItem> {
    Ok(NewsItem {
      id:           self.news_item_id,
      headline:     self.headline,
      summary:      self.summary,
      article_url:  self.article_url,
      author:       self.author,
      published_at: self.published_at.as_deref().map(decode_dt).transpose()?,
      fetched_at:   decode_dt(&self.fetched_at)?,
    })
  }
}

pub const CHAPTER_COLUMNS: &str = "chapter_id, chapter_date, title, body, \
                                   snapshot, used_news_item_ids, composed_by, \
                                   context, created_at, updated_at";

/// Raw strings read directly from a `chapters` row.
pub struct RawChapter {
  pub chapter_id:         String,
  pub chapter_date:       String,
  pub title:              String,
  pub body:               String,
  pub snapshot:           String,
  pub used_news_item_ids: String,
  pub composed_by:        String,
  pub context:            String,
  pub created_at:         String,
  pub updated_at:         Option<String>,
}

impl RawChapter {
  /// Read a row selected with [`CHAPTER_COLUMNS`].
  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      chapter_id:         row.get(0)?,
      chapter_date:       row.get(1)?,
      title:              row.get(2)?,
      body:               row.get(3)?,
      snapshot:           row.get(4)?,
      used_news_item_ids: row.get(5)?,
      composed_by:        row.get(6)?,
      context:            row.get(7)?,
      created_at:         row.get(8)?,
      updated_at:         row.get(9)?,
    })
  }

  pub fn into_chapter(self) -> Result<Chapter> {
    Ok(Chapter {
      id:                 decode_uuid(&self.chapter_id)?,
      chapter_date:       decode_date(&self.chapter_date)?,
      title:              self.title,
      body:               self.body,
      snapshot:           serde_json::from_str(&self.snapshot)?,
      used_news_item_ids: decode_ids(&self.used_news_item_ids)?,
      composed_by:        decode_kind(&self.composed_by)?,
      context:            serde_json::from_str(&self.context)?,
      created_at:         decode_dt(&self.created_at)?,
      updated_at:         self.updated_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

pub const SUMMARY_COLUMNS: &str = "chapter_id, chapter_date, title, body, snapshot";

/// The subset of a `chapters` row an archive listing needs.
pub struct RawSummary {
  pub chapter_id:   String,
  pub chapter_date: String,
  pub title:        String,
  pub body:         String,
  pub snapshot:     String,
}

impl RawSummary {
  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      chapter_id:   row.get(0)?,
      chapter_date: row.get(1)?,
      title:        row.get(2)?,
      body:         row.get(3)?,
      snapshot:     row.get(4)?,
    })
  }

  pub fn into_summary(self) -> Result<ChapterSummary> {
    let snapshot: ConditionsSnapshot = serde_json::from_str(&self.snapshot)?;
    Ok(ChapterSummary {
      id:           decode_uuid(&self.chapter_id)?,
      chapter_date: decode_date(&self.chapter_date)?,
      snippet:      snippet(&self.body, SNIPPET_CHARS),
      title:        self.title,
      season:       snapshot.season,
    })
  }
}
