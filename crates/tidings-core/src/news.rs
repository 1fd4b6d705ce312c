//! News items: scraped headlines keyed by their article URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::NewsBrief;

/// A persisted news item. `article_url` is the natural key; `id` is a
/// surrogate assigned on first insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
  pub id:           i64,
  pub headline:     String,
  pub summary:      String,
  pub article_url:  String,
  pub author:       Option<String>,
  pub published_at: Option<DateTime<Utc>>,
  /// Refreshed on every upsert, changed or not.
  pub fetched_at:   DateTime<Utc>,
}

impl NewsItem {
  pub fn brief(&self) -> NewsBrief {
    NewsBrief {
      id:          self.id,
      headline:    self.headline.clone(),
      summary:     self.summary.clone(),
      article_url: self.article_url.clone(),
    }
  }
}

/// A validated record ready for [`NewsStore::upsert`](crate::store::NewsStore::upsert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
  pub headline:     String,
  pub summary:      String,
  pub article_url:  String,
  pub author:       Option<String>,
  pub published_at: Option<DateTime<Utc>>,
}

/// A record as handed over by the scraper. Nothing is trusted yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedRecord {
  #[serde(default)]
  pub headline:     Option<String>,
  #[serde(default)]
  pub summary:      Option<String>,
  #[serde(default)]
  pub article_url:  Option<String>,
  #[serde(default)]
  pub author:       Option<String>,
  #[serde(default)]
  pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
  #[error("missing headline")]
  MissingHeadline,
  #[error("missing article url")]
  MissingUrl,
  #[error("article url is not http(s): {0:?}")]
  InvalidUrl(String),
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
    .filter(|v| !v.is_empty())
}

impl TryFrom<ScrapedRecord> for NewsRecord {
  type Error = RecordError;

  fn try_from(raw: ScrapedRecord) -> Result<Self, Self::Error> {
    let headline =
      non_blank(raw.headline).ok_or(RecordError::MissingHeadline)?;
    let article_url = raw
      .article_url
      .map(|u| u.trim().to_string())
      .filter(|u| !u.is_empty())
      .ok_or(RecordError::MissingUrl)?;

    if !(article_url.starts_with("https://")
      || article_url.starts_with("http://"))
    {
      return Err(RecordError::InvalidUrl(article_url));
    }

    Ok(Self {
      headline,
      summary: non_blank(raw.summary).unwrap_or_default(),
      article_url,
      author: non_blank(raw.author),
      published_at: raw.published_at,
    })
  }
}

/// How an upsert changed the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
  /// The URL was new.
  Inserted,
  /// A mutable field changed.
  Updated,
  /// Identical content; only `fetched_at` moved.
  Refreshed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upserted {
  pub item:    NewsItem,
  pub outcome: UpsertOutcome,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(headline: Option<&str>, url: Option<&str>) -> ScrapedRecord {
    ScrapedRecord {
      headline: headline.map(str::to_string),
      article_url: url.map(str::to_string),
      ..Default::default()
    }
  }

  #[test]
  fn valid_record_is_normalised() {
    let mut r = raw(Some("  Town   meeting \n tonight "), Some(" https://example.org/a "));
    r.author = Some("   ".into());
    let rec = NewsRecord::try_from(r).unwrap();
    assert_eq!(rec.headline, "Town meeting tonight");
    assert_eq!(rec.article_url, "https://example.org/a");
    assert_eq!(rec.summary, "");
    assert_eq!(rec.author, None);
  }

  #[test]
  fn malformed_records_are_rejected() {
    assert_eq!(
      NewsRecord::try_from(raw(None, Some("https://x.org"))),
      Err(RecordError::MissingHeadline)
    );
    assert_eq!(
      NewsRecord::try_from(raw(Some(" "), Some("https://x.org"))),
      Err(RecordError::MissingHeadline)
    );
    assert_eq!(
      NewsRecord::try_from(raw(Some("Hi"), None)),
      Err(RecordError::MissingUrl)
    );
    assert!(matches!(
      NewsRecord::try_from(raw(Some("Hi"), Some("ftp://x.org"))),
      Err(RecordError::InvalidUrl(_))
    ));
  }
}
