//! Batch ingest of scraped news.

use serde::{Deserialize, Serialize};
use tidings_core::{
  news::{NewsRecord, ScrapedRecord, UpsertOutcome},
  store::NewsStore,
};

/// A record that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
  /// Position in the submitted batch.
  pub index:  usize,
  pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
  pub inserted:  usize,
  pub updated:   usize,
  pub refreshed: usize,
  pub rejected:  Vec<Rejection>,
}

impl IngestReport {
  pub fn accepted(&self) -> usize {
    self.inserted + self.updated + self.refreshed
  }
}

/// Validate and upsert each record in turn. A bad record, or a store error
/// on one record, is logged and reported but never stops the batch.
pub async fn ingest<N>(store: &N, records: Vec<ScrapedRecord>) -> IngestReport
where
  N: NewsStore,
{
  let mut report = IngestReport::default();

  for (index, raw) in records.into_iter().enumerate() {
    let record = match NewsRecord::try_from(raw) {
      Ok(r) => r,
      Err(e) => {
        tracing::warn!(index, error = %e, "rejecting malformed news record");
        report.rejected.push(Rejection { index, reason: e.to_string() });
        continue;
      }
    };

    match store.upsert(record).await {
      Ok(up) => match up.outcome {
        UpsertOutcome::Inserted => report.inserted += 1,
        UpsertOutcome::Updated => report.updated += 1,
        UpsertOutcome::Refreshed => report.refreshed += 1,
      },
      Err(e) => {
        tracing::warn!(index, error = %e, "could not store news record");
        report.rejected.push(Rejection { index, reason: e.to_string() });
      }
    }
  }

  tracing::info!(
    inserted = report.inserted,
    updated = report.updated,
    refreshed = report.refreshed,
    rejected = report.rejected.len(),
    "news ingest finished"
  );
  report
}

#[cfg(test)]
mod tests {
  use tidings_store_sqlite::SqliteStore;

  use super::*;

  fn scraped(headline: Option<&str>, url: Option<&str>) -> ScrapedRecord {
    ScrapedRecord {
      headline: headline.map(str::to_string),
      summary: Some("A short summary.".to_string()),
      article_url: url.map(str::to_string),
      ..Default::default()
    }
  }

  #[tokio::test]
  async fn malformed_records_are_skipped() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let report = ingest(
      &store,
      vec![
        scraped(Some("Town meeting set"), Some("https://example.org/1")),
        scraped(None, Some("https://example.org/2")),
        scraped(Some("No link"), None),
        scraped(Some("Bad link"), Some("ftp://example.org/3")),
        scraped(Some("Harbor report"), Some("https://example.org/4")),
      ],
    )
    .await;

    assert_eq!(report.inserted, 2);
    let indexes: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
    assert_eq!(store.recent(10).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn repeat_ingest_refreshes_and_updates() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let first = scraped(Some("Town meeting set"), Some("https://example.org/1"));
    ingest(&store, vec![first.clone()]).await;

    let mut changed = first.clone();
    changed.summary = Some("Now with a date.".to_string());
    let report = ingest(&store, vec![first, changed]).await;

    assert_eq!(report.inserted, 0);
    assert_eq!(report.refreshed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(report.accepted(), 2);
    assert_eq!(store.recent(10).await.unwrap().len(), 1);
  }
}
