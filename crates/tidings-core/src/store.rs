//! Persistence traits for news items and chapters.
//!
//! Implemented by storage backends (e.g. `tidings-store-sqlite`). The engine
//! and HTTP surface depend on these abstractions, never on a concrete
//! backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  chapter::{ArchivePage, Chapter, NewChapter, PageRequest, SaveOutcome},
  news::{NewsItem, NewsRecord, Upserted},
};

/// Deduplicated, URL-keyed store of scraped news.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait NewsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a record, or update the row that already has its
  /// `article_url`. Always refreshes `fetched_at`.
  fn upsert(
    &self,
    record: NewsRecord,
  ) -> impl Future<Output = Result<Upserted, Self::Error>> + Send + '_;

  /// The `limit` most recently fetched items, newest first. Items fetched at
  /// the same instant keep their insertion order.
  fn recent(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<NewsItem>, Self::Error>> + Send + '_;

  /// Items with the given ids, in id order. Unknown ids are skipped.
  fn get_many(
    &self,
    ids: Vec<i64>,
  ) -> impl Future<Output = Result<Vec<NewsItem>, Self::Error>> + Send + '_;
}

/// Chapter persistence keyed by calendar date.
pub trait ChapterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn find_by_date(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Chapter>, Self::Error>> + Send + '_;

  /// Insert-or-replace keyed by `chapter_date`. A replacement keeps the
  /// existing `id` and `created_at` and stamps `updated_at`.
  fn save(
    &self,
    chapter: NewChapter,
  ) -> impl Future<Output = Result<(Chapter, SaveOutcome), Self::Error>> + Send + '_;

  /// The chapter with the latest date.
  fn latest(
    &self,
  ) -> impl Future<Output = Result<Option<Chapter>, Self::Error>> + Send + '_;

  /// Up to `limit` chapters dated strictly before `date`, newest first.
  fn recent_before(
    &self,
    date: NaiveDate,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Chapter>, Self::Error>> + Send + '_;

  /// Chapters newest-date first.
  fn archive(
    &self,
    page: PageRequest,
  ) -> impl Future<Output = Result<ArchivePage, Self::Error>> + Send + '_;
}
