//! [`SqliteStore`]: the SQLite implementation of [`NewsStore`] and
//! [`ChapterStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tidings_core::{
  chapter::{ArchivePage, Chapter, NewChapter, PageRequest, SaveOutcome},
  news::{NewsItem, NewsRecord, UpsertOutcome, Upserted},
  store::{ChapterStore, NewsStore},
};

use crate::{
  Result,
  encode::{
    CHAPTER_COLUMNS, NEWS_COLUMNS, RawChapter, RawNewsItem, RawSummary,
    SUMMARY_COLUMNS, encode_date, encode_dt, encode_ids, encode_kind,
    encode_uuid,
  },
  error::Error,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// News and chapter storage backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted and all
/// statements run serially on its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests across the workspace.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── NewsStore impl ──────────────────────────────────────────────────────────

impl NewsStore for SqliteStore {
  type Error = Error;

  async fn upsert(&self, record: NewsRecord) -> Result<Upserted> {
    let fetched_at = encode_dt(Utc::now());
    let published_at = record.published_at.map(encode_dt);
    let select = format!("SELECT {NEWS_COLUMNS} FROM news_items WHERE article_url = ?1");

    let (raw, outcome) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing = tx
          .query_row(
            &select,
            rusqlite::params![record.article_url],
            RawNewsItem::read,
          )
          .optional()?;

        let outcome = match existing {
          None => {
            tx.execute(
              "INSERT INTO news_items (
                 headline, summary, article_url, author, published_at, fetched_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
              rusqlite::params![
                record.headline,
                record.summary,
                record.article_url,
                record.author,
                published_at,
                fetched_at,
              ],
            )?;
            UpsertOutcome::Inserted
          }
          Some(row) => {
            let changed = row.summary != record.summary
              || row.author != record.author
              || row.published_at != published_at;
            tx.execute(
              "UPDATE news_items
                  SET summary = ?1, author = ?2, published_at = ?3, fetched_at = ?4
                WHERE news_item_id = ?5",
              rusqlite::params![
                record.summary,
                record.author,
                published_at,
                fetched_at,
                row.news_item_id,
              ],
            )?;
            if changed { UpsertOutcome::Updated } else { UpsertOutcome::Refreshed }
          }
        };

        let raw = tx.query_row(
          &select,
          rusqlite::params![record.article_url],
          RawNewsItem::read,
        )?;
        tx.commit()?;
        Ok((raw, outcome))
      })
      .await?;

    Ok(Upserted { item: raw.into_item()?, outcome })
  }

  async fn recent(&self, limit: usize) -> Result<Vec<NewsItem>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NEWS_COLUMNS} FROM news_items
            ORDER BY fetched_at DESC, news_item_id ASC
            LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], RawNewsItem::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNewsItem::into_item).collect()
  }

  async fn get_many(&self, ids: Vec<i64>) -> Result<Vec<NewsItem>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let raws = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
          "SELECT {NEWS_COLUMNS} FROM news_items
            WHERE news_item_id IN ({placeholders})
            ORDER BY news_item_id ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(ids.iter()), RawNewsItem::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNewsItem::into_item).collect()
  }
}

// ─── ChapterStore impl ───────────────────────────────────────────────────────

impl ChapterStore for SqliteStore {
  type Error = Error;

  async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Chapter>> {
    let date_str = encode_date(date);

    let raw = self
      .conn
      .call(move |conn| {
        let row = conn
          .query_row(
            &format!("SELECT {CHAPTER_COLUMNS} FROM chapters WHERE chapter_date = ?1"),
            rusqlite::params![date_str],
            RawChapter::read,
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    raw.map(RawChapter::into_chapter).transpose()
  }

  async fn save(&self, chapter: NewChapter) -> Result<(Chapter, SaveOutcome)> {
    let fresh_id = encode_uuid(Uuid::new_v4());
    let now      = encode_dt(Utc::now());
    let date     = encode_date(chapter.chapter_date);
    let snapshot = serde_json::to_string(&chapter.snapshot)?;
    let ids      = encode_ids(&chapter.used_news_item_ids)?;
    let kind     = encode_kind(chapter.composed_by);
    let context  = serde_json::to_string(&chapter.context)?;
    let title    = chapter.title;
    let body     = chapter.body;

    let (raw, outcome) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existed = tx
          .query_row(
            "SELECT 1 FROM chapters WHERE chapter_date = ?1",
            rusqlite::params![date],
            |_| Ok(()),
          )
          .optional()?
          .is_some();

        // A replacement keeps chapter_id and created_at.
        tx.execute(
          "INSERT INTO chapters (
             chapter_id, chapter_date, title, body, snapshot,
             used_news_item_ids, composed_by, context, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL)
           ON CONFLICT(chapter_date) DO UPDATE SET
             title              = excluded.title,
             body               = excluded.body,
             snapshot           = excluded.snapshot,
             used_news_item_ids = excluded.used_news_item_ids,
             composed_by        = excluded.composed_by,
             context            = excluded.context,
             updated_at         = excluded.created_at",
          rusqlite::params![
            fresh_id, date, title, body, snapshot, ids, kind, context, now,
          ],
        )?;

        let raw = tx.query_row(
          &format!("SELECT {CHAPTER_COLUMNS} FROM chapters WHERE chapter_date = ?1"),
          rusqlite::params![date],
          RawChapter::read,
        )?;
        tx.commit()?;

        let outcome = if existed { SaveOutcome::Replaced } else { SaveOutcome::Created };
        Ok((raw, outcome))
      })
      .await?;

    Ok((raw.into_chapter()?, outcome))
  }

  async fn latest(&self) -> Result<Option<Chapter>> {
    let raw = self
      .conn
      .call(|conn| {
        let row = conn
          .query_row(
            &format!(
              "SELECT {CHAPTER_COLUMNS} FROM chapters
                ORDER BY chapter_date DESC LIMIT 1"
            ),
            [],
            RawChapter::read,
          )
          .optional()?;
        Ok(row)
      })
      .await?;

    raw.map(RawChapter::into_chapter).transpose()
  }

  async fn recent_before(&self, date: NaiveDate, limit: usize) -> Result<Vec<Chapter>> {
    let date_str = encode_date(date);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CHAPTER_COLUMNS} FROM chapters
            WHERE chapter_date < ?1
            ORDER BY chapter_date DESC
            LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![date_str, limit], RawChapter::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawChapter::into_chapter).collect()
  }

  async fn archive(&self, page: PageRequest) -> Result<ArchivePage> {
    let limit = i64::from(page.page_size);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let (total, raws) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM chapters", [], |r| r.get(0))?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {SUMMARY_COLUMNS} FROM chapters
            ORDER BY chapter_date DESC
            LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], RawSummary::read)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((total, rows))
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawSummary::into_summary)
      .collect::<Result<Vec<_>>>()?;
    let total = u64::try_from(total).unwrap_or_default();
    let has_more = page.offset() + (items.len() as u64) < total;

    Ok(ArchivePage {
      items,
      total,
      page: page.page,
      page_size: page.page_size,
      has_more,
    })
  }
}
