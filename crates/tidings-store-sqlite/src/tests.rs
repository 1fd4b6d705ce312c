//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tidings_core::{
  ComposerKind, Composition, StoryContext,
  chapter::{NewChapter, PageRequest, SaveOutcome},
  news::{NewsRecord, UpsertOutcome},
  season::Season,
  store::{ChapterStore, NewsStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(url: &str, headline: &str) -> NewsRecord {
  NewsRecord {
    headline:     headline.to_string(),
    summary:      format!("{headline}, in brief."),
    article_url:  url.to_string(),
    author:       None,
    published_at: None,
  }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn chapter(on: NaiveDate, title: &str, ids: &[i64]) -> NewChapter {
  NewChapter::from_composition(
    StoryContext::bare(on),
    Composition {
      title:              title.to_string(),
      body:               "The marsh lay quiet under a pale sky, and the \
                           river ran out toward the bar with the ebb.\n\n\
                           Gulls worked the flats below the bridge until \
                           the light went."
        .to_string(),
      used_news_item_ids: ids.iter().copied().collect(),
    },
    ComposerKind::Template,
  )
}

// ─── News ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_inserts_new_url() {
  let s = store().await;
  let up = s
    .upsert(record("https://example.org/a", "Harbor dredging approved"))
    .await
    .unwrap();
  assert_eq!(up.outcome, UpsertOutcome::Inserted);
  assert_eq!(up.item.headline, "Harbor dredging approved");
  assert!(up.item.id > 0);
}

#[tokio::test]
async fn identical_upsert_is_idempotent() {
  let s = store().await;
  let first = s.upsert(record("https://example.org/a", "A")).await.unwrap();
  let second = s.upsert(record("https://example.org/a", "A")).await.unwrap();

  assert_eq!(second.outcome, UpsertOutcome::Refreshed);
  assert_eq!(second.item.id, first.item.id);
  assert!(second.item.fetched_at >= first.item.fetched_at);

  let all = s.recent(10).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn changed_summary_is_an_update() {
  let s = store().await;
  let first = s.upsert(record("https://example.org/a", "A")).await.unwrap();

  let mut changed = record("https://example.org/a", "A");
  changed.summary = "Now with more detail.".into();
  changed.author = Some("Staff".into());
  let second = s.upsert(changed).await.unwrap();

  assert_eq!(second.outcome, UpsertOutcome::Updated);
  assert_eq!(second.item.id, first.item.id);
  assert_eq!(second.item.summary, "Now with more detail.");
  assert_eq!(second.item.author.as_deref(), Some("Staff"));
}

#[tokio::test]
async fn recent_is_newest_first_and_limited() {
  let s = store().await;
  for i in 0..4 {
    s.upsert(record(&format!("https://example.org/{i}"), &format!("H{i}")))
      .await
      .unwrap();
  }
  // Touching the first item makes it the most recently fetched.
  s.upsert(record("https://example.org/0", "H0")).await.unwrap();

  let recent = s.recent(3).await.unwrap();
  assert_eq!(recent.len(), 3);
  assert_eq!(recent[0].headline, "H0");
  for pair in recent.windows(2) {
    assert!(pair[0].fetched_at >= pair[1].fetched_at);
  }
}

#[tokio::test]
async fn get_many_skips_unknown_ids() {
  let s = store().await;
  let a = s.upsert(record("https://example.org/a", "A")).await.unwrap();
  let b = s.upsert(record("https://example.org/b", "B")).await.unwrap();

  let found = s.get_many(vec![b.item.id, 9999, a.item.id]).await.unwrap();
  let ids: Vec<i64> = found.iter().map(|n| n.id).collect();
  assert_eq!(ids, vec![a.item.id, b.item.id]);

  assert!(s.get_many(Vec::new()).await.unwrap().is_empty());
}

// ─── Chapters ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_missing_chapter_returns_none() {
  let s = store().await;
  assert!(s.find_by_date(date(2025, 1, 5)).await.unwrap().is_none());
  assert!(s.latest().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_find() {
  let s = store().await;
  let day = date(2025, 1, 5);

  let (saved, outcome) = s.save(chapter(day, "High Water", &[3, 7])).await.unwrap();
  assert_eq!(outcome, SaveOutcome::Created);
  assert!(saved.updated_at.is_none());
  assert_eq!(saved.snapshot.season, Season::Winter);

  let found = s.find_by_date(day).await.unwrap().expect("saved chapter");
  assert_eq!(found.id, saved.id);
  assert_eq!(found.title, "High Water");
  assert_eq!(found.used_news_item_ids, BTreeSet::from([3, 7]));
  assert_eq!(found.composed_by, ComposerKind::Template);
  assert_eq!(found.context, StoryContext::bare(day));
}

#[tokio::test]
async fn replacing_keeps_identity() {
  let s = store().await;
  let day = date(2025, 7, 4);

  let (first, _) = s.save(chapter(day, "First", &[])).await.unwrap();
  let (second, outcome) = s.save(chapter(day, "Second", &[1])).await.unwrap();

  assert_eq!(outcome, SaveOutcome::Replaced);
  assert_eq!(second.id, first.id);
  assert_eq!(second.created_at, first.created_at);
  assert_eq!(second.title, "Second");
  assert!(second.updated_at.is_some());

  let page = s
    .archive(PageRequest { page: 1, page_size: 10 })
    .await
    .unwrap();
  assert_eq!(page.total, 1);
}

#[tokio::test]
async fn concurrent_saves_leave_one_chapter() {
  let s = store().await;
  let day = date(2025, 3, 21);

  let handles: Vec<_> = (0..8)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move { s.save(chapter(day, &format!("T{i}"), &[])).await })
    })
    .collect();

  let mut created = 0;
  for h in handles {
    let (_, outcome) = h.await.unwrap().unwrap();
    if outcome == SaveOutcome::Created {
      created += 1;
    }
  }
  assert_eq!(created, 1);

  let page = s
    .archive(PageRequest { page: 1, page_size: 10 })
    .await
    .unwrap();
  assert_eq!(page.total, 1);
}

#[tokio::test]
async fn latest_is_by_date_not_insertion() {
  let s = store().await;
  s.save(chapter(date(2025, 2, 1), "Later", &[])).await.unwrap();
  s.save(chapter(date(2025, 1, 1), "Earlier", &[])).await.unwrap();

  let latest = s.latest().await.unwrap().unwrap();
  assert_eq!(latest.title, "Later");
}

#[tokio::test]
async fn recent_before_excludes_the_date_itself() {
  let s = store().await;
  for d in [3, 1, 5, 2, 4] {
    s.save(chapter(date(2025, 1, d), &format!("Day {d}"), &[]))
      .await
      .unwrap();
  }

  let recent = s.recent_before(date(2025, 1, 5), 3).await.unwrap();
  let titles: Vec<&str> = recent.iter().map(|c| c.title.as_str()).collect();
  assert_eq!(titles, vec!["Day 4", "Day 3", "Day 2"]);

  assert!(s.recent_before(date(2025, 1, 1), 5).await.unwrap().is_empty());
  assert!(s.recent_before(date(2025, 2, 1), 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn archive_pages_newest_first() {
  let s = store().await;
  for d in 1..=5 {
    s.save(chapter(date(2025, 1, d), &format!("Day {d}"), &[]))
      .await
      .unwrap();
  }

  let first = s
    .archive(PageRequest { page: 1, page_size: 2 })
    .await
    .unwrap();
  assert_eq!(first.total, 5);
  assert!(first.has_more);
  let titles: Vec<&str> = first.items.iter().map(|c| c.title.as_str()).collect();
  assert_eq!(titles, vec!["Day 5", "Day 4"]);

  let last = s
    .archive(PageRequest { page: 3, page_size: 2 })
    .await
    .unwrap();
  assert_eq!(last.items.len(), 1);
  assert_eq!(last.items[0].title, "Day 1");
  assert!(!last.has_more);
  assert!(last.items[0].snippet.len() <= 103);
  assert!(last.items[0].snippet.ends_with("..."));

  let beyond = s
    .archive(PageRequest { page: 9, page_size: 2 })
    .await
    .unwrap();
  assert!(beyond.items.is_empty());
  assert!(!beyond.has_more);
}
