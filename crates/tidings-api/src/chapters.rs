//! Handlers for `/chapters` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/chapters` | `?page` (default 1) and `?page_size` (1-50, default 10) |
//! | `GET`  | `/chapters/latest` | 404 if there are no chapters |
//! | `GET`  | `/chapters/{date}` | `YYYY-MM-DD`; 404 if there is none for the date |
//!
//! Single-chapter responses carry the chapter's fields plus `used_news`, the
//! stored news items it drew on.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tidings_core::{
  Composer,
  chapter::{ArchivePage, Chapter, PageRequest},
  news::NewsItem,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};
use tidings_engine::Engine;

use crate::{error::ApiError, params};

/// A chapter with the news items it drew on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterDetail {
  #[serde(flatten)]
  pub chapter:   Chapter,
  /// In id order. Items no longer in the store are left out.
  pub used_news: Vec<NewsItem>,
}

async fn detail<N: NewsStore>(news: &N, chapter: Chapter) -> Result<ChapterDetail, ApiError> {
  let ids = chapter.used_news_item_ids.iter().copied().collect();
  let used_news = news.get_many(ids).await.map_err(ApiError::store)?;
  Ok(ChapterDetail { chapter, used_news })
}

// ─── Archive ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ArchiveParams {
  pub page:      Option<String>,
  pub page_size: Option<String>,
}

/// `GET /chapters[?page=<n>][&page_size=<n>]`
pub async fn archive<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  Query(params): Query<ArchiveParams>,
) -> Result<Json<ArchivePage>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let defaults = PageRequest::default();
  let request = PageRequest {
    page:      params::bounded(
      "page",
      params.page.as_deref(),
      defaults.page,
      1,
      u32::MAX,
    )?,
    page_size: params::bounded(
      "page_size",
      params.page_size.as_deref(),
      defaults.page_size,
      1,
      PageRequest::MAX_PAGE_SIZE,
    )?,
  };

  let page = engine
    .store()
    .archive(request)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

// ─── Latest ──────────────────────────────────────────────────────────────────

/// `GET /chapters/latest`
pub async fn latest<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
) -> Result<Json<ChapterDetail>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let store = engine.store();
  let chapter = store
    .latest()
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("no chapters yet".to_string()))?;
  Ok(Json(detail(store.as_ref(), chapter).await?))
}

// ─── By date ─────────────────────────────────────────────────────────────────

/// `GET /chapters/{date}`
pub async fn by_date<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  Path(raw): Path<String>,
) -> Result<Json<ChapterDetail>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let date = params::date(&raw)?;
  let store = engine.store();
  let chapter = store
    .find_by_date(date)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no chapter for {date}")))?;
  Ok(Json(detail(store.as_ref(), chapter).await?))
}
