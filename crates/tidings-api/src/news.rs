//! Handler for `GET /news`.

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use tidings_core::{
  Composer,
  news::NewsItem,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};
use tidings_engine::Engine;

use crate::{error::ApiError, params};

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<String>,
}

/// `GET /news[?limit=<1-20>]`
pub async fn recent<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<NewsItem>>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let limit = params::bounded("limit", params.limit.as_deref(), DEFAULT_LIMIT, 1, MAX_LIMIT)?;
  let items = engine
    .store()
    .recent(limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(items))
}
