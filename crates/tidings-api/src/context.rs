//! Handlers for `/context` endpoints: the raw aggregated signals for a day.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Local;
use tidings_core::{
  Composer, StoryContext,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};
use tidings_engine::Engine;

use crate::{error::ApiError, params};

/// `GET /context/today`
pub async fn today<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
) -> Json<StoryContext>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  Json(engine.context(Local::now().date_naive()).await)
}

/// `GET /context/{date}`
pub async fn by_date<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  Path(raw): Path<String>,
) -> Result<Json<StoryContext>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let date = params::date(&raw)?;
  Ok(Json(engine.context(date).await))
}
