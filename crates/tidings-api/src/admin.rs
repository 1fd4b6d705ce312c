//! Operator endpoints under `/admin`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/generate` | `?date` (default today), `?force`; 409 while the date is in flight |
//! | `POST` | `/admin/news` | Body: JSON array of scraped records; returns the ingest report |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
};
use chrono::Local;
use serde::Deserialize;
use tidings_core::{
  Composer,
  news::ScrapedRecord,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};
use tidings_engine::{Engine, Generated, IngestReport};

use crate::{error::ApiError, params};

// ─── Generate ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
  pub date:  Option<String>,
  pub force: Option<String>,
}

/// `POST /admin/generate[?date=YYYY-MM-DD][&force=true]`
pub async fn generate<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  Query(params): Query<GenerateParams>,
) -> Result<Json<Generated>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let date = match params.date.as_deref() {
    Some(raw) => params::date(raw)?,
    None => Local::now().date_naive(),
  };
  let force = params::flag("force", params.force.as_deref())?;

  let generated = engine.generate(date, force).await?;
  Ok(Json(generated))
}

// ─── Ingest ──────────────────────────────────────────────────────────────────

/// `POST /admin/news`
pub async fn ingest<S, G, A>(
  State(engine): State<Engine<S, G, A>>,
  body: Result<Json<Vec<ScrapedRecord>>, JsonRejection>,
) -> Result<Json<IngestReport>, ApiError>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let Json(records) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  Ok(Json(engine.refresh_news(records).await))
}
