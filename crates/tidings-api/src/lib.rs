//! JSON HTTP surface for Tidings.
//!
//! Exposes an axum [`Router`] over a [`tidings_engine::Engine`]. Reads go
//! straight to the engine's store; generation and ingest go through the
//! engine so locking and fallbacks apply. TLS and auth are the caller's
//! concern.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = tidings_api::router(engine).layer(TraceLayer::new_for_http());
//! ```

pub mod admin;
pub mod chapters;
pub mod context;
pub mod error;
pub mod news;
mod params;

use axum::{
  Json, Router,
  routing::{get, post},
};
use serde_json::{Value, json};
use tidings_core::{
  Composer,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};
use tidings_engine::Engine;

pub use error::ApiError;

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}

/// Build the full router: health checks at the root and the versioned API
/// under `/api/v1`.
pub fn router<S, G, A>(engine: Engine<S, G, A>) -> Router<()>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  let v1 = Router::new()
    // Chapters
    .route("/chapters", get(chapters::archive::<S, G, A>))
    .route("/chapters/latest", get(chapters::latest::<S, G, A>))
    .route("/chapters/{date}", get(chapters::by_date::<S, G, A>))
    // Context
    .route("/context/today", get(context::today::<S, G, A>))
    .route("/context/{date}", get(context::by_date::<S, G, A>))
    // News
    .route("/news", get(news::recent::<S, G, A>))
    // Admin
    .route("/admin/generate", post(admin::generate::<S, G, A>))
    .route("/admin/news", post(admin::ingest::<S, G, A>))
    .with_state(engine);

  Router::new()
    .route("/health", get(health))
    .route("/healthz", get(health))
    .nest("/api/v1", v1)
}
