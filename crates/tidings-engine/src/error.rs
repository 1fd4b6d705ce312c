//! Error type for `tidings-engine`.

use chrono::NaiveDate;
use thiserror::Error;

/// The failures a generation request can surface. Source and composer
/// failures never appear here; they are absorbed by fallbacks.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("a chapter for {0} is already being generated")]
  Conflict(NaiveDate),

  #[error("could not persist chapter: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("no composer produced content for {0}")]
  EmptyComposition(NaiveDate),

  #[error("generation task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl EngineError {
  pub(crate) fn persistence<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(e))
  }

  /// Whether the same request may succeed if sent again.
  pub fn is_retryable(&self) -> bool {
    matches!(self, Self::Conflict(_))
  }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
