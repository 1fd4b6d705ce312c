//! Error types for `tidings-core`.

use thiserror::Error;

/// Failure of a [`Composer`](crate::Composer) to produce usable prose.
///
/// The orchestrator recovers from every variant by falling back to the
/// template composer, so none of these reach an end user.
#[derive(Debug, Error)]
pub enum GenerationError {
  #[error("generation service is not configured")]
  NotConfigured,

  #[error("generation service unreachable: {0}")]
  Unavailable(String),

  #[error("generation service timed out")]
  Timeout,

  #[error("generation service returned {status}: {message}")]
  Status { status: u16, message: String },

  #[error("malformed generation response: {0}")]
  Malformed(String),

  #[error("generated content rejected: {0}")]
  Invalid(String),
}
