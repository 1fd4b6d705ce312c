//! Error type for `tidings-sources`.

use thiserror::Error;

/// Why a single source produced no reading. The aggregator logs these and
/// substitutes a fallback; they never reach a reader.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{0} responded with status {1}")]
  Status(&'static str, u16),

  #[error("could not decode {0} response: {1}")]
  Decode(&'static str, String),

  #[error("{0} credentials are not configured")]
  MissingCredentials(&'static str),

  #[error("{0} returned no usable data")]
  NoData(&'static str),
}

pub type Result<T, E = SourceError> = std::result::Result<T, E>;
