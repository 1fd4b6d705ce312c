//! Engine tuning. Every field has a default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a generation request does when another run for the same date is
/// already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
  /// Wait for the in-flight run, then re-check storage.
  #[default]
  Wait,
  /// Fail fast with [`EngineError::Conflict`](crate::EngineError::Conflict).
  Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// News items offered to a composer per chapter.
  pub max_news_items:      usize,
  /// Earlier chapters a composer is shown so it does not repeat them.
  pub max_recent_chapters: usize,
  /// Budget for each signal source before it is treated as failed.
  pub source_timeout_ms:   u64,
  /// How long an aggregated context is reused for the same date.
  pub context_ttl_secs:    u64,
  pub conflict_policy:     ConflictPolicy,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      max_news_items:      5,
      max_recent_chapters: 5,
      source_timeout_ms:   8_000,
      context_ttl_secs:    600,
      conflict_policy:     ConflictPolicy::Wait,
    }
  }
}

impl EngineConfig {
  pub fn source_timeout(&self) -> Duration {
    Duration::from_millis(self.source_timeout_ms)
  }

  pub fn context_ttl(&self) -> Duration {
    Duration::from_secs(self.context_ttl_secs)
  }
}
