//! Chapter generation for Tidings.
//!
//! [`Engine`] ties the pieces together: a [`ContextAggregator`] gathers the
//! day's signals and news, a [`Composer`](tidings_core::Composer) writes the
//! chapter with the template composer standing by, and a
//! [`ChapterStore`](tidings_core::store::ChapterStore) keeps one chapter per
//! date. Concurrent requests for the same date are serialised by
//! [`DateLocks`].

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fallback;
pub mod locks;
pub mod news;
pub mod orchestrator;

pub use aggregator::ContextAggregator;
pub use config::{ConflictPolicy, EngineConfig};
pub use error::{EngineError, Result};
pub use locks::DateLocks;
pub use news::{IngestReport, Rejection};
pub use orchestrator::{Engine, Generated, GenerationOutcome};
