//! Domain model for Tidings, the daily Ipswich chapter writer.
//!
//! Holds the story context, news and chapter records, the knowledge base and
//! the template composer, plus the traits the other crates implement:
//! [`signal::Signals`], [`store::NewsStore`], [`store::ChapterStore`] and
//! [`Composer`]. No HTTP client or database driver is linked here.

pub mod chapter;
pub mod compose;
pub mod context;
pub mod error;
pub mod knowledge;
pub mod news;
pub mod season;
pub mod signal;
pub mod store;
pub mod template;

pub use compose::{Composer, ComposerKind, Composition};
pub use context::StoryContext;
pub use error::GenerationError;
pub use knowledge::KnowledgeBase;
pub use template::TemplateComposer;
