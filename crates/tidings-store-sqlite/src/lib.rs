//! SQLite backend for the Tidings news and chapter stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One [`SqliteStore`] implements both
//! [`NewsStore`](tidings_core::store::NewsStore) and
//! [`ChapterStore`](tidings_core::store::ChapterStore).

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
