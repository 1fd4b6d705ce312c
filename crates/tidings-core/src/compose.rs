//! The single capability both narrative tiers implement.

use std::{collections::BTreeSet, future::Future};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{GenerationError, KnowledgeBase, StoryContext};

/// Prose produced for one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
  pub title:              String,
  pub body:               String,
  /// Exactly the news items that informed this prose.
  pub used_news_item_ids: BTreeSet<i64>,
}

impl Composition {
  pub fn is_empty(&self) -> bool {
    self.title.trim().is_empty() || self.body.trim().is_empty()
  }
}

/// Which tier wrote a chapter.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComposerKind {
  Ai,
  Template,
}

/// Turns a [`StoryContext`] into a [`Composition`], grounded in a
/// [`KnowledgeBase`].
pub trait Composer: Send + Sync {
  fn kind(&self) -> ComposerKind;

  fn compose<'a>(
    &'a self,
    context: &'a StoryContext,
    knowledge: &'a KnowledgeBase,
  ) -> impl Future<Output = Result<Composition, GenerationError>> + Send + 'a;
}
