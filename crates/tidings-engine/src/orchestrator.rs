//! One chapter per date: lock, aggregate, compose with fallback, persist.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tidings_core::{
  Composer, ComposerKind, Composition, KnowledgeBase, StoryContext,
  TemplateComposer,
  chapter::{Chapter, NewChapter, SaveOutcome},
  context::RecentChapter,
  news::ScrapedRecord,
  signal::Signals,
  store::{ChapterStore, NewsStore},
};

use crate::{
  Result,
  aggregator::ContextAggregator,
  config::{ConflictPolicy, EngineConfig},
  error::EngineError,
  locks::DateLocks,
  news::{IngestReport, ingest},
};

/// What a generation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationOutcome {
  /// A chapter already existed and was returned untouched.
  Existing,
  Created,
  Replaced,
}

impl From<SaveOutcome> for GenerationOutcome {
  fn from(outcome: SaveOutcome) -> Self {
    match outcome {
      SaveOutcome::Created => Self::Created,
      SaveOutcome::Replaced => Self::Replaced,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated {
  pub chapter:     Chapter,
  pub outcome:     GenerationOutcome,
  pub composed_by: ComposerKind,
}

impl Generated {
  fn existing(chapter: Chapter) -> Self {
    let composed_by = chapter.composed_by;
    Self { chapter, outcome: GenerationOutcome::Existing, composed_by }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

struct Inner<S, G, A> {
  store:      Arc<S>,
  aggregator: ContextAggregator<G, S>,
  ai:         Option<A>,
  template:   TemplateComposer,
  knowledge:  KnowledgeBase,
  locks:      DateLocks,
  policy:     ConflictPolicy,
  recent:     usize,
}

/// The generation orchestrator.
///
/// `S` stores both news and chapters, `G` supplies signals and `A` is the
/// preferred composer. The template composer is always the fallback.
/// Cloning is cheap and clones share locks and the context cache.
pub struct Engine<S, G, A> {
  inner: Arc<Inner<S, G, A>>,
}

impl<S, G, A> Clone for Engine<S, G, A> {
  fn clone(&self) -> Self {
    Self { inner: Arc::clone(&self.inner) }
  }
}

impl<S, G, A> Engine<S, G, A>
where
  S: NewsStore + ChapterStore + 'static,
  G: Signals + 'static,
  A: Composer + 'static,
{
  pub fn new(
    store: Arc<S>,
    signals: Arc<G>,
    ai: Option<A>,
    knowledge: KnowledgeBase,
    config: &EngineConfig,
  ) -> Self {
    let aggregator = ContextAggregator::new(signals, Arc::clone(&store), config);
    Self {
      inner: Arc::new(Inner {
        store,
        aggregator,
        ai,
        template: TemplateComposer::new(),
        knowledge,
        locks: DateLocks::new(),
        policy: config.conflict_policy,
        recent: config.max_recent_chapters,
      }),
    }
  }

  pub fn store(&self) -> &Arc<S> {
    &self.inner.store
  }

  pub fn knowledge(&self) -> &KnowledgeBase {
    &self.inner.knowledge
  }

  /// The chapter for `date`, generating it if needed or if `force` is set.
  ///
  /// The work runs on its own task: a caller that goes away does not cancel
  /// it, and the chapter is still saved.
  pub async fn generate(&self, date: NaiveDate, force: bool) -> Result<Generated> {
    if !force && let Some(existing) = self.inner.find(date).await? {
      return Ok(Generated::existing(existing));
    }

    let guard = match self.inner.policy {
      ConflictPolicy::Wait => self.inner.locks.lock(date).await,
      ConflictPolicy::Reject => self
        .inner
        .locks
        .try_lock(date)
        .ok_or(EngineError::Conflict(date))?,
    };

    let inner = Arc::clone(&self.inner);
    let task = tokio::spawn(async move {
      let _guard = guard;
      inner.run(date, force).await
    });
    task.await?
  }

  /// The aggregated context for `date`.
  pub async fn context(&self, date: NaiveDate) -> StoryContext {
    self.inner.aggregator.build_context(date).await
  }

  /// Ingest scraped news. Cached contexts are dropped so the next chapter
  /// sees the new items.
  pub async fn refresh_news(&self, records: Vec<ScrapedRecord>) -> IngestReport {
    let report = ingest(&*self.inner.store, records).await;
    if report.accepted() > 0 {
      self.inner.aggregator.invalidate();
    }
    report
  }
}

impl<S, G, A> Inner<S, G, A>
where
  S: NewsStore + ChapterStore,
  G: Signals,
  A: Composer,
{
  async fn find(&self, date: NaiveDate) -> Result<Option<Chapter>> {
    self
      .store
      .find_by_date(date)
      .await
      .map_err(EngineError::persistence)
  }

  async fn run(&self, date: NaiveDate, force: bool) -> Result<Generated> {
    // Another run may have finished while this one waited for the lock.
    if !force && let Some(existing) = self.find(date).await? {
      return Ok(Generated::existing(existing));
    }

    let mut context = self.aggregator.build_context(date).await;
    context.recent_chapters = self.recent_chapters(date).await;
    let (composition, composed_by) = self.compose(&context).await;
    if composition.is_empty() {
      return Err(EngineError::EmptyComposition(date));
    }

    let new = NewChapter::from_composition(context, composition, composed_by);
    let (chapter, saved) = self
      .store
      .save(new)
      .await
      .map_err(EngineError::persistence)?;

    tracing::info!(
      %date,
      %composed_by,
      outcome = ?saved,
      title = %chapter.title,
      "chapter saved"
    );
    Ok(Generated { chapter, outcome: saved.into(), composed_by })
  }

  /// Earlier chapters for the composer to steer away from. A load failure
  /// is logged and leaves the list empty.
  async fn recent_chapters(&self, date: NaiveDate) -> Vec<RecentChapter> {
    match self.store.recent_before(date, self.recent).await {
      Ok(chapters) => chapters.iter().map(RecentChapter::of).collect(),
      Err(e) => {
        tracing::warn!(%date, error = %e, "could not load recent chapters");
        Vec::new()
      }
    }
  }

  async fn compose(&self, context: &StoryContext) -> (Composition, ComposerKind) {
    if let Some(ai) = &self.ai {
      match ai.compose(context, &self.knowledge).await {
        Ok(c) if !c.is_empty() => return (c, ai.kind()),
        Ok(_) => tracing::warn!(date = %context.date, "ai composition was empty, using template"),
        Err(e) => tracing::warn!(date = %context.date, error = %e, "ai composition failed, using template"),
      }
    }
    let composition = self.template.compose_seeded(context, &self.knowledge, None);
    (composition, ComposerKind::Template)
  }
}
