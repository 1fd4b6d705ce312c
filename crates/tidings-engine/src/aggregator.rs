//! Builds a [`StoryContext`] from every signal source at once.
//!
//! Aggregation never fails. A source that errors, answers empty or overruns
//! its budget is logged and left out; weather and tide then take a local
//! estimate so a composer always has something to work with. Field notes
//! have no estimate and are simply absent.

use std::{
  collections::HashMap,
  fmt::Display,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
  time::{Duration, Instant},
};

use chrono::{Datelike, NaiveDate};
use tidings_core::{
  StoryContext,
  context::{Environmental, FieldNotes, NewsBrief, Smoke},
  season::SeasonInfo,
  signal::Signals,
  store::NewsStore,
};

use crate::{config::EngineConfig, fallback};

struct Cached {
  built_at: Instant,
  context:  StoryContext,
}

pub struct ContextAggregator<G, N> {
  signals:        Arc<G>,
  news:           Arc<N>,
  max_news_items: usize,
  source_timeout: Duration,
  ttl:            Duration,
  cache:          Mutex<HashMap<NaiveDate, Cached>>,
}

impl<G, N> ContextAggregator<G, N>
where
  G: Signals,
  N: NewsStore,
{
  pub fn new(signals: Arc<G>, news: Arc<N>, config: &EngineConfig) -> Self {
    Self {
      signals,
      news,
      max_news_items: config.max_news_items,
      source_timeout: config.source_timeout(),
      ttl: config.context_ttl(),
      cache: Mutex::new(HashMap::new()),
    }
  }

  /// The context for `date`, reusing one built within the TTL.
  pub async fn build_context(&self, date: NaiveDate) -> StoryContext {
    if let Some(hit) = self.cached(date) {
      tracing::debug!(%date, "context cache hit");
      return hit;
    }
    let context = self.build_fresh_context(date).await;
    self.remember(context.clone());
    context
  }

  /// Forget every cached context, e.g. after news has changed.
  pub fn invalidate(&self) {
    self.cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
  }

  fn cached(&self, date: NaiveDate) -> Option<StoryContext> {
    let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
    cache
      .get(&date)
      .filter(|c| c.built_at.elapsed() < self.ttl)
      .map(|c| c.context.clone())
  }

  fn remember(&self, context: StoryContext) {
    let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
    let ttl = self.ttl;
    cache.retain(|_, c| c.built_at.elapsed() < ttl);
    cache.insert(context.date, Cached { built_at: Instant::now(), context });
  }

  /// Query every source concurrently, bypassing the cache.
  pub async fn build_fresh_context(&self, date: NaiveDate) -> StoryContext {
    let s = &*self.signals;
    let budget = self.source_timeout;

    let (
      weather,
      tide,
      waves,
      sea_surface,
      ocean_color,
      harmful_algae,
      air_quality,
      vegetation,
      snow,
      drought,
      coastal_erosion,
      planets,
      meteor_shower,
      birds,
      marine,
      river,
      news_items,
    ) = tokio::join!(
      bounded("weather", budget, s.weather(date)),
      bounded("tide", budget, s.tide(date)),
      bounded("waves", budget, s.waves(date)),
      bounded("sea_surface", budget, s.sea_surface(date)),
      bounded("ocean_color", budget, s.ocean_color(date)),
      bounded("harmful_algae", budget, s.harmful_algae(date)),
      bounded("air_quality", budget, s.air_quality(date)),
      bounded("vegetation", budget, s.vegetation(date)),
      bounded("snow", budget, s.snow(date)),
      bounded("drought", budget, s.drought(date)),
      bounded("coastal_erosion", budget, s.coastal_erosion(date)),
      bounded("planets", budget, s.planets(date)),
      bounded("meteor_shower", budget, s.meteor_shower(date)),
      bounded("bird_sightings", budget, s.bird_sightings(date)),
      bounded("marine_forecast", budget, s.marine_forecast(date)),
      bounded("river_flow", budget, s.river_flow(date)),
      self.recent_news(),
    );

    let smoke = air_quality
      .as_ref()
      .and_then(|air| Smoke::from_air_quality(air, date.month()));

    StoryContext {
      date,
      weather: Some(weather.unwrap_or_else(|| fallback::seasonal_weather(date))),
      tide: Some(tide.unwrap_or_else(|| fallback::simulated_tide(date))),
      season: SeasonInfo::for_date(date),
      environmental: Environmental {
        waves,
        sea_surface,
        ocean_color,
        harmful_algae,
        air_quality,
        smoke,
        vegetation,
        snow,
        drought,
        coastal_erosion,
        planets,
        meteor_shower,
      },
      field_notes: FieldNotes {
        birds: birds.unwrap_or_default(),
        marine,
        river,
      },
      news_items,
      recent_chapters: Vec::new(),
    }
  }

  async fn recent_news(&self) -> Vec<NewsBrief> {
    match self.news.recent(self.max_news_items).await {
      Ok(items) => items.iter().map(|n| n.brief()).collect(),
      Err(e) => {
        tracing::warn!(error = %e, "could not load recent news");
        Vec::new()
      }
    }
  }
}

/// Run one source under `budget`, flattening every failure to `None`.
async fn bounded<T, E, F>(source: &'static str, budget: Duration, fut: F) -> Option<T>
where
  E: Display,
  F: Future<Output = Result<Option<T>, E>>,
{
  match tokio::time::timeout(budget, fut).await {
    Ok(Ok(Some(value))) => Some(value),
    Ok(Ok(None)) => {
      tracing::warn!(source, "source had no reading");
      None
    }
    Ok(Err(e)) => {
      tracing::warn!(source, error = %e, "source failed");
      None
    }
    Err(_) => {
      tracing::warn!(source, budget_ms = budget.as_millis() as u64, "source timed out");
      None
    }
  }
}
