//! Deterministic, rule-based composition.
//!
//! The template composer needs no network and cannot fail against a
//! well-formed knowledge base. Given the same context, knowledge base and
//! seed it produces byte-identical output. Every sentence it writes is a
//! knowledge-base fragment or fact, apart from news headlines spliced into
//! news fragments.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::{
  Composer, ComposerKind, Composition, GenerationError, KnowledgeBase,
  StoryContext,
  context::{NewsBrief, TideState},
  knowledge::{ConditionBucket, Fact, FactKind, Fragment, Slot},
  season::Season,
};

/// How many news items a template chapter weaves in.
pub const MAX_NEWS: usize = 2;

/// How many of the best-ranked facts an observation may rotate through.
const OBSERVATION_POOL: usize = 3;

const PARAGRAPH_BREAK: &str = "\n\n";

#[derive(Debug, Clone, Default)]
pub struct TemplateComposer;

impl TemplateComposer {
  pub fn new() -> Self {
    Self
  }

  /// Compose with an explicit seed. `None` derives the seed from the
  /// context date, so each day reads differently but reruns agree.
  pub fn compose_seeded(
    &self,
    context: &StoryContext,
    knowledge: &KnowledgeBase,
    seed: Option<u64>,
  ) -> Composition {
    let keys = Keys::of(context, seed);
    let mut paragraphs: Vec<String> = Vec::new();

    if let Some(f) = keys.best(knowledge, Slot::Opening) {
      paragraphs.push(f.text.clone());
    }
    if let Some(f) = keys.best(knowledge, Slot::Tide) {
      paragraphs.push(f.text.clone());
    }

    let observations: Vec<&str> = [FactKind::Ecology, FactKind::Character]
      .into_iter()
      .enumerate()
      .filter_map(|(i, kind)| keys.observation(knowledge, kind, i as u64))
      .map(|f| f.text.as_str())
      .collect();
    if !observations.is_empty() {
      paragraphs.push(observations.join(" "));
    }

    if let Some(f) = keys.any(knowledge, Slot::Interlude) {
      paragraphs.push(f.text.clone());
    }

    let (news, used_news_item_ids) =
      keys.weave_news(knowledge, &context.news_items);
    if let Some(news) = news {
      paragraphs.push(news);
    }

    if let Some(f) = keys.best(knowledge, Slot::Closing) {
      paragraphs.push(f.text.clone());
    }

    Composition {
      title: keys.title(knowledge, context),
      body: paragraphs.join(PARAGRAPH_BREAK),
      used_news_item_ids,
    }
  }
}

impl Composer for TemplateComposer {
  fn kind(&self) -> ComposerKind {
    ComposerKind::Template
  }

  async fn compose(
    &self,
    context: &StoryContext,
    knowledge: &KnowledgeBase,
  ) -> Result<Composition, GenerationError> {
    Ok(self.compose_seeded(context, knowledge, None))
  }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// The context values fragments are keyed on, plus the seed.
struct Keys {
  season:    Season,
  condition: Option<ConditionBucket>,
  tide:      Option<TideState>,
  seed:      u64,
}

impl Keys {
  fn of(context: &StoryContext, seed: Option<u64>) -> Self {
    Self {
      season:    context.season.name,
      condition: context.condition().and_then(ConditionBucket::from_condition),
      tide:      context.tide_state(),
      seed:      seed.unwrap_or_else(|| date_seed(context.date)),
    }
  }

  fn fitting<'k>(
    &self,
    knowledge: &'k KnowledgeBase,
    slot: Slot,
  ) -> Vec<&'k Fragment> {
    knowledge
      .fragments_in(slot)
      .filter(|f| f.fits(self.season, self.condition, self.tide))
      .collect()
  }

  /// Among fitting fragments, the heaviest tier, then one by seed.
  fn best<'k>(
    &self,
    knowledge: &'k KnowledgeBase,
    slot: Slot,
  ) -> Option<&'k Fragment> {
    let fitting = self.fitting(knowledge, slot);
    let top = fitting.iter().map(|f| f.weight()).max()?;
    let tier: Vec<&Fragment> =
      fitting.into_iter().filter(|f| f.weight() == top).collect();
    pick(&tier, self.seed, slot as u64).copied()
  }

  /// Any fitting fragment, by seed.
  fn any<'k>(
    &self,
    knowledge: &'k KnowledgeBase,
    slot: Slot,
  ) -> Option<&'k Fragment> {
    pick(&self.fitting(knowledge, slot), self.seed, slot as u64).copied()
  }

  fn observation<'k>(
    &self,
    knowledge: &'k KnowledgeBase,
    kind: FactKind,
    salt: u64,
  ) -> Option<&'k Fact> {
    let pool: Vec<&Fact> = knowledge
      .ranked_facts(&[kind], self.season)
      .into_iter()
      .filter(|f| !f.seasons.is_empty())
      .take(OBSERVATION_POOL)
      .collect();
    pick(&pool, self.seed, 0x0b5e_0000 + salt).copied()
  }

  fn weave_news(
    &self,
    knowledge: &KnowledgeBase,
    news: &[NewsBrief],
  ) -> (Option<String>, BTreeSet<i64>) {
    let mut sentences = Vec::new();
    let mut used = BTreeSet::new();

    let usable = news
      .iter()
      .map(|item| (item, clean_headline(&item.headline)))
      .filter(|(_, headline)| !headline.is_empty())
      .take(MAX_NEWS);

    for (i, (item, headline)) in usable.enumerate() {
      let slot = if i == 0 { Slot::NewsLead } else { Slot::NewsFollow };
      let Some(fragment) = self.any(knowledge, slot) else {
        break;
      };
      sentences.push(fragment.text.replace("{headline}", &headline));
      used.insert(item.id);
    }

    if sentences.is_empty() {
      (None, used)
    } else {
      (Some(sentences.join(" ")), used)
    }
  }

  fn title(&self, knowledge: &KnowledgeBase, context: &StoryContext) -> String {
    let candidates: Vec<&Fragment> = self
      .fitting(knowledge, Slot::Title)
      .into_iter()
      .filter(|f| self.tide.is_some() || !f.text.contains("{tide}"))
      .collect();

    match pick(&candidates, self.seed, Slot::Title as u64) {
      Some(f) => fill_title(&f.text, context),
      None => format!(
        "{} {}",
        context.season.month_name,
        context.date.day()
      ),
    }
  }
}

fn fill_title(template: &str, context: &StoryContext) -> String {
  let tide = context
    .tide_state()
    .map(|t| capitalize(&t.to_string()))
    .unwrap_or_default();
  template
    .replace("{season}", &context.season.name.to_string())
    .replace("{month}", &context.season.month_name)
    .replace("{weekday}", &context.season.day_of_week)
    .replace("{tide}", &tide)
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Collapse whitespace and drop trailing sentence punctuation so the
/// headline sits inside a fragment's own sentence.
fn clean_headline(headline: &str) -> String {
  headline
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .trim_end_matches(['.', '!', '?', ';', ':', ','])
    .to_string()
}

fn date_seed(date: NaiveDate) -> u64 {
  date.num_days_from_ce() as u64
}

/// splitmix64: a fixed, platform-independent mixer.
fn mix(mut x: u64) -> u64 {
  x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
  x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  x ^ (x >> 31)
}

fn pick<T>(items: &[T], seed: u64, salt: u64) -> Option<&T> {
  if items.is_empty() {
    return None;
  }
  let index = mix(seed ^ mix(salt)) % items.len() as u64;
  items.get(index as usize)
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;
  use crate::context::{Tide, Weather};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn with_tide(mut ctx: StoryContext, state: TideState) -> StoryContext {
    ctx.tide = Some(Tide { state: Some(state), ..Default::default() });
    ctx
  }

  fn with_condition(mut ctx: StoryContext, condition: &str) -> StoryContext {
    ctx.weather = Some(Weather {
      condition: Some(condition.to_string()),
      ..Default::default()
    });
    ctx
  }

  fn news(id: i64, headline: &str) -> NewsBrief {
    NewsBrief {
      id,
      headline: headline.to_string(),
      summary: String::new(),
      article_url: format!("https://example.org/{id}"),
    }
  }

  /// Every sentence of `body` must be knowledge-base text.
  fn assert_grounded(kb: &KnowledgeBase, body: &str) {
    let mut texts: Vec<&str> = kb
      .fragments()
      .iter()
      .map(|f| f.text.as_str())
      .chain(kb.facts().iter().map(|f| f.text.as_str()))
      .collect();
    texts.sort_by_key(|t| std::cmp::Reverse(t.len()));

    for paragraph in body.split(PARAGRAPH_BREAK) {
      let mut rest = paragraph.to_string();
      for text in &texts {
        rest = rest.replace(text, "");
      }
      assert!(rest.trim().is_empty(), "ungrounded text: {rest:?}");
    }
  }

  #[test]
  fn winter_high_tide_without_weather_or_news() {
    let kb = KnowledgeBase::ipswich();
    let ctx = with_tide(StoryContext::bare(date(2025, 1, 15)), TideState::High);
    assert_eq!(ctx.season.name, Season::Winter);

    let out = TemplateComposer::new().compose_seeded(&ctx, &kb, None);

    assert!(!out.title.trim().is_empty());
    assert!(!out.body.trim().is_empty());
    assert!(out.used_news_item_ids.is_empty());

    let winter_fact = kb
      .facts()
      .iter()
      .filter(|f| f.seasons == [Season::Winter])
      .any(|f| out.body.contains(&f.text));
    assert!(winter_fact, "no winter fact in {:?}", out.body);

    let high_tide = kb
      .fragments_in(Slot::Tide)
      .filter(|f| f.tide == Some(TideState::High))
      .any(|f| out.body.contains(&f.text));
    assert!(high_tide, "no high-tide fragment in {:?}", out.body);
  }

  #[test]
  fn identical_inputs_give_identical_output() {
    let kb = KnowledgeBase::ipswich();
    let mut ctx =
      with_condition(StoryContext::bare(date(2025, 7, 4)), "scattered clouds");
    ctx.news_items = vec![news(1, "Fireworks return to the waterfront.")];

    let composer = TemplateComposer::new();
    let a = composer.compose_seeded(&ctx, &kb, None);
    let b = composer.compose_seeded(&ctx, &kb, None);
    assert_eq!(a, b);

    let c = composer.compose_seeded(&ctx, &kb, Some(42));
    let d = composer.compose_seeded(&ctx, &kb, Some(42));
    assert_eq!(c, d);
  }

  #[test]
  fn empty_context_still_yields_prose_in_every_season() {
    let kb = KnowledgeBase::ipswich();
    for d in [date(2025, 1, 2), date(2025, 4, 2), date(2025, 7, 2), date(2025, 10, 2)] {
      let out = TemplateComposer::new().compose_seeded(&StoryContext::bare(d), &kb, None);
      assert!(!out.is_empty(), "{d}");
      assert!(!out.title.contains('{'), "{d}: {}", out.title);
    }
  }

  #[test]
  fn condition_specific_opening_wins() {
    let kb = KnowledgeBase::ipswich();
    let ctx = with_condition(StoryContext::bare(date(2025, 2, 1)), "light snow");
    let out = TemplateComposer::new().compose_seeded(&ctx, &kb, None);
    let snow = kb
      .fragments()
      .iter()
      .find(|f| f.id == "open-winter-snow")
      .unwrap();
    assert!(out.body.starts_with(&snow.text));
  }

  #[test]
  fn unknown_condition_falls_back_to_season_opening() {
    let kb = KnowledgeBase::ipswich();
    let ctx = with_condition(StoryContext::bare(date(2025, 2, 1)), "Cold");
    let out = TemplateComposer::new().compose_seeded(&ctx, &kb, None);
    let opening = out.body.split(PARAGRAPH_BREAK).next().unwrap();
    let fragment = kb
      .fragments_in(Slot::Opening)
      .find(|f| f.text == opening)
      .unwrap();
    assert_eq!(fragment.season, Some(Season::Winter));
    assert_eq!(fragment.condition, None);
  }

  #[test]
  fn weaves_at_most_two_news_items_and_records_them() {
    let kb = KnowledgeBase::ipswich();
    let mut ctx = StoryContext::bare(date(2025, 5, 10));
    ctx.news_items = vec![
      news(7, "Select Board approves harbor plan."),
      news(3, "Library extends summer hours"),
      news(9, "Road work on the bypass"),
    ];
    let out = TemplateComposer::new().compose_seeded(&ctx, &kb, None);

    assert_eq!(out.used_news_item_ids, BTreeSet::from([3, 7]));
    assert!(out.body.contains("Select Board approves harbor plan"));
    assert!(out.body.contains("Library extends summer hours"));
    assert!(!out.body.contains("Road work"));
  }

  #[test]
  fn blank_headlines_do_not_take_a_news_slot() {
    let kb = KnowledgeBase::ipswich();
    let mut ctx = StoryContext::bare(date(2025, 5, 10));
    ctx.news_items = vec![
      news(1, "..."),
      news(7, "Select Board approves harbor plan."),
      news(3, "Library extends summer hours"),
    ];
    let out = TemplateComposer::new().compose_seeded(&ctx, &kb, None);

    assert_eq!(out.used_news_item_ids, BTreeSet::from([3, 7]));
    let opens_with_lead = kb.fragments_in(Slot::NewsLead).any(|f| {
      let lead = f.text.split("{headline}").next().unwrap();
      out.body.contains(&format!("{lead}Select Board approves harbor plan"))
    });
    assert!(opens_with_lead);
    assert!(out.body.contains("Library extends summer hours"));
  }

  #[test]
  fn no_news_means_no_news_paragraph() {
    let kb = KnowledgeBase::ipswich();
    let out = TemplateComposer::new()
      .compose_seeded(&StoryContext::bare(date(2025, 5, 10)), &kb, None);
    assert!(out.used_news_item_ids.is_empty());
    assert!(!out.body.contains("{headline}"));
    assert!(kb.fragments_in(Slot::NewsLead).all(|f| {
      let lead = f.text.split("{headline}").next().unwrap();
      !out.body.contains(lead)
    }));
  }

  #[test]
  fn output_is_grounded_across_the_year() {
    let kb = KnowledgeBase::ipswich();
    let composer = TemplateComposer::new();
    let conditions = ["Clear", "Clouds", "Rain", "Snow", "Mist", "Cold"];
    let facts: String = kb.facts().iter().map(|f| f.text.as_str()).collect();

    for month in 1..=12 {
      let base = StoryContext::bare(date(2025, month, 14));
      for condition in conditions {
        for tide in TideState::iter().map(Some).chain([None]) {
          let mut ctx = with_condition(base.clone(), condition);
          if let Some(t) = tide {
            ctx = with_tide(ctx, t);
          }
          let out = composer.compose_seeded(&ctx, &kb, None);
          assert_grounded(&kb, &out.body);

          for word in out.body.split(|c: char| !c.is_ascii_digit()) {
            if word.len() == 4 {
              assert!(facts.contains(word), "year {word} not in any fact");
            }
          }
        }
      }
    }
  }

  #[test]
  fn tide_titles_need_a_tide() {
    let kb = KnowledgeBase::ipswich();
    let composer = TemplateComposer::new();
    let ctx = StoryContext::bare(date(2025, 8, 1));
    for seed in 0..200 {
      let out = composer.compose_seeded(&ctx, &kb, Some(seed));
      assert!(!out.title.contains('{'), "{}", out.title);
      assert!(!out.title.contains("Tide"), "{}", out.title);
    }
    let ctx = with_tide(ctx, TideState::Falling);
    let titled = (0..200)
      .map(|seed| composer.compose_seeded(&ctx, &kb, Some(seed)).title)
      .any(|t| t == "The Falling Tide" || t == "The Great Marsh at Falling Tide");
    assert!(titled);
  }

  #[tokio::test]
  async fn composer_trait_matches_unseeded_call() {
    let kb = KnowledgeBase::ipswich();
    let ctx = StoryContext::bare(date(2025, 3, 3));
    let composer = TemplateComposer::new();
    let via_trait = composer.compose(&ctx, &kb).await.unwrap();
    assert_eq!(via_trait, composer.compose_seeded(&ctx, &kb, None));
    assert_eq!(composer.kind(), ComposerKind::Template);
  }
}
