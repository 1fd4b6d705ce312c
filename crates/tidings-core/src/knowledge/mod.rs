//! The Knowledge Base: the only source of place, history and ecology that
//! generated prose may draw on.
//!
//! It is static and in-memory. [`KnowledgeBase::ipswich`] builds the shipped
//! corpus; tests build their own through [`KnowledgeBase::new`].

mod ipswich;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{context::TideState, season::Season};

// ─── Entries ─────────────────────────────────────────────────────────────────

/// A named place. Prose may mention a place only if it is in the gazetteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
  pub id:          String,
  pub name:        String,
  pub description: String,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum FactKind {
  Geography,
  History,
  Ecology,
  /// The feel, light and sound of a season.
  Character,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
  pub id:          String,
  pub kind:        FactKind,
  /// Empty means year-round.
  pub seasons:     Vec<Season>,
  /// Higher wins ties between otherwise equal candidates.
  pub specificity: u8,
  /// Gazetteer ids of every place the text names.
  pub places:      Vec<String>,
  pub text:        String,
}

impl Fact {
  pub fn applies_to(&self, season: Season) -> bool {
    self.seasons.is_empty() || self.seasons.contains(&season)
  }
}

/// Where a fragment may sit in a composed chapter.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
  Title,
  Opening,
  Tide,
  Interlude,
  NewsLead,
  NewsFollow,
  Closing,
}

/// Coarse weather families used to key opening fragments.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumIter,
)]
pub enum ConditionBucket {
  Clear,
  Clouds,
  Rain,
  Snow,
  Fog,
}

impl ConditionBucket {
  /// Map a free-text condition onto a bucket by substring. Unrecognised
  /// conditions have no bucket.
  pub fn from_condition(condition: &str) -> Option<Self> {
    const TABLE: &[(&str, ConditionBucket)] = &[
      ("thunder", ConditionBucket::Rain),
      ("drizzle", ConditionBucket::Rain),
      ("shower", ConditionBucket::Rain),
      ("rain", ConditionBucket::Rain),
      ("sleet", ConditionBucket::Snow),
      ("flurr", ConditionBucket::Snow),
      ("snow", ConditionBucket::Snow),
      ("fog", ConditionBucket::Fog),
      ("mist", ConditionBucket::Fog),
      ("haze", ConditionBucket::Fog),
      ("overcast", ConditionBucket::Clouds),
      ("partly", ConditionBucket::Clouds),
      ("cloud", ConditionBucket::Clouds),
      ("clear", ConditionBucket::Clear),
      ("sunny", ConditionBucket::Clear),
    ];
    let lower = condition.to_lowercase();
    TABLE
      .iter()
      .find(|(needle, _)| lower.contains(needle))
      .map(|(_, bucket)| *bucket)
  }
}

/// A reusable piece of prose. Unset keys match any value; a fragment with
/// every key unset is the default for its slot.
///
/// When several fragments fit, the heaviest wins. A tide key outweighs a
/// condition key, which outweighs a season key, so a known tide state is
/// never described by a season-level default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
  pub id:        String,
  pub slot:      Slot,
  pub season:    Option<Season>,
  pub condition: Option<ConditionBucket>,
  pub tide:      Option<TideState>,
  pub places:    Vec<String>,
  pub text:      String,
}

impl Fragment {
  /// Whether every set key agrees with the given context values.
  pub fn fits(
    &self,
    season: Season,
    condition: Option<ConditionBucket>,
    tide: Option<TideState>,
  ) -> bool {
    self.season.is_none_or(|s| s == season)
      && self.condition.is_none_or(|c| Some(c) == condition)
      && self.tide.is_none_or(|t| Some(t) == tide)
  }

  pub fn weight(&self) -> u8 {
    u8::from(self.season.is_some())
      + 2 * u8::from(self.condition.is_some())
      + 4 * u8::from(self.tide.is_some())
  }
}

// ─── Base ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
  places:    Vec<Place>,
  facts:     Vec<Fact>,
  fragments: Vec<Fragment>,
}

impl KnowledgeBase {
  pub fn new(
    places: Vec<Place>,
    facts: Vec<Fact>,
    fragments: Vec<Fragment>,
  ) -> Self {
    Self { places, facts, fragments }
  }

  /// The shipped corpus for Ipswich, Massachusetts.
  pub fn ipswich() -> Self {
    ipswich::build()
  }

  pub fn places(&self) -> &[Place] {
    &self.places
  }

  pub fn facts(&self) -> &[Fact] {
    &self.facts
  }

  pub fn fragments(&self) -> &[Fragment] {
    &self.fragments
  }

  pub fn place(&self, id: &str) -> Option<&Place> {
    self.places.iter().find(|p| p.id == id)
  }

  pub fn fragments_in(&self, slot: Slot) -> impl Iterator<Item = &Fragment> {
    self.fragments.iter().filter(move |f| f.slot == slot)
  }

  /// Facts of the given kinds that hold in `season`, best first: entries
  /// tagged for the season ahead of year-round ones, then higher
  /// specificity, then lexical id.
  pub fn ranked_facts(&self, kinds: &[FactKind], season: Season) -> Vec<&Fact> {
    let mut facts: Vec<&Fact> = self
      .facts
      .iter()
      .filter(|f| kinds.contains(&f.kind) && f.applies_to(season))
      .collect();
    facts.sort_by(|a, b| {
      fact_rank(b)
        .cmp(&fact_rank(a))
        .then_with(|| a.id.cmp(&b.id))
    });
    facts
  }

  /// A bounded, prompt-sized selection for `season`: layout first, then the
  /// season's character, its ecology, and a little history.
  pub fn excerpt(&self, season: Season, limit: usize) -> Vec<&Fact> {
    const QUOTAS: &[(FactKind, usize)] = &[
      (FactKind::Geography, 4),
      (FactKind::Character, 2),
      (FactKind::Ecology, 4),
      (FactKind::History, 2),
    ];
    QUOTAS
      .iter()
      .flat_map(|(kind, quota)| {
        self.ranked_facts(&[*kind], season).into_iter().take(*quota)
      })
      .take(limit)
      .collect()
  }

  /// Gazetteer places named in `text`. Longer names are matched first so
  /// that "Ipswich River" is not also counted as "Ipswich".
  pub fn mentioned_places(&self, text: &str) -> Vec<&Place> {
    let mut by_length: Vec<&Place> = self.places.iter().collect();
    by_length.sort_by_key(|p| std::cmp::Reverse(p.name.len()));

    let mut remaining = text.to_string();
    let mut found = Vec::new();
    for place in by_length {
      if remaining.contains(&place.name) {
        remaining = remaining.replace(&place.name, "\u{1}");
        found.push(place);
      }
    }
    found
  }
}

fn fact_rank(f: &Fact) -> (bool, u8) {
  (!f.seasons.is_empty(), f.specificity)
}
