//! Prompt assembly and reply parsing for the AI composer.

use std::fmt::Write as _;

use tidings_core::{
  KnowledgeBase, StoryContext,
  context::{FieldNotes, TideState},
};

pub const SYSTEM_PROMPT: &str = "\
You write one short chapter a day about Ipswich, Massachusetts, in the \
tradition of New England nature writing: contemplative, sensory, plain. \
The land and the water are present in every chapter, observing the town \
alongside its people.

Rules:
- Use only the places and facts given in the prompt. Never invent a place, \
a street, a landmark or a historical detail.
- Keep geography straight: the Ipswich River runs through downtown under the \
Choate Bridge; the beaches at Crane Beach and Great Neck are miles away on \
the coast; the Great Marsh joins the river mouth to the sea.
- Never name a person from the news. Use roles such as \"a town official\" \
or \"a longtime resident\".
- Leave out deaths, crimes and accidents involving individuals.
- Translate measurements into what a walker would feel. No exact \
temperatures, heights, speeds or readings.
- No purple prose, no cliches, no sentimentality.";

/// News summaries are cut to this many characters in the prompt.
const SUMMARY_CHARS: usize = 200;
/// Knowledge entries offered per prompt.
const EXCERPT_LIMIT: usize = 12;
/// Bird sightings listed per prompt.
const SIGHTING_LIMIT: usize = 5;

pub const DEFAULT_TITLE: &str = "A Day in Ipswich";

pub fn user_prompt(context: &StoryContext, knowledge: &KnowledgeBase) -> String {
  let season = &context.season;
  let mut out = String::new();

  let _ = writeln!(out, "Write today's chapter for Ipswich, Massachusetts.\n");

  let _ = writeln!(out, "## Date");
  let _ = writeln!(
    out,
    "{}, {}\n",
    season.day_of_week,
    context.date.format("%B %-d, %Y")
  );

  let _ = writeln!(out, "## Season");
  let _ = writeln!(
    out,
    "{} ({} days)\n",
    season.name,
    season.day_length.to_string().to_lowercase()
  );

  let _ = writeln!(out, "## Weather");
  match &context.weather {
    Some(w) if w.estimated => {
      let _ = writeln!(out, "{} (typical for the season, not observed)\n", w.summary());
    }
    Some(w) => {
      let _ = writeln!(out, "{}\n", w.summary());
    }
    None => {
      let _ = writeln!(out, "Unknown. Keep the sky vague.\n");
    }
  }

  let _ = writeln!(out, "## Tide");
  let _ = writeln!(out, "{}\n", describe_tide(context.tide_state()));

  let highlights = context.environmental.highlights();
  if !highlights.is_empty() {
    let _ = writeln!(out, "## Environment");
    for h in &highlights {
      let _ = writeln!(out, "- {h}");
    }
    out.push('\n');
  }

  if !context.field_notes.is_empty() {
    let _ = writeln!(out, "## Field Notes");
    write_field_notes(&mut out, &context.field_notes);
    out.push('\n');
  }

  let _ = writeln!(out, "## Recent Stories (do not repeat their themes, places or phrases)");
  if context.recent_chapters.is_empty() {
    let _ = writeln!(out, "(No recent stories. This is the first chapter.)");
  } else {
    for recent in &context.recent_chapters {
      let _ = writeln!(
        out,
        "- **{}** \"{}\": {}",
        recent.date.format("%Y-%m-%d"),
        recent.title,
        recent.opening
      );
    }
  }
  out.push('\n');

  let _ = writeln!(out, "## Local News to Weave In");
  if context.news_items.is_empty() {
    let _ = writeln!(
      out,
      "(No local news today. Stay with the land, the water and the season.)"
    );
  } else {
    for (i, item) in context.news_items.iter().enumerate() {
      let _ = writeln!(out, "{}. {}", i + 1, item.headline);
      if !item.summary.is_empty() {
        let _ = writeln!(out, "   {}", truncate(&item.summary, SUMMARY_CHARS));
      }
    }
  }
  out.push('\n');

  let _ = writeln!(out, "## Places (the only ones you may name)");
  for place in knowledge.places() {
    let _ = writeln!(out, "- {}: {}", place.name, place.description);
  }
  out.push('\n');

  let _ = writeln!(out, "## Knowledge (factual substrate)");
  for fact in knowledge.excerpt(season.name, EXCERPT_LIMIT) {
    let _ = writeln!(out, "- {}", fact.text);
  }

  out.push_str(
    "\n---\n\nWrite a chapter of two or three paragraphs, 200 to 350 words. \
     Open in the physical world, weave the news into the town's day, connect \
     it to the season and the place, and close toward evening.\n\n\
     Respond exactly as:\nTITLE: <three to eight words>\n\nBODY:\n<paragraphs \
     separated by blank lines>\n",
  );

  out
}

fn write_field_notes(out: &mut String, notes: &FieldNotes) {
  if !notes.birds.is_empty() {
    let _ = writeln!(out, "Birds seen nearby this week:");
    for bird in notes.birds.iter().take(SIGHTING_LIMIT) {
      let count = bird.count.map(|n| format!(" ({n} seen)")).unwrap_or_default();
      let place = bird.location.as_deref().map(|l| format!(" at {l}")).unwrap_or_default();
      let _ = writeln!(out, "- {}{count}{place}", bird.common_name);
    }
  }
  if let Some(marine) = &notes.marine {
    if let Some(conditions) = &marine.conditions {
      let period = marine.period.as_deref().unwrap_or("Now");
      let _ = writeln!(out, "- Coast, {period}: {conditions}");
    }
    if let Some(wind) = &marine.wind {
      let _ = writeln!(out, "- Wind: {wind}");
    }
    if !marine.alerts.is_empty() {
      let _ = writeln!(out, "- Active alerts: {}", marine.alerts.join(", "));
    }
  }
  if let Some(river) = &notes.river {
    if let (Some(cfs), Some(status)) = (river.discharge_cfs, river.status) {
      let _ = writeln!(out, "- Ipswich River flow: {cfs:.1} cubic feet per second ({status})");
    }
    if let Some(height) = river.gauge_height_ft {
      let _ = writeln!(out, "- River gauge: {height:.2} feet");
    }
  }
}

fn describe_tide(state: Option<TideState>) -> &'static str {
  match state {
    Some(TideState::High) => "High, standing full in the creeks.",
    Some(TideState::Low) => "Low, the flats uncovered.",
    Some(TideState::Rising) => "Coming in.",
    Some(TideState::Falling) => "Going out.",
    None => "Unknown.",
  }
}

fn truncate(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let cut: String = text.chars().take(max).collect();
  format!("{}...", cut.trim_end())
}

/// Split a `TITLE:` / `BODY:` reply. A missing title falls back to
/// [`DEFAULT_TITLE`]; a missing `BODY:` marker makes everything after the
/// title line the body.
pub fn parse_reply(text: &str) -> (String, String) {
  let mut title = None;
  let mut body_lines: Vec<&str> = Vec::new();
  let mut in_body = false;

  for line in text.trim().lines() {
    let trimmed = line.trim_start();
    if !in_body && let Some(rest) = trimmed.strip_prefix("TITLE:") {
      if title.is_none() {
        title = Some(rest.trim().to_string());
      }
    } else if !in_body && let Some(rest) = trimmed.strip_prefix("BODY:") {
      in_body = true;
      if !rest.trim().is_empty() {
        body_lines.push(rest.trim());
      }
    } else if in_body {
      body_lines.push(line);
    }
  }

  let mut body = body_lines.join("\n").trim().to_string();
  if body.is_empty() {
    body = text
      .trim()
      .lines()
      .filter(|l| !l.trim_start().starts_with("TITLE:"))
      .collect::<Vec<_>>()
      .join("\n")
      .trim()
      .to_string();
  }

  let title = title
    .filter(|t| !t.is_empty())
    .unwrap_or_else(|| DEFAULT_TITLE.to_string());
  (title, body)
}

/// Phrases that mark a reply as unusable: self-reference, refusals,
/// markdown, protocol markers and unfilled placeholders.
const DISALLOWED: &[&str] = &[
  "as an ai",
  "language model",
  "i'm sorry",
  "i am sorry",
  "i cannot",
  "i can't",
  "```",
  "title:",
  "body:",
  "{",
  "}",
];

/// The first rule the composition breaks, if any.
pub fn violation(title: &str, body: &str, max_body_chars: usize) -> Option<String> {
  if title.trim().is_empty() {
    return Some("empty title".to_string());
  }
  if body.trim().is_empty() {
    return Some("empty body".to_string());
  }
  let len = body.chars().count();
  if len > max_body_chars {
    return Some(format!("body is {len} characters, limit {max_body_chars}"));
  }
  let lowered = format!("{title}\n{body}").to_lowercase();
  DISALLOWED
    .iter()
    .find(|marker| lowered.contains(*marker))
    .map(|marker| format!("contains {marker:?}"))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use tidings_core::context::{
    BirdSighting, FlowStatus, MarineForecast, NewsBrief, RecentChapter, RiverFlow,
    Tide,
  };

  use super::*;

  #[test]
  fn parses_title_and_body() {
    let (title, body) = parse_reply(
      "TITLE: Salt Hay and Slack Water\n\nBODY:\nThe marsh held still.\n\nEvening came on.\n",
    );
    assert_eq!(title, "Salt Hay and Slack Water");
    assert_eq!(body, "The marsh held still.\n\nEvening came on.");
  }

  #[test]
  fn missing_body_marker_uses_the_rest() {
    let (title, body) = parse_reply("TITLE: Low Light\nThe river ran dark.");
    assert_eq!(title, "Low Light");
    assert_eq!(body, "The river ran dark.");
  }

  #[test]
  fn missing_title_gets_default() {
    let (title, body) = parse_reply("BODY: The river ran dark.");
    assert_eq!(title, DEFAULT_TITLE);
    assert_eq!(body, "The river ran dark.");
  }

  #[test]
  fn violations() {
    assert_eq!(violation("T", "Fine prose.", 100), None);
    assert!(violation("", "Fine prose.", 100).is_some());
    assert!(violation("T", "  ", 100).is_some());
    assert!(violation("T", &"x".repeat(101), 100).is_some());
    assert!(violation("T", "As an AI, I walked the marsh.", 100).is_some());
    assert!(violation("T", "The {tide} turned.", 100).is_some());
    assert!(violation("T", "```text\nhi\n```", 100).is_some());
  }

  #[test]
  fn prompt_lists_recent_stories_and_field_notes() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let kb = KnowledgeBase::ipswich();

    let first = user_prompt(&StoryContext::bare(date), &kb);
    assert!(first.contains("This is the first chapter."));
    assert!(!first.contains("## Field Notes"));

    let mut ctx = StoryContext::bare(date);
    ctx.recent_chapters = vec![RecentChapter {
      date:    NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
      title:   "Ice on the Choate Bridge".into(),
      opening: "Frost held the rails at dawn.".into(),
    }];
    ctx.field_notes = FieldNotes {
      birds: vec![BirdSighting {
        common_name: "Snowy Owl".into(),
        location: Some("Crane Beach".into()),
        count: Some(2),
        ..Default::default()
      }],
      marine: Some(MarineForecast {
        period: Some("Tonight".into()),
        conditions: Some("Mostly cloudy.".into()),
        alerts: vec!["Small Craft Advisory".into()],
        ..Default::default()
      }),
      river: Some(RiverFlow {
        discharge_cfs: Some(33.0),
        status: Some(FlowStatus::Low),
        ..Default::default()
      }),
    };

    let prompt = user_prompt(&ctx, &kb);
    assert!(prompt.contains(
      "- **2025-01-04** \"Ice on the Choate Bridge\": Frost held the rails at dawn."
    ));
    assert!(!prompt.contains("first chapter"));
    assert!(prompt.contains("- Snowy Owl (2 seen) at Crane Beach"));
    assert!(prompt.contains("- Coast, Tonight: Mostly cloudy."));
    assert!(prompt.contains("- Active alerts: Small Craft Advisory"));
    assert!(prompt.contains("33.0 cubic feet per second (low)"));
  }

  #[test]
  fn prompt_carries_news_and_knowledge() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let mut ctx = StoryContext::bare(date);
    ctx.tide = Some(Tide { state: Some(TideState::High), ..Default::default() });
    ctx.news_items = vec![NewsBrief {
      id:          4,
      headline:    "Select Board approves harbor plan".into(),
      summary:     "y".repeat(400),
      article_url: "https://example.org/4".into(),
    }];
    let kb = KnowledgeBase::ipswich();

    let prompt = user_prompt(&ctx, &kb);
    assert!(prompt.contains("Sunday, January 5, 2025"));
    assert!(prompt.contains("1. Select Board approves harbor plan"));
    assert!(prompt.contains(&format!("{}...", "y".repeat(200))));
    assert!(!prompt.contains(&"y".repeat(201)));
    assert!(prompt.contains("High, standing full"));
    assert!(prompt.contains("Unknown. Keep the sky vague."));
    assert!(!prompt.contains("## Environment"));
    for fact in kb.excerpt(ctx.season.name, EXCERPT_LIMIT) {
      assert!(prompt.contains(&fact.text));
    }
  }
}
