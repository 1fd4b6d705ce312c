//! [`Composer`] backed by the Anthropic Messages API.

mod prompt;

use std::{collections::BTreeSet, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tidings_core::{
  Composer, ComposerKind, Composition, GenerationError, KnowledgeBase,
  StoryContext,
};

pub use self::prompt::DEFAULT_TITLE;
use crate::{
  Result,
  config::{AiConfig, secret},
  http::join,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
  model:      &'a str,
  max_tokens: u32,
  system:     &'a str,
  messages:   Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
  role:    &'a str,
  content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
  #[serde(default)]
  content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  kind: String,
  #[serde(default)]
  text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
  error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
  message: String,
}

// ─── Composer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AiComposer {
  client: Client,
  config: AiConfig,
}

impl AiComposer {
  pub fn new(config: AiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  /// Whether an API key is present. Without one every call fails fast with
  /// [`GenerationError::NotConfigured`].
  pub fn is_configured(&self) -> bool {
    secret(&self.config.api_key).is_some()
  }

  async fn request(&self, key: &str, user: String) -> Result<String, GenerationError> {
    let body = MessagesRequest {
      model:      &self.config.model,
      max_tokens: self.config.max_tokens,
      system:     prompt::SYSTEM_PROMPT,
      messages:   vec![Message { role: "user", content: user }],
    };

    let resp = self
      .client
      .post(join(&self.config.base_url, "/v1/messages"))
      .header("x-api-key", key)
      .header("anthropic-version", ANTHROPIC_VERSION)
      .json(&body)
      .send()
      .await
      .map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
      let raw = resp.text().await.unwrap_or_default();
      let message = serde_json::from_str::<ErrorResponse>(&raw)
        .map(|e| e.error.message)
        .unwrap_or(raw);
      return Err(GenerationError::Status { status: status.as_u16(), message });
    }

    let parsed: MessagesResponse = resp.json().await.map_err(|e| {
      if e.is_timeout() {
        GenerationError::Timeout
      } else {
        GenerationError::Malformed(e.to_string())
      }
    })?;

    let text: String = parsed
      .content
      .into_iter()
      .filter(|b| b.kind == "text")
      .filter_map(|b| b.text)
      .collect::<Vec<_>>()
      .join("\n");
    if text.trim().is_empty() {
      return Err(GenerationError::Malformed("no text content".to_string()));
    }
    Ok(text)
  }
}

fn transport(e: reqwest::Error) -> GenerationError {
  if e.is_timeout() {
    GenerationError::Timeout
  } else {
    GenerationError::Unavailable(e.to_string())
  }
}

impl Composer for AiComposer {
  fn kind(&self) -> ComposerKind {
    ComposerKind::Ai
  }

  async fn compose(
    &self,
    context: &StoryContext,
    knowledge: &KnowledgeBase,
  ) -> Result<Composition, GenerationError> {
    let key = secret(&self.config.api_key).ok_or(GenerationError::NotConfigured)?;

    let user = prompt::user_prompt(context, knowledge);
    tracing::debug!(
      date = %context.date,
      news = context.news_items.len(),
      prompt_chars = user.len(),
      "requesting ai chapter"
    );
    let reply = self.request(key, user).await?;

    let (title, body) = prompt::parse_reply(&reply);
    if let Some(reason) = prompt::violation(&title, &body, self.config.max_body_chars) {
      return Err(GenerationError::Invalid(reason));
    }

    // Every item offered in the prompt counts as used.
    let used_news_item_ids: BTreeSet<i64> =
      context.news_items.iter().map(|n| n.id).collect();

    Ok(Composition { title, body, used_news_item_ids })
  }
}
