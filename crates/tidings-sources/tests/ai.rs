use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use tidings_core::{
  Composer, ComposerKind, GenerationError, KnowledgeBase, StoryContext,
  context::NewsBrief,
};
use tidings_sources::{AiComposer, AiConfig, DEFAULT_TITLE};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn composer_for(server: &MockServer, key: Option<&str>) -> AiComposer {
  AiComposer::new(AiConfig {
    api_key: key.map(str::to_string),
    base_url: server.uri(),
    timeout_secs: 1,
    max_body_chars: 600,
    ..AiConfig::default()
  })
  .unwrap()
}

fn context() -> StoryContext {
  let mut ctx = StoryContext::bare(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
  ctx.news_items = vec![
    NewsBrief {
      id:          11,
      headline:    "Library extends winter hours".into(),
      summary:     "The public library will stay open later on weekdays.".into(),
      article_url: "https://example.org/11".into(),
    },
    NewsBrief {
      id:          12,
      headline:    "Shellfish flats reopen".into(),
      summary:     String::new(),
      article_url: "https://example.org/12".into(),
    },
  ];
  ctx
}

fn reply(text: &str) -> ResponseTemplate {
  ResponseTemplate::new(200).set_body_json(json!({
    "id": "msg_01",
    "type": "message",
    "role": "assistant",
    "content": [{ "type": "text", "text": text }],
    "stop_reason": "end_turn"
  }))
}

#[tokio::test]
async fn composes_from_a_well_formed_reply() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .and(header("x-api-key", "test-key"))
    .and(header("anthropic-version", "2023-06-01"))
    .respond_with(reply(
      "TITLE: Cold Light on the Marsh\n\nBODY:\nThe Great Marsh lay pale under a low sun.\n\nBy evening the lamps were on along the river.",
    ))
    .expect(1)
    .mount(&server)
    .await;

  let composer = composer_for(&server, Some("test-key"));
  assert_eq!(composer.kind(), ComposerKind::Ai);

  let out = composer
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap();

  assert_eq!(out.title, "Cold Light on the Marsh");
  assert!(out.body.starts_with("The Great Marsh"));
  assert_eq!(out.used_news_item_ids.into_iter().collect::<Vec<_>>(), vec![11, 12]);
}

#[tokio::test]
async fn prompt_reaches_the_service() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(reply("TITLE: Quiet\n\nBODY:\nSnow on the green."))
    .mount(&server)
    .await;

  let composer = composer_for(&server, Some("test-key"));
  composer
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap();

  let requests = server.received_requests().await.unwrap();
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
  let user = body["messages"][0]["content"].as_str().unwrap();
  assert!(user.contains("Library extends winter hours"));
  assert!(user.contains("Shellfish flats reopen"));
  assert!(body["system"].as_str().unwrap().contains("Ipswich"));
  assert_eq!(body["model"], "claude-sonnet-4-20250514");
}

#[tokio::test]
async fn missing_title_falls_back_to_default() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(reply("BODY:\nFog sat in the river mouth all morning."))
    .mount(&server)
    .await;

  let out = composer_for(&server, Some("test-key"))
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap();
  assert_eq!(out.title, DEFAULT_TITLE);
}

#[tokio::test]
async fn no_key_is_not_configured() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(reply("unused"))
    .expect(0)
    .mount(&server)
    .await;

  let composer = composer_for(&server, None);
  assert!(!composer.is_configured());
  let err = composer
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap_err();
  assert!(matches!(err, GenerationError::NotConfigured));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(ResponseTemplate::new(529).set_body_json(json!({
      "type": "error",
      "error": { "type": "overloaded_error", "message": "Overloaded" }
    })))
    .mount(&server)
    .await;

  let err = composer_for(&server, Some("test-key"))
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap_err();
  match err {
    GenerationError::Status { status, message } => {
      assert_eq!(status, 529);
      assert_eq!(message, "Overloaded");
    }
    other => panic!("expected status error, got {other:?}"),
  }
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
    .mount(&server)
    .await;

  let err = composer_for(&server, Some("test-key"))
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap_err();
  assert!(matches!(err, GenerationError::Malformed(_)));
}

#[tokio::test]
async fn empty_content_is_malformed() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
    .mount(&server)
    .await;

  let err = composer_for(&server, Some("test-key"))
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap_err();
  assert!(matches!(err, GenerationError::Malformed(_)));
}

#[tokio::test]
async fn refusals_and_overlong_bodies_are_invalid() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(reply("TITLE: Sorry\n\nBODY:\nI'm sorry, but as an AI I cannot write that."))
    .up_to_n_times(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(reply(&format!("TITLE: Long\n\nBODY:\n{}", "salt marsh ".repeat(80))))
    .mount(&server)
    .await;

  let composer = composer_for(&server, Some("test-key"));
  let kb = KnowledgeBase::ipswich();

  let first = composer.compose(&context(), &kb).await.unwrap_err();
  assert!(matches!(first, GenerationError::Invalid(_)));
  let second = composer.compose(&context(), &kb).await.unwrap_err();
  assert!(matches!(second, GenerationError::Invalid(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/v1/messages"))
    .respond_with(reply("TITLE: Late\n\nBODY:\nToo late.").set_delay(Duration::from_secs(3)))
    .mount(&server)
    .await;

  let err = composer_for(&server, Some("test-key"))
    .compose(&context(), &KnowledgeBase::ipswich())
    .await
    .unwrap_err();
  assert!(matches!(err, GenerationError::Timeout));
}
