//! Configuration and wiring for the `tidings` binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use serde::Deserialize;
use tidings_core::KnowledgeBase;
use tidings_engine::{Engine, EngineConfig};
use tidings_sources::{AiComposer, AiConfig, HttpSignals, Location, SourcesConfig};
use tidings_store_sqlite::SqliteStore;

/// The concrete engine the binary runs.
pub type AppEngine = Engine<SqliteStore, HttpSignals, AiComposer>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Server configuration, read from a TOML file and then overridden by
/// `TIDINGS_`-prefixed environment variables (`__` separates nested keys,
/// e.g. `TIDINGS_AI__API_KEY`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub location:   Location,
  pub sources:    SourcesConfig,
  pub ai:         AiConfig,
  pub engine:     EngineConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from("~/.local/share/tidings/tidings.db"),
      location:   Location::default(),
      sources:    SourcesConfig::default(),
      ai:         AiConfig::default(),
      engine:     EngineConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional file at `path` under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder().add_source(config::File::from(path).required(false)),
    )
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .add_source(
        config::Environment::with_prefix("TIDINGS")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }
}

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// Open the store, build the clients and assemble the engine.
pub async fn build_engine(cfg: &ServerConfig) -> anyhow::Result<AppEngine> {
  let store_path = expand_tilde(&cfg.store_path);
  if let Some(dir) = store_path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {dir:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let signals = HttpSignals::new(cfg.location.clone(), cfg.sources.clone())
    .context("failed to build signal client")?;

  let ai = AiComposer::new(cfg.ai.clone()).context("failed to build ai client")?;
  let ai = if ai.is_configured() {
    tracing::info!(model = %cfg.ai.model, "ai composer enabled");
    Some(ai)
  } else {
    tracing::info!("no ai api key configured; chapters will use templates");
    None
  };

  Ok(Engine::new(
    Arc::new(store),
    Arc::new(signals),
    ai,
    KnowledgeBase::ipswich(),
    &cfg.engine,
  ))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use tidings_engine::ConflictPolicy;

  use super::*;

  fn from_toml(text: &str) -> ServerConfig {
    ServerConfig::from_builder(
      config::Config::builder()
        .add_source(config::File::from_str(text, config::FileFormat::Toml)),
    )
    .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.location.tide_station, "8440452");
    assert_eq!(cfg.engine.max_news_items, 5);
    assert!(cfg.ai.api_key.is_none());
  }

  #[test]
  fn nested_sections_override_defaults() {
    let cfg = from_toml(
      r#"
        port = 9000

        [ai]
        model = "claude-test"

        [engine]
        conflict_policy = "reject"
        source_timeout_ms = 2500

        [sources.endpoints]
        tide = "http://localhost:9999"
      "#,
    );
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.ai.model, "claude-test");
    assert_eq!(cfg.ai.max_tokens, 1024);
    assert_eq!(cfg.engine.conflict_policy, ConflictPolicy::Reject);
    assert_eq!(cfg.engine.source_timeout_ms, 2500);
    assert_eq!(cfg.sources.endpoints.tide, "http://localhost:9999");
    assert_eq!(cfg.sources.endpoints.ndbc, "https://www.ndbc.noaa.gov");
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else {
      return;
    };
    assert_eq!(
      expand_tilde(Path::new("~/data/t.db")),
      PathBuf::from(home).join("data/t.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/t.db")), PathBuf::from("/tmp/t.db"));
  }
}
