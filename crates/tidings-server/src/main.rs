//! `tidings` binary: serve the API, or run one engine operation and print
//! the result as JSON.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tidings_core::news::ScrapedRecord;
use tidings_server::{ServerConfig, build_engine};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Daily chapters about Ipswich, MA")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tidings.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Generate the chapter for a date and print it.
  Generate {
    /// Defaults to today.
    #[arg(long)]
    date:  Option<NaiveDate>,
    /// Replace an existing chapter.
    #[arg(long)]
    force: bool,
  },
  /// Print the aggregated context for a date.
  Context {
    #[arg(long)]
    date: Option<NaiveDate>,
  },
  /// Ingest a JSON array of scraped news records.
  Ingest { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;
  let engine = build_engine(&cfg).await?;
  let today = || Local::now().date_naive();

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => {
      let app = tidings_api::router(engine).layer(TraceLayer::new_for_http());
      let address = format!("{}:{}", cfg.host, cfg.port);

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    }
    Command::Generate { date, force } => {
      let generated = engine
        .generate(date.unwrap_or_else(today), force)
        .await
        .context("generation failed")?;
      print_json(&generated)?;
    }
    Command::Context { date } => {
      let context = engine.context(date.unwrap_or_else(today)).await;
      print_json(&context)?;
    }
    Command::Ingest { file } => {
      let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {file:?}"))?;
      let records: Vec<ScrapedRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{file:?} is not a JSON array of records"))?;
      let report = engine.refresh_news(records).await;
      print_json(&report)?;
    }
  }

  Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "could not listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
