//! Shared request helpers: status checking and body decoding with the
//! source's name attached to every error.

use chrono::{Local, NaiveDate};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::{Result, SourceError};

pub async fn get_json<T: DeserializeOwned>(
  req: RequestBuilder,
  source: &'static str,
) -> Result<T> {
  let resp = req.send().await?;
  if !resp.status().is_success() {
    return Err(SourceError::Status(source, resp.status().as_u16()));
  }
  resp
    .json()
    .await
    .map_err(|e| SourceError::Decode(source, e.to_string()))
}

pub async fn get_text(req: RequestBuilder, source: &'static str) -> Result<String> {
  let resp = req.send().await?;
  if !resp.status().is_success() {
    return Err(SourceError::Status(source, resp.status().as_u16()));
  }
  resp
    .text()
    .await
    .map_err(|e| SourceError::Decode(source, e.to_string()))
}

/// Feeds that only report current observations have nothing to say
/// about any other day.
pub fn is_today(date: NaiveDate) -> bool {
  date == Local::now().date_naive()
}

pub fn join(base: &str, path: &str) -> String {
  format!("{}{}", base.trim_end_matches('/'), path)
}
