//! Path and query parsing that reports failures as JSON errors rather than
//! axum's plain-text rejections.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ApiError;

pub fn date(raw: &str) -> Result<NaiveDate, ApiError> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
    ApiError::BadRequest(format!("invalid date {raw:?}, expected YYYY-MM-DD"))
  })
}

/// Parse an optional integer parameter and check it lies in `min..=max`.
pub fn bounded<T>(
  name: &str,
  raw: Option<&str>,
  default: T,
  min: T,
  max: T,
) -> Result<T, ApiError>
where
  T: FromStr + PartialOrd + std::fmt::Display + Copy,
{
  let Some(raw) = raw else {
    return Ok(default);
  };
  let value: T = raw
    .trim()
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("{name} must be a number")))?;
  if value < min || value > max {
    return Err(ApiError::BadRequest(format!(
      "{name} must be between {min} and {max}"
    )));
  }
  Ok(value)
}

pub fn flag(name: &str, raw: Option<&str>) -> Result<bool, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(false),
    Some("true" | "1" | "yes") => Ok(true),
    Some("false" | "0" | "no") => Ok(false),
    Some(other) => Err(ApiError::BadRequest(format!(
      "{name} must be true or false, got {other:?}"
    ))),
  }
}
