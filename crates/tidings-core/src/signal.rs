//! The `Signals` trait: every external reading the aggregator asks for.
//!
//! Each method is an independent source. Implementations return `Ok(None)`
//! when the source answered but had nothing for the date, and `Err` when it
//! could not be asked at all. The aggregator treats both the same way.
//!
//! The field-note sources default to `Ok(None)`; an implementation only
//! overrides the ones it can reach.

use std::future::Future;

use chrono::NaiveDate;

use crate::context::{
  AirQuality, BirdSighting, CoastalErosion, Drought, HarmfulAlgae,
  MarineForecast, MeteorShower, OceanColor, Planets, RiverFlow, SeaSurface,
  SnowCover, Tide, Vegetation, Waves, Weather,
};

pub trait Signals: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Conditions ────────────────────────────────────────────────────────

  fn weather(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Weather>, Self::Error>> + Send + '_;

  fn tide(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Tide>, Self::Error>> + Send + '_;

  // ── Ocean ─────────────────────────────────────────────────────────────

  fn waves(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Waves>, Self::Error>> + Send + '_;

  fn sea_surface(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<SeaSurface>, Self::Error>> + Send + '_;

  fn ocean_color(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<OceanColor>, Self::Error>> + Send + '_;

  fn harmful_algae(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<HarmfulAlgae>, Self::Error>> + Send + '_;

  // ── Atmosphere ────────────────────────────────────────────────────────

  fn air_quality(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<AirQuality>, Self::Error>> + Send + '_;

  // ── Land ──────────────────────────────────────────────────────────────

  fn vegetation(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Vegetation>, Self::Error>> + Send + '_;

  fn snow(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<SnowCover>, Self::Error>> + Send + '_;

  fn drought(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Drought>, Self::Error>> + Send + '_;

  fn coastal_erosion(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<CoastalErosion>, Self::Error>> + Send + '_;

  // ── Astronomy ─────────────────────────────────────────────────────────

  fn planets(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Planets>, Self::Error>> + Send + '_;

  fn meteor_shower(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<MeteorShower>, Self::Error>> + Send + '_;

  // ── Field notes ───────────────────────────────────────────────────────

  /// Notable recent sightings near the location.
  fn bird_sightings(
    &self,
    _date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Vec<BirdSighting>>, Self::Error>> + Send + '_ {
    async { Ok(None) }
  }

  fn marine_forecast(
    &self,
    _date: NaiveDate,
  ) -> impl Future<Output = Result<Option<MarineForecast>, Self::Error>> + Send + '_ {
    async { Ok(None) }
  }

  fn river_flow(
    &self,
    _date: NaiveDate,
  ) -> impl Future<Output = Result<Option<RiverFlow>, Self::Error>> + Send + '_ {
    async { Ok(None) }
  }
}
