//! HTTP clients for the public data sources a chapter draws on, and the AI
//! composer.
//!
//! [`HttpSignals`] implements [`Signals`] over NOAA, OpenWeatherMap, AirNow,
//! NDBC and the US Drought Monitor, with field notes from eBird, the
//! National Weather Service and USGS. Readings with no credential-free feed
//! (plankton, algal blooms, snow, vegetation, shoreline, sky) are estimated
//! locally from the calendar and never fail.

mod ai;
mod astronomy;
mod atmosphere;
pub mod config;
pub mod error;
mod field;
mod http;
mod land;
mod ocean;
mod tide;
mod weather;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use tidings_core::{
  context::{
    AirQuality, BirdSighting, CoastalErosion, Drought, HarmfulAlgae,
    MarineForecast, MeteorShower, OceanColor, Planets, RiverFlow, SeaSurface,
    SnowCover, Tide, Vegetation, Waves, Weather,
  },
  signal::Signals,
};

pub use ai::{AiComposer, DEFAULT_TITLE};
pub use config::{AiConfig, Endpoints, Location, SourcesConfig};
pub use error::{Result, SourceError};

/// Live signal client for one [`Location`].
#[derive(Debug, Clone)]
pub struct HttpSignals {
  client:   Client,
  location: Location,
  config:   SourcesConfig,
  buoy:     ocean::BuoyCache,
}

impl HttpSignals {
  pub fn new(location: Location, config: SourcesConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("tidings/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, location, config, buoy: Default::default() })
  }

  pub fn location(&self) -> &Location {
    &self.location
  }
}

impl Signals for HttpSignals {
  type Error = SourceError;

  // ── Remote ────────────────────────────────────────────────────────────

  async fn weather(&self, date: NaiveDate) -> Result<Option<Weather>> {
    weather::fetch(&self.client, &self.config, &self.location, date).await
  }

  async fn tide(&self, date: NaiveDate) -> Result<Option<Tide>> {
    tide::fetch(&self.client, &self.config, &self.location, date).await
  }

  async fn waves(&self, date: NaiveDate) -> Result<Option<Waves>> {
    if !http::is_today(date) {
      return Ok(None);
    }
    let reading = self.buoy.reading(&self.client, &self.config, &self.location).await?;
    Ok(ocean::waves(&reading))
  }

  async fn sea_surface(&self, date: NaiveDate) -> Result<Option<SeaSurface>> {
    if !http::is_today(date) {
      return Ok(None);
    }
    let reading = self.buoy.reading(&self.client, &self.config, &self.location).await?;
    Ok(ocean::sea_surface(&reading, date))
  }

  async fn air_quality(&self, date: NaiveDate) -> Result<Option<AirQuality>> {
    atmosphere::air_quality(&self.client, &self.config, &self.location, date).await
  }

  async fn drought(&self, date: NaiveDate) -> Result<Option<Drought>> {
    land::drought(&self.client, &self.config, &self.location, date).await
  }

  // ── Local estimates ───────────────────────────────────────────────────

  async fn ocean_color(&self, date: NaiveDate) -> Result<Option<OceanColor>> {
    Ok(Some(ocean::ocean_color(date)))
  }

  async fn harmful_algae(&self, date: NaiveDate) -> Result<Option<HarmfulAlgae>> {
    Ok(Some(ocean::harmful_algae(date)))
  }

  async fn vegetation(&self, date: NaiveDate) -> Result<Option<Vegetation>> {
    Ok(Some(land::vegetation(date)))
  }

  async fn snow(&self, date: NaiveDate) -> Result<Option<SnowCover>> {
    Ok(Some(land::snow(date)))
  }

  async fn coastal_erosion(&self, _date: NaiveDate) -> Result<Option<CoastalErosion>> {
    Ok(Some(land::coastal_erosion()))
  }

  async fn planets(&self, date: NaiveDate) -> Result<Option<Planets>> {
    Ok(Some(astronomy::planets(date)))
  }

  async fn meteor_shower(&self, date: NaiveDate) -> Result<Option<MeteorShower>> {
    Ok(astronomy::meteor_shower(date))
  }

  // ── Field notes ───────────────────────────────────────────────────────

  async fn bird_sightings(&self, date: NaiveDate) -> Result<Option<Vec<BirdSighting>>> {
    field::bird_sightings(&self.client, &self.config, &self.location, date).await
  }

  async fn marine_forecast(&self, date: NaiveDate) -> Result<Option<MarineForecast>> {
    field::marine_forecast(&self.client, &self.config, &self.location, date).await
  }

  async fn river_flow(&self, date: NaiveDate) -> Result<Option<RiverFlow>> {
    field::river_flow(&self.client, &self.config, &self.location, date).await
  }
}
