use crate::{Config, Location, error::WeatherError, model::RawForecast, provider::metno::MetNoProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod metno;

/// Source of raw forecast payloads for a resolved location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, location: &Location) -> Result<RawForecast, WeatherError>;
}

/// Construct the met.no provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = MetNoProvider::new(&config.base_url, &config.user_agent, config.timeout())?;
    Ok(Box::new(provider))
}
