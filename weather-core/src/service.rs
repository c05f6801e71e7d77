use tracing::{error, info, instrument};

use crate::{
    Config,
    error::WeatherError,
    location::LocationRegistry,
    model::{WeatherQuery, WeatherReport, WeatherRequest, WeatherSummary},
    provider::{WeatherProvider, provider_from_config},
    transform::transform,
};

/// Request boundary: resolve, fetch, transform.
///
/// Every failure along the way ends up as [`WeatherSummary::Failure`];
/// nothing here panics or bubbles an error to the caller.
#[derive(Debug)]
pub struct WeatherService {
    registry: LocationRegistry,
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(registry: LocationRegistry, provider: Box<dyn WeatherProvider>) -> Self {
        Self { registry, provider }
    }

    /// Build the service with the met.no provider and the configured registry.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.registry(), provider_from_config(config)?))
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Validate raw client parameters and serve them.
    pub async fn handle_query(&self, query: WeatherQuery) -> WeatherSummary {
        match query.into_request() {
            Ok(request) => self.get_weather(&request).await,
            Err(err) => {
                error!(error = %err, "rejected weather query");
                WeatherSummary::Failure(err.to_string())
            }
        }
    }

    #[instrument(skip(self, request), fields(location = %request.location, unit = %request.unit))]
    pub async fn get_weather(&self, request: &WeatherRequest) -> WeatherSummary {
        let result = self.try_get_weather(request).await;
        match &result {
            Ok(report) => info!(temperature = report.temperature, condition = %report.condition, "weather served"),
            Err(err) => error!(error = %err, "failed to fetch weather data"),
        }
        result.into()
    }

    /// Same as [`get_weather`](Self::get_weather) but keeps the typed error.
    pub async fn try_get_weather(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherReport, WeatherError> {
        let location = self.registry.resolve(&request.location)?;
        let raw = self.provider.fetch_forecast(location).await?;
        transform(&raw, location, request.unit, request.details)
    }
}
