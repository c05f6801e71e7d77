use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{error::WeatherError, location::Location, model::RawForecast};

use super::WeatherProvider;

/// Client for the met.no Locationforecast 2.0 "compact" endpoint.
///
/// met.no rejects requests without an identifying `User-Agent`, so one is
/// always set on the underlying client.
#[derive(Debug, Clone)]
pub struct MetNoProvider {
    base_url: String,
    http: Client,
}

impl MetNoProvider {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::UpstreamTransport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url: base_url.into(), http })
    }

    fn compact_url(&self) -> String {
        format!("{}/compact", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for MetNoProvider {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn fetch_forecast(&self, location: &Location) -> Result<RawForecast, WeatherError> {
        let url = self.compact_url();
        debug!(%url, lat = location.latitude, lon = location.longitude, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("lat", location.latitude), ("lon", location.longitude)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "met.no request failed");
            return Err(WeatherError::UpstreamHttp { status: status.as_u16() });
        }

        RawForecast::from_json(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_url_ignores_trailing_slash() {
        let provider =
            MetNoProvider::new("http://localhost:1234/base/", "test/1.0", Duration::from_secs(1))
                .unwrap();
        assert_eq!(provider.compact_url(), "http://localhost:1234/base/compact");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "ø".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
