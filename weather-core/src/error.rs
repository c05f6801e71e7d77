use thiserror::Error;

/// Everything that can go wrong while producing a weather summary.
///
/// None of these are fatal: the service boundary turns each one into a
/// failure summary carrying the `Display` text as its message.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unsupported temperature unit '{0}'. Supported units: C, F.")]
    InvalidUnit(String),

    #[error("HTTP error! status: {status}")]
    UpstreamHttp { status: u16 },

    #[error("Failed to reach weather API: {0}")]
    UpstreamTransport(String),

    #[error("Malformed forecast payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return WeatherError::UpstreamHttp { status: status.as_u16() };
        }
        if err.is_timeout() {
            return WeatherError::UpstreamTransport(format!("request timed out: {err}"));
        }
        WeatherError::UpstreamTransport(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::MalformedPayload(err.to_string())
    }
}
