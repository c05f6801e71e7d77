//! Core library for the `weather` service.
//!
//! This crate defines:
//! - The named-location registry
//! - The met.no forecast provider
//! - The transformation from raw forecasts to compact, unit-aware summaries
//! - Configuration handling
//!
//! It is used by `weather-cli` (CLI and HTTP server), but can also be reused by
//! other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod service;
pub mod transform;
pub mod units;

pub use config::{Config, LocationConfig};
pub use error::WeatherError;
pub use location::{Location, LocationRegistry};
pub use model::{
    RawForecast, WeatherDetails, WeatherQuery, WeatherReport, WeatherRequest, WeatherSummary,
};
pub use provider::{WeatherProvider, metno::MetNoProvider};
pub use service::WeatherService;
pub use transform::transform;
pub use units::{CompassPoint, TemperatureUnit};
