//! Unit conversion, rounding and compass bucketing.
//!
//! Every rounding step here is half-up (`floor(x + 0.5)`), so `.x5`
//! temperatures and bearings on a 22.5° boundary always move toward
//! positive infinity regardless of sign.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// Temperature unit requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Convert a Celsius reading into this unit, without rounding.
    pub fn convert_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "C" => Ok(TemperatureUnit::Celsius),
            "F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(WeatherError::InvalidUnit(value.to_string())),
        }
    }
}

/// Round half-up to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// One of the eight principal compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl CompassPoint {
    const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    /// Bucket a bearing into its nearest 45° sector.
    ///
    /// Any finite bearing is accepted; values outside `[0, 360)` wrap.
    /// Returns `None` for NaN and infinities.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let sector = (degrees / 45.0 + 0.5).floor();
        let index = (sector % 8.0 + 8.0) % 8.0;
        Self::ALL.get(index as usize).copied()
    }

    /// Canonical ASCII abbreviation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthEast => "NE",
            CompassPoint::East => "E",
            CompassPoint::SouthEast => "SE",
            CompassPoint::South => "S",
            CompassPoint::SouthWest => "SW",
            CompassPoint::West => "W",
            CompassPoint::NorthWest => "NW",
        }
    }

    /// Norwegian display form (Ø = øst, V = vest).
    pub fn norwegian(&self) -> &'static str {
        match self {
            CompassPoint::North => "N",
            CompassPoint::NorthEast => "NØ",
            CompassPoint::East => "Ø",
            CompassPoint::SouthEast => "SØ",
            CompassPoint::South => "S",
            CompassPoint::SouthWest => "SV",
            CompassPoint::West => "V",
            CompassPoint::NorthWest => "NV",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
