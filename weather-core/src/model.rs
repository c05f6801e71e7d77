use serde::{Deserialize, Serialize, Serializer};

use crate::{
    error::WeatherError,
    units::{CompassPoint, TemperatureUnit},
};

pub const DEFAULT_LOCATION: &str = "Stavanger";

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRequest {
    pub location: String,
    pub unit: TemperatureUnit,
    pub details: bool,
}

impl Default for WeatherRequest {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            unit: TemperatureUnit::default(),
            details: true,
        }
    }
}

/// Raw query parameters as they arrive from a client.
///
/// Missing values fall back to the [`WeatherRequest`] defaults. `details`
/// is enabled only by the exact string `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
    pub unit: Option<String>,
    pub details: Option<String>,
}

impl WeatherQuery {
    pub fn into_request(self) -> Result<WeatherRequest, WeatherError> {
        let defaults = WeatherRequest::default();
        let unit = match self.unit.as_deref() {
            Some(unit) => unit.parse()?,
            None => defaults.unit,
        };

        Ok(WeatherRequest {
            location: self.location.unwrap_or(defaults.location),
            unit,
            details: self.details.map_or(defaults.details, |d| d == "true"),
        })
    }
}

// ---- met.no locationforecast 2.0 "compact" payload ----
//
// Only the fields the transformer reads are modelled. Everything that may be
// absent upstream is an `Option` and resolved to a default at the use site.

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub properties: RawProperties,
}

impl RawForecast {
    /// Parse a response body, reporting shape errors as `MalformedPayload`.
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, WeatherError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProperties {
    pub timeseries: Vec<RawTimeseries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeseries {
    pub time: String,
    pub data: RawData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawData {
    pub instant: RawInstant,
    pub next_1_hours: Option<RawNextHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInstant {
    pub details: RawInstantDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInstantDetails {
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_from_direction: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub air_pressure_at_sea_level: Option<f64>,
    pub cloud_area_fraction: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNextHours {
    pub summary: Option<RawSummary>,
    pub details: Option<RawNextHoursDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub symbol_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNextHoursDetails {
    pub precipitation_amount: Option<f64>,
}

// ---- normalized output ----

/// Successful, normalized view of the current forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: f64,
    pub unit: TemperatureUnit,
    pub condition: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<WeatherDetails>,
}

/// Extra readings included when the caller asks for details.
///
/// Upstream values are passed through untouched; readings met.no left out
/// are omitted from the JSON rather than failing the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<CompassPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudiness: Option<f64>,
    pub precipitation: f64,
}

/// What the service hands back for every request.
///
/// Serializes as `{"success": true, ...report}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherSummary {
    Success(WeatherReport),
    Failure(String),
}

impl WeatherSummary {
    pub fn is_success(&self) -> bool {
        matches!(self, WeatherSummary::Success(_))
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherSummary::Success(report) => Some(report),
            WeatherSummary::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WeatherSummary::Success(_) => None,
            WeatherSummary::Failure(message) => Some(message),
        }
    }
}

impl From<Result<WeatherReport, WeatherError>> for WeatherSummary {
    fn from(result: Result<WeatherReport, WeatherError>) -> Self {
        match result {
            Ok(report) => WeatherSummary::Success(report),
            Err(err) => WeatherSummary::Failure(err.to_string()),
        }
    }
}

impl Serialize for WeatherSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T: Serialize> {
            success: bool,
            #[serde(flatten)]
            body: &'a T,
        }

        #[derive(Serialize)]
        struct Failure<'a> {
            error: &'a str,
        }

        match self {
            WeatherSummary::Success(report) => {
                Tagged { success: true, body: report }.serialize(serializer)
            }
            WeatherSummary::Failure(message) => {
                Tagged { success: false, body: &Failure { error: message } }.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(details: Option<WeatherDetails>) -> WeatherReport {
        WeatherReport {
            location: "Oslo".into(),
            temperature: 4.5,
            unit: TemperatureUnit::Celsius,
            condition: "rain".into(),
            updated: "2024-01-15T12:00:00Z".into(),
            details,
        }
    }

    #[test]
    fn request_defaults() {
        let req = WeatherRequest::default();
        assert_eq!(req.location, "Stavanger");
        assert_eq!(req.unit, TemperatureUnit::Celsius);
        assert!(req.details);
    }

    #[test]
    fn query_defaults_match_request_defaults() {
        let req = WeatherQuery::default().into_request().unwrap();
        assert_eq!(req, WeatherRequest::default());
    }

    #[test]
    fn query_details_only_enabled_by_literal_true() {
        let query = |d: &str| WeatherQuery { details: Some(d.into()), ..Default::default() };
        assert!(query("true").into_request().unwrap().details);
        assert!(!query("false").into_request().unwrap().details);
        assert!(!query("TRUE").into_request().unwrap().details);
        assert!(!query("1").into_request().unwrap().details);
        assert!(!query("").into_request().unwrap().details);
    }

    #[test]
    fn query_rejects_unknown_unit() {
        let query = WeatherQuery { unit: Some("K".into()), ..Default::default() };
        let err = query.into_request().unwrap_err();
        assert!(matches!(err, WeatherError::InvalidUnit(_)));
    }

    #[test]
    fn query_passes_location_and_unit_through() {
        let query = WeatherQuery {
            location: Some("Bergen".into()),
            unit: Some("F".into()),
            details: None,
        };
        let req = query.into_request().unwrap();
        assert_eq!(req.location, "Bergen");
        assert_eq!(req.unit, TemperatureUnit::Fahrenheit);
        assert!(req.details);
    }

    #[test]
    fn success_serializes_flat_with_flag() {
        let value = serde_json::to_value(WeatherSummary::Success(report(None))).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "location": "Oslo",
                "temperature": 4.5,
                "unit": "C",
                "condition": "rain",
                "updated": "2024-01-15T12:00:00Z",
            })
        );
    }

    #[test]
    fn failure_serializes_only_flag_and_error() {
        let summary: WeatherSummary =
            Err::<WeatherReport, _>(WeatherError::UnknownLocation("Nowhere".into())).into();
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "Unknown location: Nowhere" }));
        assert_eq!(summary.error(), Some("Unknown location: Nowhere"));
    }

    #[test]
    fn absent_detail_readings_are_omitted() {
        let details = WeatherDetails {
            wind_speed: Some(3.2),
            wind_direction: Some(CompassPoint::SouthWest),
            humidity: None,
            pressure: None,
            cloudiness: None,
            precipitation: 0.0,
        };
        let value = serde_json::to_value(WeatherSummary::Success(report(Some(details)))).unwrap();
        assert_eq!(
            value["details"],
            json!({ "wind_speed": 3.2, "wind_direction": "SW", "precipitation": 0.0 })
        );
    }

    #[test]
    fn missing_timeseries_is_malformed() {
        let err = RawForecast::from_json(r#"{"properties": {}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
        assert!(err.to_string().contains("timeseries"));
    }

    #[test]
    fn next_hours_block_is_optional() {
        let raw = RawForecast::from_value(json!({
            "properties": { "timeseries": [
                { "time": "2024-01-15T12:00:00Z",
                  "data": { "instant": { "details": { "air_temperature": 1.0 } } } }
            ] }
        }))
        .unwrap();
        let entry = &raw.properties.timeseries[0];
        assert!(entry.data.next_1_hours.is_none());
        assert_eq!(entry.data.instant.details.wind_speed, None);
    }
}
