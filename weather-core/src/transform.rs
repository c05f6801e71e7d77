use crate::{
    error::WeatherError,
    location::Location,
    model::{RawForecast, RawNextHours, WeatherDetails, WeatherReport},
    units::{CompassPoint, TemperatureUnit, round_one_decimal},
};

const UNKNOWN_CONDITION: &str = "unknown";

/// Turn the first timeseries entry of a met.no forecast into a report.
///
/// The only hard requirements on the payload are a non-empty timeseries and
/// an air temperature; every other reading is optional.
pub fn transform(
    raw: &RawForecast,
    location: &Location,
    unit: TemperatureUnit,
    details: bool,
) -> Result<WeatherReport, WeatherError> {
    let current = raw.properties.timeseries.first().ok_or_else(|| {
        WeatherError::MalformedPayload("forecast contained no timeseries entries".to_string())
    })?;

    let instant = &current.data.instant.details;
    let empty = RawNextHours::default();
    let next_hour = current.data.next_1_hours.as_ref().unwrap_or(&empty);

    let celsius = instant.air_temperature.ok_or_else(|| {
        WeatherError::MalformedPayload(format!(
            "timeseries entry at {} has no air_temperature",
            current.time
        ))
    })?;

    let condition = next_hour
        .summary
        .as_ref()
        .and_then(|s| s.symbol_code.clone())
        .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

    let details = details.then(|| WeatherDetails {
        wind_speed: instant.wind_speed,
        wind_direction: instant.wind_from_direction.and_then(CompassPoint::from_degrees),
        humidity: instant.relative_humidity,
        pressure: instant.air_pressure_at_sea_level,
        cloudiness: instant.cloud_area_fraction,
        precipitation: next_hour
            .details
            .as_ref()
            .and_then(|d| d.precipitation_amount)
            .unwrap_or(0.0),
    });

    Ok(WeatherReport {
        location: location.name.clone(),
        temperature: round_one_decimal(unit.convert_celsius(celsius)),
        unit,
        condition,
        updated: current.time.clone(),
        details,
    })
}
