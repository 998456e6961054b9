//! Weather client for the MET Norway locationforecast API
//!
//! Uses the `compact` product: current conditions come from the first time
//! step, the temperature forecast from all of them.

use crate::models::{LocationInfo, TemperatureForecast, WeatherInfo};
use crate::{LookupError, Result, http};
use reqwest::Client;
use tracing::{debug, instrument};

const FORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/compact";

/// MET Norway answers 403 for coordinates with more than four decimals
const COORDINATE_PRECISION: u32 = 4;

/// Current conditions plus the temperature forecast for one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: WeatherInfo,
    pub forecast: TemperatureForecast,
}

/// Client for location → weather lookups
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a client against `base_url`, e.g. `https://api.met.no`
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current conditions and the temperature forecast for `location`
    #[instrument(skip(self, location), fields(city = %location.city))]
    pub async fn report(&self, location: &LocationInfo) -> Result<WeatherReport> {
        let (lat, lon) = location.rounded_coordinates(COORDINATE_PRECISION);
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        debug!("Weather request URL: {} (lat={}, lon={})", url, lat, lon);

        let response: met_no::LocationForecast =
            http::get_json(self.client.get(&url).query(&[("lat", lat), ("lon", lon)]))
                .await
                .map_err(|e| LookupError::weather(format!("{e:#}")))?;

        let report = response
            .into_report(&location.timezone)
            .map_err(LookupError::weather)?;
        debug!(
            "Current weather in {}: {} ({})",
            location.city,
            report.current.format_temperature(),
            report.current.condition
        );
        Ok(report)
    }
}

/// Convert a MET Norway symbol code to a human-readable description.
///
/// Codes may carry a `_day`, `_night` or `_polartwilight` variant suffix,
/// which does not change the description.
#[must_use]
pub fn symbol_code_to_description(code: &str) -> &'static str {
    let base = code
        .strip_suffix("_day")
        .or_else(|| code.strip_suffix("_night"))
        .or_else(|| code.strip_suffix("_polartwilight"))
        .unwrap_or(code);

    match base {
        "clearsky" => "Clear sky",
        "fair" => "Fair",
        "partlycloudy" => "Partly cloudy",
        "cloudy" => "Cloudy",
        "fog" => "Fog",
        "lightrain" => "Light rain",
        "rain" => "Rain",
        "heavyrain" => "Heavy rain",
        "lightrainshowers" => "Light rain showers",
        "rainshowers" => "Rain showers",
        "heavyrainshowers" => "Heavy rain showers",
        "lightrainandthunder" => "Light rain and thunder",
        "rainandthunder" => "Rain and thunder",
        "heavyrainandthunder" => "Heavy rain and thunder",
        "lightrainshowersandthunder" => "Light rain showers and thunder",
        "rainshowersandthunder" => "Rain showers and thunder",
        "heavyrainshowersandthunder" => "Heavy rain showers and thunder",
        "lightsleet" => "Light sleet",
        "sleet" => "Sleet",
        "heavysleet" => "Heavy sleet",
        "lightsleetshowers" => "Light sleet showers",
        "sleetshowers" => "Sleet showers",
        "heavysleetshowers" => "Heavy sleet showers",
        "lightsleetandthunder" => "Light sleet and thunder",
        "sleetandthunder" => "Sleet and thunder",
        "heavysleetandthunder" => "Heavy sleet and thunder",
        // "lightssleet..." and "lightssnow..." are the API's own spelling
        "lightssleetshowersandthunder" => "Light sleet showers and thunder",
        "sleetshowersandthunder" => "Sleet showers and thunder",
        "heavysleetshowersandthunder" => "Heavy sleet showers and thunder",
        "lightsnow" => "Light snow",
        "snow" => "Snow",
        "heavysnow" => "Heavy snow",
        "lightsnowshowers" => "Light snow showers",
        "snowshowers" => "Snow showers",
        "heavysnowshowers" => "Heavy snow showers",
        "lightsnowandthunder" => "Light snow and thunder",
        "snowandthunder" => "Snow and thunder",
        "heavysnowandthunder" => "Heavy snow and thunder",
        "lightssnowshowersandthunder" => "Light snow showers and thunder",
        "snowshowersandthunder" => "Snow showers and thunder",
        "heavysnowshowersandthunder" => "Heavy snow showers and thunder",
        _ => "Unknown",
    }
}

/// MET Norway `locationforecast` response structures and conversion
mod met_no {
    use super::{WeatherReport, symbol_code_to_description};
    use crate::models::{Outlook, TemperatureForecast, WeatherInfo};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct LocationForecast {
        pub properties: Properties,
    }

    #[derive(Debug, Deserialize)]
    pub struct Properties {
        pub timeseries: Vec<TimeStep>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeStep {
        pub time: DateTime<Utc>,
        pub data: StepData,
    }

    #[derive(Debug, Deserialize)]
    pub struct StepData {
        pub instant: Instant,
        pub next_1_hours: Option<Period>,
        pub next_6_hours: Option<Period>,
        pub next_12_hours: Option<Period>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Instant {
        pub details: InstantDetails,
    }

    /// Every field is optional in the API schema
    #[derive(Debug, Deserialize)]
    pub struct InstantDetails {
        pub air_temperature: Option<f64>,
        pub air_pressure_at_sea_level: Option<f64>,
        pub cloud_area_fraction: Option<f64>,
        pub relative_humidity: Option<f64>,
        pub wind_from_direction: Option<f64>,
        pub wind_speed: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Period {
        pub summary: Summary,
    }

    #[derive(Debug, Deserialize)]
    pub struct Summary {
        pub symbol_code: String,
    }

    fn required(value: Option<f64>, field: &str) -> Result<f64, String> {
        value.ok_or_else(|| format!("current conditions are missing '{field}'"))
    }

    fn outlook(hours: u8, period: Option<&Period>) -> Option<Outlook> {
        period.map(|period| Outlook {
            hours,
            symbol_code: period.summary.symbol_code.clone(),
            condition: symbol_code_to_description(&period.summary.symbol_code).to_string(),
        })
    }

    impl LocationForecast {
        /// Build the report, failing when the current time step lacks any
        /// of the displayed fields
        pub fn into_report(self, timezone: &str) -> Result<WeatherReport, String> {
            let timeseries = self.properties.timeseries;
            let first = timeseries
                .first()
                .ok_or_else(|| "forecast contains no time steps".to_string())?;

            let details = &first.data.instant.details;
            let symbol_code = first
                .data
                .next_1_hours
                .as_ref()
                .map(|period| period.summary.symbol_code.clone())
                .ok_or_else(|| "current conditions are missing 'next_1_hours'".to_string())?;

            let current = WeatherInfo {
                observed_at: first.time,
                air_temperature: required(details.air_temperature, "air_temperature")?,
                air_pressure: required(
                    details.air_pressure_at_sea_level,
                    "air_pressure_at_sea_level",
                )?,
                cloud_area_fraction: required(details.cloud_area_fraction, "cloud_area_fraction")?,
                relative_humidity: required(details.relative_humidity, "relative_humidity")?,
                wind_from_direction: required(details.wind_from_direction, "wind_from_direction")?,
                wind_speed: required(details.wind_speed, "wind_speed")?,
                condition: symbol_code_to_description(&symbol_code).to_string(),
                symbol_code,
                outlook: [
                    outlook(1, first.data.next_1_hours.as_ref()),
                    outlook(6, first.data.next_6_hours.as_ref()),
                    outlook(12, first.data.next_12_hours.as_ref()),
                ]
                .into_iter()
                .flatten()
                .collect(),
            };

            let samples: Vec<(DateTime<Utc>, f64)> = timeseries
                .iter()
                .filter_map(|step| {
                    step.data
                        .instant
                        .details
                        .air_temperature
                        .map(|temperature| (step.time, temperature))
                })
                .collect();

            Ok(WeatherReport {
                current,
                forecast: TemperatureForecast::from_samples(&samples, timezone),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(json: serde_json::Value) -> Result<WeatherReport, String> {
            let response: LocationForecast = serde_json::from_value(json).unwrap();
            response.into_report("Europe/Oslo")
        }

        fn details(temperature: f64) -> serde_json::Value {
            serde_json::json!({
                "air_pressure_at_sea_level": 1012.9,
                "air_temperature": temperature,
                "cloud_area_fraction": 96.1,
                "relative_humidity": 88.4,
                "wind_from_direction": 215.3,
                "wind_speed": 4.1
            })
        }

        #[test]
        fn test_full_report() {
            let report = parse(serde_json::json!({
                "properties": { "timeseries": [
                    {
                        "time": "2024-01-15T12:00:00Z",
                        "data": {
                            "instant": { "details": details(3.2) },
                            "next_1_hours": { "summary": { "symbol_code": "lightrain" } },
                            "next_6_hours": { "summary": { "symbol_code": "cloudy" } },
                            "next_12_hours": { "summary": { "symbol_code": "partlycloudy_night" } }
                        }
                    },
                    {
                        "time": "2024-01-15T13:00:00Z",
                        "data": { "instant": { "details": { "air_temperature": 4.0 } } }
                    }
                ]}
            }))
            .unwrap();

            assert_eq!(report.current.air_temperature, 3.2);
            assert_eq!(report.current.condition, "Light rain");
            assert_eq!(report.current.outlook.len(), 3);
            assert_eq!(report.current.outlook[2].hours, 12);
            assert_eq!(report.current.outlook[2].condition, "Partly cloudy");
            assert_eq!(report.forecast.hourly.len(), 2);
            assert_eq!(report.forecast.daily[0].max, 4.0);
        }

        #[test]
        fn test_later_outlooks_are_optional() {
            let report = parse(serde_json::json!({
                "properties": { "timeseries": [{
                    "time": "2024-01-15T12:00:00Z",
                    "data": {
                        "instant": { "details": details(3.2) },
                        "next_1_hours": { "summary": { "symbol_code": "fog" } }
                    }
                }]}
            }))
            .unwrap();

            assert_eq!(report.current.outlook.len(), 1);
            assert_eq!(report.current.outlook[0].hours, 1);
        }

        #[test]
        fn test_empty_timeseries() {
            let err = parse(serde_json::json!({ "properties": { "timeseries": [] } })).unwrap_err();
            assert!(err.contains("no time steps"));
        }

        #[test]
        fn test_missing_current_field() {
            let err = parse(serde_json::json!({
                "properties": { "timeseries": [{
                    "time": "2024-01-15T12:00:00Z",
                    "data": {
                        "instant": { "details": { "air_temperature": 1.0 } },
                        "next_1_hours": { "summary": { "symbol_code": "fog" } }
                    }
                }]}
            }))
            .unwrap_err();
            assert!(err.contains("air_pressure_at_sea_level"));
        }

        #[test]
        fn test_missing_next_hour() {
            let err = parse(serde_json::json!({
                "properties": { "timeseries": [{
                    "time": "2024-01-15T12:00:00Z",
                    "data": { "instant": { "details": details(1.0) } }
                }]}
            }))
            .unwrap_err();
            assert!(err.contains("next_1_hours"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("clearsky_day", "Clear sky")]
    #[case("clearsky_night", "Clear sky")]
    #[case("fair_polartwilight", "Fair")]
    #[case("cloudy", "Cloudy")]
    #[case("heavyrainshowersandthunder_day", "Heavy rain showers and thunder")]
    #[case("lightssnowshowersandthunder_night", "Light snow showers and thunder")]
    #[case("sandstorm", "Unknown")]
    #[case("", "Unknown")]
    fn test_symbol_code_to_description(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(symbol_code_to_description(code), expected);
    }
}
