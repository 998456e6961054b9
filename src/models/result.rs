//! Composite result of one lookup

use super::{ClientAddress, LocationInfo, TemperatureForecast, WeatherInfo};
use serde::{Deserialize, Serialize};

/// Everything shown for a single visitor. Built per request, never stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LookupResult {
    pub client_address: ClientAddress,
    pub location: LocationInfo,
    pub weather: WeatherInfo,
    pub forecast: TemperatureForecast,
    /// e.g. "It's 12°C (54°F) in Oslo, Norway right now."
    pub headline: String,
}

impl LookupResult {
    #[must_use]
    pub fn new(
        client_address: ClientAddress,
        location: LocationInfo,
        weather: WeatherInfo,
        forecast: TemperatureForecast,
    ) -> Self {
        let headline = format!(
            "It's {:.0}°C ({:.0}°F) in {} right now.",
            weather.air_temperature,
            weather.air_temperature_fahrenheit(),
            location.display_name()
        );

        Self {
            client_address,
            location,
            weather,
            forecast,
            headline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_headline() {
        let location = LocationInfo {
            city: "Oslo".to_string(),
            region: "Oslo County".to_string(),
            country: "Norway".to_string(),
            latitude: 59.9139,
            longitude: 10.7522,
            timezone: "Europe/Oslo".to_string(),
        };
        let weather = WeatherInfo {
            observed_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            air_temperature: 12.2,
            air_pressure: 1013.2,
            cloud_area_fraction: 75.0,
            relative_humidity: 81.3,
            wind_from_direction: 200.0,
            wind_speed: 3.4,
            symbol_code: "cloudy".to_string(),
            condition: "Cloudy".to_string(),
            outlook: Vec::new(),
        };
        let forecast = TemperatureForecast::from_samples(&[], "Europe/Oslo");

        let result = LookupResult::new(ClientAddress::new("8.8.8.8"), location, weather, forecast);
        assert_eq!(result.headline, "It's 12°C (54°F) in Oslo, Norway right now.");
    }
}
