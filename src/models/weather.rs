//! Current weather model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Time the conditions apply to
    pub observed_at: DateTime<Utc>,
    /// Air temperature in Celsius
    pub air_temperature: f64,
    /// Air pressure at sea level in hPa
    pub air_pressure: f64,
    /// Cloud area fraction in percent
    pub cloud_area_fraction: f64,
    /// Relative humidity in percent
    pub relative_humidity: f64,
    /// Direction the wind blows from, in degrees (0/360 is North)
    pub wind_from_direction: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Symbol code for the next hour, e.g. `partlycloudy_day`
    pub symbol_code: String,
    /// Human-readable description of the next hour
    pub condition: String,
    /// Symbols for the coming hours, in ascending order of `hours`
    pub outlook: Vec<Outlook>,
}

/// Expected conditions over the next `hours` hours
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Outlook {
    pub hours: u8,
    pub symbol_code: String,
    pub condition: String,
}

/// Convert temperature from Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    9.0 / 5.0 * celsius + 32.0
}

impl WeatherInfo {
    #[must_use]
    pub fn air_temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.air_temperature)
    }

    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
        if !degrees.is_finite() {
            return "Unknown";
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let degrees = degrees.round().rem_euclid(360.0) as u16;
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Format temperature with both units
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!(
            "{:.1}°C ({:.1}°F)",
            self.air_temperature,
            self.air_temperature_fahrenheit()
        )
    }

    /// Format wind speed and the direction it blows from
    #[must_use]
    pub fn format_wind(&self) -> String {
        let direction = Self::wind_direction_to_cardinal(self.wind_from_direction);
        format!(
            "{:.1} m/s from {direction} ({:.0}°)",
            self.wind_speed, self.wind_from_direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 32.0)]
    #[case(100.0, 212.0)]
    #[case(-40.0, -40.0)]
    #[case(12.5, 54.5)]
    fn test_celsius_to_fahrenheit(#[case] celsius: f64, #[case] fahrenheit: f64) {
        assert!((celsius_to_fahrenheit(celsius) - fahrenheit).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.0, "N")]
    #[case(90.0, "E")]
    #[case(180.0, "S")]
    #[case(270.0, "W")]
    #[case(45.0, "NE")]
    #[case(359.6, "N")]
    #[case(-90.0, "W")]
    #[case(f64::NAN, "Unknown")]
    fn test_wind_direction_to_cardinal(#[case] degrees: f64, #[case] expected: &str) {
        assert_eq!(WeatherInfo::wind_direction_to_cardinal(degrees), expected);
    }

    #[test]
    fn test_formatting() {
        let weather = WeatherInfo {
            observed_at: Utc::now(),
            air_temperature: 10.0,
            air_pressure: 1013.2,
            cloud_area_fraction: 75.0,
            relative_humidity: 81.3,
            wind_from_direction: 200.0,
            wind_speed: 3.4,
            symbol_code: "cloudy".to_string(),
            condition: "Cloudy".to_string(),
            outlook: Vec::new(),
        };

        assert_eq!(weather.format_temperature(), "10.0°C (50.0°F)");
        assert_eq!(weather.format_wind(), "3.4 m/s from SSW (200°)");
    }
}
