//! Location model produced by the geolocation service

use serde::{Deserialize, Serialize};

/// Approximate place an IP address resolves to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationInfo {
    /// City name, empty when the address only resolves to a region or country
    pub city: String,
    /// Region or state, empty when the service does not know it
    pub region: String,
    /// Country name
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA time zone name, e.g. `Europe/Oslo`
    pub timezone: String,
}

impl LocationInfo {
    /// "City, Country" for headlines, falling back to the region when the
    /// city is unknown
    #[must_use]
    pub fn display_name(&self) -> String {
        let place = if self.city.is_empty() {
            &self.region
        } else {
            &self.city
        };
        join_non_empty(&[place, &self.country])
    }

    /// "City, Region, Country" with unknown parts left out
    #[must_use]
    pub fn full_name(&self) -> String {
        join_non_empty(&[&self.city, &self.region, &self.country])
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Round coordinates to `precision` decimal places
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oslo() -> LocationInfo {
        LocationInfo {
            city: "Oslo".to_string(),
            region: "Oslo County".to_string(),
            country: "Norway".to_string(),
            latitude: 59.913_868,
            longitude: 10.752_245,
            timezone: "Europe/Oslo".to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(oslo().display_name(), "Oslo, Norway");
        assert_eq!(oslo().full_name(), "Oslo, Oslo County, Norway");
    }

    #[test]
    fn test_names_without_city() {
        let location = LocationInfo {
            city: String::new(),
            ..oslo()
        };
        assert_eq!(location.display_name(), "Oslo County, Norway");
        assert_eq!(location.full_name(), "Oslo County, Norway");

        let location = LocationInfo {
            region: String::new(),
            ..location
        };
        assert_eq!(location.display_name(), "Norway");
    }

    #[test]
    fn test_location_rounded_coordinates() {
        let (lat, lon) = oslo().rounded_coordinates(4);
        assert_eq!(lat, 59.9139);
        assert_eq!(lon, 10.7522);
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(oslo().format_coordinates(), "59.9139, 10.7522");
    }
}
