//! Data models for the ipweather application
//!
//! This module contains the per-request domain models organized by concern:
//! - Address: the visitor's client address
//! - Location: place resolved from the address
//! - Weather: current conditions at that place
//! - Forecast: temperature series and daily extremes
//! - Result: the composite rendered for the visitor

pub mod address;
pub mod forecast;
pub mod location;
pub mod result;
pub mod weather;

// Re-export all public types for convenient access
pub use address::ClientAddress;
pub use forecast::{DailyExtremes, TemperatureForecast, TemperaturePoint};
pub use location::LocationInfo;
pub use result::LookupResult;
pub use weather::{Outlook, WeatherInfo, celsius_to_fahrenheit};
