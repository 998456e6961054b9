//! `ipweather` - current weather wherever the visitor's IP address says they are
//!
//! This library provides the lookup chain (client address → location →
//! weather), its upstream clients, and the web surface that renders the
//! result.

pub mod address;
pub mod api;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod http;
pub mod lookup;
pub mod models;
pub mod page;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use address::AddressResolver;
pub use config::{AppConfig, DeployMode};
pub use error::LookupError;
pub use geolocation::GeolocationClient;
pub use lookup::LocationWeatherLookup;
pub use models::{ClientAddress, LocationInfo, LookupResult, TemperatureForecast, WeatherInfo};
pub use weather::{WeatherClient, WeatherReport};
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LookupError>;
