//! The lookup chain: client address → location → weather

use crate::config::ServicesConfig;
use crate::geolocation::GeolocationClient;
use crate::models::{ClientAddress, LookupResult};
use crate::weather::WeatherClient;
use crate::Result;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Resolves a visitor's address to a place and fetches its weather.
///
/// Holds no state besides the two clients, so repeated lookups with the same
/// upstream answers give the same result.
#[derive(Debug, Clone)]
pub struct LocationWeatherLookup {
    geolocation: GeolocationClient,
    weather: WeatherClient,
}

impl LocationWeatherLookup {
    pub fn new(geolocation: GeolocationClient, weather: WeatherClient) -> Self {
        Self {
            geolocation,
            weather,
        }
    }

    /// Build both clients from configuration on top of a shared HTTP client
    pub fn from_config(services: &ServicesConfig, client: Client) -> Self {
        Self::new(
            GeolocationClient::new(client.clone(), &services.geolocation_url),
            WeatherClient::new(client, &services.weather_url),
        )
    }

    /// Run the chain for `address`.
    ///
    /// Stops at the first failing hop; the weather service is never called
    /// when geolocation fails.
    #[instrument(skip(self, address), fields(address = %address))]
    pub async fn lookup(&self, address: &ClientAddress) -> Result<LookupResult> {
        let location = self.geolocation.locate(address).await.inspect_err(|e| {
            warn!("Geolocation failed: {}", e);
        })?;

        let report = self.weather.report(&location).await.inspect_err(|e| {
            warn!("Weather lookup failed: {}", e);
        })?;

        let result = LookupResult::new(address.clone(), location, report.current, report.forecast);
        info!("{}", result.headline);
        Ok(result)
    }
}
