//! Geolocation client for the ip-api.com JSON API
//!
//! Resolves a client address to an approximate place. ip-api answers with
//! HTTP 200 even for lookups it cannot serve, so the `status` field of the
//! body decides success.

use crate::models::{ClientAddress, LocationInfo};
use crate::{LookupError, Result, http};
use reqwest::Client;
use tracing::{debug, instrument};

/// Fields requested from ip-api, keeping the response small
const FIELDS: &str = "status,message,country,regionName,city,lat,lon,timezone";

/// Client for address → location lookups
#[derive(Debug, Clone)]
pub struct GeolocationClient {
    client: Client,
    base_url: String,
}

impl GeolocationClient {
    /// Create a client against `base_url`, e.g. `http://ip-api.com`
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `address` to a location.
    ///
    /// An empty address is rejected before any request is made: ip-api
    /// would otherwise answer with the location of the caller, i.e. this
    /// server.
    #[instrument(skip(self, address), fields(address = %address))]
    pub async fn locate(&self, address: &ClientAddress) -> Result<LocationInfo> {
        if address.is_empty() {
            return Err(LookupError::geolocation("client address is empty"));
        }

        let url = format!(
            "{}/json/{}",
            self.base_url,
            urlencoding::encode(address.as_str())
        );
        debug!("Geolocation request URL: {}", url);

        let response: ip_api::IpApiResponse =
            http::get_json(self.client.get(&url).query(&[("fields", FIELDS)]))
                .await
                .map_err(|e| LookupError::geolocation(format!("{e:#}")))?;

        let location = LocationInfo::try_from(response).map_err(LookupError::geolocation)?;
        debug!(
            "Resolved {} to {} ({})",
            address,
            location.display_name(),
            location.format_coordinates()
        );
        Ok(location)
    }
}

/// ip-api.com response structures
mod ip_api {
    use super::LocationInfo;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IpApiResponse {
        pub status: String,
        pub message: Option<String>,
        pub country: Option<String>,
        pub region_name: Option<String>,
        pub city: Option<String>,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
        pub timezone: Option<String>,
    }

    fn required<T>(value: Option<T>, field: &str) -> Result<T, String> {
        value.ok_or_else(|| format!("response is missing field '{field}'"))
    }

    /// Trimmed text, `None` when blank
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    impl TryFrom<IpApiResponse> for LocationInfo {
        type Error = String;

        fn try_from(response: IpApiResponse) -> Result<Self, Self::Error> {
            if response.status != "success" {
                return Err(format!(
                    "lookup failed with status '{}': {}",
                    response.status,
                    response.message.as_deref().unwrap_or("no message")
                ));
            }

            Ok(LocationInfo {
                city: non_blank(response.city).unwrap_or_default(),
                region: non_blank(response.region_name).unwrap_or_default(),
                country: required(non_blank(response.country), "country")?,
                latitude: required(response.lat, "lat")?,
                longitude: required(response.lon, "lon")?,
                timezone: required(non_blank(response.timezone), "timezone")?,
            })
        }
    }

}
