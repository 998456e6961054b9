//! Determining the visitor's client address
//!
//! Which source is trusted depends on the deployment mode: behind a hosting
//! platform's proxy the original client is in `X-Forwarded-For`; locally
//! every request comes from loopback, so the machine's own public address
//! is looked up instead.

use crate::config::DeployMode;
use crate::models::ClientAddress;
use crate::{LookupError, Result, http};
use axum::http::HeaderMap;
use reqwest::Client;
use tracing::{debug, instrument, warn};

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Picks the client address for a request
#[derive(Debug, Clone)]
pub struct AddressResolver {
    mode: DeployMode,
    client: Client,
    external_ip_url: String,
}

impl AddressResolver {
    pub fn new(mode: DeployMode, client: Client, external_ip_url: impl Into<String>) -> Self {
        Self {
            mode,
            client,
            external_ip_url: external_ip_url.into(),
        }
    }

    /// Determine the client address of a request with `headers`.
    ///
    /// A hosted request without a usable forwarded header yields an empty
    /// address, which the lookup rejects.
    #[instrument(skip_all, fields(mode = ?self.mode))]
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<ClientAddress> {
        match self.mode {
            DeployMode::Hosted => {
                let address = headers
                    .get(FORWARDED_FOR)
                    .and_then(|value| value.to_str().ok())
                    .map(ClientAddress::from_forwarded_for)
                    .unwrap_or_default();
                if address.is_empty() {
                    warn!("Request has no usable {} header", FORWARDED_FOR);
                }
                Ok(address)
            }
            DeployMode::Local => self.external_address().await,
        }
    }

    /// The public address of this machine, as seen by the external-IP service
    async fn external_address(&self) -> Result<ClientAddress> {
        let body = http::get_text(self.client.get(&self.external_ip_url))
            .await
            .map_err(|e| {
                LookupError::geolocation(format!("could not determine external address: {e:#}"))
            })?;

        let address = ClientAddress::new(body);
        debug!("External address: {}", address);
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn hosted() -> AddressResolver {
        // The URL is never contacted in hosted mode
        AddressResolver::new(DeployMode::Hosted, Client::new(), "http://127.0.0.1:9/")
    }

    #[tokio::test]
    async fn test_hosted_uses_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("198.51.100.4, 10.1.2.3"));

        let address = hosted().resolve(&headers).await.unwrap();
        assert_eq!(address.as_str(), "198.51.100.4");
    }

    #[tokio::test]
    async fn test_hosted_without_header_is_empty() {
        let address = hosted().resolve(&HeaderMap::new()).await.unwrap();
        assert!(address.is_empty());
    }

    #[tokio::test]
    async fn test_local_failure_is_geolocation_error() {
        // Port 9 (discard) on loopback refuses connections
        let resolver = AddressResolver::new(DeployMode::Local, Client::new(), "http://127.0.0.1:9/");
        let err = resolver.resolve(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, LookupError::GeolocationUnavailable { .. }));
    }
}
