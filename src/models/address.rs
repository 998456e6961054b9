//! Client address model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual IP address (or host name) of the visitor.
///
/// The only invariant enforced here is trimming; emptiness is checked by the
/// lookup, everything else is left to the geolocation service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub struct ClientAddress(String);

impl ClientAddress {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        Self(address.trim().to_string())
    }

    /// Client address from an `X-Forwarded-For` value.
    ///
    /// Proxies append to the header, so the original client is the first entry.
    #[must_use]
    pub fn from_forwarded_for(header: &str) -> Self {
        Self::new(header.split(',').next().unwrap_or_default())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ClientAddress {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<ClientAddress> for String {
    fn from(address: ClientAddress) -> Self {
        address.0
    }
}

impl fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
