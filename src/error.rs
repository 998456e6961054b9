//! Error types for the lookup chain

use thiserror::Error;

/// Failure of one hop of the lookup chain.
///
/// Both kinds carry a technical `reason` for the logs; visitors only ever
/// see [`LookupError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The address could not be determined or resolved to a place
    #[error("Geolocation unavailable: {reason}")]
    GeolocationUnavailable { reason: String },

    /// The place was resolved but no current weather could be fetched for it
    #[error("Weather unavailable: {reason}")]
    WeatherUnavailable { reason: String },
}

impl LookupError {
    /// Create a new geolocation error
    pub fn geolocation<S: Into<String>>(reason: S) -> Self {
        Self::GeolocationUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a new weather error
    pub fn weather<S: Into<String>>(reason: S) -> Self {
        Self::WeatherUnavailable {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name, used in JSON error bodies
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::GeolocationUnavailable { .. } => "geolocation_unavailable",
            LookupError::WeatherUnavailable { .. } => "weather_unavailable",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LookupError::GeolocationUnavailable { .. } => {
                "Sorry, we couldn't work out where you are right now. Please try again later."
                    .to_string()
            }
            LookupError::WeatherUnavailable { .. } => {
                "Sorry, the weather service is unavailable right now. Please try again later."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let geo_err = LookupError::geolocation("connection refused");
        assert!(matches!(geo_err, LookupError::GeolocationUnavailable { .. }));

        let weather_err = LookupError::weather("status 503");
        assert!(matches!(weather_err, LookupError::WeatherUnavailable { .. }));
    }

    #[test]
    fn test_user_messages_hide_reason() {
        let geo_err = LookupError::geolocation("dns error: secret.internal");
        assert!(geo_err.user_message().contains("where you are"));
        assert!(!geo_err.user_message().contains("secret.internal"));

        let weather_err = LookupError::weather("status 503");
        assert!(weather_err.user_message().contains("weather service"));
        assert!(!weather_err.user_message().contains("503"));
    }

    #[test]
    fn test_display_keeps_reason() {
        let err = LookupError::weather("missing field air_temperature");
        assert_eq!(
            err.to_string(),
            "Weather unavailable: missing field air_temperature"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(LookupError::geolocation("x").kind(), "geolocation_unavailable");
        assert_eq!(LookupError::weather("x").kind(), "weather_unavailable");
    }
}
