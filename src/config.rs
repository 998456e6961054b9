//! Configuration management for the ipweather application
//!
//! Handles loading configuration from an optional file and environment
//! variables, and provides validation for all configuration settings.

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `IPWEATHER__SERVER__PORT`
const ENV_PREFIX: &str = "IPWEATHER";

/// Environment variable holding the config file path
const CONFIG_PATH_VAR: &str = "IPWEATHER_CONFIG";

/// Root configuration structure for the ipweather application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Web server settings
    pub server: ServerConfig,
    /// How the visitor's address is determined
    pub deploy: DeployMode,
    /// Upstream service endpoints
    pub services: ServicesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Deployment mode, selected by the `DEPLOY` environment variable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Running on a developer machine: the request peer is loopback, so the
    /// machine's public address is looked up instead
    #[default]
    Local,
    /// Behind a hosting platform's proxy: trust `X-Forwarded-For`
    #[serde(alias = "heroku")]
    Hosted,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve HTTPS with these PEM files (requires the `tls` feature)
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Upstream service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// ip-api.com compatible geolocation service
    pub geolocation_url: String,
    /// MET Norway compatible weather service
    pub weather_url: String,
    /// Service returning the caller's public address as plain text
    pub external_ip_url: String,
    /// Sent with every upstream request; MET Norway rejects anonymous clients
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP/HTTP traces endpoint, e.g. `http://localhost:4318/v1/traces`
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_geolocation_url() -> String {
    "http://ip-api.com".to_string()
}

fn default_weather_url() -> String {
    "https://api.met.no".to_string()
}

fn default_external_ip_url() -> String {
    "https://ident.me/".to_string()
}

fn default_user_agent() -> String {
    format!("ipweather/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls: None,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geolocation_url: default_geolocation_url(),
            weather_url: default_weather_url(),
            external_ip_url: default_external_ip_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and the process environment
    pub fn load() -> Result<Self> {
        let vars: config::Map<String, String> = std::env::vars().collect();
        let path = vars.get(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(path.as_deref(), &vars)
    }

    /// Load configuration from `config_path` (default `./config.toml`) and
    /// the given environment variables.
    ///
    /// Precedence, lowest first: defaults, file, `IPWEATHER__*` variables,
    /// then the platform variables `DEPLOY` and `PORT`.
    pub fn load_from(config_path: Option<&Path>, vars: &config::Map<String, String>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let deploy = vars.get("DEPLOY").filter(|v| !v.trim().is_empty());
        builder = builder
            .set_override_option("deploy", deploy.map(|v| v.trim().to_lowercase()))
            .with_context(|| "Failed to apply DEPLOY")?;

        let port = vars.get("PORT").filter(|v| !v.trim().is_empty());
        builder = builder
            .set_override_option("server.port", port.map(|v| v.trim().to_string()))
            .with_context(|| "Failed to apply PORT")?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for values set but left empty
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.services.geolocation_url.is_empty() {
            self.services.geolocation_url = default_geolocation_url();
        }
        if self.services.weather_url.is_empty() {
            self.services.weather_url = default_weather_url();
        }
        if self.services.external_ip_url.is_empty() {
            self.services.external_ip_url = default_external_ip_url();
        }
        if self.services.user_agent.trim().is_empty() {
            self.services.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_server()?;
        self.validate_services()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port cannot be 0");
        }

        if let Some(tls) = &self.server.tls
            && (tls.cert_path.as_os_str().is_empty() || tls.key_path.as_os_str().is_empty())
        {
            bail!("TLS requires both cert_path and key_path");
        }

        Ok(())
    }

    fn validate_services(&self) -> Result<()> {
        let urls = [
            ("services.geolocation_url", &self.services.geolocation_url),
            ("services.weather_url", &self.services.weather_url),
            ("services.external_ip_url", &self.services.external_ip_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("{name} must be a valid HTTP or HTTPS URL, got '{url}'");
            }
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            );
        }

        if let Some(endpoint) = &self.logging.otlp_endpoint
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            bail!("OTLP endpoint must be a valid HTTP or HTTPS URL");
        }

        Ok(())
    }
}
