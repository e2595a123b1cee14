//! Configuration management for the formhook service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use formhook_delivery::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::server::ServerSettings;

const CONFIG_FILE: &str = "formhook.toml";

const ENV_PREFIX: &str = "FORMHOOK_";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables prefixed `FORMHOOK_` (highest priority)
/// 2. Configuration file (`formhook.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// # Example
///
/// ```no_run
/// use formhook_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Relaying to {}", config.webhook_url);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `FORMHOOK_HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `FORMHOOK_PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `FORMHOOK_REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Maximum request body size in bytes; `0` disables the limit.
    ///
    /// Environment variable: `FORMHOOK_MAX_BODY_BYTES`
    #[serde(default)]
    pub max_body_bytes: usize,

    // Delivery
    /// Webhook receiving every reshaped event.
    ///
    /// Environment variable: `FORMHOOK_WEBHOOK_URL`
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
    /// Outbound webhook request timeout in seconds, below `request_timeout`.
    ///
    /// Environment variable: `FORMHOOK_DELIVERY_TIMEOUT_SECONDS`
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_seconds: u64,

    // Logging
    /// Tracing filter used when `RUST_LOG` is unset.
    ///
    /// Environment variable: `FORMHOOK_LOG_LEVEL`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment variable
    /// overrides.
    ///
    /// # Errors
    ///
    /// Fails if a source cannot be parsed or a value is out of range.
    pub fn load() -> Result<Self> {
        let config: Self = Self::figment().extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Layered configuration sources, lowest priority first.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Convert to the delivery client's configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.delivery_timeout_seconds),
            ..ClientConfig::default()
        }
    }

    /// Convert to the router's timeout and body limit.
    pub fn to_server_settings(&self) -> ServerSettings {
        ServerSettings {
            request_timeout: Duration::from_secs(self.request_timeout),
            max_body_bytes: (self.max_body_bytes > 0).then_some(self.max_body_bytes),
        }
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.delivery_timeout_seconds == 0 {
            anyhow::bail!("delivery_timeout_seconds must be greater than 0");
        }

        if self.delivery_timeout_seconds >= self.request_timeout {
            anyhow::bail!("delivery_timeout_seconds must be less than request_timeout");
        }

        let url = reqwest::Url::parse(&self.webhook_url)
            .with_context(|| format!("webhook_url is not a valid URL: {}", self.webhook_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("webhook_url must use http or https, got {}", url.scheme());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            max_body_bytes: 0,
            webhook_url: default_webhook_url(),
            delivery_timeout_seconds: default_delivery_timeout(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9009
}

fn default_request_timeout() -> u64 {
    30
}

fn default_webhook_url() -> String {
    "https://webhook.site/58d47518-6286-4022-87e7-816049dbacc6".to_string()
}

fn default_delivery_timeout() -> u64 {
    formhook_delivery::DEFAULT_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "info".to_string()
}
