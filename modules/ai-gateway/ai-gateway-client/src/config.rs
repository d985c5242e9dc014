//! Client configuration.
//!
//! The client never reads ambient state: build an [`AiGatewayConfig`] explicitly
//! or load one with [`AiGatewayConfig::from_env`] and pass it to
//! [`GatewayClient::from_config`](crate::GatewayClient::from_config).

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::timeouts::TimeoutPolicy;

/// Environment prefix: `AI_API_URL`, `AI_API_TIMEOUT`, `AI_API_UPLOAD_TIMEOUT`, ...
pub const ENV_PREFIX: &str = "AI_API_";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for [`GatewayClient`](crate::GatewayClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiGatewayConfig {
    /// Base URL of the AI service, without trailing slash
    pub base_url: String,
    /// Transport-level timeout for requests without an override
    pub default_timeout: Duration,
    /// Per-operation timeouts
    pub timeouts: TimeoutPolicy,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for AiGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            default_timeout: TimeoutPolicy::DEFAULT_CHAT,
            timeouts: TimeoutPolicy::default(),
            user_agent: concat!("cf-ai-gateway-client/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Flat, serde-friendly view used by the figment providers.
///
/// Timeouts are whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    url: String,
    timeout: u64,
    upload_timeout: u64,
    status_timeout: u64,
    health_timeout: u64,
    user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = AiGatewayConfig::default();
        Self {
            url: defaults.base_url,
            timeout: defaults.timeouts.chat.as_secs(),
            upload_timeout: defaults.timeouts.upload.as_secs(),
            status_timeout: defaults.timeouts.status.as_secs(),
            health_timeout: defaults.timeouts.health.as_secs(),
            user_agent: defaults.user_agent,
        }
    }
}

impl From<Settings> for AiGatewayConfig {
    fn from(s: Settings) -> Self {
        let chat = Duration::from_secs(s.timeout);
        Self {
            base_url: s.url.trim_end_matches('/').to_owned(),
            default_timeout: chat,
            timeouts: TimeoutPolicy {
                upload: Duration::from_secs(s.upload_timeout),
                chat,
                status: Duration::from_secs(s.status_timeout),
                health: Duration::from_secs(s.health_timeout),
            },
            user_agent: s.user_agent,
        }
    }
}

impl AiGatewayConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults merged with `AI_API_*` environment variables.
    ///
    /// Callers can merge further providers (e.g. a YAML file) before
    /// extracting with [`AiGatewayConfig::from_figment`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration from the environment.
    ///
    /// `AI_API_TIMEOUT` is the default timeout and also the chat timeout.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if a variable cannot be parsed, or a
    /// validation error from [`AiGatewayConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract a configuration from an arbitrary figment.
    ///
    /// # Errors
    /// Same as [`AiGatewayConfig::from_env`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        let config = Self::from(settings);
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL and timeout ordering.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingBaseUrl`] or [`ConfigError::TimeoutOrdering`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        self.timeouts.validate()
    }

    /// Set the base URL of the AI service.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set the default timeout. The chat timeout follows it.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self.timeouts.chat = timeout;
        self
    }

    /// Replace the whole per-operation timeout table.
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
