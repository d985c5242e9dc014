use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while executing a request against the AI service.
///
/// Only a failure to complete the exchange ends up here. A response with a
/// non-success status is still an `Ok(Response)` at the transport level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request build error: {0}")]
    Build(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Serialization(err.to_string())
    }
}

/// Errors raised while building a client from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AI service base URL is not configured")]
    MissingBaseUrl,

    #[error(
        "timeout policy must satisfy upload > chat >= status >= health > 0 \
         (upload={}ms, chat={}ms, status={}ms, health={}ms)",
        .upload.as_millis(), .chat.as_millis(), .status.as_millis(), .health.as_millis()
    )]
    TimeoutOrdering {
        upload: Duration,
        chat: Duration,
        status: Duration,
        health: Duration,
    },

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
