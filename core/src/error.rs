//! Error types for the tracking client.
//!
//! # Design
//! Every operation fails with a single `TransportError`, whether the request
//! could not be constructed (the endpoint URL does not parse) or the
//! transport could not complete the round trip. HTTP error statuses are not
//! errors at this layer; they come back as an ordinary `HttpResponse`.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The round trip did not complete.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while loading a `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or not valid unicode.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}
