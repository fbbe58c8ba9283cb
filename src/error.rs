//! Error types for alert delivery and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed transport-level failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Configuration loading and parsing errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Config validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    #[error("Failed to build HTTP client: {0}")]
    ClientFailed(#[source] reqwest::Error),
}

/// Alert construction and delivery errors.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Failed to serialize alert payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),

    #[error("Webhook rejected delivery (HTTP {status})")]
    DeliveryRejected { status: u16, body: String },

    #[error("Invalid webhook endpoint '{endpoint}'")]
    InvalidEndpoint { endpoint: String },
}

impl AlertError {
    /// Wraps any transport failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// HTTP status of a rejected delivery.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::DeliveryRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for AlertError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_delivery_exposes_status() {
        let err = AlertError::DeliveryRejected {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());
        assert_eq!(err.to_string(), "Webhook rejected delivery (HTTP 503)");
    }

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AlertError::transport(io);

        assert!(err.is_transport());
        assert_eq!(err.status(), None);

        let source = std::error::Error::source(&err).expect("source");
        let io = source
            .downcast_ref::<std::io::Error>()
            .expect("io error source");
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
    }
}
