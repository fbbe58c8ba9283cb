//! Configuration data structures.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notify::{AlertDispatcher, Branding, HttpTransport};

/// Root configuration for sending alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Slack incoming-webhook URL.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Logs URL used when an alert does not supply one.
    #[serde(default)]
    pub logs_url: Option<String>,

    /// Users or groups mentioned on every alert.
    #[serde(default)]
    pub mentions: Vec<String>,

    /// HTTP request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Fixed alert content.
    #[serde(default)]
    pub branding: Branding,
}

impl AlertConfig {
    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Builds the HTTP transport described by this config.
    pub fn transport(&self) -> Result<HttpTransport, ConfigError> {
        match self.timeout() {
            Some(timeout) => HttpTransport::with_timeout(timeout).map_err(ConfigError::ClientFailed),
            None => Ok(HttpTransport::default()),
        }
    }

    /// Builds a dispatcher for `webhook_url` with this config's transport and branding.
    pub fn dispatcher(&self, webhook_url: &str) -> Result<AlertDispatcher, ConfigError> {
        let transport = self.transport()?;
        Ok(AlertDispatcher::new(webhook_url)
            .with_transport(Arc::new(transport))
            .with_branding(self.branding.clone()))
    }
}
