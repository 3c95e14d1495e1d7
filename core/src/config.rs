//! Client configuration.
//!
//! # Design
//! `ClientConfig` is plain data with defaults for everything except the
//! credentials, so it can be built in code, deserialized from a caller's own
//! config file, or read from the environment.

use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "track.customer.io";
pub const DEFAULT_URL_PREFIX: &str = "/api/v1";

pub const ENV_SITE_ID: &str = "CUSTOMERIO_SITE_ID";
pub const ENV_API_KEY: &str = "CUSTOMERIO_API_KEY";
pub const ENV_HOST: &str = "CUSTOMERIO_HOST";
pub const ENV_URL_PREFIX: &str = "CUSTOMERIO_URL_PREFIX";

/// Account credentials and endpoint location for the track API.
///
/// Credentials are embedded verbatim in the endpoint URL authority, so they
/// must not contain `:`, `@`, `/` or other characters that would break it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub site_id: String,
    pub api_key: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.to_string()
}

impl ClientConfig {
    pub fn new(site_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            api_key: api_key.into(),
            host: default_host(),
            url_prefix: default_url_prefix(),
        }
    }

    /// Read the configuration from `CUSTOMERIO_*` environment variables.
    /// Host and URL prefix fall back to the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let site_id = lookup(ENV_SITE_ID).ok_or(ConfigError::MissingVar(ENV_SITE_ID))?;
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingVar(ENV_API_KEY))?;
        let mut config = Self::new(site_id, api_key);
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(prefix) = lookup(ENV_URL_PREFIX) {
            config.url_prefix = prefix;
        }
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("site_id", &self.site_id)
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("url_prefix", &self.url_prefix)
            .finish()
    }
}
