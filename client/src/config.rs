//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:4500/api";

/// Configuration problems detected while resolving settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment, file or CLI sources could not be merged.
    #[error("failed to load client settings: {message}")]
    Load {
        /// Loader error text.
        message: String,
    },
    /// The API URL is not an absolute `http(s)` URL.
    #[error("invalid API base URL {value:?}: {message}")]
    InvalidApiUrl {
        /// Value as configured.
        value: String,
        /// Why it was refused.
        message: String,
    },
}

/// Settings for the status page client.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STATUSPAGE")]
pub struct ClientSettings {
    /// Base URL of the REST API, e.g. `https://status.example.com/api`.
    pub api_url: Option<String>,
    /// Organization pre-selected on the public status view.
    pub default_organization: Option<String>,
    /// Directory holding the persisted session; in-memory when unset.
    pub session_dir: Option<PathBuf>,
}

impl ClientSettings {
    /// Resolved API base URL without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] when the configured value is not
    /// an absolute `http` or `https` URL.
    ///
    /// # Examples
    /// ```
    /// use status_client::config::ClientSettings;
    ///
    /// let settings = ClientSettings {
    ///     api_url: Some("https://status.example.com/api/".into()),
    ///     ..ClientSettings::default()
    /// };
    /// assert_eq!(settings.api_base_url().unwrap(), "https://status.example.com/api");
    /// assert_eq!(
    ///     ClientSettings::default().api_base_url().unwrap(),
    ///     "http://localhost:4500/api"
    /// );
    /// ```
    pub fn api_base_url(&self) -> Result<String, ConfigError> {
        let raw = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let trimmed = raw.strip_suffix('/').unwrap_or(raw);

        let invalid = |message: String| ConfigError::InvalidApiUrl {
            value: raw.to_owned(),
            message,
        };
        let parsed = Url::parse(trimmed).map_err(|error| invalid(error.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        Ok(trimmed.to_owned())
    }

    /// Configured default organization, ignoring blank values.
    pub fn default_organization(&self) -> Option<&str> {
        self.default_organization
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
