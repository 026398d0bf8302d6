//! Runner configuration.
//!
//! Values come from an optional `canopy.toml` in the working directory,
//! overridden by `CANOPY_*` environment variables.

use std::path::{Path, PathBuf};

use canopy_application::SERVICE_NAME;
use canopy_domain::request::DEFAULT_TIMEOUT_MS;
use ::config::{Environment, File};
use serde::Deserialize;
use url::Url;

/// File name looked up in the configuration directory.
pub const CONFIG_FILE_NAME: &str = "canopy.toml";

/// Prefix of the overriding environment variables.
pub const ENV_PREFIX: &str = "CANOPY";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration from {source_name}: {error}")]
    Load {
        /// File the loader was pointed at.
        source_name: String,
        /// Underlying loader error.
        error: ::config::ConfigError,
    },

    /// `base_url` is not a URL.
    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// `base_url` uses a scheme other than http or https.
    #[error("unsupported base_url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    /// `timeout_ms` is zero.
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CanopyConfig {
    /// Root URL of the service under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix shared by every endpoint.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Name the root endpoint must mention.
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Where to write the JSON report, if anywhere.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_service_name() -> String {
    SERVICE_NAME.to_string()
}

impl Default for CanopyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_ms: default_timeout_ms(),
            service_name: default_service_name(),
            report_path: None,
        }
    }
}

impl CanopyConfig {
    /// Loads configuration from the current directory and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Loads configuration from `dir/canopy.toml` and the environment.
    ///
    /// The file is optional; missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value fails validation.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let file_name = dir.join(CONFIG_FILE_NAME).display().to_string();
        let load_error = |error| ConfigError::Load {
            source_name: file_name.clone(),
            error,
        };

        let this: Self = ::config::Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)?;

        this.validate()?;
        tracing::debug!(base_url = %this.base_url, api_prefix = %this.api_prefix, "configuration loaded");
        Ok(this)
    }

    /// Checks value constraints the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Common base of every endpoint, e.g. `http://localhost:3000/api`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.api_prefix)
    }
}
