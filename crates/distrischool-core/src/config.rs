//! Configuration for DistriSchool API clients.
//!
//! The base address every request is sent to comes from one of three places,
//! in priority order:
//!
//! 1. the runtime configuration ([`RuntimeConfig::api_url`]), which operators
//!    edit in the deployed `config.json` without rebuilding;
//! 2. the build-time value captured from `DISTRISCHOOL_API_URL` at compile time;
//! 3. the relative fallback [`DEFAULT_BASE_URL`], which assumes the API sits
//!    behind the same origin or reverse proxy.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;
use url::Url;

/// Fallback base URL used when neither runtime nor build-time values are set.
pub const DEFAULT_BASE_URL: &str = "/api";

/// API base URL baked in at compile time, if `DISTRISCHOOL_API_URL` was set.
pub const BUILD_TIME_API_URL: Option<&str> = option_env!("DISTRISCHOOL_API_URL");

/// Resolve the base URL from the runtime and build-time candidates.
///
/// Empty strings count as absent. The runtime value wins over the build-time
/// value, and [`DEFAULT_BASE_URL`] is returned when neither is set.
#[must_use]
pub fn resolve_base_url(runtime: Option<&str>, build_time: Option<&str>) -> String {
    runtime
        .filter(|url| !url.is_empty())
        .or_else(|| build_time.filter(|url| !url.is_empty()))
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

/// Operator-editable configuration served alongside the deployed frontend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// API URL, absolute (`http://127.0.0.1:8080`) or relative (`/api`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Deployment environment label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl RuntimeConfig {
    /// Create an empty runtime configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            api_url: None,
            environment: None,
        }
    }

    /// Set the API URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the environment label.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Parse a runtime configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid JSON or has the
    /// wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid runtime configuration: {e}")))
    }

    /// Load a runtime configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read runtime configuration {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Load a runtime configuration, falling back to an empty one when the
    /// file is missing or malformed.
    #[must_use]
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path).unwrap_or_else(|err| {
            warn!("Ignoring runtime configuration: {err}");
            Self::default()
        })
    }
}

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Runtime configuration (highest priority)
    pub runtime: RuntimeConfig,

    /// Build-time API URL (second priority)
    pub build_time_api_url: Option<String>,

    /// Origin that relative base URLs are resolved against
    pub origin: Option<String>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl ApiClientConfig {
    /// Create a configuration with no runtime override and the compiled-in
    /// build-time URL, if any.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: RuntimeConfig::new(),
            build_time_api_url: BUILD_TIME_API_URL.map(str::to_string),
            origin: None,
            user_agent: None,
        }
    }

    /// Set the runtime configuration.
    #[must_use]
    pub fn with_runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    /// Override the build-time API URL.
    #[must_use]
    pub fn with_build_time_url(mut self, url: Option<impl Into<String>>) -> Self {
        self.build_time_api_url = url.map(Into::into);
        self
    }

    /// Set the origin used to resolve relative base URLs such as `/api`.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Resolve the base URL for this configuration.
    #[must_use]
    pub fn resolve(&self) -> String {
        resolve_base_url(
            self.runtime.api_url.as_deref(),
            self.build_time_api_url.as_deref(),
        )
    }

    /// Parse and validate the origin, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not an absolute URL.
    pub fn parse_origin(&self) -> Result<Option<Url>, Error> {
        self.origin
            .as_deref()
            .map(|origin| {
                Url::parse(origin).map_err(|e| Error::Config(format!("Invalid origin: {e}")))
            })
            .transpose()
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
