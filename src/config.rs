//! Configuration for the identity interceptor
//!
//! Everything the interceptor needs to know about its deployment lives
//! here: where the SSO login page is, which URLs are trusted with the
//! token, and the names used on the wire and in storage. Hosts either build
//! the value in code or load it from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this schema
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A URL field does not parse as a URL
    #[error("Invalid URL in {field}: {source}")]
    InvalidUrl {
        /// Name of the offending field
        field: &'static str,
        /// The underlying parse failure
        source: url::ParseError,
    },

    /// A required field is empty
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

fn default_token_param() -> String {
    "token".to_string()
}

fn default_storage_key() -> String {
    "jwt".to_string()
}

/// Identity interceptor configuration
///
/// # Example
///
/// ```
/// use ssokit::IdentityConfig;
///
/// let config = IdentityConfig::new("https://sso.example.com/", "https://api.example.com");
/// assert_eq!(config.token_param, "token");
/// assert_eq!(config.storage_key, "jwt");
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// URL of the external SSO login page users are sent to
    pub sso_login_url: String,
    /// Trusted URL prefix; requests starting with it receive the token
    pub secure_url_prefix: String,
    /// Query parameter the SSO server hands the token back in
    ///
    /// The host application must reserve this parameter name; a colliding
    /// application parameter would be captured as a credential on reload.
    #[serde(default = "default_token_param")]
    pub token_param: String,
    /// Key the token is stored under in the persistence backend
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Whether a rejected request's URL is appended to the login redirect
    /// built for a 403
    #[serde(default)]
    pub include_destination_on_forbidden: bool,
}

impl IdentityConfig {
    /// Creates a configuration with default wire and storage names
    pub fn new(sso_login_url: impl Into<String>, secure_url_prefix: impl Into<String>) -> Self {
        Self {
            sso_login_url: sso_login_url.into(),
            secure_url_prefix: secure_url_prefix.into(),
            token_param: default_token_param(),
            storage_key: default_storage_key(),
            include_destination_on_forbidden: false,
        }
    }

    /// Carries the rejected request's URL on 403 login redirects
    pub fn with_destination_on_forbidden(mut self) -> Self {
        self.include_destination_on_forbidden = true;
        self
    }

    /// Loads and validates configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks that the configuration is usable.
    ///
    /// The SSO login URL must parse as a URL; the secure prefix and the two
    /// names must be non-empty. The prefix is deliberately NOT required to
    /// be a full URL — it is a prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sso_login_url.is_empty() {
            return Err(ConfigError::Empty("sso_login_url"));
        }
        url::Url::parse(&self.sso_login_url).map_err(|source| ConfigError::InvalidUrl {
            field: "sso_login_url",
            source,
        })?;
        if self.secure_url_prefix.is_empty() {
            return Err(ConfigError::Empty("secure_url_prefix"));
        }
        if self.token_param.is_empty() {
            return Err(ConfigError::Empty("token_param"));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Empty("storage_key"));
        }
        Ok(())
    }
}
