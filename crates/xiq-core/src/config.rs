//! Configuration structures for XIQ clients.
//!
//! [`RestClientSettings`] is a serde document that can be embedded in an
//! application's own configuration file and validated before a client is built
//! from it.

use crate::client::{DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use crate::credentials::Credentials;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use validator::Validate;

/// Settings for a single XIQ API session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestClientSettings {
    /// XIQ API host name
    pub host: String,

    /// Owner (tenant) ID sent as the `ownerId` query parameter
    pub owner_id: String,

    /// HTTPS port
    #[validate(range(min = 1))]
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional `User-Agent` override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Optional authentication material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSettings>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RestClientSettings {
    /// Create settings with default port and timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner_id: owner_id.into(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            auth: None,
        }
    }

    /// Parse settings from a JSON document and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document cannot be parsed and
    /// [`Error::ValidationError`] if a value is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate_settings()?;
        Ok(settings)
    }

    /// Validate port and timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] describing every failing field.
    pub fn validate_settings(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ValidationError(format!("Invalid settings: {e}")))
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the authentication material.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthSettings) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build [`Credentials`] from the auth section, if present.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.auth.as_ref().map(AuthSettings::to_credentials)
    }
}

/// Authentication section of [`RestClientSettings`].
///
/// Secret fields are accepted on input but never written back out.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bearer access token
    #[serde(default, skip_serializing)]
    pub access_token: String,

    /// API client ID
    #[serde(default)]
    pub client_id: String,

    /// API client secret
    #[serde(default, skip_serializing)]
    pub client_secret: String,

    /// Redirect URI registered for the API client
    #[serde(default)]
    pub redirect_uri: String,
}

impl AuthSettings {
    /// Create a new auth section.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Convert into a [`Credentials`] value.
    #[must_use]
    pub fn to_credentials(&self) -> Credentials {
        Credentials::new(
            self.access_token.as_str(),
            self.client_id.as_str(),
            self.client_secret.as_str(),
            self.redirect_uri.as_str(),
        )
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("access_token", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
