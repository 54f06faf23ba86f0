//! Authentication material for XIQ requests.
//!
//! XIQ expects a bearer access token together with the API client ID, client
//! secret and redirect URI of the registered application. The four values travel
//! together and are always replaced as a set.

use secrecy::{ExposeSecret, SecretString};

/// Credentials sent with every XIQ request.
///
/// The access token and client secret are wrapped in [`SecretString`] so that
/// they never show up in `Debug` output or logs.
#[derive(Debug)]
pub struct Credentials {
    access_token: SecretString,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
}

impl Credentials {
    /// Create a new credential set.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Bearer token for the `Authorization` header
    /// * `client_id` - API client ID
    /// * `client_secret` - API client secret
    /// * `redirect_uri` - Redirect URI registered for the API client
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Create a credential set with every field empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new(), String::new(), String::new(), String::new())
    }

    /// Get the bearer access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Get the API client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the API client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    /// Get the redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns true if no access token has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token().is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("token", "id", "secret", "https://example.com/cb");
        assert_eq!(creds.access_token(), "token");
        assert_eq!(creds.client_id(), "id");
        assert_eq!(creds.client_secret(), "secret");
        assert_eq!(creds.redirect_uri(), "https://example.com/cb");
        assert!(!creds.is_empty());
    }

    #[test]
    fn test_credentials_default_is_empty() {
        let creds = Credentials::default();
        assert!(creds.is_empty());
        assert_eq!(creds.client_id(), "");
        assert_eq!(creds.client_secret(), "");
        assert_eq!(creds.redirect_uri(), "");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("top-token", "id", "top-secret", "uri");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("top-token"));
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("id"));
    }
}
