//! XIQ REST client: configuration, request construction and dispatch.

use crate::endpoint::normalize_endpoint;
use crate::transport::{ReqwestTransport, Transport};
use crate::Result;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE,
    USER_AGENT,
};
use reqwest::{Body, Method, Request, Response};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use xiq_core::client::{
    is_valid_port, is_valid_timeout, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    JSON_MIME_TYPE, MAX_PORT, MAX_TIMEOUT_SECS, MIN_PORT, MIN_TIMEOUT_SECS, OWNER_ID_QUERY_KEY,
};
use xiq_core::{Credentials, Error, RestClientSettings};

/// Header carrying the API client ID.
pub const CLIENT_ID_HEADER: &str = "x-ah-api-client-id";

/// Header carrying the API client secret.
pub const CLIENT_SECRET_HEADER: &str = "x-ah-api-client-secret";

/// Header carrying the API client redirect URI.
pub const REDIRECT_URI_HEADER: &str = "x-ah-api-client-redirect-uri";

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    host: String,
    owner_id: String,
    port: u16,
    timeout_secs: u64,
    user_agent: Option<String>,
    credentials: Option<Credentials>,
    transport: Option<Arc<dyn Transport>>,
}

impl RestClientBuilder {
    /// Create a builder for the given host and owner ID.
    pub fn new(host: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner_id: owner_id.into(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            credentials: None,
            transport: None,
        }
    }

    /// Override the HTTPS port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the request timeout in seconds.
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

    /// Configure the authentication credentials.
    #[must_use]
    pub fn with_auth(
        self,
        access_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        self.with_credentials(Credentials::new(
            access_token,
            client_id,
            client_secret,
            redirect_uri,
        ))
    }

    /// Configure the authentication credentials from an existing set.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the port or timeout is not accepted.
    pub fn build(self) -> Result<RestClient> {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));

        let mut client = RestClient::with_transport(self.host, self.owner_id, transport);
        client.set_port(self.port)?;
        client.set_timeout(self.timeout_secs)?;

        if let Some(user_agent) = self.user_agent {
            client.set_user_agent(user_agent);
        }
        if let Some(credentials) = self.credentials {
            client.set_credentials(credentials);
        }

        Ok(client)
    }
}

impl fmt::Debug for RestClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientBuilder")
            .field("host", &self.host)
            .field("owner_id", &self.owner_id)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Client for the XIQ REST API.
///
/// Holds connection settings and credentials for one API session. Setters take
/// `&mut self`, so a client shared between threads is read-only; callers that
/// need to reconfigure a shared client must serialize access themselves (for
/// example with a `RwLock`).
pub struct RestClient {
    transport: Arc<dyn Transport>,
    host: String,
    port: u16,
    timeout_secs: u64,
    owner_id: String,
    user_agent: String,
    credentials: Credentials,
}

impl RestClient {
    /// Create a client using HTTPS on port 443, a 5 second timeout and the default
    /// `User-Agent`. Credentials start out empty and must be set with
    /// [`RestClient::set_auth`] before the API will accept requests.
    pub fn new(host: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self::with_transport(host, owner_id, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with default settings that sends requests through `transport`.
    pub fn with_transport(
        host: impl Into<String>,
        owner_id: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            host: host.into(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            owner_id: owner_id.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credentials: Credentials::empty(),
        }
    }

    /// Start a builder for the given host and owner ID.
    pub fn builder(host: impl Into<String>, owner_id: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder::new(host, owner_id)
    }

    /// Construct a client from validated settings, using the default transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] or [`Error::OutOfRange`] if the settings
    /// carry an unaccepted port or timeout.
    pub fn from_settings(settings: &RestClientSettings) -> Result<Self> {
        settings.validate_settings()?;

        let mut builder = RestClientBuilder::new(settings.host.as_str(), settings.owner_id.as_str())
            .with_port(settings.port)
            .with_timeout(settings.timeout_secs);

        if let Some(user_agent) = &settings.user_agent {
            builder = builder.with_user_agent(user_agent.as_str());
        }
        if let Some(credentials) = settings.credentials() {
            builder = builder.with_credentials(credentials);
        }

        builder.build()
    }

    /// Set the HTTP timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] unless `1 <= seconds <= 300`; the current
    /// timeout is left unchanged in that case.
    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if !is_valid_timeout(seconds) {
            return Err(Error::timeout_out_of_range(
                seconds,
                MIN_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
            ));
        }
        self.timeout_secs = seconds;
        Ok(())
    }

    /// Set the HTTPS port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for port 0; the current port is left unchanged.
    pub fn set_port(&mut self, port: u16) -> Result<()> {
        if !is_valid_port(port) {
            return Err(Error::OutOfRange {
                field: "port",
                value: u64::from(port),
                min: u64::from(MIN_PORT),
                max: u64::from(MAX_PORT),
            });
        }
        self.port = port;
        Ok(())
    }

    /// Set the `User-Agent` header.
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// Replace all four authentication values at once.
    pub fn set_auth(
        &mut self,
        access_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) {
        self.set_credentials(Credentials::new(
            access_token,
            client_id,
            client_secret,
            redirect_uri,
        ));
    }

    /// Replace the credentials with an existing set.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Return the API host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Return the HTTPS port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Return the HTTP timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Return the HTTP timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Return the owner ID.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Return the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Return the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build the full URL for `endpoint`, including the `ownerId` query parameter.
    ///
    /// Query parameters already present on `endpoint` are kept and `ownerId` is
    /// appended after them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestConstruction`] if the result is not a valid URL.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let path = normalize_endpoint(endpoint);
        let mut url = Url::parse(&format!("https://{}:{}{path}", self.host, self.port))?;
        url.query_pairs_mut()
            .append_pair(OWNER_ID_QUERY_KEY, &self.owner_id);
        Ok(url)
    }

    /// Return a prepared GET request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestConstruction`] if the URL or a header value is invalid.
    pub fn get_request(&self, endpoint: &str) -> Result<Request> {
        self.build_request(Method::GET, endpoint, None)
    }

    /// Return a prepared request for `endpoint`.
    ///
    /// A `payload` is sent as the request body verbatim and marks the request as
    /// JSON via `Content-Type`; encoding it is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestConstruction`] if the URL or a header value is invalid.
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<Request> {
        let url = self.endpoint_url(endpoint)?;
        let headers = self.request_headers(payload.is_some())?;

        debug!(%method, path = %url.path(), "Building XIQ request");

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(payload) = payload {
            *request.body_mut() = Some(Body::from(payload));
        }

        Ok(request)
    }

    /// Send a prepared request and return the response as received.
    ///
    /// The configured timeout is applied to the request. Non-success status codes
    /// are not treated as errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] with the transport's error untouched.
    pub async fn perform_request(&self, mut request: Request) -> Result<Response> {
        *request.timeout_mut() = Some(self.timeout());

        debug!(
            method = %request.method(),
            path = %request.url().path(),
            timeout_secs = self.timeout_secs,
            "Sending XIQ request"
        );

        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(status = %response.status(), "XIQ request completed");
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "XIQ request failed in transport");
                Err(Error::Transport(err))
            }
        }
    }

    /// Build and send a GET request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`RestClient::get_request`] and
    /// [`RestClient::perform_request`].
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let request = self.get_request(endpoint)?;
        self.perform_request(request).await
    }

    fn request_headers(&self, has_payload: bool) -> Result<HeaderMap> {
        let credentials = &self.credentials;
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME_TYPE));
        headers.insert(
            AUTHORIZATION,
            sensitive_value(&format!("Bearer {}", credentials.access_token()))?,
        );
        headers.insert(
            HeaderName::from_static(CLIENT_ID_HEADER),
            HeaderValue::from_str(credentials.client_id())?,
        );
        headers.insert(
            HeaderName::from_static(CLIENT_SECRET_HEADER),
            sensitive_value(credentials.client_secret())?,
        );
        headers.insert(
            HeaderName::from_static(REDIRECT_URI_HEADER),
            HeaderValue::from_str(credentials.redirect_uri())?,
        );

        if has_payload {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME_TYPE));
        }

        Ok(headers)
    }
}

fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)?;
    header.set_sensitive(true);
    Ok(header)
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("owner_id", &self.owner_id)
            .field("user_agent", &self.user_agent)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use reqwest::StatusCode;
    use xiq_core::client::MODULE_NAME;
    use xiq_core::AuthSettings;

    fn test_client() -> RestClient {
        let mut client = RestClient::new("api.example.com", "42");
        client.set_auth("token", "client-id", "client-secret", "https://example.com/cb");
        client
    }

    fn header<'a>(request: &'a Request, name: &str) -> &'a str {
        request
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .unwrap()
    }

    #[test]
    fn new_client_uses_defaults() {
        let client = RestClient::new("api.example.com", "42");
        assert_eq!(client.host(), "api.example.com");
        assert_eq!(client.owner_id(), "42");
        assert_eq!(client.port(), 443);
        assert_eq!(client.timeout_secs(), 5);
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert!(!client.user_agent().is_empty());
        assert!(client.user_agent().contains(MODULE_NAME));
        assert!(client.credentials().is_empty());
    }

    #[test]
    fn set_timeout_accepts_full_range() {
        let mut client = RestClient::new("api.example.com", "42");
        for seconds in 1..=300 {
            client.set_timeout(seconds).unwrap();
            assert_eq!(client.timeout_secs(), seconds);
        }
    }

    #[test]
    fn set_timeout_rejects_out_of_range_and_keeps_previous() {
        let mut client = RestClient::new("api.example.com", "42");
        client.set_timeout(42).unwrap();

        for seconds in [0, 301, 1_000, u64::MAX] {
            let err = client.set_timeout(seconds).unwrap_err();
            assert!(
                matches!(err, Error::OutOfRange { min: 1, max: 300, .. }),
                "seconds {seconds}"
            );
            assert_eq!(client.timeout_secs(), 42);
        }
    }

    #[test]
    fn set_port_rejects_zero_and_keeps_previous() {
        let mut client = RestClient::new("api.example.com", "42");
        client.set_port(8443).unwrap();

        let err = client.set_port(0).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { field: "port", .. }));
        assert_eq!(client.port(), 8443);
    }

    #[test]
    fn set_user_agent_overwrites() {
        let mut client = RestClient::new("api.example.com", "42");
        client.set_user_agent("inventory-sync/2.1");
        assert_eq!(client.user_agent(), "inventory-sync/2.1");
    }

    #[test]
    fn set_auth_replaces_every_field() {
        let mut client = test_client();
        client.set_auth("new-token", "", "", "");

        let creds = client.credentials();
        assert_eq!(creds.access_token(), "new-token");
        assert_eq!(creds.client_id(), "");
        assert_eq!(creds.client_secret(), "");
        assert_eq!(creds.redirect_uri(), "");
    }

    #[test]
    fn get_request_targets_normalized_endpoint() {
        let request = test_client().get_request("devices").unwrap();

        assert_eq!(request.method(), Method::GET);
        let url = request.url();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.example.com"));
        assert_eq!(url.port_or_known_default(), Some(443));
        assert_eq!(url.path(), "/xapi/devices");
        assert_eq!(url.query(), Some("ownerId=42"));
    }

    #[test]
    fn get_request_url_matches_explicit_default_port_form() {
        let request = test_client().get_request("devices").unwrap();
        let expected = Url::parse("https://api.example.com:443/xapi/devices?ownerId=42").unwrap();
        assert_eq!(*request.url(), expected);
    }

    #[test]
    fn get_request_keeps_explicit_port() {
        let mut client = test_client();
        client.set_port(8443).unwrap();

        let request = client.get_request("/devices").unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.example.com:8443/xapi/devices?ownerId=42"
        );
    }

    #[test]
    fn get_request_sets_headers() {
        let request = test_client().get_request("devices").unwrap();

        assert_eq!(header(&request, "user-agent"), DEFAULT_USER_AGENT);
        assert_eq!(header(&request, "cache-control"), "no-cache");
        assert_eq!(header(&request, "accept"), "application/json");
        assert_eq!(header(&request, "authorization"), "Bearer token");
        assert_eq!(header(&request, CLIENT_ID_HEADER), "client-id");
        assert_eq!(header(&request, CLIENT_SECRET_HEADER), "client-secret");
        assert_eq!(header(&request, REDIRECT_URI_HEADER), "https://example.com/cb");
        assert!(request.headers().get("content-type").is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn get_request_sends_empty_credentials() {
        let client = RestClient::new("api.example.com", "42");
        let request = client.get_request("devices").unwrap();

        assert_eq!(header(&request, "authorization"), "Bearer ");
        assert_eq!(header(&request, CLIENT_ID_HEADER), "");
        assert_eq!(header(&request, CLIENT_SECRET_HEADER), "");
        assert_eq!(header(&request, REDIRECT_URI_HEADER), "");
    }

    #[test]
    fn secret_headers_are_marked_sensitive() {
        let request = test_client().get_request("devices").unwrap();
        assert!(request.headers()["authorization"].is_sensitive());
        assert!(request.headers()[CLIENT_SECRET_HEADER].is_sensitive());
        assert!(!request.headers()[CLIENT_ID_HEADER].is_sensitive());
    }

    #[test]
    fn get_request_appends_owner_after_caller_query() {
        let request = test_client().get_request("devices?page=2&limit=10").unwrap();
        assert_eq!(request.url().path(), "/xapi/devices");
        assert_eq!(request.url().query(), Some("page=2&limit=10&ownerId=42"));
    }

    #[test]
    fn get_request_rejects_invalid_host() {
        let client = RestClient::new("bad host", "42");
        let err = client.get_request("devices").unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn get_request_rejects_empty_host() {
        let client = RestClient::new("", "42");
        let err = client.get_request("devices").unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn get_request_rejects_invalid_header_value() {
        let mut client = test_client();
        client.set_auth("token\r\nX-Injected: 1", "id", "secret", "uri");

        let err = client.get_request("devices").unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn build_request_with_payload_sets_body_and_content_type() {
        let payload = br#"{"name":"ap-1"}"#.to_vec();
        let request = test_client()
            .build_request(Method::POST, "devices", Some(payload.clone()))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(header(&request, "content-type"), "application/json");
        assert_eq!(header(&request, "authorization"), "Bearer token");
        let body = request.body().and_then(Body::as_bytes).unwrap();
        assert_eq!(body, payload.as_slice());
    }

    #[test]
    fn builder_applies_settings() {
        let client = RestClient::builder("api.example.com", "42")
            .with_port(8443)
            .with_timeout(60)
            .with_user_agent("probe/1.0")
            .with_auth("token", "id", "secret", "uri")
            .build()
            .unwrap();

        assert_eq!(client.port(), 8443);
        assert_eq!(client.timeout_secs(), 60);
        assert_eq!(client.user_agent(), "probe/1.0");
        assert_eq!(client.credentials().access_token(), "token");
    }

    #[test]
    fn builder_rejects_invalid_timeout() {
        let err = RestClient::builder("api.example.com", "42")
            .with_timeout(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { field: "timeout", .. }));
    }

    #[test]
    fn from_settings_builds_client() {
        let settings = RestClientSettings::new("api.example.com", "42")
            .with_timeout(120)
            .with_auth(AuthSettings::new("token", "id", "secret", "uri"));

        let client = RestClient::from_settings(&settings).unwrap();
        assert_eq!(client.timeout_secs(), 120);
        assert_eq!(client.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(client.credentials().client_secret(), "secret");
    }

    #[test]
    fn from_settings_rejects_invalid_timeout() {
        let settings = RestClientSettings::new("api.example.com", "42").with_timeout(301);
        let err = RestClient::from_settings(&settings).unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let debug = format!("{:?}", test_client());
        assert!(debug.contains("api.example.com"));
        assert!(!debug.contains("client-secret"));
        assert!(!debug.contains("\"token\""));
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestClient>();
    }

    #[tokio::test]
    async fn perform_request_applies_timeout_and_returns_response_unmodified() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.timeout() == Some(&Duration::from_secs(42))
                    && request.url().path() == "/xapi/devices"
            })
            .times(1)
            .returning(|_| {
                Ok(Response::from(
                    http::Response::builder()
                        .status(500)
                        .body("server exploded")
                        .unwrap(),
                ))
            });

        let mut client =
            RestClient::with_transport("api.example.com", "42", Arc::new(transport));
        client.set_timeout(42).unwrap();

        let request = client.get_request("devices").unwrap();
        let response = client.perform_request(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text().await.unwrap(), "server exploded");
    }

    #[tokio::test]
    async fn get_builds_and_sends() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.method() == Method::GET
                    && request.url().query() == Some("ownerId=42")
                    && request.headers()["authorization"] == "Bearer token"
            })
            .times(1)
            .returning(|_| {
                Ok(Response::from(
                    http::Response::builder().status(200).body("[]").unwrap(),
                ))
            });

        let client = RestClient::builder("api.example.com", "42")
            .with_auth("token", "client-id", "client-secret", "uri")
            .with_transport(Arc::new(transport))
            .build()
            .unwrap();

        let response = client.get("devices").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
