//! HTTP transport seam.
//!
//! The client never talks to the network itself. A [`Transport`] executes a
//! prepared request and returns whatever the HTTP stack produced: any status
//! code is a successful response, and transport failures come back unchanged.

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Executes prepared requests.
///
/// Implementations must be shareable across tasks; the client holds one behind
/// an `Arc` and may be used concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response.
    async fn execute(&self, request: Request) -> reqwest::Result<Response>;
}

/// Default transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client (strict TLS verification).
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Wrap an existing, pre-configured `reqwest` client.
    #[must_use]
    pub const fn from_client(http: Client) -> Self {
        Self { http }
    }

    /// Access the underlying `reqwest` client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.http
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        self.http.execute(request).await
    }
}
