//! Request builder and client for the ExtremeCloud IQ (XIQ) REST API.
//!
//! [`RestClient`] holds connection settings and credentials, turns an API
//! endpoint into a fully authenticated [`reqwest::Request`], and hands it to a
//! pluggable [`Transport`]. Responses are returned as-is; decoding payloads is
//! left to the caller.
//!
//! ```no_run
//! # async fn run() -> xiq_rest::Result<()> {
//! use xiq_rest::RestClient;
//!
//! let mut client = RestClient::new("api.extremecloudiq.com", "123456");
//! client.set_timeout(30)?;
//! client.set_auth("token", "client-id", "client-secret", "https://example.com/cb");
//!
//! let request = client.get_request("devices")?;
//! let response = client.perform_request(request).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod endpoint;
pub mod transport;

pub use client::{RestClient, RestClientBuilder};
pub use endpoint::normalize_endpoint;
pub use transport::{ReqwestTransport, Transport};
pub use xiq_core::{Credentials, Error, RestClientSettings};

/// Convenient result alias that reuses the shared XIQ error type.
pub type Result<T> = xiq_core::Result<T>;
