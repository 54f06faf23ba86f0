//! # xiq-core
//!
//! Core types and configuration for talking to the ExtremeCloud IQ (XIQ) REST API.
//!
//! This crate provides the shared constants, error taxonomy, credential holder and
//! settings document used by the `xiq-rest` client.
//!
//! ## Modules
//!
//! - [`client`] - Module identity, default values and numeric bounds
//! - [`error`] - Error types and stable error codes
//! - [`credentials`] - Authentication material sent with every request
//! - [`config`] - Serde-loadable, validated client settings
//! - [`query`] - Helper for appending query parameters to endpoints

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use config::{AuthSettings, RestClientSettings};
pub use credentials::Credentials;
pub use error::{Error, Result};
