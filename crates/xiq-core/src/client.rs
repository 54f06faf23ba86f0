//! Module identity, defaults and bounds for XIQ clients.
//!
//! These values are compile-time constants; nothing in this crate keeps mutable
//! global state.

/// Name reported in the default `User-Agent` header.
pub const MODULE_NAME: &str = "xiq-rest";

/// Version reported in the default `User-Agent` header.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` value, `{MODULE_NAME}/{MODULE_VERSION}`.
pub const DEFAULT_USER_AGENT: &str = concat!("xiq-rest/", env!("CARGO_PKG_VERSION"));

/// MIME type used for `Accept` and `Content-Type`.
pub const JSON_MIME_TYPE: &str = "application/json";

// Timeout settings (in seconds)

/// Smallest accepted HTTP timeout
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Largest accepted HTTP timeout
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Timeout applied to newly created clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// Port settings

/// Smallest accepted TCP port
pub const MIN_PORT: u16 = 1;

/// Largest accepted TCP port
pub const MAX_PORT: u16 = 65535;

/// Port used by newly created clients (HTTPS)
pub const DEFAULT_PORT: u16 = 443;

// API layout

/// Prefix every XIQ API path must carry.
pub const API_PATH_PREFIX: &str = "/xapi";

/// Query parameter carrying the owner (tenant) ID.
pub const OWNER_ID_QUERY_KEY: &str = "ownerId";

/// Returns true if `seconds` is an accepted timeout.
#[must_use]
pub fn is_valid_timeout(seconds: u64) -> bool {
    (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&seconds)
}

/// Returns true if `port` is an accepted TCP port.
#[must_use]
pub fn is_valid_port(port: u16) -> bool {
    (MIN_PORT..=MAX_PORT).contains(&port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_identifies_module() {
        assert!(DEFAULT_USER_AGENT.starts_with(MODULE_NAME));
        assert_eq!(
            DEFAULT_USER_AGENT,
            format!("{MODULE_NAME}/{MODULE_VERSION}")
        );
    }

    #[test]
    fn test_timeout_constants() {
        assert_eq!(MIN_TIMEOUT_SECS, 1);
        assert_eq!(MAX_TIMEOUT_SECS, 300);
        assert_eq!(DEFAULT_TIMEOUT_SECS, 5);
        assert!(is_valid_timeout(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_timeout_bounds_are_inclusive() {
        assert!(!is_valid_timeout(0));
        assert!(is_valid_timeout(1));
        assert!(is_valid_timeout(300));
        assert!(!is_valid_timeout(301));
        assert!(!is_valid_timeout(u64::MAX));
    }

    #[test]
    fn test_port_bounds() {
        assert_eq!(DEFAULT_PORT, 443);
        assert!(!is_valid_port(0));
        assert!(is_valid_port(MIN_PORT));
        assert!(is_valid_port(MAX_PORT));
    }
}
