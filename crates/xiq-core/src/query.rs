//! Convenience builder for endpoint query parameters.
//!
//! The request builder only adds `ownerId`; any other query parameters belong to
//! the endpoint string the caller passes in. This helper assembles them from
//! optional values and appends them to an endpoint.

use std::fmt::Display;
use url::form_urlencoded;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Encode the pairs as an `application/x-www-form-urlencoded` string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Append the encoded pairs to `endpoint`, joining with `?` or `&` as needed.
    #[must_use]
    pub fn append_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            return endpoint.to_string();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{separator}{}", self.to_query_string())
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
