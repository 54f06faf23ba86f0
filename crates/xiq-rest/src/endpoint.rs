//! Endpoint path normalization.

use xiq_core::client::API_PATH_PREFIX;

/// Bring an API endpoint into the form XIQ expects.
///
/// A missing leading `/` is added first, then `/xapi` is prepended unless the
/// path already starts with it. Both checks are plain prefix matches on the
/// rooted path, so `"xapi/devices"` becomes `"/xapi/devices"`, `"/xap/devices"`
/// becomes `"/xapi/xap/devices"` and `"/xapidevices"` is left untouched.
#[must_use]
pub fn normalize_endpoint(endpoint: &str) -> String {
    let mut path = if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    };

    if !path.starts_with(API_PATH_PREFIX) {
        path.insert_str(0, API_PATH_PREFIX);
    }

    path
}
