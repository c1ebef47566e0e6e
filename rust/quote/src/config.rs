// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quote session configuration loaded from environment variables.

use std::time::Duration;

/// Quote session configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Full URL of the slicing endpoint.
    pub slicer_url: String,
    /// Debounce window before a request is actually issued, milliseconds.
    pub debounce_ms: u64,
    /// Per-request timeout for the slicer call, seconds.
    pub request_timeout_secs: u64,
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            slicer_url: std::env::var("SLICER_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api/quote".into()),
            debounce_ms: std::env::var("QUOTE_DEBOUNCE_MS")
                .unwrap_or_else(|_| "500".into())
                .parse()
                .unwrap_or(500),
            request_timeout_secs: std::env::var("SLICER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .unwrap_or(120),
        }
    }

    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
