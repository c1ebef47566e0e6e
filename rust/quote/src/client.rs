// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the external slicing service.

use crate::config::QuoteConfig;
use crate::error::QuoteError;
use crate::types::{QuoteData, QuoteRequest};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

/// Slicing service client.
///
/// One multipart POST per quote. Transport-level failures (server down,
/// DNS, CORS proxy, timeout) are converted into the fallback payload rather
/// than an error; the storefront prices from local geometry in that case.
#[derive(Debug, Clone)]
pub struct SlicerClient {
    endpoint: String,
    timeout: Duration,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SlicerErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    oversized: bool,
}

/// Error text patterns the slicer uses for models beyond its print volume.
fn is_oversized_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("oversiz")
        || lower.contains("print volume")
        || lower.contains("too large")
        || lower.contains("excede")
}

impl SlicerClient {
    /// Create a client for the configured slicing endpoint.
    pub fn new(config: &QuoteConfig) -> Self {
        Self {
            endpoint: config.slicer_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
            http: reqwest::Client::new(),
        }
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one slicing request.
    ///
    /// Resolution contract:
    /// - 2xx with a quote body → `Ok(QuoteData)`
    /// - non-2xx matching the oversized pattern → `Ok(oversized_result())`
    /// - other non-2xx → `Err(QuoteError::Server)`
    /// - transport failure → `Ok(QuoteData::fallback())`, logged at warn
    pub async fn request_quote(&self, request: &QuoteRequest) -> Result<QuoteData, QuoteError> {
        let file_part = Part::bytes(request.file_bytes.to_vec())
            .file_name(request.file_name.clone());

        let form = Form::new()
            .part("file", file_part)
            .text("material", request.material_id.clone())
            .text("quality", request.quality_mm.to_string())
            .text("infill", request.infill_percent.to_string())
            .text("rotationX", request.rotation[0].to_string())
            .text("rotationY", request.rotation[1].to_string())
            .text("rotationZ", request.rotation[2].to_string())
            .text("scaleFactor", request.scale_factor.to_string());

        let response = match self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    endpoint = %self.endpoint,
                    "Slicer unreachable, falling back to local estimate"
                );
                return Ok(QuoteData::fallback());
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json::<QuoteData>()
                .await
                .map_err(|e| QuoteError::InvalidResponse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: SlicerErrorBody = serde_json::from_str(&body).unwrap_or(SlicerErrorBody {
            error: body.clone(),
            oversized: false,
        });

        if parsed.oversized || is_oversized_message(&parsed.error) {
            tracing::info!(status = %status, "Slicer reports model oversized");
            return Ok(QuoteData::oversized_result());
        }

        let message = if parsed.error.is_empty() {
            format!("Slicer returned {status}")
        } else {
            parsed.error
        };
        tracing::error!(status = %status, error = %message, "Slicer request failed");
        Err(QuoteError::Server(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_patterns() {
        assert!(is_oversized_message("Model is oversized for this printer"));
        assert!(is_oversized_message("model exceeds print volume"));
        assert!(is_oversized_message("El modelo excede el volumen de impresión"));
        assert!(is_oversized_message("part too large for bed"));
        assert!(!is_oversized_message("mesh is not manifold"));
        assert!(!is_oversized_message(""));
    }

    #[test]
    fn test_endpoint_normalized() {
        let client = SlicerClient::new(&QuoteConfig {
            slicer_url: "http://slicer.local/api/quote/".into(),
            debounce_ms: 500,
            request_timeout_secs: 5,
        });
        assert_eq!(client.endpoint(), "http://slicer.local/api/quote");
    }
}
