// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types for the slicing service.
//!
//! Wire names follow the slicer's JSON contract verbatim, mixed casing and
//! Spanish field names included; Rust-side names stay idiomatic via serde
//! renames.

use bytes::Bytes;
use printlite_geometry::Dimensions;
use serde::{Deserialize, Serialize};

/// One quote request cycle's parameters.
///
/// Everything that affects the slicer's answer lives here; the request
/// fingerprint is derived from these fields (file content is identified by
/// name and size, not hashed in full).
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    /// Uploaded file name, shown back in the quote
    pub file_name: String,
    /// Raw model file payload (binary STL or STEP)
    pub file_bytes: Bytes,
    /// Material wire id, e.g. `"PLA"`
    pub material_id: String,
    /// Layer height in millimeters
    pub quality_mm: f64,
    /// Infill density, percent
    pub infill_percent: u8,
    /// Rotation (rx, ry, rz) radians; identity under the shipped
    /// orientation configuration
    pub rotation: [f64; 3],
    /// Uniform scale factor from the bed-fit check
    pub scale_factor: f64,
}

/// Authoritative or fallback result of one slicing attempt.
///
/// Superseded entirely by each subsequent successful request; never merged.
/// The caller resets it whenever a price-affecting config field changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    /// Printed weight including supports, grams
    #[serde(default)]
    pub peso: f64,
    /// Support material weight, grams
    #[serde(default)]
    pub peso_soportes: f64,
    /// Print time, hours
    #[serde(rename = "timeHours", default)]
    pub time_hours: f64,
    /// Human-readable print time, e.g. `"1h 30m"`
    #[serde(rename = "tiempoTexto", default)]
    pub tiempo_texto: String,
    /// Whether the slicer generated supports
    #[serde(default)]
    pub supports_needed: bool,
    /// Slicer-reported dimensions after its own transform, mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Download URL of the server-side STL conversion (STEP uploads)
    #[serde(rename = "convertedStlUrl", default, skip_serializing_if = "Option::is_none")]
    pub converted_stl_url: Option<String>,
    /// Model exceeds the slicer's print volume; recoverable, shown as a
    /// dimension-adjustment hint
    #[serde(default)]
    pub oversized: bool,
    /// Produced locally because the slicer was unreachable; pricing falls
    /// back to the geometric estimate
    #[serde(rename = "isFallback", default)]
    pub is_fallback: bool,
    /// Opaque slicer diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

impl QuoteData {
    /// Fallback payload used when the slicer cannot be reached. Signals the
    /// caller to price from local geometry, labeled as an estimate.
    pub fn fallback() -> Self {
        Self {
            tiempo_texto: "Estimado...".to_string(),
            is_fallback: true,
            ..Self::default()
        }
    }

    /// Resolved oversized outcome for models beyond the slicer's limits.
    pub fn oversized_result() -> Self {
        Self {
            oversized: true,
            ..Self::default()
        }
    }
}
