// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end quoting pipeline.
//!
//! Mesh analysis feeds the slicer request; the slicer's answer (when
//! present and authoritative) overrides the local estimate; pricing runs on
//! whichever stats won.

use crate::estimate::estimate_print_stats;
use bytes::Bytes;
use printlite_geometry::{
    compute_auto_scale, compute_geometry_stats, BedLimits, GeometryStats, Mesh,
    OrientationAdvisor, OrientationResult, Result as GeometryResult, ScaleResult,
};
use printlite_pricing::{calculate_price, summarize_order, OrderSummary, PriceBreakdown, PrintConfig, PrintStats};
use printlite_quote::{QuoteData, QuoteRequest};
use serde::Serialize;

/// Everything the storefront needs to know about a freshly loaded mesh.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAnalysis {
    /// Measured volume and extents
    pub stats: GeometryStats,
    /// Lay-flat advice (identity rotation under the shipped configuration)
    pub orientation: OrientationResult,
    /// Bed-fit outcome
    pub scale: ScaleResult,
}

/// The stats pricing actually ran on, tagged with their provenance.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EffectiveStats {
    pub stats: PrintStats,
    /// True when the slicer supplied the numbers; false for the local
    /// geometric estimate
    pub from_slicer: bool,
}

/// Final quoting result handed to the order-submission flow.
#[derive(Debug, Clone, Serialize)]
pub struct OrderEstimate {
    pub breakdown: PriceBreakdown,
    pub summary: OrderSummary,
    /// Shown as an "estimated" badge: pricing ran on local geometry, not a
    /// slicer result
    pub estimated: bool,
    /// The slicer flagged the model as beyond its print volume
    pub oversized: bool,
}

/// Measure a mesh and derive orientation advice and the bed-fit scale.
pub fn analyze_mesh(mesh: &Mesh, limits: &BedLimits) -> GeometryResult<ModelAnalysis> {
    let stats = compute_geometry_stats(mesh)?;
    let orientation = OrientationAdvisor::new().recommend(&stats.dimensions);
    let scale = compute_auto_scale(&stats.dimensions, limits);

    tracing::info!(
        volume_cm3 = stats.volume_cm3,
        x = stats.dimensions.x,
        y = stats.dimensions.y,
        z = stats.dimensions.z,
        needs_scaling = scale.needs_scaling,
        scale_factor = scale.scale_factor,
        "Model analyzed"
    );

    Ok(ModelAnalysis {
        stats,
        orientation,
        scale,
    })
}

/// Assemble the slicer request for an analyzed model and its configuration.
pub fn build_quote_request(
    file_name: impl Into<String>,
    file_bytes: Bytes,
    analysis: &ModelAnalysis,
    config: &PrintConfig,
) -> QuoteRequest {
    QuoteRequest {
        file_name: file_name.into(),
        file_bytes,
        material_id: config.material.id().to_string(),
        quality_mm: config.quality_mm,
        infill_percent: config.infill_percent,
        rotation: analysis.orientation.rotation,
        scale_factor: analysis.scale.scale_factor,
    }
}

/// Pick the stats to price from: a held slicer result wins whenever it is
/// authoritative (not the fallback payload, with a positive weight);
/// otherwise fall back to the geometric estimate.
pub fn effective_stats(
    geometry: &GeometryStats,
    quote: Option<&QuoteData>,
    config: &PrintConfig,
) -> EffectiveStats {
    if let Some(quote) = quote {
        if !quote.is_fallback && quote.peso > 0.0 {
            return EffectiveStats {
                stats: PrintStats {
                    weight_grams: quote.peso,
                    time_hours: quote.time_hours,
                    support_weight_grams: quote.peso_soportes,
                },
                from_slicer: true,
            };
        }
    }

    EffectiveStats {
        stats: estimate_print_stats(geometry, config),
        from_slicer: false,
    }
}

/// Price an order from geometry, an optional slicer result and the session
/// configuration. `plates` comes from the upstream build-plate heuristic
/// (1 for a single-plate order).
pub fn price_order(
    geometry: &GeometryStats,
    quote: Option<&QuoteData>,
    config: &PrintConfig,
    plates: u32,
) -> OrderEstimate {
    let effective = effective_stats(geometry, quote, config);
    let breakdown = calculate_price(config, &effective.stats);

    let supports_needed = quote.map(|q| q.supports_needed).unwrap_or(false);
    let summary = summarize_order(&breakdown, supports_needed, plates);

    OrderEstimate {
        breakdown,
        summary,
        estimated: !effective.from_slicer,
        oversized: quote.map(|q| q.oversized).unwrap_or(false),
    }
}
