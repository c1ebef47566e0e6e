// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printlite Engine
//!
//! Storefront-facing facade over the quoting core. Wires the data flow end
//! to end: raw mesh → volume and dimensions → orientation advice and
//! bed-fit scale → slicer request parameters → reconciliation of slicer
//! results with the local geometric estimate → price breakdown and order
//! summary.

pub mod estimate;
pub mod pipeline;

pub use estimate::{estimate_print_stats, DEPOSITION_G_PER_H_PER_MM, SHELL_SOLID_FRACTION};
pub use pipeline::{
    analyze_mesh, build_quote_request, effective_stats, price_order, EffectiveStats,
    ModelAnalysis, OrderEstimate,
};
