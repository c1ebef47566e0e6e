// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printlite Pricing
//!
//! Converts physical print quantities (weight, time, support share) plus the
//! user's print configuration into a price breakdown. Two difficulty signals
//! are applied as separate, independently tunable stages: the fine-grained
//! support-ratio tiers inside [`calculate_price`], and the coarse flat
//! multiplier in [`summarize_order`] driven by the slicer's binary
//! supports-needed flag. Both exist in production and both are kept.

pub mod config;
pub mod engine;
pub mod summary;

pub use config::{Material, PrintConfig};
pub use engine::{calculate_price, support_tier_factor, PriceBreakdown, PriceDebug, PrintStats};
pub use summary::{summarize_order, OrderSummary};
