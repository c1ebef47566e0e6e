// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Printlite Quote
//!
//! The remote-slicer quote session: one debounced, cancelable, fingerprinted
//! request cycle at a time. Only the most recent call's result is ever
//! delivered; superseded calls settle with [`QuoteError::Cancelled`], slicer
//! outages settle with a tagged fallback payload, and byte-identical repeat
//! requests are served from a single-slot fingerprint cache without I/O.

pub mod client;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod session;
pub mod types;

pub use client::SlicerClient;
pub use config::QuoteConfig;
pub use error::{QuoteError, Result};
pub use fingerprint::request_fingerprint;
pub use session::{QuoteSession, SessionState};
pub use types::{QuoteData, QuoteRequest};
