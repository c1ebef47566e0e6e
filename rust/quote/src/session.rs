// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The quote session: debounce, supersede, fingerprint-cache, fall back.
//!
//! One session owns one request cycle at a time. A new `request_quote` call
//! cancels the previous cycle at whichever await point it sits (debounce
//! timer or in-flight HTTP request, aborted by dropping its future), so a
//! slow early response can never overwrite a later one. Superseded calls
//! settle with [`QuoteError::Cancelled`] instead of dangling — an explicit
//! departure from the always-pending behavior of the original storefront
//! hook, so every caller observes a settled future.

use crate::client::SlicerClient;
use crate::config::QuoteConfig;
use crate::error::QuoteError;
use crate::fingerprint::request_fingerprint;
use crate::types::{QuoteData, QuoteRequest};
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};

/// Observable state of the session's current or last cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No request issued yet, or state was reset
    #[default]
    Idle,
    /// Waiting out the debounce window
    Debouncing,
    /// Slicer request on the wire
    InFlight,
    /// Latest cycle resolved (slicer result, cache hit, or oversized)
    Resolved,
    /// Latest cycle resolved with the local-estimate fallback
    FailedFallback,
    /// Latest cycle ended in a surfaced slicer error
    Failed,
    /// Latest cycle was cancelled without a successor
    Cancelled,
}

struct CachedQuote {
    fingerprint: String,
    data: QuoteData,
}

#[derive(Default)]
struct Inner {
    /// Monotonic cycle counter; a mismatch means this call was superseded
    generation: u64,
    /// Dropping this handle settles the active cycle with `Cancelled`
    cancel: Option<oneshot::Sender<()>>,
    /// Single-slot cache of the last successful slicer result
    cached: Option<CachedQuote>,
    state: SessionState,
}

/// Debounced, cancelable quote session against one slicing endpoint.
///
/// All mutable state lives behind one async mutex held only between await
/// points; concurrent `request_quote` calls are safe and the newest always
/// wins.
pub struct QuoteSession {
    client: SlicerClient,
    debounce: Duration,
    inner: Mutex<Inner>,
}

impl QuoteSession {
    /// Create a session from configuration.
    pub fn new(config: &QuoteConfig) -> Self {
        Self::with_client(SlicerClient::new(config), config.debounce())
    }

    /// Create a session around an existing client, mainly for tests and
    /// custom transport setups.
    pub fn with_client(client: SlicerClient, debounce: Duration) -> Self {
        Self {
            client,
            debounce,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Request a quote for the given parameters.
    ///
    /// Waits out the debounce window, then either serves the single-slot
    /// fingerprint cache or issues one multipart POST to the slicer. Any
    /// newer call supersedes this one at its current await point; the
    /// superseded call returns [`QuoteError::Cancelled`].
    pub async fn request_quote(&self, request: QuoteRequest) -> Result<QuoteData, QuoteError> {
        let (cancel_tx, mut cancelled) = oneshot::channel::<()>();

        let my_generation = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            if inner.cancel.replace(cancel_tx).is_some() {
                tracing::debug!(
                    generation = inner.generation,
                    "Superseding pending quote request"
                );
            }
            inner.state = SessionState::Debouncing;
            inner.generation
        };

        // Debounce window: rapid successor calls land here and replace us.
        tokio::select! {
            _ = &mut cancelled => return self.settle_cancelled(my_generation).await,
            _ = tokio::time::sleep(self.debounce) => {}
        }

        let fingerprint = request_fingerprint(&request);

        {
            let mut inner = self.inner.lock().await;
            if inner.generation != my_generation {
                return Err(QuoteError::Cancelled);
            }
            if let Some(cached) = &inner.cached {
                if cached.fingerprint == fingerprint {
                    let data = cached.data.clone();
                    tracing::info!(fingerprint = %fingerprint, "Quote cache HIT");
                    inner.state = SessionState::Resolved;
                    inner.cancel = None;
                    return Ok(data);
                }
            }
            inner.state = SessionState::InFlight;
        }

        tracing::info!(
            fingerprint = %fingerprint,
            file = %request.file_name,
            "Quote cache MISS - requesting slicer quote"
        );

        // Dropping the client future on cancellation aborts the HTTP
        // request; cancellation is cooperative, never preemptive.
        let outcome = tokio::select! {
            _ = &mut cancelled => return self.settle_cancelled(my_generation).await,
            outcome = self.client.request_quote(&request) => outcome,
        };

        let mut inner = self.inner.lock().await;
        if inner.generation != my_generation {
            // A successor started between our response and this lock; its
            // result is the one the caller must see.
            return Err(QuoteError::Cancelled);
        }
        inner.cancel = None;

        match outcome {
            Ok(data) if data.oversized => {
                // Not cached: the user will rescale and retry the same
                // fingerprint, which must hit the network again.
                inner.cached = None;
                inner.state = SessionState::Resolved;
                Ok(data)
            }
            Ok(data) if data.is_fallback => {
                inner.cached = None;
                inner.state = SessionState::FailedFallback;
                Ok(data)
            }
            Ok(data) => {
                inner.cached = Some(CachedQuote {
                    fingerprint,
                    data: data.clone(),
                });
                inner.state = SessionState::Resolved;
                Ok(data)
            }
            Err(err) => {
                inner.cached = None;
                inner.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// Cancel the active cycle, if any, without starting a new one.
    pub async fn cancel_pending(&self) {
        let mut inner = self.inner.lock().await;
        if inner.cancel.take().is_some() {
            inner.state = SessionState::Cancelled;
            tracing::debug!("Pending quote request cancelled");
        }
    }

    /// Drop the held result, forcing the next identical request back to the
    /// slicer. Called when a new file is loaded.
    pub async fn clear_cache(&self) {
        self.inner.lock().await.cached = None;
    }

    /// Current observable state.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// Fingerprint of the held result, if any.
    pub async fn cached_fingerprint(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .cached
            .as_ref()
            .map(|c| c.fingerprint.clone())
    }

    async fn settle_cancelled(&self, my_generation: u64) -> Result<QuoteData, QuoteError> {
        let mut inner = self.inner.lock().await;
        if inner.generation == my_generation {
            // Explicit cancel_pending(), not a successor: successors set
            // their own state when they start.
            inner.state = SessionState::Cancelled;
        }
        Err(QuoteError::Cancelled)
    }
}
