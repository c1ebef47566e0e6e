// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session behavior against a local mock slicer.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use printlite_quote::{QuoteConfig, QuoteError, QuoteRequest, QuoteSession, SessionState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DEBOUNCE_MS: u64 = 80;

#[derive(Clone, Copy)]
enum Mode {
    /// Respond with peso = infill * 10 so tests can tell requests apart
    Echo,
    /// Echo, but sleep first so a successor can abort us mid-flight
    SlowEcho,
    /// 422 with the oversized error body
    Oversized,
    /// 500 with a generic error body
    Broken,
}

#[derive(Clone)]
struct MockSlicer {
    hits: Arc<AtomicUsize>,
    mode: Mode,
}

async fn quote_handler(State(slicer): State<MockSlicer>, mut multipart: Multipart) -> Response {
    slicer.hits.fetch_add(1, Ordering::SeqCst);

    let mut infill = 0.0f64;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "infill" {
            infill = field.text().await.unwrap().parse().unwrap();
        } else {
            let _ = field.bytes().await.unwrap();
        }
    }

    match slicer.mode {
        Mode::SlowEcho | Mode::Echo => {
            if matches!(slicer.mode, Mode::SlowEcho) {
                tokio::time::sleep(Duration::from_millis(400)).await;
            }
            Json(serde_json::json!({
                "peso": infill * 10.0,
                "peso_soportes": 2.5,
                "timeHours": 1.5,
                "tiempoTexto": "1h 30m",
                "supports_needed": true,
            }))
            .into_response()
        }
        Mode::Oversized => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": "Model exceeds print volume",
                "oversized": true,
            })),
        )
            .into_response(),
        Mode::Broken => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "slicer crashed" })),
        )
            .into_response(),
    }
}

/// Spawn a mock slicer on an ephemeral port; returns its URL and hit counter.
async fn spawn_slicer(mode: Mode) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockSlicer {
        hits: hits.clone(),
        mode,
    };
    let app = Router::new()
        .route("/api/quote", post(quote_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api/quote"), hits)
}

fn session_for(url: &str) -> Arc<QuoteSession> {
    Arc::new(QuoteSession::new(&QuoteConfig {
        slicer_url: url.to_string(),
        debounce_ms: DEBOUNCE_MS,
        request_timeout_secs: 5,
    }))
}

fn request(infill: u8) -> QuoteRequest {
    QuoteRequest {
        file_name: "benchy.stl".to_string(),
        file_bytes: Bytes::from_static(b"solid fake\nendsolid fake\n"),
        material_id: "PLA".to_string(),
        quality_mm: 0.2,
        infill_percent: infill,
        rotation: [0.0, 0.0, 0.0],
        scale_factor: 1.0,
    }
}

#[tokio::test]
async fn debounce_coalesces_rapid_calls() {
    let (url, hits) = spawn_slicer(Mode::Echo).await;
    let session = session_for(&url);

    // Four calls inside one debounce window, e.g. a slider being dragged
    let mut handles = Vec::new();
    for infill in [10u8, 20, 30, 40] {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            session.request_quote(request(infill)).await
        }));
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    // Exactly one network request, carrying the last call's parameters
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    for superseded in &results[..3] {
        assert!(matches!(superseded, Err(QuoteError::Cancelled)));
    }
    let last = results[3].as_ref().unwrap();
    assert_eq!(last.peso, 400.0);
    assert_eq!(session.state().await, SessionState::Resolved);
}

#[tokio::test]
async fn fingerprint_cache_serves_identical_request() {
    let (url, hits) = spawn_slicer(Mode::Echo).await;
    let session = session_for(&url);

    let first = session.request_quote(request(20)).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let second = session.request_quote(request(20)).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1, "cache hit must not touch the network");
    assert_eq!(second, first);
    assert!(session.cached_fingerprint().await.is_some());
}

#[tokio::test]
async fn changed_parameters_requery_the_slicer() {
    let (url, hits) = spawn_slicer(Mode::Echo).await;
    let session = session_for(&url);

    let first = session.request_quote(request(20)).await.unwrap();
    let second = session.request_quote(request(35)).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(first.peso, 200.0);
    assert_eq!(second.peso, 350.0);
}

#[tokio::test]
async fn successor_aborts_in_flight_request() {
    let (url, hits) = spawn_slicer(Mode::SlowEcho).await;
    let session = session_for(&url);

    let early = {
        let session = session.clone();
        tokio::spawn(async move { session.request_quote(request(10)).await })
    };

    // Let the first call pass its debounce window and reach the slicer
    tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS + 40)).await;

    let late = session.request_quote(request(20)).await.unwrap();

    assert!(matches!(early.await.unwrap(), Err(QuoteError::Cancelled)));
    assert_eq!(late.peso, 200.0);
    // Both reached the server; only the late result was delivered
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn transport_failure_resolves_with_fallback() {
    // Bind and immediately drop a listener so the port refuses connections
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = session_for(&format!("http://{addr}/api/quote"));
    let quote = session.request_quote(request(20)).await.unwrap();

    assert!(quote.is_fallback);
    assert!(!quote.oversized);
    assert_eq!(quote.peso, 0.0);
    assert_eq!(quote.tiempo_texto, "Estimado...");
    assert_eq!(session.state().await, SessionState::FailedFallback);
    // Fallbacks are never cached; recovery must retry the slicer
    assert!(session.cached_fingerprint().await.is_none());
}

#[tokio::test]
async fn oversized_resolves_and_is_not_cached() {
    let (url, hits) = spawn_slicer(Mode::Oversized).await;
    let session = session_for(&url);

    let quote = session.request_quote(request(20)).await.unwrap();
    assert!(quote.oversized);
    assert_eq!(session.state().await, SessionState::Resolved);

    // The identical request goes back to the network after rescaling
    let again = session.request_quote(request(20)).await.unwrap();
    assert!(again.oversized);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn server_error_is_surfaced_and_clears_cache() {
    let (url, hits) = spawn_slicer(Mode::Broken).await;
    let session = session_for(&url);

    let err = session.request_quote(request(20)).await.unwrap_err();
    match err {
        QuoteError::Server(message) => assert!(message.contains("slicer crashed")),
        other => panic!("expected Server error, got {other:?}"),
    }
    assert_eq!(session.state().await, SessionState::Failed);

    // Nothing cached: a retry with unchanged inputs hits the network
    let _ = session.request_quote(request(20)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cancel_pending_settles_without_network_traffic() {
    let (url, hits) = spawn_slicer(Mode::Echo).await;
    let session = session_for(&url);

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.request_quote(request(20)).await })
    };

    // Cancel inside the debounce window
    tokio::time::sleep(Duration::from_millis(10)).await;
    session.cancel_pending().await;

    assert!(matches!(pending.await.unwrap(), Err(QuoteError::Cancelled)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(session.state().await, SessionState::Cancelled);
}

#[tokio::test]
async fn clear_cache_forces_requery() {
    let (url, hits) = spawn_slicer(Mode::Echo).await;
    let session = session_for(&url);

    session.request_quote(request(20)).await.unwrap();
    session.clear_cache().await;
    session.request_quote(request(20)).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
