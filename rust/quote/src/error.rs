use thiserror::Error;

/// Result type for quote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors surfaced by the quote session.
///
/// Transport failures are deliberately absent: the session absorbs them and
/// resolves with a fallback payload instead (the shop would rather show a
/// local estimate than an error). Oversized models are likewise a resolved
/// outcome, not an error.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The slicer returned a structured error that is not the oversized
    /// pattern. Shown to the user; identical requests stay blocked until an
    /// input changes.
    #[error("Slicer rejected the request: {0}")]
    Server(String),

    /// The slicer answered 2xx with a body that does not parse as a quote.
    #[error("Invalid slicer response: {0}")]
    InvalidResponse(String),

    /// This call was superseded by a newer request or cancelled explicitly.
    /// Silent: no user-visible effect.
    #[error("Quote request superseded by a newer request")]
    Cancelled,
}
