//! Error taxonomy for the API client.

use thiserror::Error;

/// Outcome of a failed API call.
///
/// The original console collapsed every failure into a null return plus
/// an alert, leaving callers unable to tell an expired session from a
/// dead network. Here each failure mode is its own variant so callers can
/// pattern-match, while the client still fires the same side effects
/// (redirect, notification) before returning.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session token is present, or the backend rejected it (401/403).
    /// The token has been cleared and the caller must abandon the
    /// operation; the user has been sent to the login entry point.
    #[error("unauthenticated: session missing or rejected")]
    Unauthenticated,

    /// The backend was reachable and rejected the request logically
    /// (non-2xx other than 401/403). The message is the backend's `error`
    /// field when it sent one, otherwise the HTTP status reason.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The call never produced a usable response: connection failure or
    /// a body that was not the JSON it claimed to be.
    #[error("transport failure: {0}")]
    TransportFailure(String),
}

impl ApiError {
    /// Whether the caller should send the user back through login.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
