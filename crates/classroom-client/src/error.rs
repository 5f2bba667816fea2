//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the classroom backend.
///
/// None of these are retried automatically; the caller's data is unchanged
/// and can be sent again.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The operation needs a bearer token and none is configured.
    #[error("no token configured; log in and set CLASSROOM_TOKEN")]
    MissingToken,

    /// The backend rejected the token.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The requested quiz, classroom or student does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns `true` if logging in again could fix this error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::MissingToken | ClientError::Unauthorized(_))
    }
}
