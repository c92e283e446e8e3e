//! Error types for MangaDex API calls
//!
//! Every failure of the request pipeline surfaces as a `MangaDexError`.
//! Cache failures are deliberately absent: they are logged and the call
//! falls back to the network.

use thiserror::Error;

/// Errors that can occur when calling the MangaDex API
#[derive(Debug, Error)]
pub enum MangaDexError {
    /// The request URL could not be parsed
    #[error("Invalid request URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Transport-level failure (DNS, connect, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Unexpected HTTP status: {code}")]
    HttpStatus { code: u16 },

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The body (live or cached) is not valid JSON for the expected type
    #[error("Failed to parse JSON response: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// The envelope decoded fine but reports a non-OK status
    #[error("API returned status {code}: {message}")]
    Api { code: u16, message: String },
}

pub type Result<T> = std::result::Result<T, MangaDexError>;
