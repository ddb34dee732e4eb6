//! Failures of a single upstream search request.

use thiserror::Error;

/// Upper bound on the raw body kept for diagnostics when decoding fails.
pub const BODY_EXCERPT_CHARS: usize = 1000;

/// Errors that can occur while fetching search results.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout, or a non-2xx status from the upstream.
    #[error("request to the copyright search API failed: {0}")]
    Transport(String),

    /// The upstream answered 2xx but the body is not JSON.
    #[error("copyright search API returned invalid JSON: {message}")]
    Decode {
        message: String,
        /// First [`BODY_EXCERPT_CHARS`] characters of the raw body.
        body_excerpt: String,
    },

    /// The request could not be formed (bad endpoint URL or encoding).
    #[error("could not build copyright search request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn decode(message: impl Into<String>, body: &str) -> Self {
        Self::Decode {
            message: message.into(),
            body_excerpt: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
