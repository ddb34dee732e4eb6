//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for process-level failures.
//! Per-request failures never reach it: they are rendered as error-shaped
//! tool results at the tool boundary.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the MCP transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// The shared HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
