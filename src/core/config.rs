//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Search endpoint of the Copyright Public Records System.
pub const DEFAULT_SEARCH_URL: &str =
    "https://api.publicrecords.copyright.gov/search_service_external/simple_search_dsl";

/// Browser-like client identity sent to the upstream API.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream copyright search API configuration.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Where and how the registration search API is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL of the simple search endpoint. Search parameters are appended
    /// to any query string it already has.
    pub search_url: String,

    /// Value of the `User-Agent` header on every upstream request.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "copyright-records-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `MCP_COPYRIGHT_SEARCH_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MCP_COPYRIGHT_SEARCH_URL") {
            let url = url.trim();
            if !url.is_empty() {
                info!("Using custom copyright search endpoint: {}", url);
                config.upstream.search_url = url.to_string();
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_COPYRIGHT_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.upstream.user_agent = user_agent;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_upstream() {
        let config = Config::default();
        assert_eq!(config.upstream.search_url, DEFAULT_SEARCH_URL);
        assert!(config.upstream.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.server.name, "copyright-records-server");
    }

    #[test]
    fn test_search_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_COPYRIGHT_SEARCH_URL", "http://localhost:9999/search");
        }
        let config = Config::from_env();
        assert_eq!(config.upstream.search_url, "http://localhost:9999/search");
        unsafe {
            std::env::remove_var("MCP_COPYRIGHT_SEARCH_URL");
        }
    }

    #[test]
    fn test_blank_env_values_keep_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_COPYRIGHT_SEARCH_URL", "   ");
            std::env::set_var("MCP_COPYRIGHT_USER_AGENT", "");
        }
        let config = Config::from_env();
        assert_eq!(config.upstream.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.upstream.user_agent, DEFAULT_USER_AGENT);
        unsafe {
            std::env::remove_var("MCP_COPYRIGHT_SEARCH_URL");
            std::env::remove_var("MCP_COPYRIGHT_USER_AGENT");
        }
    }

    #[test]
    fn test_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }
}
