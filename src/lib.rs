//! Copyright Records MCP Server Library
//!
//! An MCP (Model Context Protocol) server exposing a single tool,
//! `search_book_by_title`, which searches the U.S. Copyright Office Public
//! Records System and returns a plain-text report of matching registrations.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use copyright_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     let result = server
//!         .dispatch_tool("search_book_by_title", serde_json::json!({ "title": "Dune" }))
//!         .await;
//!     println!("{:?}", result.content);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
