//! MCP Server implementation and lifecycle management.
//!
//! This module contains the server handler that implements the MCP protocol.
//! Only the tools capability is advertised; tools are defined in
//! `domains/tools/definitions/` and routed through a ToolRouter built in
//! `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{debug, info};

use super::config::Config;
use super::error::Error;
use crate::domains::tools::{
    ToolError, ToolRegistry, build_tool_router, definitions::copyright::RecordFetcher,
    definitions::copyright::common::error_result,
};

/// The main MCP server handler.
///
/// Cloning is cheap: clones share the configuration and the upstream HTTP
/// client, which is the only long-lived resource.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Fetcher shared by every tool invocation.
    fetcher: Arc<RecordFetcher>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server that talks to the configured upstream over HTTP.
    pub fn new(config: Config) -> Result<Self, Error> {
        reqwest::Url::parse(&config.upstream.search_url).map_err(|e| {
            Error::config(format!(
                "invalid search URL '{}': {}",
                config.upstream.search_url, e
            ))
        })?;

        let fetcher = RecordFetcher::from_config(&config.upstream)?;
        debug!("Upstream search endpoint: {}", fetcher.endpoint());

        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a server around an explicitly constructed fetcher.
    pub fn with_fetcher(config: Config, fetcher: RecordFetcher) -> Self {
        let fetcher = Arc::new(fetcher);

        Self {
            tool_router: build_tool_router::<Self>(fetcher.clone()),
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Metadata of every available tool.
    pub fn available_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// Call a tool by name outside of any MCP transport.
    ///
    /// `arguments` must be a JSON object; anything else is an error result.
    pub async fn dispatch_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                return error_result(
                    &ToolError::invalid_arguments(format!(
                        "expected a JSON object, got {}",
                        other
                    ))
                    .to_string(),
                );
            }
        };

        info!("Dispatching tool call: {}", name);
        ToolRegistry::new(self.fetcher.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Searches U.S. Copyright Office registration records. Call \
                 search_book_by_title with a book title to get a text report of \
                 matching registrations."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::copyright::test_support::FakeTransport;
    use serde_json::json;

    fn server(transport: Arc<FakeTransport>) -> McpServer {
        McpServer::with_fetcher(
            Config::default(),
            RecordFetcher::new("https://search.test/simple_search_dsl", transport),
        )
    }

    #[test]
    fn test_new_rejects_bad_search_url() {
        let mut config = Config::default();
        config.upstream.search_url = "::not a url::".to_string();
        assert!(matches!(McpServer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let info = server(FakeTransport::json(json!({}))).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "copyright-records-server");
    }

    #[test]
    fn test_available_tools_are_all_routed() {
        let server = server(FakeTransport::json(json!({})));
        let tools = server.available_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "search_book_by_title");
        let routed = server.tool_router.list_all();
        for tool in &tools {
            assert!(routed.iter().any(|r| r.name == tool.name));
        }
    }

    #[tokio::test]
    async fn test_dispatch_search() {
        let transport = FakeTransport::json(json!({
            "data": [{"hit": {"registration_number": "TX0001234567"}, "score": 1}]
        }));
        let result = server(transport)
            .dispatch_tool("search_book_by_title", json!({"title": "Azkaban"}))
            .await;
        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_non_object_arguments() {
        let transport = FakeTransport::json(json!({}));
        let result = server(transport.clone())
            .dispatch_tool("search_book_by_title", json!(["Azkaban"]))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(transport.requested_urls().is_empty());
    }
}
