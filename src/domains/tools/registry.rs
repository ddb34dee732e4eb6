//! Tool Registry - central listing and dispatch for all tools.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::warn;

use super::ToolError;
use super::definitions::SearchBookByTitleTool;
use super::definitions::copyright::{RecordFetcher, common::error_result};

/// Tool registry - manages all available tools.
///
/// Lets a caller list and invoke tools without going through an MCP
/// transport.
pub struct ToolRegistry {
    fetcher: Arc<RecordFetcher>,
}

impl ToolRegistry {
    /// Create a new tool registry sharing `fetcher` across calls.
    pub fn new(fetcher: Arc<RecordFetcher>) -> Self {
        Self { fetcher }
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the listing clients see; `router.rs` must route every entry.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![SearchBookByTitleTool::to_tool()]
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown names produce an error result rather than an `Err`.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match name {
            SearchBookByTitleTool::NAME => {
                SearchBookByTitleTool::invoke(self.fetcher.clone(), arguments).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                error_result(&ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::copyright::test_support::FakeTransport;
    use serde_json::json;

    fn registry(transport: Arc<FakeTransport>) -> ToolRegistry {
        ToolRegistry::new(Arc::new(RecordFetcher::new(
            "https://search.test/simple_search_dsl",
            transport,
        )))
    }

    #[test]
    fn test_get_all_tools() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "search_book_by_title");
        assert!(tools[0].description.is_some());
    }

    #[tokio::test]
    async fn test_registry_call_search() {
        let transport = FakeTransport::json(json!({"data": []}));
        let registry = registry(transport.clone());
        let args = json!({"title": "Dune"}).as_object().cloned().unwrap();
        let result = registry.call_tool("search_book_by_title", args).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(transport.requested_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let transport = FakeTransport::json(json!({}));
        let registry = registry(transport.clone());
        let result = registry.call_tool("unknown", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));
        assert!(transport.requested_urls().is_empty());
    }
}
