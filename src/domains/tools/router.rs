//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::SearchBookByTitleTool;
use super::definitions::copyright::RecordFetcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(fetcher: Arc<RecordFetcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(SearchBookByTitleTool::create_route(fetcher))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::tools::definitions::copyright::test_support::FakeTransport;

    struct TestServer {}

    fn test_fetcher() -> Arc<RecordFetcher> {
        Arc::new(RecordFetcher::new(
            "https://search.test/simple_search_dsl",
            FakeTransport::respond(200, "{}"),
        ))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_fetcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "search_book_by_title");
    }

    #[test]
    fn test_registry_matches_router() {
        let registry_tools = ToolRegistry::get_all_tools();
        let registry_names: Vec<_> = registry_tools.iter().map(|t| t.name.as_ref()).collect();

        let router: ToolRouter<TestServer> = build_tool_router(test_fetcher());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
