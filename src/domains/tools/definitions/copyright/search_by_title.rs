//! Copyright registration search by book title.
//!
//! Validates the call, builds the query, fetches one page of records and
//! returns the formatted report. Every failure below this point comes back
//! as an error-shaped tool result; nothing is retried.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::common::{error_result, success_result};
use super::fetcher::RecordFetcher;
use super::formatter::format_report;
use super::query::{SearchOptions, SearchQuery};
use crate::domains::tools::ToolError;

/// Parameters for a title search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchBookByTitleParams {
    #[schemars(description = "Title of the book to search for")]
    pub title: String,

    /// Accepted but not sent upstream; see the tool description.
    #[schemars(description = "Optional author name. Echoed in the response, not used to filter results")]
    #[serde(default)]
    pub author: Option<String>,

    #[schemars(description = "Result page to fetch, starting at 1 (default: 1)")]
    #[serde(default)]
    pub page_number: Option<i64>,

    #[schemars(description = "Records per page (default: 10, max: 100)")]
    #[serde(default)]
    pub records_per_page: Option<i64>,

    #[schemars(description = "Field to match against: title, keyword or name (default: title)")]
    #[serde(default)]
    pub field_type: Option<String>,

    #[schemars(description = "Sort order: asc or desc (default: asc)")]
    #[serde(default)]
    pub sort_order: Option<String>,
}

impl SearchBookByTitleParams {
    fn options(&self) -> SearchOptions {
        SearchOptions {
            page_number: self.page_number,
            records_per_page: self.records_per_page,
            field_type: self.field_type.clone(),
            sort_order: self.sort_order.clone(),
        }
    }

    fn author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Copyright title search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchBookByTitleTool;

impl SearchBookByTitleTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_book_by_title";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the U.S. Copyright Office Public Records System for copyright registrations by book title. Returns a text report with registration numbers, dates, classes, type of work, authors, organizations, publication date and status for each matching record. The optional author is echoed back but is not used to filter results.";

    /// Run a search for already-deserialized parameters.
    pub async fn execute(fetcher: &RecordFetcher, params: &SearchBookByTitleParams) -> CallToolResult {
        let title = params.title.trim();
        if title.is_empty() {
            return error_result("Error: Title is required for copyright search");
        }

        let author = params.author();
        if let Some(author) = author {
            warn!("Author '{}' supplied but not applied to the upstream query", author);
        }

        let query = SearchQuery::build(title, &params.options());
        info!(
            "Searching copyright records: title='{}' page={} per_page={} field={} sort={}",
            query.title(),
            query.page_number(),
            query.records_per_page(),
            query.field_type(),
            query.sort_order()
        );

        match fetcher.fetch(&query).await {
            Ok(response) => {
                let report = format_report(&response);
                let text = match author {
                    Some(author) => format!(
                        "Note: author '{}' was not applied; results match the title only.\n\n{}",
                        author, report
                    ),
                    None => report,
                };
                success_result(text)
            }
            Err(e) => {
                error!("Copyright search for '{}' failed: {:?}", title, e);
                error_result(&failure_message(title, author, &e.to_string()))
            }
        }
    }

    /// Deserialize raw call arguments and run the search on its own task.
    ///
    /// Bad arguments and a panicking search both yield error results.
    pub async fn invoke(fetcher: Arc<RecordFetcher>, arguments: JsonObject) -> CallToolResult {
        let params: SearchBookByTitleParams =
            match serde_json::from_value(serde_json::Value::Object(arguments)) {
                Ok(params) => params,
                Err(e) => {
                    return error_result(&ToolError::invalid_arguments(e.to_string()).to_string());
                }
            };

        let title = params.title.clone();
        let task = tokio::spawn(async move { Self::execute(&fetcher, &params).await });

        task.await.unwrap_or_else(|e| {
            let err = ToolError::execution_failed(e.to_string());
            error_result(&failure_message(title.trim(), None, &err.to_string()))
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SearchBookByTitleParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the MCP tool router.
    pub fn create_route<S>(fetcher: Arc<RecordFetcher>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let fetcher = fetcher.clone();
            async move { Ok::<_, McpError>(Self::invoke(fetcher, args).await) }.boxed()
        })
    }
}

fn failure_message(title: &str, author: Option<&str>, cause: &str) -> String {
    match author {
        Some(author) => format!(
            "Error searching for book '{}' (author '{}'): {}",
            title, author, cause
        ),
        None => format!("Error searching for book '{}': {}", title, cause),
    }
}
