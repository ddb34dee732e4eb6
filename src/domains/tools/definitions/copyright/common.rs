//! Result helpers shared by the copyright tools.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

/// Create an error result with a one-line message.
pub fn error_result(message: &str) -> CallToolResult {
    let message = single_line(message);
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Collapse a possibly multi-line message onto one line.
pub fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
