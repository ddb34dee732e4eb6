//! Copyright Public Records System tools.
//!
//! The search pipeline is split by concern:
//! - `query`: builds the normalized upstream request
//! - `fetcher`: performs the GET and decodes the JSON payload
//! - `formatter`: renders the payload as a text report
//! - `search_by_title`: the MCP tool tying the three together

pub mod common;
pub mod error;
pub mod fetcher;
pub mod formatter;
pub mod query;
pub mod search_by_title;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::FetchError;
pub use fetcher::{HttpSearchTransport, RawResponse, RecordFetcher, SearchResponse, SearchTransport};
pub use formatter::format_report;
pub use query::{FieldType, SearchOptions, SearchQuery, SortOrder};
pub use search_by_title::{SearchBookByTitleParams, SearchBookByTitleTool};
