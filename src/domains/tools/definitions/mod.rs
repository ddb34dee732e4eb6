//! Tool definitions module.
//!
//! Each tool is defined in its own file, grouped by upstream service.

pub mod copyright;

pub use copyright::{SearchBookByTitleParams, SearchBookByTitleTool};
