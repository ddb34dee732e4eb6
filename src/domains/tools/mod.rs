//! Tools domain module.
//!
//! Tools are the executable functions MCP clients can call.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Builds the rmcp ToolRouter used by every transport
//! - `registry.rs` - Tool metadata listing and direct dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/`
//! 2. Define params, `execute()`, `invoke()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add the route in `router.rs` using `with_route()`
//! 5. Register in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
