//! MCP Tools module - defines tools exposed via JSON-RPC.
//!
//! Each tool wraps one registry operation and provides:
//! - Tool descriptor (name, description, input schema)
//! - Argument parsing
//! - Execution and result formatting

pub mod get_module;
pub mod registry;
pub mod search_modules;

pub use registry::{ToolDescriptor, ToolRegistry};
