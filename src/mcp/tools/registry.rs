//! Tool registry - central routing for MCP tools.
//!
//! Provides `list_tools()` and `call_tool()` functionality per MCP spec.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::content::ToolResult;
use crate::registry::RegistryClient;

use super::get_module::{self, GetModuleRequest};
use super::search_modules::{self, SearchModulesRequest};

/// Tool descriptor conforming to MCP specification.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Central registry for all MCP tools.
pub struct ToolRegistry {
    client: RegistryClient,
}

impl ToolRegistry {
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    /// List all available tools per MCP spec.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![search_modules::descriptor(), get_module::descriptor()]
    }

    /// Call a tool by name with the given arguments.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match name {
            search_modules::TOOL_NAME => {
                let request = match parse_arguments::<SearchModulesRequest>(arguments) {
                    Ok(req) => req,
                    Err(err) => return ToolResult::error(err),
                };
                search_modules::execute(&self.client, request).await
            }
            get_module::TOOL_NAME => {
                let request = match parse_arguments::<GetModuleRequest>(arguments) {
                    Ok(req) => req,
                    Err(err) => return ToolResult::error(err),
                };
                get_module::execute(&self.client, request).await
            }
            _ => ToolResult::error(format!(
                "Tool '{}' is not available. Available tools: {}, {}",
                name,
                search_modules::TOOL_NAME,
                get_module::TOOL_NAME,
            )),
        }
    }
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: Option<Value>) -> Result<T, String> {
    let value = arguments.unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|err| format!("Invalid arguments: {}", err))
}
