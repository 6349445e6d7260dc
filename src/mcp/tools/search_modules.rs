//! MCP Tool for searching the private module registry.

use serde::Deserialize;
use serde_json::json;

use super::registry::ToolDescriptor;
use crate::mcp::content::ToolResult;
use crate::registry::{ErrorRecord, RegistryClient, DEFAULT_SEARCH_LIMIT};

pub const TOOL_NAME: &str = "hcp_terraform_search_private_modules";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: "Search for modules in the HCP Terraform Private Registry".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search text matched against module names. Empty string lists all modules."
                },
                "provider": {
                    "type": "string",
                    "description": "Only return modules for this provider (e.g., aws, google, azurerm)"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "default": DEFAULT_SEARCH_LIMIT,
                    "description": "Maximum number of modules to return (single page)"
                }
            },
            "required": ["query"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchModulesRequest {
    pub query: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Run a search. Failures come back as a one-element list holding an error record.
pub async fn execute(client: &RegistryClient, request: SearchModulesRequest) -> ToolResult {
    match client
        .search_modules(&request.query, request.provider.as_deref(), request.limit)
        .await
    {
        Ok(modules) => {
            log::debug!("search '{}' returned {} modules", request.query, modules.len());
            ToolResult::success_json(&modules)
        }
        Err(err) => {
            log::warn!("module search failed: {}", err);
            ToolResult::error_json(&vec![ErrorRecord::from(&err)])
        }
    }
}
