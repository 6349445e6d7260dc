//! MCP Tool for fetching a single registry module.

use serde::Deserialize;
use serde_json::json;

use super::registry::ToolDescriptor;
use crate::mcp::content::ToolResult;
use crate::registry::{ErrorRecord, RegistryClient, DEFAULT_REGISTRY_NAME};

pub const TOOL_NAME: &str = "hcp_terraform_get_module";

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: concat!(
            "Get a specific module from the HCP Terraform Registry. ",
            "Returns module details including versions, VCS repository and permissions."
        )
        .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "module_name": {
                    "type": "string",
                    "description": "The name of the module"
                },
                "provider": {
                    "type": "string",
                    "description": "The provider (e.g., aws, gcp, azure)"
                },
                "registry_name": {
                    "type": "string",
                    "enum": ["private", "public"],
                    "default": DEFAULT_REGISTRY_NAME,
                    "description": "The registry name (private or public)"
                },
                "namespace": {
                    "type": "string",
                    "description": "The namespace of the module (defaults to organization name)"
                }
            },
            "required": ["module_name", "provider"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct GetModuleRequest {
    pub module_name: String,
    pub provider: String,
    #[serde(default = "default_registry_name")]
    pub registry_name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

fn default_registry_name() -> String {
    DEFAULT_REGISTRY_NAME.to_string()
}

/// Fetch one module. Failures come back as a bare error record.
pub async fn execute(client: &RegistryClient, request: GetModuleRequest) -> ToolResult {
    match client
        .get_module(
            &request.module_name,
            &request.provider,
            &request.registry_name,
            request.namespace.as_deref(),
        )
        .await
    {
        Ok(module) => ToolResult::success_json(&module),
        Err(err) => {
            log::warn!(
                "fetching module {}/{} failed: {}",
                request.module_name,
                request.provider,
                err
            );
            ToolResult::error_json(&ErrorRecord::from(&err))
        }
    }
}
