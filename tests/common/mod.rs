#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{json, Value};
use std::time::Duration;

use hcp_terraform_mcp::mcp::tools::ToolRegistry;
use hcp_terraform_mcp::{McpService, RegistryClient, RegistryConfig};

pub const ORG: &str = "acme";
pub const TOKEN: &str = "test-token";
pub const MODULES_PATH: &str = "/api/v2/organizations/acme/registry-modules";

pub fn registry_config(server: &MockServer) -> RegistryConfig {
    RegistryConfig::new(ORG, TOKEN, &server.base_url()).expect("valid test config")
}

pub fn client(server: &MockServer) -> RegistryClient {
    RegistryClient::new(registry_config(server)).expect("client builds")
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> RegistryClient {
    RegistryClient::with_timeout(registry_config(server), timeout).expect("client builds")
}

/// Client whose base URL points at a port nothing listens on.
pub fn unreachable_client() -> RegistryClient {
    let config = RegistryConfig::new(ORG, TOKEN, "http://127.0.0.1:1").expect("valid test config");
    RegistryClient::new(config).expect("client builds")
}

pub fn service(server: &MockServer) -> McpService {
    McpService::new(ToolRegistry::new(client(server)))
}

pub fn module_resource(id: &str, name: &str, provider: &str, versions: &[&str]) -> Value {
    json!({
        "id": id,
        "type": "registry-modules",
        "attributes": {
            "name": name,
            "namespace": ORG,
            "provider": provider,
            "registry-name": "private",
            "status": "setup_complete",
            "version-statuses": versions
                .iter()
                .map(|v| json!({ "version": v, "status": "ok" }))
                .collect::<Vec<_>>(),
            "created-at": "2024-01-10T12:00:00.000Z",
            "updated-at": "2024-03-02T08:30:00.000Z"
        },
        "links": {
            "self": format!("{}/private/{}/{}/{}", MODULES_PATH, ORG, name, provider)
        }
    })
}

pub fn search_document(resources: Vec<Value>) -> Value {
    json!({
        "data": resources,
        "links": { "self": MODULES_PATH },
        "meta": { "pagination": { "current-page": 1, "total-pages": 1 } }
    })
}
