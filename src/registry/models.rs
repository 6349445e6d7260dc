//! Flat module records projected out of JSON:API registry documents.
//!
//! Registry bodies nest everything under `data[].attributes` with kebab-case keys.
//! Projection never fails: a missing or wrongly typed field simply becomes `None`.

use serde::Serialize;
use serde_json::Value;

use super::error::RegistryError;

/// Prefix of every error message handed back to tool callers.
pub const ERROR_PREFIX: &str = "An error occurred during API call";

/// One element of a module search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Falls back to the configured organization when the registry omits it.
    pub namespace: String,
    pub provider: Option<String>,
    pub registry_name: Option<String>,
    pub status: Option<String>,
    /// Versions in the order the registry lists them in `version-statuses`.
    pub versions: Vec<Option<String>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub self_link: Option<String>,
}

/// A single module with its VCS and permission blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub summary: ModuleSummary,
    /// Passed through as returned by the registry.
    pub vcs_repo: Option<Value>,
    /// Passed through as returned by the registry.
    pub permissions: Option<Value>,
}

/// Data-shaped failure returned in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&RegistryError> for ErrorRecord {
    fn from(err: &RegistryError) -> Self {
        Self::new(format!("{}: {}", ERROR_PREFIX, err.describe()))
    }
}

impl ModuleSummary {
    /// Project one JSON:API resource object.
    pub fn from_resource(resource: &Value, organization: &str) -> Self {
        let attributes = resource.get("attributes").unwrap_or(&Value::Null);

        Self {
            id: string_at(resource, "id"),
            name: string_at(attributes, "name"),
            // An explicit null also falls back, not only a missing key.
            namespace: string_at(attributes, "namespace")
                .unwrap_or_else(|| organization.to_string()),
            provider: string_at(attributes, "provider"),
            registry_name: string_at(attributes, "registry-name"),
            status: string_at(attributes, "status"),
            versions: versions_of(attributes),
            created_at: string_at(attributes, "created-at"),
            updated_at: string_at(attributes, "updated-at"),
            self_link: resource
                .get("links")
                .and_then(|links| string_at(links, "self")),
        }
    }

    /// Project every element of a list document's `data` array, keeping server order.
    pub fn list_from_document(document: &Value, organization: &str) -> Vec<Self> {
        document
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| Self::from_resource(item, organization))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ModuleDetail {
    /// Project the `data` object of a single-resource document.
    pub fn from_document(document: &Value, organization: &str) -> Self {
        let resource = document.get("data").unwrap_or(&Value::Null);
        let attributes = resource.get("attributes").unwrap_or(&Value::Null);

        Self {
            summary: ModuleSummary::from_resource(resource, organization),
            vcs_repo: opaque_at(attributes, "vcs-repo"),
            permissions: opaque_at(attributes, "permissions"),
        }
    }
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn opaque_at(value: &Value, key: &str) -> Option<Value> {
    value.get(key).filter(|inner| !inner.is_null()).cloned()
}

fn versions_of(attributes: &Value) -> Vec<Option<String>> {
    attributes
        .get("version-statuses")
        .and_then(Value::as_array)
        .map(|statuses| {
            statuses
                .iter()
                .map(|status| string_at(status, "version"))
                .collect()
        })
        .unwrap_or_default()
}
