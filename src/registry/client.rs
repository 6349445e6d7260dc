//! HTTP client for the HCP Terraform private module registry.

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::error::RegistryError;
use super::models::{ModuleDetail, ModuleSummary};
use crate::config::RegistryConfig;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_REGISTRY_NAME: &str = "private";

const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";
const API_PREFIX: [&str; 3] = ["api", "v2", "organizations"];

/// Read-only access to `registry-modules` of one organization.
///
/// Every call is a single GET. The underlying client keeps no idle connections,
/// so nothing stays open between calls.
#[derive(Clone)]
pub struct RegistryClient {
    config: Arc<RegistryConfig>,
    http: reqwest::Client,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(config: RegistryConfig, timeout: Duration) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn organization(&self) -> &str {
        &self.config.organization
    }

    /// Search the organization's private modules. Returns at most `limit` records (one page).
    pub async fn search_modules(
        &self,
        query: &str,
        provider: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ModuleSummary>, RegistryError> {
        let url = self.modules_url(&[])?;
        let params = search_params(query, provider, limit);
        let document = self.get_json(url, &params).await?;

        Ok(ModuleSummary::list_from_document(
            &document,
            &self.config.organization,
        ))
    }

    /// Fetch one module. `namespace` defaults to the configured organization.
    pub async fn get_module(
        &self,
        module_name: &str,
        provider: &str,
        registry_name: &str,
        namespace: Option<&str>,
    ) -> Result<ModuleDetail, RegistryError> {
        let namespace = namespace.unwrap_or(&self.config.organization);
        let url = self.modules_url(&[registry_name, namespace, module_name, provider])?;
        let document = self.get_json(url, &[]).await?;

        Ok(ModuleDetail::from_document(
            &document,
            &self.config.organization,
        ))
    }

    /// `{base_url}/api/v2/organizations/{org}/registry-modules[/segments...]`
    pub fn modules_url(&self, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = self.config.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RegistryError::InvalidBaseUrl(self.config.base_url.to_string()))?;
            path.pop_if_empty()
                .extend(API_PREFIX)
                .push(&self.config.organization)
                .push("registry-modules")
                .extend(segments);
        }
        Ok(url)
    }

    async fn get_json(
        &self,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<Value, RegistryError> {
        log::info!("GET {}", url.path());

        let mut request = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(RegistryError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let path = response.url().path().to_string();
            log::warn!("registry responded {} for {}", status, path);
            return Err(RegistryError::Status { status, path });
        }

        response
            .json::<Value>()
            .await
            .map_err(RegistryError::from_body)
    }
}

/// Query parameters for a module search.
/// `q` is sent only for a non-empty query, `filter[provider]` only for a non-empty provider.
pub fn search_params(
    query: &str,
    provider: Option<&str>,
    limit: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("page[size]", limit.to_string())];
    if !query.is_empty() {
        params.push(("q", query.to_string()));
    }
    if let Some(provider) = provider.filter(|p| !p.is_empty()) {
        params.push(("filter[provider]", provider.to_string()));
    }
    params
}
