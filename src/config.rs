//! Process configuration, read once at startup.
//!
//! Values come from the environment (a `.env` file is loaded first by `run()`).
//! A missing token or organization stops the server before it accepts requests.

use reqwest::Url;
use std::env;
use std::fmt;
use thiserror::Error;

pub const TOKEN_VAR: &str = "HCP_TERRAFORM_TOKEN";
pub const ORG_VAR: &str = "HCP_TERRAFORM_ORG";
pub const BASE_URL_VAR: &str = "HCP_TERRAFORM_BASE_URL";
pub const TRANSPORT_VAR: &str = "MCP_TRANSPORT";
pub const HOST_VAR: &str = "MCP_HOST";
pub const PORT_VAR: &str = "MCP_PORT";

pub const DEFAULT_BASE_URL: &str = "https://app.terraform.io";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set.")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Credentials and location of the registry. Immutable once built.
#[derive(Clone)]
pub struct RegistryConfig {
    pub organization: String,
    pub token: String,
    pub base_url: Url,
}

impl RegistryConfig {
    pub fn new(
        organization: impl Into<String>,
        token: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, ConfigError> {
        let organization = organization.into();
        let token = token.into();

        if token.trim().is_empty() {
            return Err(ConfigError::Missing(TOKEN_VAR));
        }
        if organization.trim().is_empty() {
            return Err(ConfigError::Missing(ORG_VAR));
        }

        Ok(Self {
            organization,
            token,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let organization = lookup(ORG_VAR).ok_or(ConfigError::Missing(ORG_VAR))?;
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(organization, token, &base_url)
    }
}

// Keeps the bearer token out of logs.
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::Invalid {
        name: BASE_URL_VAR,
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            name: BASE_URL_VAR,
            reason: format!("'{}' is not an http(s) base URL", raw),
        });
    }

    Ok(url)
}

/// How the MCP server talks to its client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http { host: String, port: u16 },
}

impl Transport {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let kind = lookup(TRANSPORT_VAR).unwrap_or_else(|| "stdio".to_string());

        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "stdio" => Ok(Transport::Stdio),
            "http" => {
                let host = lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = match lookup(PORT_VAR) {
                    Some(raw) => raw.trim().parse::<u16>().map_err(|err| ConfigError::Invalid {
                        name: PORT_VAR,
                        reason: err.to_string(),
                    })?,
                    None => DEFAULT_PORT,
                };
                Ok(Transport::Http { host, port })
            }
            other => Err(ConfigError::Invalid {
                name: TRANSPORT_VAR,
                reason: format!("unknown transport '{}', expected 'stdio' or 'http'", other),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub transport: Transport,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: RegistryConfig::from_lookup(&lookup)?,
            transport: Transport::from_lookup(&lookup)?,
        })
    }
}
