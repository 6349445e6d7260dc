use reqwest::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;

/// Failures of a single registry call.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("base URL '{0}' cannot hold a path")]
    InvalidBaseUrl(String),
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP status {status} for {path}")]
    Status { status: StatusCode, path: String },
    #[error("failed to read response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RegistryError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Timeout(err)
        } else {
            RegistryError::Transport(err)
        }
    }

    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Timeout(err)
        } else {
            RegistryError::Decode(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RegistryError::Timeout(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RegistryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Full description including the underlying causes, e.g. "request timed out: ...: operation timed out".
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source().and_then(|inner| inner.source());
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}
