// fetch/mod.rs
mod client;

pub use client::{HttpFetcher, USER_AGENT};

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One outbound GET that is expected to answer with JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            bearer: None,
            timeout,
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Value of a query parameter, if it was set.
    #[cfg(test)]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("network error calling {url}: {message}")]
    Network { url: String, message: String },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON from {url}: {message}")]
    Json { url: String, message: String },
}

/// Blocking JSON transport shared by the geocoder, the parcel sources and the probe.
pub trait JsonFetcher: Send + Sync {
    fn get_json(&self, request: &FetchRequest) -> Result<Value, FetchError>;
}
