//! Types for catalog configuration and response envelopes.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Configuration
// =============================================================================

/// How a proxy wraps the upstream payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyEnvelope {
    /// Body is the upstream payload, untouched
    #[default]
    Raw,
    /// Body is `{"contents": "<upstream payload as a string>", ...}`
    Contents,
}

impl ProxyEnvelope {
    /// Extract the upstream JSON payload from a proxy response body.
    pub fn unwrap_body(self, body: &str) -> Result<Value> {
        let outer: Value = serde_json::from_str(body)
            .map_err(|e| CatalogError::Decode(format!("Proxy body is not JSON: {}", e)))?;

        match self {
            ProxyEnvelope::Raw => Ok(outer),
            ProxyEnvelope::Contents => {
                let contents = outer
                    .get("contents")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CatalogError::Decode("Proxy envelope has no contents field".into())
                    })?;
                serde_json::from_str(contents).map_err(|e| {
                    CatalogError::Decode(format!("Proxy contents are not JSON: {}", e))
                })
            }
        }
    }
}

/// A CORS-bypass proxy: the upstream URL is percent-encoded and appended to
/// `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyEndpoint {
    pub prefix: String,
    #[serde(default)]
    pub envelope: ProxyEnvelope,
}

impl ProxyEndpoint {
    /// Proxy returning the upstream body as-is.
    pub fn raw(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            envelope: ProxyEnvelope::Raw,
        }
    }

    /// Proxy wrapping the upstream body in a `contents` field.
    pub fn contents(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            envelope: ProxyEnvelope::Contents,
        }
    }

    /// Build the proxied URL for an upstream URL.
    pub fn wrap(&self, upstream: &str) -> String {
        format!("{}{}", self.prefix, encode(upstream))
    }
}

/// Configuration for the catalog client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Catalog API base URL (e.g. "https://api.deezer.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxies in preference order. Catalog queries use the first one;
    /// audio acquisition tries each in turn.
    #[serde(default = "default_proxies")]
    pub proxies: Vec<ProxyEndpoint>,

    /// Results per search/chart page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Tracks requested for an artist's top list
    #[serde(default = "default_artist_top_limit")]
    pub artist_top_limit: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Keywords the discovery feed picks from on a shuffled refresh
    #[serde(default = "default_discovery_keywords")]
    pub discovery_keywords: Vec<String>,
}

impl CatalogConfig {
    /// Config with default proxies against a specific base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Replace the proxy list.
    #[must_use]
    pub fn with_proxies(mut self, proxies: Vec<ProxyEndpoint>) -> Self {
        self.proxies = proxies;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(CatalogError::InvalidConfig("base_url cannot be empty".into()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(CatalogError::InvalidConfig(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.proxies.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "at least one proxy is required".into(),
            ));
        }
        if self.proxies.iter().any(|p| p.prefix.trim().is_empty()) {
            return Err(CatalogError::InvalidConfig(
                "proxy prefix cannot be empty".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(CatalogError::InvalidConfig("page_size must be >= 1".into()));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxies: default_proxies(),
            page_size: default_page_size(),
            artist_top_limit: default_artist_top_limit(),
            timeout_secs: default_timeout_secs(),
            discovery_keywords: default_discovery_keywords(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.deezer.com".to_string()
}

fn default_proxies() -> Vec<ProxyEndpoint> {
    vec![
        ProxyEndpoint::raw("https://corsproxy.io/?"),
        ProxyEndpoint::raw("https://api.allorigins.win/raw?url="),
    ]
}

fn default_page_size() -> u32 {
    20
}

fn default_artist_top_limit() -> u32 {
    50
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_discovery_keywords() -> Vec<String> {
    [
        "hits 2025",
        "top brasil",
        "pop international",
        "rock classics",
        "dance hits",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

// =============================================================================
// Catalog envelope
// =============================================================================

/// Error object the catalog embeds in an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Top-level catalog list envelope, before the items are decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<UpstreamErrorBody>,
}

/// Percent-encode a string for use inside a query component.
pub(crate) fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
