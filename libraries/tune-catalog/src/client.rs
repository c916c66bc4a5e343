//! Catalog client.

use crate::error::{CatalogError, Result};
use crate::preview::ProxiedFetch;
use crate::types::{encode, CatalogConfig, ProxyEndpoint, ProxyEnvelope, RawPage};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use tune_core::{Artist, ArtistId, Track};

/// Client for the remote music catalog.
///
/// Every request goes through the first configured proxy. The public query
/// methods never fail: any network, proxy, decode or upstream error is
/// logged and turned into an empty list, so callers always get something
/// they can render. The `try_` variants expose the typed error instead.
///
/// # Example
///
/// ```ignore
/// use tune_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::default())?;
/// let tracks = client.search_tracks("daft punk", 0).await;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let normalized = CatalogConfig {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            ..config
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(normalized.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("TunePlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: normalized,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One proxied fetch-and-materialize strategy per raw proxy, in order.
    ///
    /// Proxies that wrap payloads in a JSON envelope cannot carry binary
    /// audio and are skipped.
    pub fn preview_strategies(&self) -> Vec<ProxiedFetch> {
        self.config
            .proxies
            .iter()
            .filter(|p| p.envelope == ProxyEnvelope::Raw)
            .map(|p| ProxiedFetch::new(self.http.clone(), p.clone()))
            .collect()
    }

    // ===== Infallible queries =====

    /// Search tracks by free text, starting at `offset`.
    pub async fn search_tracks(&self, query: &str, offset: u32) -> Vec<Track> {
        absorb("search", self.try_search_tracks(query, offset).await)
    }

    /// Chart tracks, paging through a "top" search past the first page.
    pub async fn chart_tracks(&self, offset: u32) -> Vec<Track> {
        absorb("chart", self.try_chart_tracks(offset).await)
    }

    /// Most popular artists.
    pub async fn top_artists(&self) -> Vec<Artist> {
        absorb("top artists", self.try_top_artists().await)
    }

    /// An artist's most popular tracks.
    pub async fn artist_top_tracks(&self, artist_id: ArtistId) -> Vec<Track> {
        absorb("artist top", self.try_artist_top_tracks(artist_id).await)
    }

    // ===== Fallible queries =====

    /// Search tracks by free text; a blank query short-circuits to no results.
    pub async fn try_search_tracks(&self, query: &str, offset: u32) -> Result<Vec<Track>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank search query, skipping request");
            return Ok(Vec::new());
        }

        let path = format!(
            "/search?q={}&index={}&limit={}",
            encode(query),
            offset,
            self.config.page_size
        );
        self.fetch_list(&path).await
    }

    /// Chart tracks.
    ///
    /// The chart endpoint does not paginate, so any offset past the first
    /// page continues with a "top" search instead.
    pub async fn try_chart_tracks(&self, offset: u32) -> Result<Vec<Track>> {
        if offset == 0 {
            self.fetch_list("/chart/0/tracks").await
        } else {
            let path = format!(
                "/search?q=top&index={}&limit={}",
                offset, self.config.page_size
            );
            self.fetch_list(&path).await
        }
    }

    /// Most popular artists.
    pub async fn try_top_artists(&self) -> Result<Vec<Artist>> {
        self.fetch_list("/chart/0/artists").await
    }

    /// An artist's most popular tracks.
    pub async fn try_artist_top_tracks(&self, artist_id: ArtistId) -> Result<Vec<Track>> {
        let path = format!(
            "/artist/{}/top?limit={}",
            artist_id, self.config.artist_top_limit
        );
        self.fetch_list(&path).await
    }

    // ===== Transport =====

    fn primary_proxy(&self) -> Result<&ProxyEndpoint> {
        self.config
            .proxies
            .first()
            .ok_or_else(|| CatalogError::InvalidConfig("no proxy configured".into()))
    }

    /// Fetch `path` through the primary proxy and decode the `data` list.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let upstream = format!("{}{}", self.config.base_url, path);
        let proxy = self.primary_proxy()?;
        let url = proxy.wrap(&upstream);

        debug!(upstream = %upstream, "Fetching from catalog");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::ProxyStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        let payload = proxy.envelope.unwrap_body(&body)?;
        let page: RawPage = serde_json::from_value(payload)
            .map_err(|e| CatalogError::Decode(format!("Unexpected catalog envelope: {}", e)))?;

        if let Some(error) = page.error {
            let message = if error.message.is_empty() {
                "Unknown error".to_string()
            } else {
                error.message
            };
            return Err(CatalogError::Upstream {
                kind: error.kind,
                message,
                code: error.code,
            });
        }

        let items: Vec<T> = match page.data {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(data) => serde_json::from_value(data)
                .map_err(|e| CatalogError::Decode(format!("Failed to parse items: {}", e)))?,
        };

        debug!(path = %path, results = items.len(), "Catalog request complete");
        Ok(items)
    }
}

/// Turn a failed query into an empty list, logging the cause.
fn absorb<T>(operation: &str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(operation = %operation, error = %e, "Catalog query failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(CatalogClient::new(CatalogConfig::default()).is_ok());
        assert!(CatalogClient::new(CatalogConfig::new("http://localhost:8080")).is_ok());

        assert!(CatalogClient::new(CatalogConfig::new("")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("not-a-url")).is_err());
        assert!(CatalogClient::new(CatalogConfig::default().with_proxies(vec![])).is_err());
    }

    #[test]
    fn test_base_url_normalization() {
        let client = CatalogClient::new(CatalogConfig::new("https://api.example.com///"))
            .expect("valid config");
        assert_eq!(client.config().base_url, "https://api.example.com");
    }

    #[test]
    fn test_preview_strategies_skip_enveloped_proxies() {
        let config = CatalogConfig::default().with_proxies(vec![
            ProxyEndpoint::raw("https://a.example/?"),
            ProxyEndpoint::contents("https://b.example/get?url="),
            ProxyEndpoint::raw("https://c.example/raw?url="),
        ]);
        let client = CatalogClient::new(config).unwrap();
        let names: Vec<String> = client
            .preview_strategies()
            .iter()
            .map(|s| s.proxy().prefix.clone())
            .collect();
        assert_eq!(names, vec!["https://a.example/?", "https://c.example/raw?url="]);
    }

    #[tokio::test]
    async fn test_blank_query_returns_empty_without_request() {
        // Unroutable proxy: any request would fail, but none is made.
        let config = CatalogConfig::default()
            .with_proxies(vec![ProxyEndpoint::raw("http://127.0.0.1:1/?")]);
        let client = CatalogClient::new(config).unwrap();

        assert!(client.try_search_tracks("", 0).await.unwrap().is_empty());
        assert!(client.try_search_tracks("   ", 0).await.unwrap().is_empty());
    }
}
