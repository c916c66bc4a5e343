//! Proxied fetch-and-materialize acquisition of preview clips.

use crate::types::ProxyEndpoint;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use tune_core::{AcquiredAudio, AcquisitionError, AcquisitionStrategy, MaterializedAudio, Track};

/// Fetches a track's preview clip through a proxy and holds it in memory.
///
/// A local buffer sidesteps same-origin restrictions on the remote clip.
/// The playback layer owns the buffer and releases it when the track is
/// superseded.
#[derive(Debug, Clone)]
pub struct ProxiedFetch {
    http: Client,
    proxy: ProxyEndpoint,
    name: String,
}

impl ProxiedFetch {
    /// Create a strategy fetching through `proxy`.
    pub fn new(http: Client, proxy: ProxyEndpoint) -> Self {
        let name = format!("proxied-fetch({})", proxy.prefix);
        Self { http, proxy, name }
    }

    /// Proxy this strategy fetches through.
    pub fn proxy(&self) -> &ProxyEndpoint {
        &self.proxy
    }
}

#[async_trait]
impl AcquisitionStrategy for ProxiedFetch {
    fn name(&self) -> &str {
        &self.name
    }

    async fn acquire(&self, track: &Track) -> Result<AcquiredAudio, AcquisitionError> {
        if !track.has_preview() {
            return Err(AcquisitionError::NoPreview(track.id));
        }

        let url = self.proxy.wrap(&track.preview);
        debug!(track_id = track.id, url = %url, "Fetching preview through proxy");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        if data.is_empty() {
            return Err(AcquisitionError::EmptyBody(url));
        }

        debug!(track_id = track.id, bytes = data.len(), "Preview materialized");

        Ok(AcquiredAudio::Materialized(MaterializedAudio {
            source_url: track.preview.clone(),
            content_type,
            data,
        }))
    }
}
