/// Playable audio handed from acquisition strategies to the audio output
use bytes::Bytes;

/// Audio fetched in full and held in memory
///
/// Same-origin playback restrictions do not apply to a local buffer, which
/// is why the proxied strategy materializes the clip. The buffer lives until
/// the playback layer releases it.
#[derive(Debug, Clone)]
pub struct MaterializedAudio {
    /// Remote locator the bytes were fetched for
    pub source_url: String,

    /// Content type reported by the remote, if any
    pub content_type: Option<String>,

    /// Encoded audio bytes
    pub data: Bytes,
}

impl MaterializedAudio {
    /// Size of the buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of a successful acquisition
#[derive(Debug, Clone)]
pub enum AcquiredAudio {
    /// Temporary in-memory object; must be released when superseded
    Materialized(MaterializedAudio),

    /// Remote locator the output should stream directly
    Remote(String),
}

impl AcquiredAudio {
    /// Whether this holds a temporary in-memory buffer
    pub fn is_materialized(&self) -> bool {
        matches!(self, Self::Materialized(_))
    }

    /// The remote locator this audio originates from
    pub fn source_url(&self) -> &str {
        match self {
            Self::Materialized(audio) => &audio.source_url,
            Self::Remote(url) => url,
        }
    }
}
