//! Error types for the catalog client.

use thiserror::Error;
use tune_core::TuneError;

/// Errors that can occur when querying the music catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed (proxy or upstream unreachable, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Proxy answered with a non-success status
    #[error("Proxy error: {status} {reason}")]
    ProxyStatus { status: u16, reason: String },

    /// Catalog reported an application error inside its envelope
    #[error("Catalog error ({kind}): {message}")]
    Upstream {
        kind: String,
        message: String,
        code: Option<i64>,
    },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client configuration is unusable
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Whether this is a transport-level failure (proxy or upstream unreachable)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_) | Self::ProxyStatus { .. })
    }
}

impl From<CatalogError> for TuneError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Request(_) | CatalogError::ProxyStatus { .. } => {
                TuneError::network(err.to_string())
            }
            CatalogError::Upstream { message, code, .. } => TuneError::Upstream { message, code },
            CatalogError::Decode(msg) => TuneError::decode(msg),
            CatalogError::InvalidConfig(msg) => TuneError::invalid_input(msg),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_keeps_code() {
        let err = CatalogError::Upstream {
            kind: "DataException".into(),
            message: "no data".into(),
            code: Some(800),
        };
        assert!(!err.is_network());
        match TuneError::from(err) {
            TuneError::Upstream { message, code } => {
                assert_eq!(message, "no data");
                assert_eq!(code, Some(800));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn proxy_status_is_network() {
        let err = CatalogError::ProxyStatus {
            status: 503,
            reason: "Service Unavailable".into(),
        };
        assert!(err.is_network());
        assert!(matches!(TuneError::from(err), TuneError::Network(_)));
    }
}
