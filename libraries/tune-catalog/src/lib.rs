//! Tune Player Catalog Client
//!
//! HTTP client for the remote music catalog, reached through CORS-bypass
//! proxies.
//!
//! # Features
//!
//! - **Queries**: track search, charts, top artists, artist top tracks
//! - **Envelopes**: proxy envelope and catalog `{data, error}` envelope
//!   unwrapping
//! - **Discovery feed**: offset-based paging for infinite scroll
//! - **Preview acquisition**: proxied fetch-and-materialize strategy for the
//!   playback layer
//!
//! Query failures never reach the caller: they are logged and surface as an
//! empty list.
//!
//! # Example
//!
//! ```ignore
//! use tune_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::default())?;
//!
//!     for track in client.chart_tracks(0).await {
//!         println!("{} - {}", track.artist.name, track.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod feed;
mod preview;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use feed::DiscoveryFeed;
pub use preview::ProxiedFetch;
pub use types::{CatalogConfig, ProxyEndpoint, ProxyEnvelope};
