//! Infinite-scroll discovery feed over charts and keyword searches.

use crate::client::CatalogClient;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use tune_core::Track;

/// Paged track list backing a discovery view.
///
/// A feed either follows the chart (`query == None`) or a keyword search.
/// Each page advances the offset by the number of results actually received,
/// so a short page never skips items.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFeed {
    query: Option<String>,
    offset: u32,
    tracks: Vec<Track>,
}

impl DiscoveryFeed {
    /// Empty feed following the chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks loaded so far.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Keyword the feed follows, or `None` for the chart.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Offset the next page will be requested from.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Restart the feed from the first page of `query` (or the chart).
    pub async fn refresh(&mut self, client: &CatalogClient, query: Option<String>) -> &[Track] {
        self.query = query.filter(|q| !q.trim().is_empty());
        self.offset = 0;
        self.tracks.clear();
        self.load_more(client).await;
        &self.tracks
    }

    /// Restart the feed on the chart or a random discovery keyword, with
    /// equal odds.
    pub async fn shuffle_refresh(&mut self, client: &CatalogClient) -> &[Track] {
        let query = {
            let mut rng = rand::thread_rng();
            if rng.gen_bool(0.5) {
                None
            } else {
                client.config().discovery_keywords.choose(&mut rng).cloned()
            }
        };
        debug!(query = ?query, "Shuffled discovery refresh");
        self.refresh(client, query).await
    }

    /// Append the next page; returns how many tracks were added.
    pub async fn load_more(&mut self, client: &CatalogClient) -> usize {
        let page = match &self.query {
            Some(query) => client.search_tracks(query, self.offset).await,
            None => client.chart_tracks(self.offset).await,
        };

        let added = page.len();
        self.offset += added as u32;
        self.tracks.extend(page);

        debug!(added, offset = self.offset, "Discovery feed page loaded");
        added
    }
}
