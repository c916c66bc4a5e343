//! Tests for the catalog client.
//!
//! These tests use mock servers standing in for the proxy, so no real
//! network access is needed.

use std::sync::Once;
use tune_catalog::{
    CatalogClient, CatalogConfig, CatalogError, DiscoveryFeed, ProxiedFetch, ProxyEndpoint,
};
use tune_core::{AcquiredAudio, AcquisitionError, AcquisitionStrategy, Track};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "https://api.deezer.com";

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

fn client_for(server: &MockServer) -> CatalogClient {
    init_tracing();
    let config = CatalogConfig::new(BASE)
        .with_proxies(vec![ProxyEndpoint::raw(format!("{}/raw?url=", server.uri()))]);
    CatalogClient::new(config).expect("valid config")
}

fn track_json(id: u64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "title_short": title,
        "duration": 200,
        "preview": format!("https://cdn.example.com/{id}.mp3"),
        "artist": { "id": 27, "name": "Daft Punk" },
        "album": { "id": 302127, "title": "Discovery" }
    })
}

async fn mount_upstream(server: &MockServer, upstream: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", upstream))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// =============================================================================
// Queries
// =============================================================================

mod queries {
    use super::*;

    #[tokio::test]
    async fn test_search_returns_tracks() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=daft+punk&index=0&limit=20",
            serde_json::json!({
                "data": [track_json(1, "One More Time"), track_json(2, "Aerodynamic")],
                "total": 2
            }),
        )
        .await;

        let client = client_for(&server);
        let tracks = client.search_tracks("daft punk", 0).await;

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "One More Time");
        assert_eq!(tracks[1].artist.name, "Daft Punk");
    }

    #[tokio::test]
    async fn test_search_passes_offset() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=jazz&index=40&limit=20",
            serde_json::json!({ "data": [track_json(41, "Page three")] }),
        )
        .await;

        let client = client_for(&server);
        let tracks = client.search_tracks("jazz", 40).await;

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 41);
    }

    #[tokio::test]
    async fn test_zero_results_is_empty_list() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=zzzzzz&index=0&limit=20",
            serde_json::json!({ "data": [], "total": 0 }),
        )
        .await;

        let client = client_for(&server);
        let result = client.try_search_tracks("zzzzzz", 0).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search_tracks("", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_chart_first_page_uses_chart_endpoint() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/chart/0/tracks",
            serde_json::json!({ "data": [track_json(10, "Chart #1")] }),
        )
        .await;

        let client = client_for(&server);
        let tracks = client.chart_tracks(0).await;
        assert_eq!(tracks[0].title, "Chart #1");
    }

    #[tokio::test]
    async fn test_chart_later_pages_use_top_search() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=top&index=20&limit=20",
            serde_json::json!({ "data": [track_json(21, "More top")] }),
        )
        .await;

        let client = client_for(&server);
        let tracks = client.chart_tracks(20).await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 21);
    }

    #[tokio::test]
    async fn test_top_artists() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/chart/0/artists",
            serde_json::json!({
                "data": [
                    { "id": 27, "name": "Daft Punk", "picture_medium": "https://img/dp.jpg" },
                    { "id": 13, "name": "Eminem" }
                ]
            }),
        )
        .await;

        let client = client_for(&server);
        let artists = client.top_artists().await;

        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].picture_medium, "https://img/dp.jpg");
        assert_eq!(artists[1].name, "Eminem");
    }

    #[tokio::test]
    async fn test_artist_top_tracks() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/artist/27/top?limit=50",
            serde_json::json!({ "data": [track_json(3, "Around the World")] }),
        )
        .await;

        let client = client_for(&server);
        let tracks = client.artist_top_tracks(27).await;
        assert_eq!(tracks[0].title, "Around the World");
    }

    #[tokio::test]
    async fn test_missing_data_field_is_empty_list() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/chart/0/artists",
            serde_json::json!({ "total": 0 }),
        )
        .await;

        let client = client_for(&server);
        assert!(client.try_top_artists().await.unwrap().is_empty());
    }
}

// =============================================================================
// Error absorption
// =============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_upstream_error_is_typed_and_absorbed() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/artist/999999999/top?limit=50",
            serde_json::json!({
                "error": { "type": "DataException", "message": "no data", "code": 800 }
            }),
        )
        .await;

        let client = client_for(&server);

        match client.try_artist_top_tracks(999_999_999).await {
            Err(CatalogError::Upstream {
                kind,
                message,
                code,
            }) => {
                assert_eq!(kind, "DataException");
                assert_eq!(message, "no data");
                assert_eq!(code, Some(800));
            }
            other => panic!("Expected Upstream error, got {:?}", other),
        }

        assert!(client.artist_top_tracks(999_999_999).await.is_empty());
    }

    #[tokio::test]
    async fn test_proxy_failure_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client.try_chart_tracks(0).await.unwrap_err();
        assert!(err.is_network());
        match err {
            CatalogError::ProxyStatus { status, .. } => assert_eq!(status, 502),
            other => panic!("Expected ProxyStatus, got {:?}", other),
        }

        assert!(client.chart_tracks(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_absorbed() {
        init_tracing();
        let config = CatalogConfig::new(BASE)
            .with_proxies(vec![ProxyEndpoint::raw("http://127.0.0.1:1/raw?url=")]);
        let client = CatalogClient::new(config).unwrap();

        let err = client.try_search_tracks("anything", 0).await.unwrap_err();
        assert!(err.is_network());
        assert!(client.search_tracks("anything", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/chart/0/tracks",
            serde_json::json!({ "data": { "not": "a list" } }),
        )
        .await;

        let client = client_for(&server);
        let err = client.try_chart_tracks(0).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(client.chart_tracks(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_html_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_top_artists().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}

// =============================================================================
// Proxy envelopes
// =============================================================================

mod envelopes {
    use super::*;

    #[tokio::test]
    async fn test_contents_envelope_is_unwrapped() {
        let server = MockServer::start().await;
        let inner = serde_json::json!({ "data": [track_json(5, "Wrapped")] }).to_string();
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("url", "https://api.deezer.com/chart/0/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contents": inner,
                "status": { "http_code": 200 }
            })))
            .mount(&server)
            .await;

        init_tracing();
        let config = CatalogConfig::new(BASE).with_proxies(vec![ProxyEndpoint::contents(
            format!("{}/get?url=", server.uri()),
        )]);
        let client = CatalogClient::new(config).unwrap();

        let tracks = client.chart_tracks(0).await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Wrapped");
    }
}

// =============================================================================
// Discovery feed
// =============================================================================

mod feed {
    use super::*;

    #[tokio::test]
    async fn test_feed_advances_by_results_received() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=rock&index=0&limit=20",
            serde_json::json!({ "data": [track_json(1, "a"), track_json(2, "b"), track_json(3, "c")] }),
        )
        .await;
        mount_upstream(
            &server,
            "https://api.deezer.com/search?q=rock&index=3&limit=20",
            serde_json::json!({ "data": [track_json(4, "d")] }),
        )
        .await;

        let client = client_for(&server);
        let mut feed = DiscoveryFeed::new();

        let first = feed.refresh(&client, Some("rock".to_string())).await;
        assert_eq!(first.len(), 3);
        assert_eq!(feed.offset(), 3);
        assert_eq!(feed.query(), Some("rock"));

        let added = feed.load_more(&client).await;
        assert_eq!(added, 1);
        assert_eq!(feed.offset(), 4);
        let ids: Vec<u64> = feed.tracks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_feed_refresh_resets_to_chart() {
        let server = MockServer::start().await;
        mount_upstream(
            &server,
            "https://api.deezer.com/chart/0/tracks",
            serde_json::json!({ "data": [track_json(7, "chart")] }),
        )
        .await;

        let client = client_for(&server);
        let mut feed = DiscoveryFeed::new();

        feed.refresh(&client, Some("   ".to_string())).await;
        assert_eq!(feed.query(), None);
        assert_eq!(feed.tracks().len(), 1);
        assert_eq!(feed.offset(), 1);
    }

    #[tokio::test]
    async fn test_failed_page_adds_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut feed = DiscoveryFeed::new();
        assert_eq!(feed.load_more(&client).await, 0);
        assert_eq!(feed.offset(), 0);
        assert!(feed.tracks().is_empty());
    }
}

// =============================================================================
// Proxied preview fetch
// =============================================================================

mod preview {
    use super::*;

    fn preview_track(preview: &str) -> Track {
        let mut track: Track = serde_json::from_value(track_json(1, "clip")).unwrap();
        track.preview = preview.to_string();
        track
    }

    fn strategy_for(server: &MockServer) -> ProxiedFetch {
        client_for(server)
            .preview_strategies()
            .into_iter()
            .next()
            .expect("one raw proxy")
    }

    #[tokio::test]
    async fn test_preview_is_materialized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .and(query_param("url", "https://cdn.example.com/clip.mp3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0xFF, 0xFB, 0x90, 0x64]),
            )
            .mount(&server)
            .await;

        let strategy = strategy_for(&server);
        let audio = strategy
            .acquire(&preview_track("https://cdn.example.com/clip.mp3"))
            .await
            .unwrap();

        match audio {
            AcquiredAudio::Materialized(m) => {
                assert_eq!(m.len(), 4);
                assert_eq!(m.content_type.as_deref(), Some("audio/mpeg"));
                assert_eq!(m.source_url, "https://cdn.example.com/clip.mp3");
            }
            AcquiredAudio::Remote(_) => panic!("expected materialized audio"),
        }
    }

    #[tokio::test]
    async fn test_missing_preview_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let strategy = strategy_for(&server);
        let err = strategy.acquire(&preview_track("")).await.unwrap_err();
        assert!(matches!(err, AcquisitionError::NoPreview(1)));
    }

    #[tokio::test]
    async fn test_proxy_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let strategy = strategy_for(&server);
        let err = strategy
            .acquire(&preview_track("https://cdn.example.com/clip.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_empty_body_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let strategy = strategy_for(&server);
        let err = strategy
            .acquire(&preview_track("https://cdn.example.com/clip.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::EmptyBody(_)));
    }
}
