/// Tune Player CLI - browse the catalog, manage playlists, try playback
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tune_catalog::{CatalogClient, DiscoveryFeed};
use tune_cli::{output, AppConfig, CliError};
use tune_core::{PlaylistId, Track};
use tune_playback::{AcquisitionResolver, DirectStream, NullOutput, PlaybackManager};
use tune_storage::{PlaylistLibrary, SqliteStore};

#[derive(Parser)]
#[command(name = "tune-cli")]
#[command(about = "Tune Player music discovery and playlists", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./tune.toml when present)
    #[arg(short, long, global = true, env = "TUNE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search tracks by keyword
    Search {
        /// Search terms
        query: String,
        /// Result offset
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Show the track chart
    Chart {
        /// Result offset (pages past the first use a "top" search)
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Show the top artists
    Artists,
    /// Show an artist's top tracks
    ArtistTop {
        /// Catalog artist id
        artist_id: u64,
    },
    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        command: PlaylistCommand,
    },
    /// Pick a track and run it through the playback pipeline
    Resolve {
        /// Search terms; the first result is played
        query: String,
    },
}

#[derive(Subcommand)]
enum PlaylistCommand {
    /// List playlists
    List,
    /// Create a playlist
    Create {
        /// Playlist name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a playlist (favorites cannot be deleted)
    Delete {
        /// Playlist id
        id: String,
    },
    /// Add the first search result to a playlist
    Add {
        /// Playlist id ("default" for favorites)
        id: String,
        /// Search terms
        query: String,
    },
    /// Remove a track from a playlist
    Remove {
        /// Playlist id
        id: String,
        /// Catalog track id
        track_id: u64,
    },
    /// Show a playlist's tracks
    Show {
        /// Playlist id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tune_cli=info,tune_catalog=info,tune_playback=info,tune_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Search { query, offset } => {
            let client = CatalogClient::new(config.catalog)?;
            print_tracks(&client.search_tracks(&query, offset).await);
        }
        Commands::Chart { offset, pages } => {
            chart(&config, offset, pages).await?;
        }
        Commands::Artists => {
            let client = CatalogClient::new(config.catalog)?;
            for artist in client.top_artists().await {
                println!("{}", output::artist_line(&artist));
            }
        }
        Commands::ArtistTop { artist_id } => {
            let client = CatalogClient::new(config.catalog)?;
            print_tracks(&client.artist_top_tracks(artist_id).await);
        }
        Commands::Playlist { command } => {
            playlist(&config, command).await?;
        }
        Commands::Resolve { query } => {
            resolve(config, &query).await?;
        }
    }

    Ok(())
}

async fn chart(config: &AppConfig, offset: u32, pages: u32) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.catalog.clone())?;

    if offset > 0 {
        print_tracks(&client.chart_tracks(offset).await);
        return Ok(());
    }

    let mut feed = DiscoveryFeed::new();
    feed.refresh(&client, None).await;
    for _ in 1..pages {
        if feed.load_more(&client).await == 0 {
            break;
        }
    }
    print_tracks(feed.tracks());
    Ok(())
}

async fn playlist(config: &AppConfig, command: PlaylistCommand) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.storage.database_url).await?;
    let mut library = PlaylistLibrary::load(Arc::new(store)).await?;

    match command {
        PlaylistCommand::List => {
            for playlist in library.playlists() {
                println!("{}", output::playlist_line(playlist));
            }
        }
        PlaylistCommand::Create { name, description } => {
            let id = library.create_with_description(&name, description).await?;
            println!("Created playlist {id}");
        }
        PlaylistCommand::Delete { id } => {
            let id = PlaylistId::new(id);
            if library.delete(&id).await? {
                println!("Deleted playlist {id}");
            } else {
                println!("Playlist {id} was not deleted");
            }
        }
        PlaylistCommand::Add { id, query } => {
            let client = CatalogClient::new(config.catalog.clone())?;
            let track = first_result(&client, &query).await?;
            let line = output::track_line(&track);
            if library.add_track(track, &PlaylistId::new(id)).await? {
                println!("Added {}", line.trim_start());
            } else {
                println!("Already in playlist: {}", line.trim_start());
            }
        }
        PlaylistCommand::Remove { id, track_id } => {
            if library.remove_track(track_id, &PlaylistId::new(id)).await? {
                println!("Removed track {track_id}");
            } else {
                println!("Track {track_id} was not in the playlist");
            }
        }
        PlaylistCommand::Show { id } => {
            let id = PlaylistId::new(id);
            let playlist = library
                .get(&id)
                .ok_or_else(|| tune_core::TuneError::PlaylistNotFound(id.clone()))?;
            println!("{}", output::playlist_line(playlist));
            if let Some(description) = &playlist.description {
                println!("  {description}");
            }
            print_tracks(&playlist.tracks);
        }
    }

    Ok(())
}

async fn resolve(config: AppConfig, query: &str) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.catalog)?;
    let results = client.search_tracks(query, 0).await;
    let track = results
        .first()
        .cloned()
        .ok_or_else(|| CliError::NoResults(query.to_string()))?;

    let mut resolver = AcquisitionResolver::new();
    for strategy in client.preview_strategies() {
        resolver.push(strategy);
    }
    resolver.push(DirectStream);
    tracing::info!(strategies = ?resolver.names(), "Acquisition chain");

    let mut manager = PlaybackManager::new(config.playback, Box::new(NullOutput::new()), resolver);
    let selection = manager.begin_selection(track, Some(results));

    // One pass through the chain; its result feeds the player
    let result = manager.resolver().acquire(selection.track()).await;
    match &result {
        Ok(audio) => println!("{}", output::acquired_line(audio)),
        Err(e) => println!("Acquisition failed: {e}"),
    }
    let outcome = manager.complete_selection(selection, result);

    println!("Outcome: {outcome:?}");
    for event in manager.drain_events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    manager.close();

    Ok(())
}

async fn first_result(client: &CatalogClient, query: &str) -> Result<Track, CliError> {
    client
        .search_tracks(query, 0)
        .await
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NoResults(query.to_string()))
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks.");
        return;
    }
    for track in tracks {
        println!("{}", output::track_line(track));
    }
}
