/// Plain-text rendering of catalog and playlist data
use tune_core::{format_duration, AcquiredAudio, Artist, Playlist, Track};

/// One line per track: `id  Artist - Title  (m:ss)`
pub fn track_line(track: &Track) -> String {
    let artist = if track.artist.name.is_empty() {
        "Unknown artist"
    } else {
        track.artist.name.as_str()
    };
    let preview = if track.has_preview() { "" } else { "  [no preview]" };

    format!(
        "{:>12}  {} - {}  ({}){}",
        track.id,
        artist,
        track.title,
        track.display_duration(),
        preview
    )
}

pub fn artist_line(artist: &Artist) -> String {
    format!("{:>12}  {}", artist.id, artist.name)
}

/// Summary line: `id  Name  (N tracks, m:ss)`
pub fn playlist_line(playlist: &Playlist) -> String {
    let count = playlist.tracks.len();
    let total = u32::try_from(playlist.total_duration()).unwrap_or(u32::MAX);
    format!(
        "{:>14}  {}  ({} track{}, {})",
        playlist.id,
        playlist.name,
        count,
        if count == 1 { "" } else { "s" },
        format_duration(total)
    )
}

pub fn acquired_line(audio: &AcquiredAudio) -> String {
    match audio {
        AcquiredAudio::Materialized(m) => format!(
            "materialized {} bytes ({}) from {}",
            m.len(),
            m.content_type.as_deref().unwrap_or("unknown type"),
            m.source_url
        ),
        AcquiredAudio::Remote(url) => format!("streaming directly from {url}"),
    }
}
