mod audio;
mod ids;
mod playlist;
mod track;

pub use audio::{AcquiredAudio, MaterializedAudio};
pub use ids::{AlbumId, ArtistId, PlaylistId, TrackId};
pub use playlist::Playlist;
pub use track::{format_duration, Album, Artist, Track};
