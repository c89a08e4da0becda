use serde::{Deserialize, Serialize};

use crate::ports::spotify::OfflineStatus;

/// Kind of object a [`PlaylistRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Playlist,
}

/// Flattened reference to a playlist in the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub uri: String,
    pub name: String,
    pub kind: RefKind,
    /// Enclosing folder names, outermost first.
    pub folders: Vec<String>,
}

/// Lightweight reference to a track of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub uri: String,
    pub name: String,
}

/// Full track body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration_ms: u32,
    /// Streaming bitrate in kbit/s.
    pub bitrate: u32,
}

/// Materialized playlist, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub uri: String,
    pub name: String,
    pub owner: String,
    pub offline_status: OfflineStatus,
    pub items: Vec<TrackRef>,
    /// Only populated when the playlist was materialized with full track bodies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<Track>,
}
