use std::sync::Arc;

/// Handle to a playlist object owned by the Spotify session.
pub type PlaylistHandle = Arc<dyn SessionPlaylist>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid Spotify URI: {0}")]
    InvalidUri(String),
    #[error("Invalid playlist name: {0}")]
    InvalidName(String),
    #[error("Not logged in to Spotify")]
    NotLoggedIn,
    #[error("Spotify error: {0}")]
    Sdk(String),
}

/// Local caching state of a playlist as reported by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineStatus {
    NotOffline,
    Waiting,
    Syncing,
    Done,
}

/// In-flight offline download counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub struct SyncStatus {
    pub queued_tracks: u32,
    pub done_tracks: u32,
    pub error_tracks: u32,
}

/// Snapshot of the session's offline facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(default)]
pub struct OfflineState {
    pub num_playlists: u32,
    /// `None` when nothing is being synced.
    pub sync_status: Option<SyncStatus>,
    pub seconds_until_forced_online: u64,
}

/// One entry of the playlist container, in container order.
#[derive(Clone)]
pub enum ContainerEntry {
    FolderStart(String),
    FolderEnd,
    Playlist(PlaylistHandle),
}

impl std::fmt::Debug for ContainerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderStart(name) => f.debug_tuple("FolderStart").field(name).finish(),
            Self::FolderEnd => f.write_str("FolderEnd"),
            Self::Playlist(playlist) => f.debug_tuple("Playlist").field(&playlist.uri()).finish(),
        }
    }
}

/// A track as exposed by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTrack {
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration_ms: u32,
    pub is_loaded: bool,
}

/// Port trait wrapping a playlist object of the Spotify session.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionPlaylist: Send + Sync {
    fn uri(&self) -> String;
    fn name(&self) -> String;
    /// Canonical user name of the playlist owner.
    fn owner(&self) -> String;
    fn is_loaded(&self) -> bool;
    /// Waits until the playlist has finished loading.
    async fn load(&self) -> Result<(), SessionError>;
    fn offline_status(&self) -> OfflineStatus;
    /// Requests offline caching (or its removal). Completion shows up in later sync status.
    fn set_offline_mode(&self, offline: bool);
    fn num_tracks(&self) -> usize;
    fn tracks(&self) -> Vec<SessionTrack>;
}

/// Port trait wrapping the Spotify session capabilities used by the playlists provider.
///
/// Implementations live in `services::spotify::snapshot` (file backed) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifySession: Send + Sync {
    /// Whether the session is logged in and usable.
    fn is_ready(&self) -> bool;
    fn user_name(&self) -> Option<String>;
    /// Current container entries, or `None` while the container is not loaded.
    fn playlist_container(&self) -> Option<Vec<ContainerEntry>>;
    async fn get_playlist(&self, uri: &str) -> Result<PlaylistHandle, SessionError>;
    async fn add_new_playlist(&self, name: &str) -> Result<PlaylistHandle, SessionError>;
    fn offline(&self) -> OfflineState;
}
