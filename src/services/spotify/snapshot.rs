//! File backed Spotify session.
//!
//! Reads a JSON dump of a playlist container so the provider can be driven without
//! a live connection. Offline mode requests and new playlists only live in memory.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::ports::spotify::{
    ContainerEntry, OfflineState, OfflineStatus, PlaylistHandle, SessionError, SessionPlaylist,
    SessionTrack, SpotifySession,
};
use crate::services::spotify::events::ContainerListener;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    user_name: Option<String>,
    #[serde(default)]
    offline: OfflineState,
    #[serde(default)]
    container: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CatalogEntry {
    FolderStart { name: String },
    FolderEnd,
    Playlist(CatalogPlaylist),
}

#[derive(Debug, Deserialize)]
struct CatalogPlaylist {
    uri: String,
    name: String,
    owner: String,
    #[serde(default = "default_offline_status")]
    offline_status: OfflineStatus,
    #[serde(default)]
    tracks: Vec<CatalogTrack>,
}

#[derive(Debug, Deserialize)]
struct CatalogTrack {
    uri: String,
    name: String,
    #[serde(default)]
    artists: Vec<String>,
    album: Option<String>,
    #[serde(default)]
    duration_ms: u32,
}

fn default_offline_status() -> OfflineStatus {
    OfflineStatus::NotOffline
}

/// Playlist held by a [`SnapshotSession`].
#[derive(Debug)]
pub struct SnapshotPlaylist {
    uri: String,
    name: String,
    owner: String,
    offline_status: Mutex<OfflineStatus>,
    tracks: Vec<SessionTrack>,
}

impl SnapshotPlaylist {
    fn new(
        uri: String,
        name: String,
        owner: String,
        offline_status: OfflineStatus,
        tracks: Vec<SessionTrack>,
    ) -> Self {
        Self {
            uri,
            name,
            owner,
            offline_status: Mutex::new(offline_status),
            tracks,
        }
    }
}

#[async_trait::async_trait]
impl SessionPlaylist for SnapshotPlaylist {
    fn uri(&self) -> String {
        self.uri.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn owner(&self) -> String {
        self.owner.clone()
    }

    fn is_loaded(&self) -> bool {
        true
    }

    async fn load(&self) -> Result<(), SessionError> {
        Ok(())
    }

    fn offline_status(&self) -> OfflineStatus {
        *self
            .offline_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_offline_mode(&self, offline: bool) {
        let mut status = self
            .offline_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Syncing never progresses without a connection.
        *status = if offline {
            OfflineStatus::Waiting
        } else {
            OfflineStatus::NotOffline
        };
    }

    fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    fn tracks(&self) -> Vec<SessionTrack> {
        self.tracks.clone()
    }
}

pub struct SnapshotSession {
    user_name: Option<String>,
    offline: OfflineState,
    container: RwLock<Vec<ContainerEntry>>,
    listener: ContainerListener,
}

impl SnapshotSession {
    /// Loads a catalog dump and fires `container_loaded` on the listener.
    pub fn from_file(path: &Path, listener: ContainerListener) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read catalog file: {}", path.display()))?;
        Self::from_json(&contents, listener)
            .wrap_err(format!("Failed to parse catalog file: {}", path.display()))
    }

    pub fn from_json(json: &str, listener: ContainerListener) -> Result<Self> {
        let catalog: CatalogFile = serde_json::from_str(json)?;

        let container = catalog
            .container
            .into_iter()
            .map(|entry| match entry {
                CatalogEntry::FolderStart { name } => ContainerEntry::FolderStart(name),
                CatalogEntry::FolderEnd => ContainerEntry::FolderEnd,
                CatalogEntry::Playlist(playlist) => {
                    let tracks = playlist
                        .tracks
                        .into_iter()
                        .map(|track| SessionTrack {
                            uri: track.uri,
                            name: track.name,
                            artists: track.artists,
                            album: track.album,
                            duration_ms: track.duration_ms,
                            is_loaded: true,
                        })
                        .collect();
                    ContainerEntry::Playlist(Arc::new(SnapshotPlaylist::new(
                        playlist.uri,
                        playlist.name,
                        playlist.owner,
                        playlist.offline_status,
                        tracks,
                    )))
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!("Loaded catalog with {} container entries", container.len());
        listener.container_loaded();

        Ok(Self {
            user_name: catalog.user_name,
            offline: catalog.offline,
            container: RwLock::new(container),
            listener,
        })
    }

    fn entries(&self) -> Vec<ContainerEntry> {
        self.container
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl SpotifySession for SnapshotSession {
    fn is_ready(&self) -> bool {
        self.user_name.is_some()
    }

    fn user_name(&self) -> Option<String> {
        self.user_name.clone()
    }

    fn playlist_container(&self) -> Option<Vec<ContainerEntry>> {
        Some(self.entries())
    }

    async fn get_playlist(&self, uri: &str) -> Result<PlaylistHandle, SessionError> {
        if !uri.starts_with("spotify:") {
            return Err(SessionError::InvalidUri(uri.to_string()));
        }

        self.entries()
            .into_iter()
            .find_map(|entry| match entry {
                ContainerEntry::Playlist(playlist) if playlist.uri() == uri => Some(playlist),
                _ => None,
            })
            .ok_or_else(|| SessionError::Sdk(format!("No playlist with URI {}", uri)))
    }

    async fn add_new_playlist(&self, name: &str) -> Result<PlaylistHandle, SessionError> {
        let Some(user_name) = self.user_name.as_deref() else {
            return Err(SessionError::NotLoggedIn);
        };
        if name.trim().is_empty() {
            return Err(SessionError::InvalidName(
                "Playlist name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > 255 {
            return Err(SessionError::InvalidName(
                "Playlist name must be at most 255 characters".to_string(),
            ));
        }

        let (index, playlist) = {
            let mut container = self
                .container
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let playlist: PlaylistHandle = Arc::new(SnapshotPlaylist::new(
                format!("spotify:user:{}:playlist:local{}", user_name, container.len()),
                name.to_string(),
                user_name.to_string(),
                OfflineStatus::NotOffline,
                Vec::new(),
            ));
            container.push(ContainerEntry::Playlist(playlist.clone()));
            (container.len() - 1, playlist)
        };

        self.listener.playlist_added(name, index);
        self.listener.container_loaded();
        Ok(playlist)
    }

    fn offline(&self) -> OfflineState {
        self.offline
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::services::spotify::events::catalog_channel;

    const CATALOG: &str = r#"{
        "user_name": "alice",
        "offline": {
            "num_playlists": 1,
            "sync_status": { "queued_tracks": 2, "done_tracks": 5, "error_tracks": 0 },
            "seconds_until_forced_online": 86400
        },
        "container": [
            { "type": "folder_start", "name": "Rock" },
            { "type": "playlist", "uri": "spotify:playlist:p1", "name": "AC/DC", "owner": "alice",
              "tracks": [ { "uri": "spotify:track:t1", "name": "Thunderstruck", "artists": ["AC/DC"] } ] },
            { "type": "folder_end" },
            { "type": "playlist", "uri": "spotify:playlist:p2", "name": "Jazz", "owner": "bob",
              "offline_status": "done" }
        ]
    }"#;

    #[test]
    fn test_from_json_builds_container_and_signals_load() {
        let (listener, mut changes) = catalog_channel();

        let session = SnapshotSession::from_json(CATALOG, listener).unwrap();

        assert!(changes.take_change());
        assert!(session.is_ready());
        assert_eq!(session.offline().num_playlists, 1);
        let entries = session.playlist_container().unwrap();
        assert_eq!(entries.len(), 4);
        assert!(matches!(&entries[0], ContainerEntry::FolderStart(name) if name == "Rock"));
        assert!(matches!(entries[2], ContainerEntry::FolderEnd));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        let (listener, _changes) = catalog_channel();

        let session = SnapshotSession::from_file(file.path(), listener).unwrap();

        assert_eq!(session.user_name().as_deref(), Some("alice"));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let (listener, _changes) = catalog_channel();

        let result = SnapshotSession::from_file(file.path(), listener);

        assert!(result.is_err());
        assert!(
            result
                .err()
                .unwrap()
                .to_string()
                .contains("Failed to parse catalog file")
        );
    }

    #[tokio::test]
    async fn test_get_playlist() {
        let (listener, _changes) = catalog_channel();
        let session = SnapshotSession::from_json(CATALOG, listener).unwrap();

        let playlist = session.get_playlist("spotify:playlist:p2").await.unwrap();
        assert_eq!(playlist.name(), "Jazz");
        assert_eq!(playlist.offline_status(), OfflineStatus::Done);

        assert!(matches!(
            session.get_playlist("not-a-uri").await,
            Err(SessionError::InvalidUri(_))
        ));
        assert!(matches!(
            session.get_playlist("spotify:playlist:missing").await,
            Err(SessionError::Sdk(_))
        ));
    }

    #[test]
    fn test_set_offline_mode_updates_status() {
        let (listener, _changes) = catalog_channel();
        let session = SnapshotSession::from_json(CATALOG, listener).unwrap();
        let entries = session.playlist_container().unwrap();
        let ContainerEntry::Playlist(playlist) = &entries[1] else {
            panic!("expected a playlist entry");
        };

        playlist.set_offline_mode(true);
        assert_eq!(playlist.offline_status(), OfflineStatus::Waiting);

        playlist.set_offline_mode(false);
        assert_eq!(playlist.offline_status(), OfflineStatus::NotOffline);
    }

    #[tokio::test]
    async fn test_add_new_playlist() {
        let (listener, mut changes) = catalog_channel();
        let session = SnapshotSession::from_json(CATALOG, listener).unwrap();
        changes.take_change();

        let playlist = session.add_new_playlist("Road trip").await.unwrap();

        assert_eq!(playlist.name(), "Road trip");
        assert_eq!(playlist.owner(), "alice");
        assert_eq!(session.playlist_container().unwrap().len(), 5);
        assert!(changes.take_change());
    }

    #[tokio::test]
    async fn test_add_new_playlist_rejects_empty_name() {
        let (listener, _changes) = catalog_channel();
        let session = SnapshotSession::from_json(CATALOG, listener).unwrap();

        assert!(matches!(
            session.add_new_playlist("  ").await,
            Err(SessionError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_logged_out_session() {
        let (listener, _changes) = catalog_channel();
        let session = SnapshotSession::from_json(r#"{ "user_name": null }"#, listener).unwrap();

        assert!(!session.is_ready());
        assert!(matches!(
            session.add_new_playlist("Road trip").await,
            Err(SessionError::NotLoggedIn)
        ));
    }
}
