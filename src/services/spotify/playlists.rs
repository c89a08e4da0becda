use std::sync::Arc;

use crate::ports::spotify::{SessionError, SpotifySession};
use crate::services::spotify::flatten::FlattenedPlaylists;
use crate::services::spotify::offline::{OfflinePolicy, OfflinePolicyError};
use crate::services::spotify::translator;
use crate::services::spotify::types::{Playlist, PlaylistRef};
use crate::timing::TimeLogger;

/// Exposes the session's playlist container to callers.
///
/// Nothing is cached: every call goes back to the live session, and every session
/// failure degrades to an empty/`None` result plus a log line.
pub struct SpotifyPlaylistsProvider<S: SpotifySession> {
    session: Arc<S>,
    policy: OfflinePolicy,
    bitrate: u32,
}

impl<S: SpotifySession> SpotifyPlaylistsProvider<S> {
    pub fn new<P: AsRef<str>>(
        session: Arc<S>,
        offline_playlists: &[P],
        bitrate: u32,
    ) -> Result<Self, OfflinePolicyError> {
        Ok(Self {
            session,
            policy: OfflinePolicy::new(offline_playlists)?,
            bitrate,
        })
    }

    /// Lazily walks the container. Empty while the session is not ready.
    pub fn list(&self) -> FlattenedPlaylists<'_> {
        if !self.session.is_ready() {
            tracing::debug!("Spotify session not ready, no playlists to list");
            return FlattenedPlaylists::empty(&self.policy);
        }
        let Some(entries) = self.session.playlist_container() else {
            tracing::debug!("Spotify playlist container not loaded yet");
            return FlattenedPlaylists::empty(&self.policy);
        };

        self.policy.log_sync_status(&self.session.offline());
        FlattenedPlaylists::new(entries, self.session.user_name(), &self.policy)
    }

    /// Collects [`Self::list`] and logs how long the walk took.
    pub fn as_list(&self) -> Vec<PlaylistRef> {
        let _timer = TimeLogger::new("playlists.as_list()");
        self.list().collect()
    }

    /// Playlist with full track bodies.
    pub async fn get_items(&self, uri: &str) -> Option<Playlist> {
        let _timer = TimeLogger::new(format!("playlists.get_items({})", uri));
        self.get_playlist(uri, true).await
    }

    pub async fn lookup(&self, uri: &str) -> Option<Playlist> {
        let _timer = TimeLogger::new(format!("playlists.lookup({})", uri));
        self.get_playlist(uri, false).await
    }

    async fn get_playlist(&self, uri: &str, as_items: bool) -> Option<Playlist> {
        let playlist = match self.session.get_playlist(uri).await {
            Ok(playlist) => playlist,
            Err(e) => {
                tracing::debug!("Failed to lookup Spotify URI {}: {}", uri, e);
                return None;
            }
        };

        if !playlist.is_loaded() {
            tracing::debug!("Waiting for Spotify playlist to load: {}", uri);
            if let Err(e) = playlist.load().await {
                tracing::debug!("Failed to load Spotify playlist {}: {}", uri, e);
                return None;
            }
        }

        let username = self.session.user_name();
        translator::to_playlist(
            playlist.as_ref(),
            username.as_deref(),
            self.bitrate,
            as_items,
        )
    }

    /// Nothing to invalidate since nothing is cached.
    pub fn refresh(&self) {}

    pub async fn create(&self, name: &str) -> Option<Playlist> {
        let playlist = match self.session.add_new_playlist(name).await {
            Ok(playlist) => playlist,
            Err(SessionError::InvalidName(reason)) => {
                tracing::warn!(
                    "Failed creating new Spotify playlist \"{}\": {}",
                    name,
                    reason
                );
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed creating new Spotify playlist \"{}\": {}", name, e);
                return None;
            }
        };

        let username = self.session.user_name();
        translator::to_playlist(playlist.as_ref(), username.as_deref(), self.bitrate, false)
    }

    /// Deleting remote playlists is not supported.
    pub fn delete(&self, uri: &str) {
        tracing::debug!("Ignoring delete of Spotify playlist {}", uri);
    }

    /// Saving remote playlists is not supported.
    #[allow(dead_code)]
    pub fn save(&self, playlist: &Playlist) -> Option<Playlist> {
        tracing::debug!("Ignoring save of Spotify playlist {}", playlist.uri);
        None
    }
}
