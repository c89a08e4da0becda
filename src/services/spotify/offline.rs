use regex::Regex;

use crate::ports::spotify::{OfflineState, OfflineStatus, SessionPlaylist};
use crate::services::spotify::types::PlaylistRef;

#[derive(Debug, thiserror::Error)]
pub enum OfflinePolicyError {
    #[error("Invalid offline playlist pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Mode change requested for a playlist by [`OfflinePolicy::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineAction {
    None,
    MarkOffline,
    MarkOnline,
}

/// Decides which playlists are kept offline, based on name patterns.
///
/// Patterns are compiled once and anchored at the start of the name, so
/// `Offline` matches `Offline Mix` but not `My Offline Mix`.
#[derive(Debug, Clone, Default)]
pub struct OfflinePolicy {
    patterns: Vec<Regex>,
}

impl OfflinePolicy {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, OfflinePolicyError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                let invalid = |source| OfflinePolicyError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                };
                // The raw pattern must parse on its own before it is anchored.
                Regex::new(pattern).map_err(invalid)?;
                Regex::new(&format!("^(?:{})", pattern)).map_err(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn should_be_offline(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }

    /// Logs the offline sync summary. Called once per container walk.
    pub fn log_sync_status(&self, state: &OfflineState) {
        tracing::info!("Offline playlist count: {}", state.num_playlists);
        if state.num_playlists == 0 {
            return;
        }

        match state.sync_status {
            Some(status) => tracing::info!(
                "Offline sync status: Queued={}, Done={}, Error={}",
                status.queued_tracks,
                status.done_tracks,
                status.error_tracks
            ),
            None => tracing::info!("Offline sync status: Not syncing"),
        }
        tracing::info!(
            "Time until user must go online: {} hours",
            state.seconds_until_forced_online / 3600
        );
    }

    /// Brings the playlist's offline mode in line with the configured patterns.
    ///
    /// Requests are fire and forget; a playlist already in the desired state gets none.
    pub fn evaluate(
        &self,
        playlist: Option<&dyn SessionPlaylist>,
        playlist_ref: &PlaylistRef,
    ) -> OfflineAction {
        let Some(playlist) = playlist else {
            return OfflineAction::None;
        };

        let status = playlist.offline_status();
        tracing::info!(
            "Loaded playlist: {} offline status={:?} tracks={}",
            playlist_ref.name,
            status,
            playlist.num_tracks()
        );

        let offline = self.should_be_offline(&playlist_ref.name);
        let action = match (offline, status) {
            (true, OfflineStatus::NotOffline) => OfflineAction::MarkOffline,
            (false, OfflineStatus::NotOffline) | (true, _) => OfflineAction::None,
            (false, _) => OfflineAction::MarkOnline,
        };

        match action {
            OfflineAction::MarkOffline => {
                tracing::info!("Offline playlist: {}, {:?}", playlist_ref.name, status);
                playlist.set_offline_mode(true);
            }
            OfflineAction::MarkOnline => {
                tracing::info!("Online playlist: {}, {:?}", playlist_ref.name, status);
                playlist.set_offline_mode(false);
            }
            OfflineAction::None => {}
        }
        action
    }
}
