use crate::ports::spotify::{MockSessionPlaylist, OfflineStatus, SessionTrack};

/// Loaded playlist mock answering identity calls. Status and tracks are left to the test.
pub fn loaded_playlist(uri: &str, name: &str, owner: &str) -> MockSessionPlaylist {
    let mut playlist = MockSessionPlaylist::new();
    playlist.expect_uri().return_const(uri.to_string());
    playlist.expect_name().return_const(name.to_string());
    playlist.expect_owner().return_const(owner.to_string());
    playlist.expect_is_loaded().return_const(true);
    playlist
}

/// Loaded, not offline playlist that must not receive any offline request.
pub fn idle_playlist(uri: &str, name: &str, owner: &str) -> MockSessionPlaylist {
    let mut playlist = loaded_playlist(uri, name, owner);
    playlist
        .expect_offline_status()
        .return_const(OfflineStatus::NotOffline);
    playlist.expect_num_tracks().return_const(0usize);
    playlist.expect_set_offline_mode().times(0);
    playlist
}

pub fn session_track(uri: &str, name: &str) -> SessionTrack {
    SessionTrack {
        uri: uri.to_string(),
        name: name.to_string(),
        artists: vec!["Miles Davis".to_string()],
        album: Some("Kind of Blue".to_string()),
        duration_ms: 545_000,
        is_loaded: true,
    }
}
