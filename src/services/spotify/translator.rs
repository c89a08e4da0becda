use crate::ports::spotify::{SessionPlaylist, SessionTrack};
use crate::services::spotify::types::{Playlist, PlaylistRef, RefKind, Track, TrackRef};

/// Display name of a playlist: folder path plus an owner suffix for foreign playlists.
fn display_name(name: &str, owner: &str, folders: &[String], username: Option<&str>) -> String {
    let mut display = folders
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("/");
    if username.is_some_and(|username| username != owner) {
        display.push_str(&format!(" (by {})", owner));
    }
    display
}

pub fn to_playlist_ref(
    playlist: &dyn SessionPlaylist,
    folders: &[String],
    username: Option<&str>,
) -> Option<PlaylistRef> {
    if !playlist.is_loaded() {
        return None;
    }

    Some(PlaylistRef {
        uri: playlist.uri(),
        name: display_name(&playlist.name(), &playlist.owner(), folders, username),
        kind: RefKind::Playlist,
        folders: folders.to_vec(),
    })
}

fn to_track(track: &SessionTrack, bitrate: u32) -> Track {
    Track {
        uri: track.uri.clone(),
        name: track.name.clone(),
        artists: track.artists.clone(),
        album: track.album.clone(),
        duration_ms: track.duration_ms,
        bitrate,
    }
}

/// Materializes a loaded playlist. Unloaded tracks are skipped.
pub fn to_playlist(
    playlist: &dyn SessionPlaylist,
    username: Option<&str>,
    bitrate: u32,
    as_items: bool,
) -> Option<Playlist> {
    if !playlist.is_loaded() {
        return None;
    }

    let loaded_tracks: Vec<SessionTrack> = playlist
        .tracks()
        .into_iter()
        .filter(|track| track.is_loaded)
        .collect();

    let items = loaded_tracks
        .iter()
        .map(|track| TrackRef {
            uri: track.uri.clone(),
            name: track.name.clone(),
        })
        .collect();
    let tracks = if as_items {
        loaded_tracks
            .iter()
            .map(|track| to_track(track, bitrate))
            .collect()
    } else {
        Vec::new()
    };

    let owner = playlist.owner();
    Some(Playlist {
        uri: playlist.uri(),
        name: display_name(&playlist.name(), &owner, &[], username),
        owner,
        offline_status: playlist.offline_status(),
        items,
        tracks,
    })
}
