use std::vec;

use crate::ports::spotify::ContainerEntry;
use crate::services::spotify::offline::OfflinePolicy;
use crate::services::spotify::translator;
use crate::services::spotify::types::PlaylistRef;

/// Lazy walk over a playlist container.
///
/// Folder markers maintain the folder path and are never yielded. Each playlist is
/// passed through the offline policy right before it is yielded.
pub struct FlattenedPlaylists<'a> {
    entries: vec::IntoIter<ContainerEntry>,
    folders: Vec<String>,
    username: Option<String>,
    policy: &'a OfflinePolicy,
}

impl<'a> FlattenedPlaylists<'a> {
    pub fn new(
        entries: Vec<ContainerEntry>,
        username: Option<String>,
        policy: &'a OfflinePolicy,
    ) -> Self {
        Self {
            entries: entries.into_iter(),
            folders: Vec::new(),
            username,
            policy,
        }
    }

    /// Walk that yields nothing, for a session that is not ready.
    pub fn empty(policy: &'a OfflinePolicy) -> Self {
        Self::new(Vec::new(), None, policy)
    }

    /// Current folder path depth.
    pub fn depth(&self) -> usize {
        self.folders.len()
    }
}

impl Iterator for FlattenedPlaylists<'_> {
    type Item = PlaylistRef;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let playlist = match entry {
                ContainerEntry::FolderStart(name) => {
                    self.folders.push(name);
                    continue;
                }
                ContainerEntry::FolderEnd => {
                    if self.folders.pop().is_none() {
                        tracing::warn!("Unbalanced folder end marker in playlist container");
                    }
                    continue;
                }
                ContainerEntry::Playlist(playlist) => playlist,
            };

            let Some(playlist_ref) = translator::to_playlist_ref(
                playlist.as_ref(),
                &self.folders,
                self.username.as_deref(),
            ) else {
                continue;
            };

            self.policy.evaluate(Some(playlist.as_ref()), &playlist_ref);
            return Some(playlist_ref);
        }
        if self.depth() != 0 {
            tracing::warn!(
                "Playlist container ended inside {} unclosed folder(s)",
                self.depth()
            );
            self.folders.clear();
        }
        None
    }
}
