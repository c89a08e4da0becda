//! Playlist container notifications coming from the session's own event loop.
//!
//! The listener runs outside the caller's context, so it only logs and bumps a
//! coalescing "catalog changed" signal. Callers poll the signal and re-list.

use tokio::sync::watch;

/// Creates a connected listener and change receiver.
pub fn catalog_channel() -> (ContainerListener, CatalogChanges) {
    let (tx, rx) = watch::channel(0u64);
    (ContainerListener { tx }, CatalogChanges { rx })
}

/// Handed to the session; safe to call from any thread.
#[derive(Debug, Clone)]
pub struct ContainerListener {
    tx: watch::Sender<u64>,
}

impl ContainerListener {
    /// Also fired by the session after playlists are added, removed and moved.
    pub fn container_loaded(&self) {
        tracing::debug!("Spotify playlist container loaded");
        self.tx.send_modify(|generation| *generation += 1);
    }

    pub fn playlist_added(&self, name: &str, index: usize) {
        tracing::debug!("Spotify playlist \"{}\" added to index {}", name, index);
    }

    #[allow(dead_code)]
    pub fn playlist_removed(&self, name: &str, index: usize) {
        tracing::debug!("Spotify playlist \"{}\" removed from index {}", name, index);
    }

    #[allow(dead_code)]
    pub fn playlist_moved(&self, name: &str, old_index: usize, new_index: usize) {
        tracing::debug!(
            "Spotify playlist \"{}\" moved from index {} to {}",
            name,
            old_index,
            new_index
        );
    }
}

/// Caller side of the catalog change signal.
#[derive(Debug, Clone)]
pub struct CatalogChanges {
    rx: watch::Receiver<u64>,
}

impl CatalogChanges {
    /// Returns true once per batch of changes since the last call. Never blocks.
    pub fn take_change(&mut self) -> bool {
        let changed = match self.rx.has_changed() {
            Ok(changed) => changed,
            // Listener dropped; a last change may still be unseen.
            Err(_) => self.rx.borrow().has_changed(),
        };
        if changed {
            self.rx.borrow_and_update();
        }
        changed
    }

    /// Waits for the next change. Returns false once the listener is gone.
    #[allow(dead_code)]
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Number of container loads seen so far.
    pub fn generation(&self) -> u64 {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change_before_any_event() {
        let (_listener, mut changes) = catalog_channel();
        assert!(!changes.take_change());
    }

    #[test]
    fn test_container_loads_are_coalesced() {
        let (listener, mut changes) = catalog_channel();

        listener.container_loaded();
        listener.container_loaded();

        assert!(changes.take_change());
        assert!(!changes.take_change());
        assert_eq!(changes.generation(), 2);
    }

    #[test]
    fn test_last_change_before_listener_drop_is_seen() {
        let (listener, mut changes) = catalog_channel();

        listener.container_loaded();
        drop(listener);

        assert!(changes.take_change());
        assert!(!changes.take_change());
        assert_eq!(changes.generation(), 1);
    }

    #[test]
    fn test_fine_grained_events_do_not_signal() {
        let (listener, mut changes) = catalog_channel();

        listener.playlist_added("Jazz", 0);
        listener.playlist_removed("Jazz", 0);
        listener.playlist_moved("Rock", 1, 3);

        assert!(!changes.take_change());
    }

    #[tokio::test]
    async fn test_change_from_other_thread_wakes_waiter() {
        let (listener, mut changes) = catalog_channel();

        std::thread::spawn(move || listener.container_loaded())
            .join()
            .unwrap();

        assert!(changes.changed().await);
        assert_eq!(changes.generation(), 1);
    }
}
