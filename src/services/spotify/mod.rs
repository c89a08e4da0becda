pub mod events;
pub mod flatten;
pub mod offline;
pub mod playlists;
pub mod snapshot;
pub mod translator;
pub mod types;
