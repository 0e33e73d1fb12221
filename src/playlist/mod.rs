pub mod convert;
pub mod manager;
pub mod models;

pub use manager::PlaylistStore;
pub use models::{ExportFormat, Playlist, Song};
