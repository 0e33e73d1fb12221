use tauri::State;

pub mod playlist;

use crate::player::{PlaybackOutcome, PlaybackRouter};
use crate::playlist::manager::PlaylistStore;
use crate::playlist::models::Song;

/// Resolve a song to a web-player URL and forward it to the UI layer.
#[tauri::command]
pub async fn resolve_and_play(
    router: State<'_, PlaybackRouter>,
    song: Song,
) -> Result<PlaybackOutcome, String> {
    Ok(router.resolve_and_play(song).await)
}

/// Open the storage directory in the system file manager.
#[tauri::command]
pub async fn reveal_playlists_folder(store: State<'_, PlaylistStore>) -> Result<(), String> {
    tauri_plugin_opener::reveal_item_in_dir(store.dir()).map_err(|e| e.to_string())
}
