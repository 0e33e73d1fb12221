pub mod commands;
pub mod errors;
pub mod player;
pub mod playlist;

use std::sync::Arc;

use tauri::Manager;

use player::{EmitterSink, PlaybackRouter};
use playlist::PlaylistStore;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle().clone();

            let data_dir = handle.path().app_data_dir()?;
            let store = PlaylistStore::new(data_dir.join("playlists"))?;
            log::info!("Playlist storage at {}", store.dir().display());

            let router = PlaybackRouter::new(Arc::new(EmitterSink::new(handle)));

            app.manage(store);
            app.manage(router);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::playlist::get_playlists,
            commands::playlist::create_playlist,
            commands::playlist::save_playlist,
            commands::playlist::delete_playlist,
            commands::playlist::rename_playlist,
            commands::playlist::add_to_playlist,
            commands::playlist::remove_from_playlist,
            commands::playlist::import_playlist,
            commands::playlist::export_playlist,
            commands::resolve_and_play,
            commands::reveal_playlists_folder
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
