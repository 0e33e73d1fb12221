use std::path::PathBuf;

use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;

use crate::playlist::manager::PlaylistStore;
use crate::playlist::models::{ExportFormat, Playlist, Song};

#[tauri::command]
pub async fn get_playlists(store: State<'_, PlaylistStore>) -> Result<Vec<Playlist>, String> {
    Ok(store.list_all())
}

#[tauri::command]
pub async fn create_playlist(
    store: State<'_, PlaylistStore>,
    name: String,
) -> Result<Playlist, String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err("Playlist name cannot be empty".to_string());
    }
    let mut playlist = Playlist::new(name);
    store.save(&mut playlist).map_err(|e| e.to_string())?;
    Ok(playlist)
}

#[tauri::command]
pub async fn save_playlist(
    store: State<'_, PlaylistStore>,
    mut playlist: Playlist,
) -> Result<String, String> {
    store.save(&mut playlist).map_err(|e| e.to_string())?;
    Ok(format!("Saved playlist '{}'", playlist.name))
}

#[tauri::command]
pub async fn delete_playlist(
    store: State<'_, PlaylistStore>,
    name: String,
) -> Result<String, String> {
    store.delete(&name).map_err(|e| e.to_string())?;
    Ok(format!("Deleted playlist '{}'", name))
}

#[tauri::command]
pub async fn rename_playlist(
    store: State<'_, PlaylistStore>,
    name: String,
    new_name: String,
) -> Result<String, String> {
    let new_name = new_name.trim().to_string();
    if new_name.is_empty() {
        return Err("Playlist name cannot be empty".to_string());
    }

    let mut playlist = store.load(&name).map_err(|e| e.to_string())?;
    playlist.name = new_name.clone();
    store.save(&mut playlist).map_err(|e| e.to_string())?;

    // Drop the old record unless both names derive the same file.
    if PlaylistStore::file_name_for(&name) != PlaylistStore::file_name_for(&new_name) {
        store.delete(&name).map_err(|e| e.to_string())?;
    }
    Ok(format!("Renamed '{}' to '{}'", name, new_name))
}

#[tauri::command]
pub async fn add_to_playlist(
    store: State<'_, PlaylistStore>,
    name: String,
    song: Song,
) -> Result<String, String> {
    let mut playlist = store.load(&name).map_err(|e| e.to_string())?;
    let title = song.title.clone();
    playlist.songs.push(song);
    store.save(&mut playlist).map_err(|e| e.to_string())?;
    Ok(format!("Added '{}' to '{}'", title, name))
}

/// Removal is positional: songs carry no unique id and duplicates are
/// allowed within a playlist.
#[tauri::command]
pub async fn remove_from_playlist(
    store: State<'_, PlaylistStore>,
    name: String,
    index: usize,
) -> Result<String, String> {
    let mut playlist = store.load(&name).map_err(|e| e.to_string())?;
    if index >= playlist.songs.len() {
        return Err(format!("No song at position {} in '{}'", index, name));
    }
    let song = playlist.songs.remove(index);
    store.save(&mut playlist).map_err(|e| e.to_string())?;
    Ok(format!("Removed '{}' from '{}'", song.title, name))
}

#[tauri::command]
pub async fn import_playlist(
    app: AppHandle,
    store: State<'_, PlaylistStore>,
) -> Result<String, String> {
    let picked = app
        .dialog()
        .file()
        .add_filter("Playlists", &["json", "csv", "txt", "m3u"])
        .blocking_pick_file();

    let Some(file_path) = picked else {
        return Ok("Import cancelled".to_string());
    };

    let path = PathBuf::from(file_path.to_string());
    let playlist = store.import(&path).map_err(|e| e.to_string())?;
    Ok(format!(
        "Imported playlist '{}' with {} songs",
        playlist.name,
        playlist.songs.len()
    ))
}

#[tauri::command]
pub async fn export_playlist(
    app: AppHandle,
    store: State<'_, PlaylistStore>,
    name: String,
    format: String,
) -> Result<String, String> {
    let format = format.parse::<ExportFormat>()?;
    let playlist = store.load(&name).map_err(|e| e.to_string())?;

    let suggested = format!("{}.{}", PlaylistStore::sanitize_name(&name), format.as_str());
    let mut dialog = app
        .dialog()
        .file()
        .set_file_name(suggested.as_str())
        .add_filter("Playlist", &[format.as_str()]);
    if let Some(dir) = dirs::audio_dir().or_else(dirs::download_dir) {
        dialog = dialog.set_directory(dir);
    }

    let Some(file_path) = dialog.blocking_save_file() else {
        return Ok("Export cancelled".to_string());
    };

    let dest = PathBuf::from(file_path.to_string());
    store
        .export(&playlist, format, &dest)
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "Exported '{}' as {} to {}",
        name,
        format.as_str(),
        dest.display()
    ))
}
