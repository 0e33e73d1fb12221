//! File-per-playlist store.
//!
//! Each playlist lives in one JSON file under the storage directory, named
//! after the sanitized playlist name. Saves rewrite the whole file; there is
//! no cache and no cross-save locking, so two saves racing on the same
//! derived filename end with the last writer's content.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use walkdir::WalkDir;

use crate::errors::AppError;
use crate::playlist::convert;
use crate::playlist::models::{ExportFormat, Playlist};

const PLAYLIST_EXT: &str = "json";

pub struct PlaylistStore {
    dir: PathBuf,
}

impl PlaylistStore {
    /// Open the store, creating the storage directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self, AppError> {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Strip a playlist name down to the characters safe in a filename:
    /// lowercased, everything outside `[a-z0-9]` becomes `_`. Not injective:
    /// "My Playlist!" and "my_playlist " derive the same file, and the later
    /// save wins.
    pub fn sanitize_name(name: &str) -> String {
        name.to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    pub fn file_name_for(name: &str) -> String {
        format!("{}.{}", Self::sanitize_name(name), PLAYLIST_EXT)
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(Self::file_name_for(name))
    }

    /// Read every playlist record in the storage directory, in listing
    /// order. Any failure, a missing directory or a single unreadable or
    /// malformed file, yields an empty list; callers cannot tell "nothing
    /// stored" apart from "listing failed".
    pub fn list_all(&self) -> Vec<Playlist> {
        match self.read_all() {
            Ok(playlists) => playlists,
            Err(e) => {
                log::warn!("Failed to list playlists in {}: {}", self.dir.display(), e);
                Vec::new()
            }
        }
    }

    fn read_all(&self) -> Result<Vec<Playlist>, AppError> {
        let mut playlists = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
        {
            let entry = entry.map_err(|e| AppError::FileSystem(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(PLAYLIST_EXT)
            {
                continue;
            }
            let content = fs::read_to_string(path)?;
            playlists.push(serde_json::from_str(&content)?);
        }
        Ok(playlists)
    }

    /// Load one playlist by display name.
    pub fn load(&self, name: &str) -> Result<Playlist, AppError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(AppError::NotFound(name.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the playlist, refreshing `modified` and stamping `created` on
    /// first save. Overwrites whatever record currently holds the derived
    /// filename.
    pub fn save(&self, playlist: &mut Playlist) -> Result<PathBuf, AppError> {
        playlist.modified = Utc::now().to_rfc3339();
        if playlist.created.is_empty() {
            playlist.created = playlist.modified.clone();
        }
        let content = serde_json::to_string_pretty(playlist)?;
        let path = self.path_for(&playlist.name);
        fs::write(&path, content)?;
        log::debug!("Saved playlist '{}' to {}", playlist.name, path.display());
        Ok(path)
    }

    /// Delete the backing file. Deleting a name with no backing file is the
    /// distinct not-found failure, not an I/O error.
    pub fn delete(&self, name: &str) -> Result<(), AppError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(AppError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    /// Import a playlist from an interchange file, dispatching on the
    /// extension, and persist a local copy.
    pub fn import(&self, source: &Path) -> Result<Playlist, AppError> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Imported")
            .to_string();

        let content = fs::read_to_string(source)?;
        let mut playlist = match ext.as_str() {
            "json" => convert::parse_json(&content, &stem)?,
            "csv" => convert::parse_csv(&content, &stem),
            "txt" | "m3u" => convert::parse_lines(&content, &stem),
            other => {
                return Err(AppError::UnsupportedFormat(format!(".{}", other)));
            }
        };
        self.save(&mut playlist)?;
        Ok(playlist)
    }

    /// Write the playlist to `dest` in the given format. The content is
    /// rendered fully in memory first, so a failed write never leaves a
    /// partial file behind.
    pub fn export(
        &self,
        playlist: &Playlist,
        format: ExportFormat,
        dest: &Path,
    ) -> Result<(), AppError> {
        let content = match format {
            ExportFormat::Json => serde_json::to_string_pretty(playlist)?,
            ExportFormat::Csv => convert::render_csv(playlist),
            ExportFormat::M3u => convert::render_m3u(playlist),
            ExportFormat::Txt => convert::render_txt(playlist),
        };
        fs::write(dest, content)?;
        log::debug!(
            "Exported playlist '{}' as {} to {}",
            playlist.name,
            format.as_str(),
            dest.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::models::{Song, UNKNOWN_ARTIST};
    use tempfile::TempDir;

    fn setup_store() -> (PlaylistStore, TempDir) {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store =
            PlaylistStore::new(temp.path().join("playlists")).expect("Failed to open store");
        (store, temp)
    }

    fn sample_song(id: &str, title: &str) -> Song {
        Song {
            video_id: id.to_string(),
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: None,
            duration: Some("125".to_string()),
        }
    }

    fn stored_files(store: &PlaylistStore) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(store.dir())
            .expect("Read store dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_file_name_derivation_is_pure_and_collides() {
        assert_eq!(PlaylistStore::file_name_for("My Playlist!"), "my_playlist_.json");
        assert_eq!(PlaylistStore::file_name_for("my_playlist "), "my_playlist_.json");
        assert_eq!(
            PlaylistStore::file_name_for("My Playlist!"),
            PlaylistStore::file_name_for("My Playlist!")
        );
        assert_eq!(PlaylistStore::file_name_for("Mix 2024"), "mix_2024.json");
    }

    #[test]
    fn test_save_then_list_round_trip() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Road Trip");
        playlist.songs = vec![sample_song("a", "First"), sample_song("b", "Second")];
        store.save(&mut playlist).expect("Save");

        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Road Trip");
        assert_eq!(listed[0].songs, playlist.songs);
        assert_eq!(listed[0].created, playlist.created);
    }

    #[test]
    fn test_save_stamps_timestamps_once() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Mix");
        store.save(&mut playlist).expect("First save");

        let created = playlist.created.clone();
        assert!(!created.is_empty());
        assert_eq!(playlist.created, playlist.modified);

        playlist.songs.push(sample_song("a", "Song"));
        store.save(&mut playlist).expect("Second save");
        assert_eq!(playlist.created, created);
    }

    #[test]
    fn test_empty_playlist_persists() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Empty");
        store.save(&mut playlist).expect("Save");

        let loaded = store.load("Empty").expect("Load");
        assert!(loaded.songs.is_empty());
    }

    #[test]
    fn test_colliding_names_overwrite() {
        let (store, _temp) = setup_store();
        let mut first = Playlist::new("My Playlist!");
        first.songs = vec![sample_song("a", "First")];
        store.save(&mut first).expect("Save first");

        let mut second = Playlist::new("my_playlist ");
        second.songs = vec![sample_song("b", "Second")];
        store.save(&mut second).expect("Save second");

        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "my_playlist ");
        assert_eq!(listed[0].songs[0].video_id, "b");
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Keep");
        store.save(&mut playlist).expect("Save");

        let err = store.delete("Ghost").expect_err("Should fail");
        assert!(err.is_not_found());
        assert_eq!(stored_files(&store), vec!["keep.json"]);
    }

    #[test]
    fn test_delete_removes_file() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Gone");
        store.save(&mut playlist).expect("Save");

        store.delete("Gone").expect("Delete");
        assert!(stored_files(&store).is_empty());
        assert!(store.load("Gone").is_err());
    }

    #[test]
    fn test_list_all_empty_when_any_record_is_malformed() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Good");
        store.save(&mut playlist).expect("Save");

        fs::write(store.dir().join("broken.json"), "not valid json {{{").expect("Write");
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_list_all_ignores_foreign_files() {
        let (store, _temp) = setup_store();
        let mut playlist = Playlist::new("Good");
        store.save(&mut playlist).expect("Save");

        fs::write(store.dir().join("notes.txt"), "not a record").expect("Write");
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn test_import_txt_persists_copy() {
        let (store, temp) = setup_store();
        let source = temp.path().join("road trip.txt");
        fs::write(&source, "Daft Punk - One More Time\nxyz\n").expect("Write");

        let playlist = store.import(&source).expect("Import");
        assert_eq!(playlist.name, "road trip");
        assert_eq!(playlist.songs.len(), 2);
        assert_eq!(playlist.songs[0].artist, "Daft Punk");
        assert_eq!(playlist.songs[0].title, "One More Time");
        assert_eq!(playlist.songs[0].video_id, "");
        assert_eq!(playlist.songs[1].artist, UNKNOWN_ARTIST);
        assert_eq!(playlist.songs[1].video_id, "xyz");

        assert_eq!(stored_files(&store), vec!["road_trip.json"]);
    }

    #[test]
    fn test_import_unsupported_extension() {
        let (store, temp) = setup_store();
        let source = temp.path().join("notes.xml");
        fs::write(&source, "<playlist/>").expect("Write");

        let err = store.import(&source).expect_err("Should fail");
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
        assert!(stored_files(&store).is_empty());
    }

    #[test]
    fn test_import_missing_file() {
        let (store, temp) = setup_store();
        let result = store.import(&temp.path().join("absent.txt"));
        assert!(matches!(result, Err(AppError::FileSystem(_))));
    }

    #[test]
    fn test_json_export_then_import_round_trip() {
        let (store, temp) = setup_store();
        let mut playlist = Playlist::new("Mix");
        playlist.songs = vec![sample_song("a", "First"), sample_song("b", "Second")];
        store.save(&mut playlist).expect("Save");

        let dest = temp.path().join("exported.json");
        store
            .export(&playlist, ExportFormat::Json, &dest)
            .expect("Export");

        let imported = store.import(&dest).expect("Import");
        assert_eq!(imported.songs, playlist.songs);
        assert_eq!(imported.name, "Mix");
    }

    #[test]
    fn test_export_m3u_content() {
        let (store, temp) = setup_store();
        let mut playlist = Playlist::new("Mix");
        playlist.songs = vec![Song {
            video_id: "abc123".to_string(),
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: None,
            duration: Some("125".to_string()),
        }];

        let dest = temp.path().join("mix.m3u");
        store
            .export(&playlist, ExportFormat::M3u, &dest)
            .expect("Export");

        let content = fs::read_to_string(&dest).expect("Read");
        assert_eq!(content, "#EXTM3U\n#EXTINF:125,Artist - Song\nabc123\n");
    }

    #[test]
    fn test_export_to_unwritable_path_fails() {
        let (store, temp) = setup_store();
        let playlist = Playlist::new("Mix");
        let dest = temp.path().join("no_such_dir").join("out.txt");
        let result = store.export(&playlist, ExportFormat::Txt, &dest);
        assert!(matches!(result, Err(AppError::FileSystem(_))));
    }
}
