//! Parsing and rendering of the interchange formats (JSON, CSV, M3U, TXT).
//!
//! These functions are pure string transforms; file I/O and persistence live
//! in the store. The CSV reader/writer does not handle quoted fields: a
//! comma inside a field shifts every later column, symmetrically on both
//! sides of the round trip.

use crate::errors::AppError;
use crate::playlist::models::{Playlist, Song, UNKNOWN_ARTIST};

/// Column order written by [`render_csv`] and probed for by [`parse_csv`].
pub const CSV_HEADER: &str = "PlaylistName,MediaId,Title,Artists,Duration";

/// Separator between artist and title in TXT/M3U lines.
const ARTIST_TITLE_SEP: &str = " - ";

/// Parse a playlist record, coercing missing fields: `name` falls back to
/// `fallback_name`, `songs` to an empty list. `created` is left empty here
/// and assigned by the store on save.
pub fn parse_json(content: &str, fallback_name: &str) -> Result<Playlist, AppError> {
    let mut playlist: Playlist = serde_json::from_str(content)?;
    if playlist.name.is_empty() {
        playlist.name = fallback_name.to_string();
    }
    Ok(playlist)
}

/// Parse CSV with a header row. Columns are located case-insensitively by
/// substring, each independently optional. The playlist name comes from the
/// `playlistname` column of the first data row when that column exists,
/// otherwise `fallback_name`. Rows with fewer fields than the highest
/// detected column index carries are skipped.
pub fn parse_csv(content: &str, fallback_name: &str) -> Playlist {
    let mut lines = content.lines();
    let header: Vec<String> = lines
        .next()
        .unwrap_or("")
        .split(',')
        .map(|c| c.trim().to_lowercase())
        .collect();

    let find_col = |needle: &str| header.iter().position(|c| c.contains(needle));
    let name_col = find_col("playlistname");
    let id_col = find_col("mediaid");
    let title_col = find_col("title");
    let artist_col = find_col("artists");
    let duration_col = find_col("duration");

    let max_col = [name_col, id_col, title_col, artist_col, duration_col]
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);

    let mut name = String::new();
    let mut songs = Vec::new();
    let mut first_data_row = true;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if first_data_row {
            first_data_row = false;
            if let Some(col) = name_col {
                if col < fields.len() {
                    name = fields[col].to_string();
                }
            }
        }
        if fields.len() <= max_col {
            continue;
        }
        songs.push(Song {
            video_id: id_col.map(|c| fields[c].to_string()).unwrap_or_default(),
            title: title_col.map(|c| fields[c].to_string()).unwrap_or_default(),
            artist: artist_col
                .map(|c| fields[c].to_string())
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: None,
            duration: duration_col.map(|c| fields[c].to_string()),
        });
    }

    if name.is_empty() {
        name = fallback_name.to_string();
    }

    let mut playlist = Playlist::new(name);
    playlist.songs = songs;
    playlist
}

/// Parse plain text or M3U. Blank lines and `#` directives are skipped; a
/// line containing `" - "` splits into artist and title at the first
/// occurrence (identifier left empty, resolved later by search); anything
/// else is a raw identifier used as both id and title.
pub fn parse_lines(content: &str, fallback_name: &str) -> Playlist {
    let mut songs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let song = match line.split_once(ARTIST_TITLE_SEP) {
            Some((artist, title)) => Song {
                video_id: String::new(),
                title: title.to_string(),
                artist: artist.to_string(),
                album: None,
                duration: None,
            },
            None => Song {
                video_id: line.to_string(),
                title: line.to_string(),
                artist: UNKNOWN_ARTIST.to_string(),
                album: None,
                duration: None,
            },
        };
        songs.push(song);
    }

    let mut playlist = Playlist::new(fallback_name);
    playlist.songs = songs;
    playlist
}

/// Render CSV, one line per song, fields joined verbatim with no quoting.
pub fn render_csv(playlist: &Playlist) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for song in &playlist.songs {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            playlist.name,
            song.video_id,
            song.title,
            song.artist,
            song.duration.as_deref().unwrap_or("")
        ));
    }
    out
}

/// Render extended M3U: `#EXTINF:<duration-or--1>,<artist> - <title>`
/// followed by the bare identifier.
pub fn render_m3u(playlist: &Playlist) -> String {
    let mut out = String::from("#EXTM3U\n");
    for song in &playlist.songs {
        out.push_str(&format!(
            "#EXTINF:{},{}{}{}\n{}\n",
            song.duration.as_deref().unwrap_or("-1"),
            song.artist,
            ARTIST_TITLE_SEP,
            song.title,
            song.video_id
        ));
    }
    out
}

/// Render plain text, `<artist> - <title>` per song, with the identifier in
/// brackets only when one is present.
pub fn render_txt(playlist: &Playlist) -> String {
    let mut out = String::new();
    for song in &playlist.songs {
        if song.video_id.is_empty() {
            out.push_str(&format!("{}{}{}\n", song.artist, ARTIST_TITLE_SEP, song.title));
        } else {
            out.push_str(&format!(
                "{}{}{} [{}]\n",
                song.artist, ARTIST_TITLE_SEP, song.title, song.video_id
            ));
        }
    }
    out
}
