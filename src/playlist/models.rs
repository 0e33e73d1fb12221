use serde::{Deserialize, Serialize};

/// Fallback artist name for songs whose artist cannot be recovered from input.
pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Opaque identifier in the web player. Empty until resolved.
    #[serde(rename = "videoId", default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_artist")]
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Duration in seconds, as decimal text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

fn default_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    /// RFC 3339 timestamp, set on first save and never changed after.
    #[serde(default)]
    pub created: String,
    /// RFC 3339 timestamp, refreshed on every save.
    #[serde(default)]
    pub modified: String,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            songs: Vec::new(),
            created: String::new(),
            modified: String::new(),
        }
    }
}

/// Interchange formats understood by export (import is keyed on the source
/// file extension instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    M3u,
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::M3u => "m3u",
            ExportFormat::Txt => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "m3u" => Ok(ExportFormat::M3u),
            "txt" => Ok(ExportFormat::Txt),
            _ => Err(format!("Unsupported format: {}", s)),
        }
    }
}
