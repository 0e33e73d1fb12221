//! Playback resolution boundary.
//!
//! The app does not own a playback engine; it turns a song into a web-player
//! URL and hands the request to whatever sink is wired in. The default sink
//! forwards the request to the frontend as an event. When no sink can take
//! the request it is only logged.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

use crate::errors::AppError;
use crate::playlist::models::Song;

const WATCH_URL: &str = "https://music.youtube.com/watch?v=";
const SEARCH_URL: &str = "https://music.youtube.com/search?q=";

/// Event delivered to the UI layer for each playback request.
pub const PLAY_REQUEST_EVENT: &str = "play-request";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum PlaybackOutcome {
    /// The song carries an identifier; navigate straight to it.
    Direct(String),
    /// No identifier yet; hand the player a search for artist and title.
    Search(String),
}

impl PlaybackOutcome {
    pub fn url(&self) -> &str {
        match self {
            PlaybackOutcome::Direct(url) | PlaybackOutcome::Search(url) => url,
        }
    }
}

/// Map a song to the URL the web player should open.
pub fn resolve(song: &Song) -> PlaybackOutcome {
    if song.video_id.is_empty() {
        let query = format!("{} {}", song.artist, song.title);
        PlaybackOutcome::Search(format!("{}{}", SEARCH_URL, urlencoding::encode(query.trim())))
    } else {
        PlaybackOutcome::Direct(format!("{}{}", WATCH_URL, song.video_id))
    }
}

#[async_trait]
pub trait PlaybackSink: Send + Sync {
    async fn dispatch(&self, song: &Song, outcome: &PlaybackOutcome) -> Result<(), AppError>;
}

/// Default sink: emit the resolved request to the frontend.
pub struct EmitterSink {
    app: AppHandle,
}

impl EmitterSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl PlaybackSink for EmitterSink {
    async fn dispatch(&self, _song: &Song, outcome: &PlaybackOutcome) -> Result<(), AppError> {
        self.app
            .emit(PLAY_REQUEST_EVENT, outcome)
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}

pub struct PlaybackRouter {
    sink: Arc<dyn PlaybackSink>,
    last_request: Mutex<Option<Song>>,
}

impl PlaybackRouter {
    pub fn new(sink: Arc<dyn PlaybackSink>) -> Self {
        Self {
            sink,
            last_request: Mutex::new(None),
        }
    }

    /// Resolve the song and hand it to the sink. Dispatch failures are not
    /// surfaced; the request is logged so the user action still leaves a
    /// trace.
    pub async fn resolve_and_play(&self, song: Song) -> PlaybackOutcome {
        let outcome = resolve(&song);
        if let Err(e) = self.sink.dispatch(&song, &outcome).await {
            log::info!(
                "Playback sink unavailable ({}), would play '{} - {}' via {}",
                e,
                song.artist,
                song.title,
                outcome.url()
            );
        }
        *self.last_request.lock() = Some(song);
        outcome
    }

    pub fn last_request(&self) -> Option<Song> {
        self.last_request.lock().clone()
    }
}
