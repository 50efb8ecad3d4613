use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

use super::model::Track;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("media index unavailable: {0}")]
    Unavailable(String),

    #[error("media index returned no playable tracks")]
    Empty,
}

/// Source of candidate tracks for the library.
///
/// Implementations enumerate everything they know about; the provided
/// [`MediaIndex::list_tracks`] applies the minimum-duration policy. Calls are
/// blocking and are made from a background thread.
pub trait MediaIndex: Send + Sync {
    fn candidates(&self) -> Result<Vec<Track>, IndexError>;

    fn list_tracks(&self, min_duration: Duration) -> Result<Vec<Track>, IndexError> {
        let tracks = filter_by_duration(self.candidates()?, min_duration);
        if tracks.is_empty() {
            return Err(IndexError::Empty);
        }
        Ok(tracks)
    }
}

/// Keep tracks whose duration is known and at least `min_duration`.
pub fn filter_by_duration(tracks: Vec<Track>, min_duration: Duration) -> Vec<Track> {
    tracks
        .into_iter()
        .filter(|t| t.duration.is_some_and(|d| d >= min_duration))
        .collect()
}

/// A fixed, in-memory index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    tracks: Mutex<Vec<Track>>,
    unavailable: Mutex<Option<String>>,
}

impl MemoryIndex {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks),
            unavailable: Mutex::new(None),
        }
    }

    /// Replace the tracks returned by subsequent queries.
    pub fn set_tracks(&self, tracks: Vec<Track>) {
        if let Ok(mut t) = self.tracks.lock() {
            *t = tracks;
        }
    }

    /// Make subsequent queries fail with `reason` (or succeed again with `None`).
    pub fn set_unavailable(&self, reason: Option<String>) {
        if let Ok(mut u) = self.unavailable.lock() {
            *u = reason;
        }
    }
}

impl MediaIndex for MemoryIndex {
    fn candidates(&self) -> Result<Vec<Track>, IndexError> {
        if let Some(reason) = self.unavailable.lock().ok().and_then(|u| u.clone()) {
            return Err(IndexError::Unavailable(reason));
        }
        self.tracks
            .lock()
            .map(|t| t.clone())
            .map_err(|_| IndexError::Unavailable("index lock poisoned".to_string()))
    }
}
