use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory to index. Falls back to the first CLI argument, then the
    /// current directory.
    pub root: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Tracks shorter than this are not considered music.
    pub min_duration_ms: u64,
}

impl LibrarySettings {
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            min_duration_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the playback position is sampled while playing.
    pub progress_interval_ms: u64,
    /// Whether shuffle is switched on once the library has loaded.
    pub shuffle: bool,
}

impl PlaybackSettings {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 1000,
            shuffle: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "encore=info".to_string(),
        }
    }
}
