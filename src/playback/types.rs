//! Small types shared by the playback controller and its callers.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::Sender;

use crate::library::{IndexError, Track};

use super::error::PlayerError;

/// Screens the view layer can show. Navigation is plain state; it never
/// touches playback.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Home,
    MyMusic,
    Playlists,
    Account,
    NowPlaying,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Home,
        Screen::MyMusic,
        Screen::Playlists,
        Screen::Account,
        Screen::NowPlaying,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::MyMusic => "my-music",
            Screen::Playlists => "playlists",
            Screen::Account => "account",
            Screen::NowPlaying => "now-playing",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Screen::Home),
            "my-music" | "my_music" | "mymusic" | "music" => Ok(Screen::MyMusic),
            "playlists" => Ok(Screen::Playlists),
            "account" => Ok(Screen::Account),
            "now-playing" | "now_playing" | "nowplaying" | "now" => Ok(Screen::NowPlaying),
            other => Err(format!("unknown screen: {other}")),
        }
    }
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing loaded.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Result of a library load that reached the worker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The library was replaced with this many tracks.
    Loaded(usize),
    /// A newer load was issued before this one finished; its result was dropped.
    Superseded,
}

pub(super) type Reply = Sender<Result<(), PlayerError>>;

pub(super) enum Command {
    Navigate(Screen, Reply),
    Play(Track, Reply),
    TogglePause(Reply),
    Seek(f32, Reply),
    Next(Reply),
    Previous(Reply),
    ToggleShuffle(Reply),
    LibraryLoaded {
        generation: u64,
        result: Result<Vec<Track>, IndexError>,
        reply: Sender<Result<LoadOutcome, PlayerError>>,
    },
    /// The engine finished the track loaded in `session`.
    TrackFinished { session: u64 },
    Shutdown,
}
