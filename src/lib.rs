//! Playback and queue controller for a local music player.
//!
//! [`playback::Player`] owns all mutable player state and drives a single
//! [`engine::MediaEngine`]; the view layer reads snapshots and issues
//! commands. Tracks come from a [`library::MediaIndex`].

pub mod config;
pub mod engine;
pub mod library;
pub mod logging;
pub mod playback;

pub use engine::{MediaEngine, RodioEngine};
pub use library::{DirectoryIndex, MediaIndex, Track};
pub use playback::{Player, PlayerError, PlayerState, Screen};
