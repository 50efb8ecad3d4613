//! Playback controller: the single owner of player state.
//!
//! A [`Player`] spawns one worker thread that owns the [`MediaEngine`] and
//! the [`PlayerState`]. Commands from the view layer, engine completion
//! events, library load results and progress ticks are all handled on that
//! thread, one at a time, and each handled message publishes at most one new
//! snapshot to observers.
//!
//! [`MediaEngine`]: crate::engine::MediaEngine

mod error;
mod player;
mod queue;
mod state;
mod store;
mod thread;
mod types;

pub use error::PlayerError;
pub use player::{LibraryLoad, Player};
pub use queue::{RECENTLY_PLAYED_LIMIT, next_position, previous_position, push_recent, shuffled};
pub use state::PlayerState;
pub use store::StateStore;
pub use types::{LoadOutcome, PlaybackPhase, Screen};
