//! Queue and history helpers.
//!
//! Pure functions over track lists; the worker calls them while it holds
//! the only mutable copy of the state.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::library::Track;

pub const RECENTLY_PLAYED_LIMIT: usize = 5;

/// Move `track` to the front of `recent`, dropping any older entry with the
/// same id and anything past [`RECENTLY_PLAYED_LIMIT`].
pub fn push_recent(recent: &mut Vec<Track>, track: Track) {
    recent.retain(|t| t != &track);
    recent.insert(0, track);
    recent.truncate(RECENTLY_PLAYED_LIMIT);
}

/// Index to play after `current`. Wraps to the start, and starts at the
/// beginning when `current` is not in the queue.
pub fn next_position(queue: &[Track], current: Option<&Track>) -> Option<usize> {
    if queue.is_empty() {
        return None;
    }
    match current.and_then(|c| queue.iter().position(|t| t == c)) {
        Some(i) if i + 1 < queue.len() => Some(i + 1),
        _ => Some(0),
    }
}

/// Index to play before `current`. Wraps to the end, and starts there when
/// `current` is not in the queue.
pub fn previous_position(queue: &[Track], current: Option<&Track>) -> Option<usize> {
    if queue.is_empty() {
        return None;
    }
    match current.and_then(|c| queue.iter().position(|t| t == c)) {
        Some(i) if i > 0 => Some(i - 1),
        _ => Some(queue.len() - 1),
    }
}

pub fn shuffled<R: Rng + ?Sized>(queue: &[Track], rng: &mut R) -> Vec<Track> {
    let mut out = queue.to_vec();
    out.shuffle(rng);
    out
}
