use crate::library::{self, Track};

use super::types::{PlaybackPhase, Screen};

/// Everything the view layer can observe.
///
/// Snapshots are immutable; the worker publishes a fresh one after every
/// handled message that changed something.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_screen: Screen,
    pub now_playing: Option<Track>,
    pub is_playing: bool,
    pub phase: PlaybackPhase,
    /// Fraction of the current track elapsed, in `[0.0, 1.0]`.
    pub progress: f32,
    /// Library snapshot in canonical order.
    pub user_songs: Vec<Track>,
    /// Most recent first, no duplicate ids.
    pub recently_played: Vec<Track>,
    pub recommendations: Vec<Track>,
    pub trending: Vec<Track>,
    /// Current playback order: `user_songs`, or a permutation of it when
    /// shuffle is on.
    pub queue: Vec<Track>,
    pub shuffle: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            current_screen: Screen::Home,
            now_playing: None,
            is_playing: false,
            phase: PlaybackPhase::Idle,
            progress: 0.0,
            user_songs: Vec::new(),
            recently_played: Vec::new(),
            recommendations: library::recommendations(),
            trending: library::trending(),
            queue: Vec::new(),
            shuffle: false,
        }
    }

    /// Whether an observer could tell the two apart, track metadata included.
    pub fn same_as(&self, other: &Self) -> bool {
        fn same_tracks(a: &[Track], b: &[Track]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_details(y))
        }

        let same_now_playing = match (&self.now_playing, &other.now_playing) {
            (Some(a), Some(b)) => a.same_details(b),
            (None, None) => true,
            _ => false,
        };

        same_now_playing
            && self.current_screen == other.current_screen
            && self.is_playing == other.is_playing
            && self.phase == other.phase
            && self.progress == other.progress
            && self.shuffle == other.shuffle
            && same_tracks(&self.user_songs, &other.user_songs)
            && same_tracks(&self.queue, &other.queue)
            && same_tracks(&self.recently_played, &other.recently_played)
            && same_tracks(&self.recommendations, &other.recommendations)
            && same_tracks(&self.trending, &other.trending)
    }

    /// Position of `now_playing` in the queue, if it is there.
    pub fn queue_position(&self) -> Option<usize> {
        let current = self.now_playing.as_ref()?;
        self.queue.iter().position(|t| t == current)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
