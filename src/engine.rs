//! Single-track audio engine abstraction.
//!
//! The playback controller drives exactly one [`MediaEngine`] and never holds
//! more than one loaded source at a time. [`RodioEngine`] is the real
//! implementation; tests use scripted fakes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

mod sink;

pub use sink::RodioEngine;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("audio output device error: {0}")]
    Device(String),

    #[error("seek failed: {0}")]
    Seek(String),
}

/// Fired by an engine when the loaded track plays to its end.
///
/// Cloning is cheap; every clone notifies the same listener.
#[derive(Clone)]
pub struct CompletionSignal {
    notify: Arc<dyn Fn() + Send + Sync>,
}

impl CompletionSignal {
    pub fn new(notify: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            notify: Arc::new(notify),
        }
    }

    /// A signal nobody listens to.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn notify(&self) {
        (self.notify)();
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionSignal")
    }
}

pub trait MediaEngine {
    /// Load `locator` paused. Any previously loaded source must already be
    /// released by the caller. `on_complete` fires once if the track ends.
    fn load(&mut self, locator: &str, on_complete: CompletionSignal) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration) -> Result<(), EngineError>;
    fn position(&self) -> Duration;
    /// Total length of the loaded track, if the engine knows it.
    fn duration(&self) -> Option<Duration>;
    fn is_playing(&self) -> bool;
    fn is_loaded(&self) -> bool;
    /// Stop and drop the loaded source. No-op when nothing is loaded.
    fn release(&mut self);
}
