use thiserror::Error;

use crate::engine::EngineError;
use crate::library::IndexError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Library(#[from] IndexError),

    #[error("seek position must be a finite fraction, got {0}")]
    InvalidSeek(f32),

    #[error("playback worker is not running")]
    Disconnected,
}
