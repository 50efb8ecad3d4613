//! Library module: track model, media indexes and the placeholder catalog.
//!
//! The controller never touches the filesystem directly; it asks a
//! [`MediaIndex`] for candidates and keeps the ones long enough to count
//! as music.

mod catalog;
mod index;
mod model;
mod scan;

pub use catalog::{recommendations, trending};
pub use index::{IndexError, MediaIndex, MemoryIndex, filter_by_duration};
pub use model::Track;
pub use scan::DirectoryIndex;
