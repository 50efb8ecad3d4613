use std::time::Duration;

/// A playable item with identifying metadata and a content locator.
///
/// Two tracks are equal when their ids are equal; the rest is metadata.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Album art reference. Empty when nothing was found.
    pub album_art: String,
    /// Playable content locator. Empty for placeholder entries.
    pub locator: String,
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album_art: String::new(),
            locator: String::new(),
            duration: None,
        }
    }

    pub fn with_album_art(mut self, album_art: impl Into<String>) -> Self {
        self.album_art = album_art.into();
        self
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Whether the track has something the engine could try to load.
    pub fn is_playable(&self) -> bool {
        !self.locator.trim().is_empty()
    }

    /// Compare every field. `==` only looks at the id.
    pub fn same_details(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.artist == other.artist
            && self.album_art == other.album_art
            && self.locator == other.locator
            && self.duration == other.duration
    }

    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            a => format!("{a} - {}", self.title),
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}
