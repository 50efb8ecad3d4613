use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::index::{IndexError, MediaIndex};
use super::model::Track;

const ARTWORK_STEMS: [&str; 3] = ["cover", "folder", "front"];
const ARTWORK_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A [`MediaIndex`] backed by a directory tree on disk.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
    root: PathBuf,
    settings: LibrarySettings,
}

impl DirectoryIndex {
    pub fn new(root: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaIndex for DirectoryIndex {
    fn candidates(&self) -> Result<Vec<Track>, IndexError> {
        if !self.root.is_dir() {
            return Err(IndexError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        Ok(scan(&self.root, &self.settings))
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Look for a cover image next to `path` and return it as a `file://` reference.
fn find_album_art(path: &Path) -> String {
    let Some(dir) = path.parent() else {
        return String::new();
    };
    for stem in ARTWORK_STEMS {
        for ext in ARTWORK_EXTENSIONS {
            let candidate = dir.join(format!("{stem}.{ext}"));
            if candidate.is_file() {
                return format!("file://{}", candidate.display());
            }
        }
    }
    String::new()
}

fn read_track(path: &Path) -> Track {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let id = path.display().to_string();
    let mut track = Track::new(id.clone(), title, "")
        .with_locator(id)
        .with_album_art(find_album_art(path));

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = Some(tagged.properties().duration());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    track.title = v.trim().to_string();
                }
                if let Some(v) = tag.artist().filter(|v| !v.trim().is_empty()) {
                    track.artist = v.trim().to_string();
                }
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    track
}

pub(super) fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable library entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            tracks.push(read_track(path));
        }
    }

    tracks.sort_by_key(|t| t.title.to_lowercase());
    debug!(root = %dir.display(), count = tracks.len(), "library scan finished");
    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_by_title_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "A");
        assert_eq!(tracks[1].title, "b");
        assert_eq!(tracks[0].id, tracks[0].locator);
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings);

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "visible");
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "root");
    }

    #[test]
    fn scan_picks_up_sibling_cover_art() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("song.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"not an image").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].album_art.starts_with("file://"));
        assert!(tracks[0].album_art.ends_with("cover.jpg"));
    }

    #[test]
    fn directory_index_reports_missing_root_as_unavailable() {
        let dir = tempdir().unwrap();
        let index = DirectoryIndex::new(dir.path().join("nope"), LibrarySettings::default());
        assert!(matches!(index.candidates(), Err(IndexError::Unavailable(_))));
    }
}
