//! `rodio`-backed [`MediaEngine`].
//!
//! The output stream is opened on first load, so constructing the engine
//! never fails. End-of-track is detected by a watcher thread blocked in
//! `Sink::sleep_until_end`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::{CompletionSignal, EngineError, MediaEngine};

struct Loaded {
    sink: Arc<Sink>,
    duration: Option<Duration>,
    released: Arc<AtomicBool>,
}

#[derive(Default)]
pub struct RodioEngine {
    stream: Option<OutputStream>,
    loaded: Option<Loaded>,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> Result<&OutputStream, EngineError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| EngineError::Device(e.to_string()))?;
            // rodio logs to stderr when OutputStream is dropped.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| EngineError::Device("output stream missing".to_string()))
    }
}

/// Map a content locator to a local path. Accepts plain paths and `file://` URIs.
pub(crate) fn locator_path(locator: &str) -> Option<PathBuf> {
    let locator = locator.trim();
    let path = locator.strip_prefix("file://").unwrap_or(locator);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

impl MediaEngine for RodioEngine {
    fn load(&mut self, locator: &str, on_complete: CompletionSignal) -> Result<(), EngineError> {
        let path = locator_path(locator)
            .ok_or_else(|| EngineError::SourceUnavailable("empty content locator".to_string()))?;
        let file = File::open(&path)
            .map_err(|e| EngineError::SourceUnavailable(format!("{}: {e}", path.display())))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| EngineError::SourceUnavailable(format!("{}: {e}", path.display())))?;
        let duration = source.total_duration().or_else(|| probe_duration(&path));

        let sink = {
            let stream = self.stream()?;
            Sink::connect_new(stream.mixer())
        };
        sink.append(source);
        sink.pause();
        let sink = Arc::new(sink);

        let released = Arc::new(AtomicBool::new(false));
        let watch = Arc::clone(&sink);
        let watch_released = Arc::clone(&released);
        thread::spawn(move || {
            watch.sleep_until_end();
            if !watch_released.load(Ordering::Acquire) {
                on_complete.notify();
            }
        });

        debug!(path = %path.display(), ?duration, "source loaded");
        self.loaded = Some(Loaded {
            sink,
            duration,
            released,
        });
        Ok(())
    }

    fn play(&mut self) {
        if let Some(l) = &self.loaded {
            l.sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(l) = &self.loaded {
            l.sink.pause();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<(), EngineError> {
        let Some(l) = &self.loaded else {
            return Ok(());
        };
        l.sink
            .try_seek(position)
            .map_err(|e| EngineError::Seek(e.to_string()))
    }

    fn position(&self) -> Duration {
        self.loaded
            .as_ref()
            .map_or(Duration::ZERO, |l| l.sink.get_pos())
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().and_then(|l| l.duration)
    }

    fn is_playing(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|l| !l.sink.is_paused() && !l.sink.empty())
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn release(&mut self) {
        if let Some(l) = self.loaded.take() {
            l.released.store(true, Ordering::Release);
            l.sink.stop();
        }
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_path_accepts_plain_paths_and_file_uris() {
        assert_eq!(locator_path("/music/a.mp3"), Some(PathBuf::from("/music/a.mp3")));
        assert_eq!(
            locator_path("file:///music/a.mp3"),
            Some(PathBuf::from("/music/a.mp3"))
        );
        assert_eq!(locator_path("   "), None);
        assert_eq!(locator_path("file://"), None);
    }

    #[test]
    fn loading_a_missing_file_is_source_unavailable_and_leaves_engine_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp3");
        let mut engine = RodioEngine::new();

        let err = engine
            .load(missing.to_str().unwrap(), CompletionSignal::noop())
            .unwrap_err();
        assert!(matches!(err, EngineError::SourceUnavailable(_)));
        assert!(!engine.is_loaded());
        assert!(!engine.is_playing());
        assert_eq!(engine.position(), Duration::ZERO);
    }

    #[test]
    fn loading_an_empty_locator_fails_before_opening_a_device() {
        let mut engine = RodioEngine::new();
        let err = engine.load("", CompletionSignal::noop()).unwrap_err();
        assert!(matches!(err, EngineError::SourceUnavailable(_)));
        assert!(engine.stream.is_none());
    }
}
