use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::config::Settings;
use crate::engine::MediaEngine;
use crate::library::{MediaIndex, Track};

use super::error::PlayerError;
use super::state::PlayerState;
use super::store::StateStore;
use super::thread::{WorkerConfig, spawn_worker};
use super::types::{Command, LoadOutcome, Reply, Screen};

/// Handle to the playback controller.
///
/// Every command blocks until the worker has applied it, so a snapshot taken
/// right after a command already reflects it. Dropping the handle stops the
/// worker and releases the engine.
pub struct Player {
    tx: Sender<Command>,
    store: Arc<StateStore>,
    index: Arc<dyn MediaIndex>,
    min_duration: Duration,
    library_generation: Arc<AtomicU64>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Start the worker. `make_engine` runs on the worker thread.
    pub fn spawn<E, F>(index: Arc<dyn MediaIndex>, settings: &Settings, make_engine: F) -> Self
    where
        E: MediaEngine + 'static,
        F: FnOnce() -> E + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Command>();
        let store = Arc::new(StateStore::new(PlayerState::new()));
        let library_generation = Arc::new(AtomicU64::new(0));

        let join = spawn_worker(
            make_engine,
            rx,
            tx.clone(),
            Arc::clone(&store),
            WorkerConfig {
                progress_interval: settings.playback.progress_interval(),
                library_generation: Arc::clone(&library_generation),
            },
        );

        Self {
            tx,
            store,
            index,
            min_duration: settings.library.min_duration(),
            library_generation,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn snapshot(&self) -> Arc<PlayerState> {
        self.store.snapshot()
    }

    /// Receive a snapshot after every committed change, starting with the current one.
    pub fn subscribe(&self) -> Receiver<Arc<PlayerState>> {
        self.store.subscribe()
    }

    /// Query the media index on a background thread and replace the library
    /// with the result. Only the most recently issued load is applied.
    pub fn load_library(&self) -> LibraryLoad {
        let generation = self.library_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (reply_tx, reply_rx) = mpsc::channel();
        let index = Arc::clone(&self.index);
        let tx = self.tx.clone();
        let min_duration = self.min_duration;

        thread::spawn(move || {
            let result = index.list_tracks(min_duration);
            let cmd = Command::LibraryLoaded {
                generation,
                result,
                reply: reply_tx,
            };
            if tx.send(cmd).is_err() {
                debug!(generation, "player stopped before library load finished");
            }
        });

        LibraryLoad { rx: reply_rx }
    }

    pub fn navigate_to(&self, screen: Screen) -> Result<(), PlayerError> {
        self.request(|r| Command::Navigate(screen, r))
    }

    pub fn play_song(&self, track: Track) -> Result<(), PlayerError> {
        self.request(|r| Command::Play(track, r))
    }

    pub fn toggle_play_pause(&self) -> Result<(), PlayerError> {
        self.request(Command::TogglePause)
    }

    /// Seek to `fraction` of the current track. Values outside `[0, 1]` are clamped.
    pub fn seek_to(&self, fraction: f32) -> Result<(), PlayerError> {
        self.request(|r| Command::Seek(fraction, r))
    }

    pub fn play_next_song(&self) -> Result<(), PlayerError> {
        self.request(Command::Next)
    }

    pub fn play_previous_song(&self) -> Result<(), PlayerError> {
        self.request(Command::Previous)
    }

    pub fn toggle_shuffle(&self) -> Result<(), PlayerError> {
        self.request(Command::ToggleShuffle)
    }

    /// Stop the worker and wait for it. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn request(&self, build: impl FnOnce(Reply) -> Command) -> Result<(), PlayerError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(build(reply_tx))
            .map_err(|_| PlayerError::Disconnected)?;
        reply_rx.recv().map_err(|_| PlayerError::Disconnected)?
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pending result of [`Player::load_library`]. Dropping it does not cancel the load.
pub struct LibraryLoad {
    rx: Receiver<Result<LoadOutcome, PlayerError>>,
}

impl LibraryLoad {
    pub fn wait(self) -> Result<LoadOutcome, PlayerError> {
        self.rx.recv().map_err(|_| PlayerError::Disconnected)?
    }
}
