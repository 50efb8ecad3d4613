use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::engine::{CompletionSignal, EngineError, MediaEngine};
use crate::library::{IndexError, Track};

use super::error::PlayerError;
use super::queue::{next_position, previous_position, push_recent, shuffled};
use super::state::PlayerState;
use super::store::StateStore;
use super::types::{Command, LoadOutcome, PlaybackPhase, Reply, Screen};

pub(super) struct WorkerConfig {
    pub progress_interval: Duration,
    pub library_generation: Arc<AtomicU64>,
}

pub(super) fn spawn_worker<E, F>(
    make_engine: F,
    rx: Receiver<Command>,
    tx: Sender<Command>,
    store: Arc<StateStore>,
    config: WorkerConfig,
) -> JoinHandle<()>
where
    E: MediaEngine + 'static,
    F: FnOnce() -> E + Send + 'static,
{
    thread::spawn(move || {
        // The engine is created here: native output streams are often not `Send`.
        let worker = Worker {
            engine: make_engine(),
            state: (*store.snapshot()).clone(),
            store,
            tx,
            session: 0,
            next_tick: None,
            config,
        };
        worker.run(rx);
    })
}

struct Worker<E> {
    engine: E,
    state: PlayerState,
    store: Arc<StateStore>,
    /// Handed to the engine inside completion signals.
    tx: Sender<Command>,
    /// Bumped on every engine load; completions from older loads are stale.
    session: u64,
    /// Progress timer deadline. `None` while the timer is stopped.
    next_tick: Option<Instant>,
    config: WorkerConfig,
}

impl<E: MediaEngine> Worker<E> {
    fn run(mut self, rx: Receiver<Command>) {
        loop {
            // Keep sampling even when commands arrive back to back.
            if self.next_tick.is_some_and(|d| Instant::now() >= d) {
                self.on_tick();
            }

            let cmd = match self.next_tick {
                Some(deadline) => {
                    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                        Ok(cmd) => cmd,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match rx.recv() {
                    Ok(cmd) => cmd,
                    Err(_) => break,
                },
            };

            match cmd {
                Command::Shutdown => break,
                Command::Navigate(screen, reply) => self.respond(reply, |w| w.navigate(screen)),
                Command::Play(track, reply) => self.respond(reply, |w| w.play_track(track)),
                Command::TogglePause(reply) => self.respond(reply, Self::toggle_pause),
                Command::Seek(fraction, reply) => self.respond(reply, |w| w.seek(fraction)),
                Command::Next(reply) => self.respond(reply, Self::play_next),
                Command::Previous(reply) => self.respond(reply, Self::play_previous),
                Command::ToggleShuffle(reply) => self.respond(reply, Self::toggle_shuffle),
                Command::LibraryLoaded {
                    generation,
                    result,
                    reply,
                } => {
                    let outcome = self.apply_library(generation, result);
                    self.commit();
                    let _ = reply.send(outcome);
                }
                Command::TrackFinished { session } => {
                    self.on_track_finished(session);
                    self.commit();
                }
            }
        }

        self.stop_ticks();
        self.engine.release();
        debug!("playback worker stopped");
    }

    /// Apply one command, publish the result, then answer the caller.
    fn respond(&mut self, reply: Reply, f: impl FnOnce(&mut Self) -> Result<(), PlayerError>) {
        let result = f(self);
        self.commit();
        let _ = reply.send(result);
    }

    fn commit(&self) {
        self.store.publish(&self.state);
    }

    fn start_ticks(&mut self) {
        if self.next_tick.is_none() {
            self.next_tick = Some(Instant::now() + self.config.progress_interval);
        }
    }

    fn stop_ticks(&mut self) {
        self.next_tick = None;
    }

    fn on_tick(&mut self) {
        self.next_tick = Some(Instant::now() + self.config.progress_interval);

        if !self.engine.is_loaded() || !self.engine.is_playing() {
            return;
        }
        let Some(total) = self.engine.duration().filter(|d| !d.is_zero()) else {
            return;
        };
        let elapsed = self.engine.position().as_secs_f64() / total.as_secs_f64();
        self.state.progress = elapsed.clamp(0.0, 1.0) as f32;
        self.commit();
    }

    fn navigate(&mut self, screen: Screen) -> Result<(), PlayerError> {
        debug!(%screen, "navigate");
        self.state.current_screen = screen;
        Ok(())
    }

    fn completion_signal(&self) -> CompletionSignal {
        let tx = self.tx.clone();
        let session = self.session;
        CompletionSignal::new(move || {
            let _ = tx.send(Command::TrackFinished { session });
        })
    }

    fn play_track(&mut self, track: Track) -> Result<(), PlayerError> {
        if !track.is_playable() {
            warn!(id = %track.id, "track has no content locator");
            return Err(EngineError::SourceUnavailable(format!(
                "{} has no content locator",
                track.id
            ))
            .into());
        }

        // At most one engine resource is live.
        self.engine.release();
        self.session += 1;

        if let Err(e) = self.engine.load(&track.locator, self.completion_signal()) {
            warn!(id = %track.id, error = %e, "failed to load track");
            self.engine.release();
            self.state.is_playing = false;
            self.state.phase = PlaybackPhase::Idle;
            self.stop_ticks();
            return Err(e.into());
        }
        self.engine.play();

        info!(id = %track.id, track = %track.display(), "now playing");
        push_recent(&mut self.state.recently_played, track.clone());
        self.state.now_playing = Some(track);
        self.state.is_playing = true;
        self.state.phase = PlaybackPhase::Playing;
        self.state.progress = 0.0;
        self.start_ticks();
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<(), PlayerError> {
        if !self.engine.is_loaded() {
            debug!("toggle pause with nothing loaded");
            return Ok(());
        }

        if self.engine.is_playing() {
            self.engine.pause();
            self.state.is_playing = false;
            self.state.phase = PlaybackPhase::Paused;
            self.stop_ticks();
        } else {
            self.engine.play();
            if !self.engine.is_playing() {
                debug!("resume ignored: source already drained");
                return Ok(());
            }
            self.state.is_playing = true;
            self.state.phase = PlaybackPhase::Playing;
            self.start_ticks();
        }
        Ok(())
    }

    fn seek(&mut self, fraction: f32) -> Result<(), PlayerError> {
        if !fraction.is_finite() {
            return Err(PlayerError::InvalidSeek(fraction));
        }
        let fraction = fraction.clamp(0.0, 1.0);

        if !self.engine.is_loaded() {
            return Ok(());
        }
        let Some(total) = self.engine.duration() else {
            debug!("seek ignored: track duration unknown");
            return Ok(());
        };

        let target = total.mul_f64(f64::from(fraction));
        self.engine.seek(target)?;
        // Optimistic: the next tick corrects it if the engine landed elsewhere.
        self.state.progress = fraction;
        Ok(())
    }

    fn play_next(&mut self) -> Result<(), PlayerError> {
        match next_position(&self.state.queue, self.state.now_playing.as_ref()) {
            Some(i) => self.play_track(self.state.queue[i].clone()),
            None => Ok(()),
        }
    }

    fn play_previous(&mut self) -> Result<(), PlayerError> {
        match previous_position(&self.state.queue, self.state.now_playing.as_ref()) {
            Some(i) => self.play_track(self.state.queue[i].clone()),
            None => Ok(()),
        }
    }

    fn toggle_shuffle(&mut self) -> Result<(), PlayerError> {
        self.state.shuffle = !self.state.shuffle;
        self.state.queue = if self.state.shuffle {
            shuffled(&self.state.queue, &mut rand::rng())
        } else {
            self.state.user_songs.clone()
        };
        debug!(shuffle = self.state.shuffle, "shuffle toggled");
        Ok(())
    }

    fn on_track_finished(&mut self, session: u64) {
        if session != self.session {
            debug!(session, current = self.session, "ignoring stale completion");
            return;
        }

        if let Err(e) = self.play_next() {
            warn!(error = %e, "auto-advance failed");
        }
        if !self.engine.is_playing() {
            // Queue empty or the next track would not load.
            self.state.is_playing = false;
            self.state.phase = if self.engine.is_loaded() {
                PlaybackPhase::Paused
            } else {
                PlaybackPhase::Idle
            };
            self.stop_ticks();
        }
    }

    fn apply_library(
        &mut self,
        generation: u64,
        result: Result<Vec<Track>, IndexError>,
    ) -> Result<LoadOutcome, PlayerError> {
        let latest = self.config.library_generation.load(Ordering::SeqCst);
        if generation < latest {
            debug!(generation, latest, "dropping superseded library load");
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(tracks) => {
                info!(count = tracks.len(), "library loaded");
                // Reloading resets the queue to library order even when shuffle is on.
                self.state.user_songs = tracks.clone();
                self.state.queue = tracks;
                Ok(LoadOutcome::Loaded(self.state.user_songs.len()))
            }
            Err(e) => {
                warn!(error = %e, "library load failed; keeping previous library");
                Err(e.into())
            }
        }
    }
}
