use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use super::state::PlayerState;

/// Latest published [`PlayerState`] plus the observers that want updates.
///
/// Only the playback worker publishes. Readers get cheap `Arc` snapshots.
pub struct StateStore {
    current: Mutex<Arc<PlayerState>>,
    subscribers: Mutex<Vec<Sender<Arc<PlayerState>>>>,
}

impl StateStore {
    pub fn new(initial: PlayerState) -> Self {
        Self {
            current: Mutex::new(Arc::new(initial)),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Arc<PlayerState> {
        match self.current.lock() {
            Ok(s) => Arc::clone(&s),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Register an observer. The current snapshot is delivered first.
    pub fn subscribe(&self) -> Receiver<Arc<PlayerState>> {
        let (tx, rx) = mpsc::channel();
        // Held across the snapshot so a concurrent publish either lands in
        // it or is delivered after it.
        let mut subs = match self.subscribers.lock() {
            Ok(subs) => subs,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = tx.send(self.snapshot());
        subs.push(tx);
        rx
    }

    /// Store `state` and notify observers. Returns `false` when nothing changed.
    pub(super) fn publish(&self, state: &PlayerState) -> bool {
        let snapshot = {
            let Ok(mut current) = self.current.lock() else {
                return false;
            };
            if current.same_as(state) {
                return false;
            }
            *current = Arc::new(state.clone());
            Arc::clone(&current)
        };

        if let Ok(mut subs) = self.subscribers.lock() {
            // Drop observers that hung up.
            subs.retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        }
        true
    }
}
