//! Per-requester menu session state.

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingWindowChoice,
    Processing,
}

/// Idle → AwaitingWindowChoice (menu shown) → Processing (choice made) → Idle (run finished).
#[derive(Debug, Default)]
pub struct SessionRegistry {
    states: Mutex<HashMap<i64, SessionState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, requester: i64) -> SessionState {
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&requester)
            .copied()
            .unwrap_or_default()
    }

    /// Menu shown. Leaves a Processing session untouched.
    pub fn await_choice(&self, requester: i64) -> SessionState {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        let state = states.entry(requester).or_default();
        if *state != SessionState::Processing {
            *state = SessionState::AwaitingWindowChoice;
        }
        *state
    }

    /// Moves to Processing unless a run is already in progress. Idle is accepted so menus
    /// sent before a restart still work.
    pub fn begin_processing(&self, requester: i64) -> bool {
        let mut states = self.states.lock().unwrap_or_else(|e| e.into_inner());
        let state = states.entry(requester).or_default();
        if *state == SessionState::Processing {
            return false;
        }
        *state = SessionState::Processing;
        true
    }

    pub fn finish(&self, requester: i64) {
        self.states
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&requester);
    }
}
