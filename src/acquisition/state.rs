// src/acquisition/state.rs
//! Controller states and the device state-code mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state reported to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerState {
    /// Nothing configured since the controller was created
    Idle,
    /// Buffer size and prepare signal written, not started
    Prepared,
    /// Device is filling its buffer
    Acquiring,
    /// Device is idle between runs
    Ready,
    /// Device reported a state code outside the mapping
    Fault,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Idle => "Idle",
            ControllerState::Prepared => "Prepared",
            ControllerState::Acquiring => "Acquiring",
            ControllerState::Ready => "Ready",
            ControllerState::Fault => "Fault",
        };
        f.write_str(name)
    }
}

/// State paired with a human-readable status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: ControllerState,
    pub message: String,
}

impl Status {
    pub fn new(state: ControllerState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }

    pub fn idle() -> Self {
        Self::new(ControllerState::Idle, "Controller idle")
    }
}

/// Table mapping raw device state codes onto controller states.
///
/// Firmware variants disagree on which codes mean what, so the mapping is
/// data carried by the device profile rather than logic at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCodeTable {
    pub ready: Vec<i64>,
    pub acquiring: Vec<i64>,
}

impl StateCodeTable {
    pub fn new(ready: &[i64], acquiring: &[i64]) -> Self {
        Self {
            ready: ready.to_vec(),
            acquiring: acquiring.to_vec(),
        }
    }

    /// Map a raw code. Unmapped codes yield `Fault` with the code in the message.
    pub fn resolve(&self, code: i64) -> Status {
        if self.ready.contains(&code) {
            Status::new(ControllerState::Ready, "Detector ready")
        } else if self.acquiring.contains(&code) {
            Status::new(ControllerState::Acquiring, "Detector acquiring")
        } else {
            Status::new(
                ControllerState::Fault,
                format!("Unexpected device state code: {}", code),
            )
        }
    }

    /// Codes that appear in both sets
    pub fn overlapping_codes(&self) -> Vec<i64> {
        self.ready
            .iter()
            .filter(|code| self.acquiring.contains(code))
            .copied()
            .collect()
    }
}
