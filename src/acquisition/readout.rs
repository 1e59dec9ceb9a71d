// src/acquisition/readout.rs
//! Values handed back to the sequencer

use crate::config::constants::acquisition::UNPOPULATED_SENTINEL;

/// Result of a mode-dispatched channel read
#[derive(Debug, Clone, PartialEq)]
pub enum Readout {
    /// Averaged points that completed since the previous read
    Points(Vec<f64>),
    /// Full raw trace of the finished acquisition
    Trace(Snapshot),
    /// Trace readout requested before the device reported ready
    Pending,
}

/// Populated-entry count disagreeing with the configured point count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub measured: usize,
    pub configured: usize,
}

/// Single-shot read of a whole data array
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Exactly `configured` values; unwritten slots hold the sentinel
    pub data: Vec<f64>,
    /// Entries of the whole device array that differ from the sentinel
    pub populated: usize,
    /// Set when the device wrote fewer or more entries than configured
    pub mismatch: Option<CountMismatch>,
}

impl Snapshot {
    /// Count the written entries of a full device array, then fit the data
    /// to `configured` entries
    pub fn from_raw(mut data: Vec<f64>, configured: usize) -> Self {
        let populated = data.iter().filter(|&&v| v != UNPOPULATED_SENTINEL).count();
        data.resize(configured, UNPOPULATED_SENTINEL);
        let mismatch = (populated != configured).then_some(CountMismatch {
            measured: populated,
            configured,
        });
        Self {
            data,
            populated,
            mismatch,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.mismatch.is_none()
    }
}
