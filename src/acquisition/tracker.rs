// src/acquisition/tracker.rs
//! Read-progress bookkeeping against the device buffer index

use crate::acquisition::averager::SampleAverager;
use std::ops::Range;

/// Block of complete windows that became available since the last read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    pub first: usize,
    pub end: usize,
    pub window_size: usize,
}

impl WindowRange {
    /// Number of windows in the range
    pub fn len(&self) -> usize {
        self.end - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.first
    }

    /// Raw sample offsets covered by the range
    pub fn samples(&self) -> Range<usize> {
        self.first * self.window_size..self.end * self.window_size
    }
}

/// Outcome of comparing a fresh buffer index with the consumed position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexProgress {
    /// New complete windows are ready
    Available(WindowRange),
    /// No complete window since the last read
    Stale,
    /// The index moved behind data already returned
    Regressed { full_windows: usize, consumed: usize },
}

/// Tracks how many averaging windows of one channel have been handed out.
///
/// The count only moves forward; [`reset`](Self::reset) is the only way back
/// to zero and happens when a new acquisition is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferIndexTracker {
    consumed_windows: usize,
}

impl BufferIndexTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consumed_windows(&self) -> usize {
        self.consumed_windows
    }

    /// Compare the raw buffer `index` against the consumed position.
    ///
    /// Only complete windows of `averager` count; `limit` caps the window
    /// count at the number of configured repetitions.
    pub fn progress(&self, index: usize, averager: SampleAverager, limit: usize) -> IndexProgress {
        let full_windows = averager.full_windows(index).min(limit);
        if full_windows > self.consumed_windows {
            IndexProgress::Available(WindowRange {
                first: self.consumed_windows,
                end: full_windows,
                window_size: averager.window_size(),
            })
        } else if full_windows < self.consumed_windows {
            IndexProgress::Regressed {
                full_windows,
                consumed: self.consumed_windows,
            }
        } else {
            IndexProgress::Stale
        }
    }

    /// Mark `range` as delivered
    pub fn advance(&mut self, range: &WindowRange) {
        debug_assert_eq!(range.first, self.consumed_windows);
        self.consumed_windows = self.consumed_windows.max(range.end);
    }

    pub fn reset(&mut self) {
        self.consumed_windows = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tens() -> SampleAverager {
        SampleAverager::new(10).unwrap()
    }

    #[test]
    fn test_partial_windows_not_available() {
        let tracker = BufferIndexTracker::new();
        assert_eq!(tracker.progress(9, tens(), 5), IndexProgress::Stale);
        assert_eq!(tracker.progress(0, tens(), 5), IndexProgress::Stale);
    }

    #[test]
    fn test_progression_through_acquisition() {
        let mut tracker = BufferIndexTracker::new();

        let range = match tracker.progress(23, tens(), 5) {
            IndexProgress::Available(range) => range,
            other => panic!("Expected windows, got {:?}", other),
        };
        assert_eq!(range.len(), 2);
        assert_eq!(range.samples(), 0..20);
        tracker.advance(&range);

        assert_eq!(tracker.progress(23, tens(), 5), IndexProgress::Stale);

        let range = match tracker.progress(50, tens(), 5) {
            IndexProgress::Available(range) => range,
            other => panic!("Expected windows, got {:?}", other),
        };
        assert_eq!(range.len(), 3);
        assert_eq!(range.samples(), 20..50);
        tracker.advance(&range);
        assert_eq!(tracker.consumed_windows(), 5);
    }

    #[test]
    fn test_index_capped_at_repetitions() {
        let tracker = BufferIndexTracker::new();
        match tracker.progress(80, tens(), 5) {
            IndexProgress::Available(range) => assert_eq!(range.end, 5),
            other => panic!("Expected windows, got {:?}", other),
        }
    }

    #[test]
    fn test_regression_reported() {
        let mut tracker = BufferIndexTracker::new();
        if let IndexProgress::Available(range) = tracker.progress(40, tens(), 5) {
            tracker.advance(&range);
        }
        assert_eq!(
            tracker.progress(15, tens(), 5),
            IndexProgress::Regressed { full_windows: 1, consumed: 4 }
        );

        tracker.reset();
        assert_eq!(tracker.consumed_windows(), 0);
    }
}
