// src/acquisition/averager.rs
//! Reduction of raw sample runs into averaged exposure values

/// Averages contiguous, non-overlapping windows of raw samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAverager {
    window_size: usize,
}

impl SampleAverager {
    /// Returns `None` for a zero window size
    pub fn new(window_size: usize) -> Option<Self> {
        (window_size > 0).then_some(Self { window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Reduce `samples` to one arithmetic mean per full window, in order.
    /// A trailing partial window is ignored.
    pub fn reduce(&self, samples: &[f64]) -> Vec<f64> {
        let divisor = self.window_size as f64;
        samples
            .chunks_exact(self.window_size)
            .map(|window| window.iter().sum::<f64>() / divisor)
            .collect()
    }

    /// Number of complete windows contained in `sample_count` raw samples
    pub fn full_windows(&self, sample_count: usize) -> usize {
        sample_count / self.window_size
    }
}
