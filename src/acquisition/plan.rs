// src/acquisition/plan.rs
//! Exposure planning: from (exposure time, repetitions) to raw sample counts

use crate::acquisition::averager::SampleAverager;
use crate::error::{AdcError, AdcResult};

/// Derived configuration of one acquisition cycle. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionPlan {
    pub exposure_time: f64,
    pub repetitions: usize,
    /// Raw samples averaged into one point
    pub window_size: usize,
    /// Raw samples the device must buffer for the whole cycle
    pub total_raw_points: usize,
    /// Minimum time between successive points, in seconds
    pub latency_time: f64,
    averager: SampleAverager,
}

impl AcquisitionPlan {
    /// Validate a request against the sample rate and the device buffer capacity.
    ///
    /// # Errors
    ///
    /// - [`AdcError::InvalidExposure`] if the exposure is shorter than one
    ///   sample period or not finite
    /// - [`AdcError::InvalidRepetitions`] for zero repetitions
    /// - [`AdcError::BufferOverflow`] if the raw point count exceeds `max_length`
    pub fn compute(
        exposure_time: f64,
        repetitions: usize,
        sample_rate_hz: u32,
        max_length: usize,
    ) -> AdcResult<Self> {
        let rate = f64::from(sample_rate_hz);
        let sample_period = 1.0 / rate;

        if !exposure_time.is_finite() || exposure_time < sample_period {
            return Err(AdcError::InvalidExposure {
                exposure: exposure_time,
                min: sample_period,
            });
        }
        if repetitions == 0 {
            return Err(AdcError::InvalidRepetitions);
        }

        // Saturating float-to-int cast; absurd exposures end up as overflow below
        let window_size = (exposure_time * rate).round() as usize;
        let averager = SampleAverager::new(window_size).ok_or(AdcError::InvalidExposure {
            exposure: exposure_time,
            min: sample_period,
        })?;

        let total_raw_points = window_size.checked_mul(repetitions).unwrap_or(usize::MAX);
        if total_raw_points > max_length {
            return Err(AdcError::BufferOverflow {
                requested: total_raw_points,
                capacity: max_length,
            });
        }

        Ok(Self {
            exposure_time,
            repetitions,
            window_size,
            total_raw_points,
            latency_time: sample_period.max(exposure_time),
            averager,
        })
    }

    pub fn averager(&self) -> SampleAverager {
        self.averager
    }
}
