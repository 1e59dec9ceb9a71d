// src/gateway/simulator.rs
//! In-memory ADC device for tests and demos
//!
//! Models the attribute surface of a device profile: a fixed-size,
//! zero-filled data array per source, one shared buffer index, a state code
//! that follows the start/stop signals, and a log of every write.

use crate::config::constants::acquisition::{DEFAULT_MAX_LENGTH, UNPOPULATED_SENTINEL};
use crate::config::DeviceProfile;
use crate::gateway::{AttributeGateway, AttributeValue, GatewayError};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct DeviceState {
    scalars: HashMap<String, AttributeValue>,
    arrays: HashMap<String, Vec<f64>>,
    writes: Vec<(String, AttributeValue)>,
    reads: HashMap<String, usize>,
    index: usize,
    offline: bool,
}

/// Simulated remote ADC implementing [`AttributeGateway`]
#[derive(Debug)]
pub struct SimulatedAdc {
    profile: DeviceProfile,
    capacity: usize,
    state: Mutex<DeviceState>,
}

impl SimulatedAdc {
    pub fn new(profile: DeviceProfile) -> Self {
        Self::with_capacity(profile, DEFAULT_MAX_LENGTH)
    }

    /// Device whose data arrays hold `capacity` samples
    pub fn with_capacity(profile: DeviceProfile, capacity: usize) -> Self {
        let mut state = DeviceState::default();

        state
            .scalars
            .insert(profile.buffer_size_attr.clone(), AttributeValue::Int(0));
        if let Some(index_attr) = &profile.buffer_index_attr {
            state.scalars.insert(index_attr.clone(), AttributeValue::Int(0));
        }
        let sequences = [&profile.init, &profile.prepare, &profile.start, &profile.stop];
        for step in sequences.into_iter().flatten() {
            state.scalars.insert(step.attribute.clone(), step.value);
        }
        // The state attribute may share its name with a signal attribute
        let ready = profile.state_codes.ready.first().copied().unwrap_or_default();
        state
            .scalars
            .insert(profile.state_attr.clone(), AttributeValue::Int(ready));
        state.arrays.insert(profile.default_source.clone(), Vec::new());

        Self {
            profile,
            capacity,
            state: Mutex::new(state),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Register an additional data array attribute
    pub fn add_source(&self, name: &str) {
        self.state.lock().arrays.entry(name.to_string()).or_default();
    }

    /// Force a raw state code, e.g. one outside the profile's table
    pub fn set_state_code(&self, code: i64) {
        let attr = self.profile.state_attr.clone();
        self.state.lock().scalars.insert(attr, AttributeValue::Int(code));
    }

    pub fn set_scalar(&self, name: &str, value: AttributeValue) {
        self.state.lock().scalars.insert(name.to_string(), value);
    }

    pub fn scalar(&self, name: &str) -> Option<AttributeValue> {
        self.state.lock().scalars.get(name).copied()
    }

    /// Write samples into a data array without moving the buffer index
    pub fn append_samples(&self, source: &str, samples: &[f64]) {
        let mut state = self.state.lock();
        let array = state.arrays.entry(source.to_string()).or_default();
        let room = self.capacity.saturating_sub(array.len());
        array.extend(samples.iter().take(room));
    }

    /// Move the shared buffer index forward. The device returns to a ready
    /// code once the configured buffer size is reached.
    pub fn advance_index(&self, count: usize) {
        let mut state = self.state.lock();
        let next = (state.index + count).min(self.capacity);
        self.store_index(&mut state, next);

        let target = state
            .scalars
            .get(&self.profile.buffer_size_attr)
            .and_then(AttributeValue::as_usize)
            .unwrap_or(0);
        if target > 0 && next >= target {
            self.enter_ready(&mut state);
        }
    }

    /// Append samples and advance the index by the same amount
    pub fn feed(&self, source: &str, samples: &[f64]) {
        self.append_samples(source, samples);
        self.advance_index(samples.len());
    }

    /// Rewind the buffer index, as a device reset would
    pub fn set_index(&self, index: usize) {
        let mut state = self.state.lock();
        self.store_index(&mut state, index.min(self.capacity));
    }

    /// Make every call fail with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// All writes received so far, in order
    pub fn writes(&self) -> Vec<(String, AttributeValue)> {
        self.state.lock().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.lock().writes.clear();
    }

    /// Number of reads of `name` since creation
    pub fn read_count(&self, name: &str) -> usize {
        self.state.lock().reads.get(name).copied().unwrap_or(0)
    }

    fn enter_ready(&self, state: &mut DeviceState) {
        if let Some(&code) = self.profile.state_codes.ready.first() {
            state
                .scalars
                .insert(self.profile.state_attr.clone(), AttributeValue::Int(code));
        }
    }

    fn enter_acquiring(&self, state: &mut DeviceState) {
        if let Some(&code) = self.profile.state_codes.acquiring.first() {
            state
                .scalars
                .insert(self.profile.state_attr.clone(), AttributeValue::Int(code));
        }
        self.store_index(state, 0);
        for array in state.arrays.values_mut() {
            array.clear();
        }
    }

    fn store_index(&self, state: &mut DeviceState, index: usize) {
        state.index = index;
        if let Some(index_attr) = &self.profile.buffer_index_attr {
            state
                .scalars
                .insert(index_attr.clone(), AttributeValue::Int(index as i64));
        }
    }

    fn check_online(state: &DeviceState) -> Result<(), GatewayError> {
        if state.offline {
            Err(GatewayError::Transport("device offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl AttributeGateway for SimulatedAdc {
    fn read_scalar(&self, name: &str) -> Result<AttributeValue, GatewayError> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        *state.reads.entry(name.to_string()).or_default() += 1;
        state
            .scalars
            .get(name)
            .copied()
            .ok_or_else(|| GatewayError::UnknownAttribute(name.to_string()))
    }

    fn write_scalar(&self, name: &str, value: AttributeValue) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        if !state.scalars.contains_key(name) {
            return Err(GatewayError::UnknownAttribute(name.to_string()));
        }
        debug!("SimulatedAdc: {} <- {}", name, value);
        state.scalars.insert(name.to_string(), value);
        state.writes.push((name.to_string(), value));

        let step = (name, value);
        let matches_last = |steps: &[crate::config::SignalStep]| {
            steps
                .last()
                .is_some_and(|last| last.attribute == step.0 && last.value == step.1)
        };
        if matches_last(&self.profile.start) {
            self.enter_acquiring(&mut state);
        } else if matches_last(&self.profile.stop) {
            self.enter_ready(&mut state);
        }
        Ok(())
    }

    fn read_array(&self, name: &str, count: usize) -> Result<Vec<f64>, GatewayError> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        *state.reads.entry(name.to_string()).or_default() += 1;
        if count > self.capacity {
            return Err(GatewayError::ShortRead {
                attribute: name.to_string(),
                requested: count,
                received: self.capacity,
            });
        }
        let array = state
            .arrays
            .get(name)
            .ok_or_else(|| GatewayError::UnknownAttribute(name.to_string()))?;
        let mut data: Vec<f64> = array.iter().take(count).copied().collect();
        data.resize(count, UNPOPULATED_SENTINEL);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::buffered;

    #[test]
    fn test_seeded_attributes() {
        let device = SimulatedAdc::new(DeviceProfile::buffered());
        assert_eq!(device.read_scalar(buffered::ATTR_STATE).unwrap(), AttributeValue::Int(1));
        assert_eq!(device.read_scalar(buffered::ATTR_BUFFER_INDEX).unwrap(), AttributeValue::Int(0));
        assert!(matches!(
            device.read_scalar("ADC9BufferState"),
            Err(GatewayError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_start_and_completion() {
        let device = SimulatedAdc::new(DeviceProfile::buffered());
        device.write_scalar(buffered::ATTR_BUFFER_SIZE, AttributeValue::Int(20)).unwrap();
        device.write_scalar(buffered::ATTR_START, AttributeValue::Bool(true)).unwrap();
        assert_eq!(device.read_scalar(buffered::ATTR_STATE).unwrap(), AttributeValue::Int(2));

        device.feed(buffered::DEFAULT_SOURCE, &[1.0; 15]);
        assert_eq!(device.read_scalar(buffered::ATTR_STATE).unwrap(), AttributeValue::Int(2));
        device.feed(buffered::DEFAULT_SOURCE, &[1.0; 5]);
        assert_eq!(device.read_scalar(buffered::ATTR_STATE).unwrap(), AttributeValue::Int(1));
        assert_eq!(device.read_scalar(buffered::ATTR_BUFFER_INDEX).unwrap(), AttributeValue::Int(20));
    }

    #[test]
    fn test_arrays_are_zero_filled() {
        let device = SimulatedAdc::with_capacity(DeviceProfile::buffered(), 8);
        device.append_samples(buffered::DEFAULT_SOURCE, &[2.0, 3.0]);
        assert_eq!(
            device.read_array(buffered::DEFAULT_SOURCE, 4).unwrap(),
            vec![2.0, 3.0, 0.0, 0.0]
        );
        assert_eq!(device.read_array_slice(buffered::DEFAULT_SOURCE, 1, 3).unwrap(), vec![3.0, 0.0]);
        assert!(device.read_array(buffered::DEFAULT_SOURCE, 9).is_err());
    }

    #[test]
    fn test_offline_device() {
        let device = SimulatedAdc::new(DeviceProfile::buffered());
        device.set_offline(true);
        assert!(matches!(
            device.write_scalar(buffered::ATTR_STOP, AttributeValue::Bool(true)),
            Err(GatewayError::Transport(_))
        ));
        assert!(device.writes().is_empty());
    }

    #[test]
    fn test_start_flag_signals() {
        let profile = DeviceProfile::start_flag();
        let state_attr = profile.state_attr.clone();
        let device = SimulatedAdc::new(profile);

        device.write_scalar(&state_attr, AttributeValue::Int(0)).unwrap();
        device.write_scalar(&state_attr, AttributeValue::Int(1)).unwrap();
        assert_eq!(device.read_scalar(&state_attr).unwrap(), AttributeValue::Int(1));
    }
}
