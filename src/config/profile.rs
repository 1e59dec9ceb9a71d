// src/config/profile.rs
//! Device profiles describing one ADC firmware variant
//!
//! Everything that differs between firmware versions (attribute names, the
//! state-code table, the exact write sequences for prepare/start/stop) lives
//! here as data, so a single controller implementation serves all variants.

use crate::acquisition::{StateCodeTable, Synchronization};
use crate::config::constants::{acquisition, buffered, start_flag};
use crate::config::ConfigError;
use crate::gateway::AttributeValue;
use serde::{Deserialize, Serialize};

/// Known firmware variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Firmware {
    /// Ring buffer with index and state attributes
    #[default]
    Buffered,
    /// Older firmware driven by a single start flag
    StartFlag,
}

impl Firmware {
    pub fn profile(&self) -> DeviceProfile {
        match self {
            Firmware::Buffered => DeviceProfile::buffered(),
            Firmware::StartFlag => DeviceProfile::start_flag(),
        }
    }

    pub fn max_length(&self) -> usize {
        match self {
            Firmware::Buffered => acquisition::DEFAULT_MAX_LENGTH,
            Firmware::StartFlag => acquisition::START_FLAG_MAX_LENGTH,
        }
    }

    pub fn max_channels(&self) -> usize {
        match self {
            Firmware::Buffered => acquisition::DEFAULT_MAX_CHANNELS,
            Firmware::StartFlag => acquisition::START_FLAG_MAX_CHANNELS,
        }
    }
}

/// How channel data is handed to the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadoutMode {
    /// Averaged points streamed out as windows complete
    Buffered,
    /// The whole raw trace, read once the device is ready
    Trace,
}

impl ReadoutMode {
    /// Sequencer synchronization that matches this readout
    pub fn synchronization(&self) -> Synchronization {
        match self {
            ReadoutMode::Buffered => Synchronization::SoftwareStart,
            ReadoutMode::Trace => Synchronization::SoftwareTrigger,
        }
    }
}

/// A single attribute write in a signal sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalStep {
    pub attribute: String,
    pub value: AttributeValue,
}

impl SignalStep {
    pub fn new(attribute: &str, value: impl Into<AttributeValue>) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }
}

/// Attribute layout and signalling of one firmware variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: String,
    /// Receives the total raw point count on configure
    pub buffer_size_attr: String,
    /// Current write position of the device; absent on firmware without one
    #[serde(default)]
    pub buffer_index_attr: Option<String>,
    pub state_attr: String,
    pub state_codes: StateCodeTable,
    /// Written once when the controller connects
    #[serde(default)]
    pub init: Vec<SignalStep>,
    pub prepare: Vec<SignalStep>,
    pub start: Vec<SignalStep>,
    pub stop: Vec<SignalStep>,
    pub readout: ReadoutMode,
    pub default_source: String,
}

impl DeviceProfile {
    /// Ring-buffer firmware with index, state and one-shot signal attributes
    pub fn buffered() -> Self {
        Self {
            name: "buffered".to_string(),
            buffer_size_attr: buffered::ATTR_BUFFER_SIZE.to_string(),
            buffer_index_attr: Some(buffered::ATTR_BUFFER_INDEX.to_string()),
            state_attr: buffered::ATTR_STATE.to_string(),
            state_codes: StateCodeTable::new(buffered::READY_CODES, buffered::ACQUIRING_CODES),
            init: Vec::new(),
            prepare: vec![SignalStep::new(buffered::ATTR_PREPARE, true)],
            start: vec![SignalStep::new(buffered::ATTR_START, true)],
            stop: vec![SignalStep::new(buffered::ATTR_STOP, true)],
            readout: ReadoutMode::Buffered,
            default_source: buffered::DEFAULT_SOURCE.to_string(),
        }
    }

    /// Start-flag firmware: the start attribute doubles as the state code
    pub fn start_flag() -> Self {
        Self {
            name: "start-flag".to_string(),
            buffer_size_attr: start_flag::ATTR_BUFFER_SIZE.to_string(),
            buffer_index_attr: None,
            state_attr: start_flag::ATTR_START.to_string(),
            state_codes: StateCodeTable::new(start_flag::READY_CODES, start_flag::ACQUIRING_CODES),
            init: vec![
                SignalStep::new(start_flag::ATTR_FILTER_CH1, start_flag::FILTER_50HZ),
                SignalStep::new(start_flag::ATTR_FILTER_CH2, start_flag::FILTER_50HZ),
                SignalStep::new(start_flag::ATTR_FILTER_EXECUTE, 0),
                SignalStep::new(start_flag::ATTR_FILTER_EXECUTE, 1),
            ],
            prepare: vec![
                SignalStep::new(start_flag::ATTR_RESET, 1),
                SignalStep::new(start_flag::ATTR_RESET, 0),
            ],
            start: vec![
                SignalStep::new(start_flag::ATTR_START, 0),
                SignalStep::new(start_flag::ATTR_START, 1),
            ],
            stop: vec![SignalStep::new(start_flag::ATTR_START, 0)],
            readout: ReadoutMode::Trace,
            default_source: start_flag::DEFAULT_SOURCE.to_string(),
        }
    }

    pub fn with_readout(mut self, readout: ReadoutMode) -> Self {
        self.readout = readout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("profile.buffer_size_attr", &self.buffer_size_attr),
            ("profile.state_attr", &self.state_attr),
            ("profile.default_source", &self.default_source),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        if self.buffer_index_attr.as_deref().is_some_and(|attr| attr.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "profile.buffer_index_attr",
                "must not be empty when present",
            ));
        }

        if self.state_codes.ready.is_empty() {
            return Err(ConfigError::invalid(
                "profile.state_codes.ready",
                "at least one ready code is required",
            ));
        }

        let overlap = self.state_codes.overlapping_codes();
        if !overlap.is_empty() {
            return Err(ConfigError::invalid(
                "profile.state_codes",
                format!("codes {:?} are both ready and acquiring", overlap),
            ));
        }

        if self.start.is_empty() || self.stop.is_empty() {
            return Err(ConfigError::invalid(
                "profile.start",
                "start and stop sequences must not be empty",
            ));
        }

        Ok(())
    }
}
