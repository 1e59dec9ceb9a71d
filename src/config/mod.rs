// src/config/mod.rs
//! Controller configuration and firmware profiles

pub mod constants;
pub mod loader;
pub mod profile;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};
pub use profile::*;

use serde::{Deserialize, Serialize};

/// Complete configuration of one controller instance
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Name of the remote ADC device
    #[serde(default = "defaults::device_name")]
    pub device_name: String,

    #[serde(default = "defaults::sample_rate_hz")]
    pub sample_rate_hz: u32,

    #[serde(default)]
    pub firmware: Firmware,

    /// Device buffer capacity override; the firmware default applies otherwise
    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default)]
    pub max_channels: Option<usize>,

    /// Readout override on top of the firmware's profile
    #[serde(default)]
    pub readout: Option<ReadoutMode>,

    /// Full custom profile; replaces the firmware preset
    #[serde(default)]
    pub profile: Option<DeviceProfile>,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn device_name() -> String { paths::DEFAULT_DEVICE_NAME.to_string() }
    pub fn sample_rate_hz() -> u32 { acquisition::DEFAULT_SAMPLE_RATE_HZ }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_name: defaults::device_name(),
            sample_rate_hz: defaults::sample_rate_hz(),
            firmware: Firmware::default(),
            max_length: None,
            max_channels: None,
            readout: None,
            profile: None,
        }
    }
}

impl ControllerConfig {
    /// Configuration for a given firmware with every other field defaulted
    pub fn for_firmware(firmware: Firmware) -> Self {
        Self {
            firmware,
            ..Self::default()
        }
    }

    /// Profile in effect: the custom profile if any, else the firmware preset,
    /// with the readout override applied
    pub fn device_profile(&self) -> DeviceProfile {
        let profile = self
            .profile
            .clone()
            .unwrap_or_else(|| self.firmware.profile());
        match self.readout {
            Some(readout) => profile.with_readout(readout),
            None => profile,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length.unwrap_or_else(|| self.firmware.max_length())
    }

    pub fn max_channels(&self) -> usize {
        self.max_channels.unwrap_or_else(|| self.firmware.max_channels())
    }

    /// One sample period, in seconds
    pub fn sample_period(&self) -> f64 {
        1.0 / f64::from(self.sample_rate_hz)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_name.trim().is_empty() {
            return Err(ConfigError::invalid("device_name", "must not be empty"));
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::invalid("sample_rate_hz", "must be greater than 0"));
        }
        if self.max_length() == 0 {
            return Err(ConfigError::invalid("max_length", "must be greater than 0"));
        }
        if self.max_channels() == 0 {
            return Err(ConfigError::invalid("max_channels", "must be greater than 0"));
        }
        self.device_profile().validate()
    }

    /// Get configuration summary
    pub fn get_summary(&self) -> ConfigSummary {
        let profile = self.device_profile();
        ConfigSummary {
            device_name: self.device_name.clone(),
            profile: profile.name,
            sample_rate_hz: self.sample_rate_hz,
            max_length: self.max_length(),
            max_channels: self.max_channels(),
            readout: profile.readout,
        }
    }
}

/// Configuration summary for display/logging
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub device_name: String,
    pub profile: String,
    pub sample_rate_hz: u32,
    pub max_length: usize,
    pub max_channels: usize,
    pub readout: ReadoutMode,
}
