// src/acquisition/parameters.rs
//! Closed sets of named parameters accepted from the sequencer
//!
//! Names are matched case-insensitively. Anything outside these sets is
//! rejected with [`AdcError::UnknownParameter`].

use crate::error::AdcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-channel extra parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelParameter {
    /// Name of the raw data array attribute backing the channel
    Source,
}

impl FromStr for ChannelParameter {
    type Err = AdcError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "source" | "ads_symbol_array" | "attr_array" => Ok(ChannelParameter::Source),
            _ => Err(AdcError::UnknownParameter(name.to_string())),
        }
    }
}

/// Standard per-axis parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisParameter {
    /// Length of a trace readout
    Shape,
    Synchronization,
}

impl FromStr for AxisParameter {
    type Err = AdcError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "shape" => Ok(AxisParameter::Shape),
            "synchronization" => Ok(AxisParameter::Synchronization),
            _ => Err(AdcError::UnknownParameter(name.to_string())),
        }
    }
}

/// Controller-wide parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerParameter {
    /// Minimum time between successive exposures, in seconds
    LatencyTime,
}

impl FromStr for ControllerParameter {
    type Err = AdcError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "latency_time" => Ok(ControllerParameter::LatencyTime),
            _ => Err(AdcError::UnknownParameter(name.to_string())),
        }
    }
}

/// How the sequencer synchronizes with the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Synchronization {
    /// One software trigger per point; the whole trace is read at the end
    SoftwareTrigger,
    /// A single software start; points are streamed out as they complete
    SoftwareStart,
}

impl fmt::Display for Synchronization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Synchronization::SoftwareTrigger => f.write_str("software-trigger"),
            Synchronization::SoftwareStart => f.write_str("software-start"),
        }
    }
}

/// Value of an axis parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisValue {
    Shape(Vec<usize>),
    Synchronization(Synchronization),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parameter_aliases() {
        for name in ["source", "ads_symbol_array", "ADS_Symbol_Array", "attr_array"] {
            assert_eq!(name.parse::<ChannelParameter>().unwrap(), ChannelParameter::Source);
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        match "gain".parse::<ChannelParameter>() {
            Err(AdcError::UnknownParameter(name)) => assert_eq!(name, "gain"),
            other => panic!("Expected unknown parameter, got {:?}", other),
        }
        assert!("velocity".parse::<AxisParameter>().is_err());
        assert!("acquisition_mode".parse::<ControllerParameter>().is_err());
    }

    #[test]
    fn test_standard_parameters() {
        assert_eq!("Shape".parse::<AxisParameter>().unwrap(), AxisParameter::Shape);
        assert_eq!(
            "latency_time".parse::<ControllerParameter>().unwrap(),
            ControllerParameter::LatencyTime
        );
    }
}
