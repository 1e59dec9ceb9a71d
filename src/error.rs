// src/error.rs
//! Unified error handling for the ADC synchronization core
//!
//! Configuration and registry errors are raised before any device write.
//! Unrecognized device state codes are not errors: they surface as
//! [`ControllerState::Fault`](crate::acquisition::ControllerState::Fault) through polling.

use crate::acquisition::{ChannelId, ControllerState};
use crate::config::ConfigError;
use crate::gateway::{AttributeValue, GatewayError};
use thiserror::Error;

/// Unified error type for controller operations
#[derive(Debug, Error)]
pub enum AdcError {
    /// Requested exposure is shorter than one sample period
    #[error("Exposure time {exposure}s is below the minimum of {min}s")]
    InvalidExposure { exposure: f64, min: f64 },

    #[error("Repetition count must be at least 1")]
    InvalidRepetitions,

    /// Computed raw point count exceeds the device buffer
    #[error("Maximum number of acquisitions is {capacity}, requested {requested}")]
    BufferOverflow { requested: usize, capacity: usize },

    #[error("Unknown channel {0}")]
    UnknownChannel(ChannelId),

    #[error("Channel {0} is already registered")]
    DuplicateChannel(ChannelId),

    #[error("Controller supports at most {limit} channels")]
    TooManyChannels { limit: usize },

    /// Operation not valid for the current controller state
    #[error("Cannot {operation} while controller is {state}")]
    InvalidState {
        operation: &'static str,
        state: ControllerState,
    },

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Device profile '{profile}' does not support {operation}")]
    Unsupported {
        operation: &'static str,
        profile: String,
    },

    /// Device returned a value of the wrong shape for a known attribute
    #[error("Attribute '{attribute}' returned unusable value {value}")]
    MalformedAttribute {
        attribute: String,
        value: AttributeValue,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for controller operations
pub type AdcResult<T> = Result<T, AdcError>;
