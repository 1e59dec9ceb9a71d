//! ADC-Sync: synchronization between a free-running ADC ring buffer and a
//! point-based acquisition sequencer
//!
//! The remote device samples continuously into a buffer and exposes its
//! current write index. This library turns that advancing index into
//! averaged, non-overlapping points that are delivered exactly once and in
//! order. It features:
//!
//! - A table-driven acquisition state machine shared by all firmware variants
//! - Buffer-index tracking and window averaging per channel
//! - A typed channel registry with explicit parameter names
//! - Layered configuration and an in-memory device simulator
//!
//! # Quick Start
//!
//! ```rust
//! use adc_sync::acquisition::{AcquisitionController, ChannelId, ControllerState};
//! use adc_sync::config::{ControllerConfig, DeviceProfile};
//! use adc_sync::gateway::simulator::SimulatedAdc;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), adc_sync::AdcError> {
//! let device = Arc::new(SimulatedAdc::new(DeviceProfile::buffered()));
//! let mut controller = AcquisitionController::connect(device.clone(), ControllerConfig::default())?;
//!
//! controller.add_channel(ChannelId(1))?;
//! controller.configure(0.01, 5)?; // 10 raw samples per point, 5 points
//! controller.start()?;
//!
//! device.feed("MAIN.ADC1.valuebuffer.values", &[1.0; 23]);
//! assert_eq!(controller.poll()?.state, ControllerState::Acquiring);
//! assert_eq!(controller.read_available(ChannelId(1))?, vec![1.0, 1.0]);
//!
//! controller.stop()?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod acquisition;
pub mod config;
pub mod error;
pub mod gateway;

// Re-export commonly used types for convenience
pub use crate::acquisition::{
    AcquisitionController, AcquisitionPlan, ChannelId, ControllerState, Readout, Snapshot, Status,
};
pub use crate::config::{ConfigLoader, ControllerConfig, DeviceProfile, Firmware, ReadoutMode};
pub use crate::error::{AdcError, AdcResult};
pub use crate::gateway::{AttributeGateway, AttributeValue, GatewayError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
