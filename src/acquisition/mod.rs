// src/acquisition/mod.rs
//! Acquisition state machine, buffer bookkeeping and channel management

pub mod averager;
pub mod controller;
pub mod parameters;
pub mod plan;
pub mod readout;
pub mod registry;
pub mod state;
pub mod tracker;

pub use averager::*;
pub use controller::*;
pub use parameters::*;
pub use plan::*;
pub use readout::*;
pub use registry::*;
pub use state::*;
pub use tracker::*;
