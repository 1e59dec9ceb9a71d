// src/gateway/mod.rs
//! Remote attribute access for the ADC device

pub mod traits;
pub mod types;
pub mod simulator;

pub use traits::*;
pub use types::*;
