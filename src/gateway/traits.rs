// src/gateway/traits.rs
//! Core trait for remote attribute access

use crate::gateway::types::{AttributeValue, GatewayError};
use std::sync::Arc;

/// Synchronous read/write access to named attributes on the remote ADC device.
///
/// Implementations own transport concerns (connection handling, timeouts,
/// retries). Every call may block on I/O.
pub trait AttributeGateway: Send + Sync {
    /// Read a scalar attribute
    fn read_scalar(&self, name: &str) -> Result<AttributeValue, GatewayError>;

    /// Write a scalar attribute
    fn write_scalar(&self, name: &str, value: AttributeValue) -> Result<(), GatewayError>;

    /// Read the first `count` elements of an array attribute
    fn read_array(&self, name: &str, count: usize) -> Result<Vec<f64>, GatewayError>;

    /// Read elements `[start, end)` of an array attribute.
    ///
    /// The default reads the prefix up to `end` and drops the head, which is
    /// what devices without native slicing require.
    fn read_array_slice(
        &self,
        name: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>, GatewayError> {
        if start > end {
            return Err(GatewayError::InvalidRange {
                attribute: name.to_string(),
                start,
                end,
            });
        }
        let mut data = self.read_array(name, end)?;
        if data.len() < end {
            return Err(GatewayError::ShortRead {
                attribute: name.to_string(),
                requested: end,
                received: data.len(),
            });
        }
        Ok(data.split_off(start))
    }
}

impl<G: AttributeGateway + ?Sized> AttributeGateway for Arc<G> {
    fn read_scalar(&self, name: &str) -> Result<AttributeValue, GatewayError> {
        (**self).read_scalar(name)
    }

    fn write_scalar(&self, name: &str, value: AttributeValue) -> Result<(), GatewayError> {
        (**self).write_scalar(name, value)
    }

    fn read_array(&self, name: &str, count: usize) -> Result<Vec<f64>, GatewayError> {
        (**self).read_array(name, count)
    }

    fn read_array_slice(
        &self,
        name: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>, GatewayError> {
        (**self).read_array_slice(name, start, end)
    }
}

impl<G: AttributeGateway + ?Sized> AttributeGateway for Box<G> {
    fn read_scalar(&self, name: &str) -> Result<AttributeValue, GatewayError> {
        (**self).read_scalar(name)
    }

    fn write_scalar(&self, name: &str, value: AttributeValue) -> Result<(), GatewayError> {
        (**self).write_scalar(name, value)
    }

    fn read_array(&self, name: &str, count: usize) -> Result<Vec<f64>, GatewayError> {
        (**self).read_array(name, count)
    }

    fn read_array_slice(
        &self,
        name: &str,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>, GatewayError> {
        (**self).read_array_slice(name, start, end)
    }
}
