// src/acquisition/controller.rs
//! Acquisition state machine driving the remote ADC
//!
//! Lifecycle: `Idle → Prepared → Acquiring → {Ready | Fault}`, re-armable
//! from `Ready` through another [`configure`](AcquisitionController::configure).
//! Every operation is a blocking call into the gateway. The controller never
//! schedules itself; the sequencer polls at its own cadence.

use crate::acquisition::parameters::{
    AxisParameter, AxisValue, ChannelParameter, ControllerParameter, Synchronization,
};
use crate::acquisition::plan::AcquisitionPlan;
use crate::acquisition::readout::{Readout, Snapshot};
use crate::acquisition::registry::{Channel, ChannelId, ChannelRegistry};
use crate::acquisition::state::{ControllerState, Status};
use crate::acquisition::tracker::IndexProgress;
use crate::config::{ControllerConfig, DeviceProfile, ReadoutMode, SignalStep};
use crate::error::{AdcError, AdcResult};
use crate::gateway::{AttributeGateway, AttributeValue, GatewayError};
use tracing::{debug, info, warn};

/// Controller for one ADC device and its channels
pub struct AcquisitionController<G: AttributeGateway> {
    gateway: G,
    config: ControllerConfig,
    profile: DeviceProfile,
    registry: ChannelRegistry,
    plan: Option<AcquisitionPlan>,
    total_raw_points: usize,
    status: Status,
}

impl<G: AttributeGateway> AcquisitionController<G> {
    /// Create a controller without touching the device
    pub fn new(gateway: G, config: ControllerConfig) -> AdcResult<Self> {
        config.validate()?;
        let profile = config.device_profile();
        let registry = ChannelRegistry::new(config.max_channels(), profile.default_source.clone());

        Ok(Self {
            gateway,
            config,
            profile,
            registry,
            plan: None,
            total_raw_points: 0,
            status: Status::idle(),
        })
    }

    /// Create a controller, run the profile's init sequence and pick up the
    /// buffer size currently set on the device
    pub fn connect(gateway: G, config: ControllerConfig) -> AdcResult<Self> {
        let mut controller = Self::new(gateway, config)?;
        info!(
            device = %controller.config.device_name,
            profile = %controller.profile.name,
            "connecting ADC controller"
        );

        write_sequence(&controller.gateway, &controller.profile.init)?;

        let attr = &controller.profile.buffer_size_attr;
        let value = controller.gateway.read_scalar(attr)?;
        controller.total_raw_points = value.as_usize().ok_or_else(|| AdcError::MalformedAttribute {
            attribute: attr.clone(),
            value,
        })?;
        debug!(total_raw_points = controller.total_raw_points, "device buffer size");

        Ok(controller)
    }

    /// Register a channel reading from the profile's default source
    pub fn add_channel(&mut self, id: ChannelId) -> AdcResult<()> {
        debug!("Adding channel {}", id);
        self.registry.add(id)
    }

    /// Remove a channel. Refused while an acquisition is running.
    pub fn remove_channel(&mut self, id: ChannelId) -> AdcResult<Channel> {
        debug!("Deleting channel {}", id);
        self.registry.get(id)?;
        self.ensure_not_acquiring("remove a channel")?;
        self.registry.remove(id)
    }

    /// Point a channel at another data array. Refused while acquiring.
    pub fn set_source(&mut self, id: ChannelId, name: &str) -> AdcResult<()> {
        debug!("Setting source = {} on channel {}", name, id);
        self.registry.get(id)?;
        self.ensure_not_acquiring("change a channel source")?;
        self.registry.set_source(id, name)
    }

    /// Data array attribute the channel reads from
    pub fn source(&self, id: ChannelId) -> AdcResult<&str> {
        self.registry.source(id)
    }

    /// Commit an exposure plan to the device.
    ///
    /// Input is validated before anything is written. Resets the read
    /// progress of every channel.
    pub fn configure(&mut self, exposure_time: f64, repetitions: usize) -> AdcResult<AcquisitionPlan> {
        info!(exposure_time, repetitions, "configuring acquisition");
        let plan = AcquisitionPlan::compute(
            exposure_time,
            repetitions,
            self.config.sample_rate_hz,
            self.config.max_length(),
        )?;
        self.ensure_not_acquiring("configure")?;

        let total = i64::try_from(plan.total_raw_points).map_err(|_| AdcError::BufferOverflow {
            requested: plan.total_raw_points,
            capacity: self.config.max_length(),
        })?;
        self.gateway
            .write_scalar(&self.profile.buffer_size_attr, AttributeValue::Int(total))?;
        write_sequence(&self.gateway, &self.profile.prepare)?;

        self.plan = Some(plan);
        self.total_raw_points = plan.total_raw_points;
        self.registry.reset_progress();
        self.status = Status::new(ControllerState::Prepared, "Acquisition prepared");
        debug!(
            window_size = plan.window_size,
            total_raw_points = plan.total_raw_points,
            latency_time = plan.latency_time,
            "acquisition prepared"
        );
        Ok(plan)
    }

    /// Signal the device to start filling its buffer
    pub fn start(&mut self) -> AdcResult<()> {
        debug!("In start");
        if self.plan.is_none() {
            return Err(AdcError::InvalidState {
                operation: "start",
                state: self.status.state,
            });
        }
        write_sequence(&self.gateway, &self.profile.start)?;
        self.status = Status::new(ControllerState::Acquiring, "Acquisition started");
        Ok(())
    }

    /// Per-channel start. Acquisition is driven globally, so this only
    /// checks the channel exists.
    pub fn start_channel(&self, id: ChannelId) -> AdcResult<()> {
        self.registry.get(id).map(|_| ())
    }

    /// Re-read the device state code and map it through the profile's table
    pub fn poll(&mut self) -> AdcResult<Status> {
        let value = self.gateway.read_scalar(&self.profile.state_attr)?;
        let status = match value.as_i64() {
            Some(code) => self.profile.state_codes.resolve(code),
            None => Status::new(
                ControllerState::Fault,
                format!("Unreadable device state code: {}", value),
            ),
        };
        debug!(code = %value, state = %status.state, "polled device state");
        self.status = status.clone();
        Ok(status)
    }

    /// Signal the device to stop. Idempotent; leaves the controller state to
    /// the next poll.
    pub fn stop(&mut self) -> AdcResult<()> {
        debug!("In stop");
        write_sequence(&self.gateway, &self.profile.stop)?;
        Ok(())
    }

    /// Same device effect as [`stop`](Self::stop)
    pub fn abort(&mut self) -> AdcResult<()> {
        debug!("In abort");
        self.stop()
    }

    /// Return the averaged points that completed since the previous call.
    ///
    /// An empty vector means no new complete window yet. Partial windows are
    /// never returned.
    pub fn read_available(&mut self, id: ChannelId) -> AdcResult<Vec<f64>> {
        self.registry.get(id)?;
        let plan = self.plan.ok_or(AdcError::InvalidState {
            operation: "read available points",
            state: self.status.state,
        })?;
        let index_attr = self.profile.buffer_index_attr.as_deref().ok_or_else(|| {
            AdcError::Unsupported {
                operation: "buffered readout",
                profile: self.profile.name.clone(),
            }
        })?;

        let value = self.gateway.read_scalar(index_attr)?;
        let index = value.as_usize().ok_or_else(|| AdcError::MalformedAttribute {
            attribute: index_attr.to_string(),
            value,
        })?;

        let channel = self.registry.get_mut(id)?;
        let range = match channel
            .tracker()
            .progress(index, plan.averager(), plan.repetitions)
        {
            IndexProgress::Available(range) => range,
            IndexProgress::Stale => return Ok(Vec::new()),
            IndexProgress::Regressed {
                full_windows,
                consumed,
            } => {
                warn!(
                    channel = %id,
                    index,
                    full_windows,
                    consumed,
                    "buffer index moved behind delivered data"
                );
                return Ok(Vec::new());
            }
        };

        let samples = range.samples();
        let raw = self
            .gateway
            .read_array_slice(channel.source_name(), samples.start, samples.end)?;
        if raw.len() != samples.len() {
            return Err(GatewayError::ShortRead {
                attribute: channel.source_name().to_string(),
                requested: samples.len(),
                received: raw.len(),
            }
            .into());
        }

        let values = plan.averager().reduce(&raw);
        channel.tracker_mut().advance(&range);
        debug!(
            channel = %id,
            first = range.first,
            end = range.end,
            "returning {} averaged points",
            values.len()
        );
        Ok(values)
    }

    /// Read the channel's whole data array in one go and fit it to the
    /// configured point count.
    ///
    /// Populated entries are counted over the full array. A count that
    /// differs from the configured point count is logged and reported in the
    /// snapshot, not raised.
    pub fn read_snapshot(&self, id: ChannelId) -> AdcResult<Snapshot> {
        let source = self.registry.source(id)?;
        let length = self.config.max_length().max(self.total_raw_points);
        let data = self.gateway.read_array(source, length)?;
        let snapshot = Snapshot::from_raw(data, self.total_raw_points);
        if let Some(mismatch) = snapshot.mismatch {
            warn!(
                channel = %id,
                "Mismatch between number of points configured and measured (measured: {}, configured: {})",
                mismatch.measured,
                mismatch.configured
            );
        }
        Ok(snapshot)
    }

    /// Read a channel the way the profile's readout mode prescribes.
    ///
    /// Trace readout waits for the last poll to have reported `Ready`.
    pub fn read(&mut self, id: ChannelId) -> AdcResult<Readout> {
        match self.profile.readout {
            ReadoutMode::Buffered => self.read_available(id).map(Readout::Points),
            ReadoutMode::Trace => {
                self.registry.get(id)?;
                if self.status.state == ControllerState::Ready {
                    self.read_snapshot(id).map(Readout::Trace)
                } else {
                    Ok(Readout::Pending)
                }
            }
        }
    }

    /// Read a per-channel parameter by its sequencer name
    pub fn channel_parameter(&self, id: ChannelId, name: &str) -> AdcResult<String> {
        match name.parse::<ChannelParameter>()? {
            ChannelParameter::Source => self.source(id).map(str::to_string),
        }
    }

    /// Write a per-channel parameter by its sequencer name
    pub fn set_channel_parameter(&mut self, id: ChannelId, name: &str, value: &str) -> AdcResult<()> {
        match name.parse::<ChannelParameter>()? {
            ChannelParameter::Source => self.set_source(id, value),
        }
    }

    /// Read an axis parameter by name
    pub fn axis_parameter(&self, id: ChannelId, name: &str) -> AdcResult<AxisValue> {
        let parameter = name.parse::<AxisParameter>()?;
        self.registry.get(id)?;
        Ok(match parameter {
            AxisParameter::Shape => AxisValue::Shape(vec![self.total_raw_points]),
            AxisParameter::Synchronization => AxisValue::Synchronization(self.synchronization()),
        })
    }

    /// Only the synchronization matching the readout mode is accepted
    pub fn set_synchronization(&mut self, id: ChannelId, value: Synchronization) -> AdcResult<()> {
        self.registry.get(id)?;
        let expected = self.synchronization();
        if value != expected {
            return Err(AdcError::InvalidParameter {
                name: "synchronization".to_string(),
                reason: format!("only {} synchronization allowed", expected),
            });
        }
        Ok(())
    }

    /// Controller-wide parameter, in seconds
    pub fn controller_parameter(&self, name: &str) -> AdcResult<f64> {
        match name.parse::<ControllerParameter>()? {
            ControllerParameter::LatencyTime => Ok(self.latency_time()),
        }
    }

    /// Latency of the current plan, or one sample period before any configure
    pub fn latency_time(&self) -> f64 {
        self.plan
            .map(|plan| plan.latency_time)
            .unwrap_or_else(|| self.config.sample_period())
    }

    /// Synchronization implied by the profile's readout mode
    pub fn synchronization(&self) -> Synchronization {
        self.profile.readout.synchronization()
    }

    /// State as of the last lifecycle call or poll
    pub fn state(&self) -> ControllerState {
        self.status.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn plan(&self) -> Option<&AcquisitionPlan> {
        self.plan.as_ref()
    }

    pub fn total_raw_points(&self) -> usize {
        self.total_raw_points
    }

    pub fn channel(&self, id: ChannelId) -> AdcResult<&Channel> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fails if the device is still acquiring. The device is re-polled
    /// rather than trusting the last known state.
    fn ensure_not_acquiring(&mut self, operation: &'static str) -> AdcResult<()> {
        if self.status.state != ControllerState::Acquiring {
            return Ok(());
        }
        let status = self.poll()?;
        if status.state == ControllerState::Acquiring {
            return Err(AdcError::InvalidState {
                operation,
                state: status.state,
            });
        }
        Ok(())
    }
}

fn write_sequence<G: AttributeGateway + ?Sized>(gateway: &G, steps: &[SignalStep]) -> AdcResult<()> {
    for step in steps {
        gateway.write_scalar(&step.attribute, step.value)?;
    }
    Ok(())
}
