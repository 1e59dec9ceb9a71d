// demos/simulated_scan.rs
//! Step scan against a simulated ADC
//!
//! Run with `RUST_LOG=adc_sync=debug cargo run --example simulated_scan` to
//! see the controller's attribute traffic.

use adc_sync::acquisition::{AcquisitionController, ChannelId, ControllerState, Readout};
use adc_sync::config::{ConfigLoader, ControllerConfig, Firmware};
use adc_sync::gateway::simulator::SimulatedAdc;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DETECTOR: ChannelId = ChannelId(1);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("ADC Synchronization Demo");
    println!("========================\n");

    // Falls back to defaults when no adc-sync.toml is present
    let config = ConfigLoader::new().load()?;
    let summary = config.get_summary();
    println!(
        "Device {} ({} profile, {} Hz, {} channels max)\n",
        summary.device_name, summary.profile, summary.sample_rate_hz, summary.max_channels
    );

    buffered_scan(config)?;
    trace_scan()?;

    println!("\nDone.");
    Ok(())
}

/// Points are streamed out while the device is still filling its buffer
fn buffered_scan(config: ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Buffered readout: 8 points of 5 ms");
    println!("----------------------------------");

    let device = Arc::new(SimulatedAdc::new(config.device_profile()));
    let source = device.profile().default_source.clone();
    let mut controller = AcquisitionController::connect(device.clone(), config)?;

    controller.add_channel(DETECTOR)?;
    let plan = controller.configure(0.005, 8)?;
    println!(
        "  window size {} samples, {} raw points, latency {:.3} s",
        plan.window_size, plan.total_raw_points, plan.latency_time
    );
    controller.start()?;

    let mut sample = 0usize;
    let mut delivered = Vec::new();
    while controller.poll()?.state == ControllerState::Acquiring {
        // Irregular bursts, as a network device would deliver them
        let burst: Vec<f64> = (0..7)
            .map(|i| ((sample + i) as f64 * 0.1).sin())
            .collect();
        sample += burst.len();
        device.feed(&source, &burst);

        let points = controller.read_available(DETECTOR)?;
        if !points.is_empty() {
            println!("  index {:>3}: {:?}", sample.min(plan.total_raw_points), points);
        }
        delivered.extend(points);
    }
    delivered.extend(controller.read_available(DETECTOR)?);
    controller.stop()?;

    println!("  {} points delivered, final state {}", delivered.len(), controller.state());
    Ok(())
}

/// The whole trace is read once the device reports ready
fn trace_scan() -> Result<(), Box<dyn std::error::Error>> {
    println!("\nTrace readout on start-flag firmware");
    println!("------------------------------------");

    let config = ControllerConfig::for_firmware(Firmware::StartFlag);
    let device = Arc::new(SimulatedAdc::with_capacity(config.device_profile(), config.max_length()));
    let source = device.profile().default_source.clone();
    let mut controller = AcquisitionController::connect(device.clone(), config)?;

    controller.add_channel(DETECTOR)?;
    controller.configure(0.002, 6)?;
    controller.start()?;

    loop {
        match controller.read(DETECTOR)? {
            Readout::Pending => {
                device.feed(&source, &[0.25; 4]);
                let status = controller.poll()?;
                println!("  {}", status.message);
            }
            Readout::Trace(snapshot) => {
                println!(
                    "  {} of {} samples populated: {:?}",
                    snapshot.populated,
                    snapshot.data.len(),
                    snapshot.data
                );
                break;
            }
            Readout::Points(points) => {
                println!("  unexpected point readout: {:?}", points);
                break;
            }
        }
    }

    controller.stop()?;
    Ok(())
}
