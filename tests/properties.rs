// tests/properties.rs
//! Property tests for exposure planning and buffered readout

use adc_sync::acquisition::{AcquisitionController, ChannelId, ControllerState, SampleAverager};
use adc_sync::config::{ControllerConfig, DeviceProfile};
use adc_sync::gateway::simulator::SimulatedAdc;
use adc_sync::AdcError;
use proptest::prelude::*;
use std::sync::Arc;

const RATE: f64 = 1000.0;
const CH: ChannelId = ChannelId(1);
const SOURCE: &str = "MAIN.ADC1.valuebuffer.values";

fn controller() -> (Arc<SimulatedAdc>, AcquisitionController<Arc<SimulatedAdc>>) {
    let device = Arc::new(SimulatedAdc::new(DeviceProfile::buffered()));
    let mut controller = AcquisitionController::new(device.clone(), ControllerConfig::default())
        .expect("default config is valid");
    controller.add_channel(CH).expect("fresh registry");
    (device, controller)
}

proptest! {
    #[test]
    fn configure_total_matches_rounded_window(
        samples in 1usize..200,
        jitter in -0.45f64..0.45,
        repetitions in 1usize..100,
    ) {
        let exposure = (samples as f64 + jitter).max(1.0) / RATE;
        let (_device, mut controller) = controller();

        let plan = controller.configure(exposure, repetitions).unwrap();
        let window_size = (exposure * RATE).round() as usize;
        prop_assert_eq!(plan.window_size, window_size);
        prop_assert_eq!(plan.total_raw_points, window_size * repetitions);
        prop_assert_eq!(controller.total_raw_points(), window_size * repetitions);
    }

    #[test]
    fn sub_period_exposure_leaves_state_unchanged(
        exposure in 0.0f64..0.000999,
        repetitions in 1usize..100,
    ) {
        let (device, mut controller) = controller();
        controller.configure(0.01, 5).unwrap();
        device.clear_writes();

        let result = controller.configure(exposure, repetitions);
        prop_assert!(matches!(result, Err(AdcError::InvalidExposure { .. })), "expected InvalidExposure, got {:?}", result);
        prop_assert_eq!(controller.plan().unwrap().total_raw_points, 50);
        prop_assert_eq!(controller.state(), ControllerState::Prepared);
        prop_assert!(device.writes().is_empty());
    }

    #[test]
    fn read_available_returns_only_full_new_windows(
        window_size in 1usize..10,
        repetitions in 1usize..20,
        steps in prop::collection::vec(0usize..30, 1..20),
    ) {
        let (device, mut controller) = controller();
        controller.configure(window_size as f64 / RATE, repetitions).unwrap();
        controller.start().unwrap();

        let mut index = 0;
        let mut consumed = 0;
        for step in steps {
            device.feed(SOURCE, &vec![1.0; step]);
            index += step;

            let values = controller.read_available(CH).unwrap();
            let full = (index / window_size).min(repetitions);
            prop_assert_eq!(values.len(), full - consumed);
            consumed = full;

            // A second read without new data is a no-op
            prop_assert!(controller.read_available(CH).unwrap().is_empty());
        }
    }

    #[test]
    fn streamed_points_equal_single_shot_average(
        window_size in 1usize..12,
        repetitions in 1usize..15,
        raw in prop::collection::vec(-100.0f64..100.0, 180),
        cuts in prop::collection::vec(0usize..180, 0..8),
    ) {
        let total = window_size * repetitions;
        let raw = &raw[..total];
        let (device, mut controller) = controller();
        controller.configure(window_size as f64 / RATE, repetitions).unwrap();
        controller.start().unwrap();

        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c % (total + 1)).collect();
        cuts.push(total);
        cuts.sort_unstable();

        let mut streamed = Vec::new();
        let mut fed = 0;
        for cut in cuts {
            device.feed(SOURCE, &raw[fed..cut]);
            fed = cut;
            streamed.extend(controller.read_available(CH).unwrap());
        }

        let expected = SampleAverager::new(window_size).unwrap().reduce(raw);
        prop_assert_eq!(streamed.len(), repetitions);
        prop_assert_eq!(streamed, expected);
    }
}
