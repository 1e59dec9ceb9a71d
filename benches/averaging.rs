use adc_sync::acquisition::{AcquisitionController, BufferIndexTracker, ChannelId, SampleAverager};
use adc_sync::config::{ControllerConfig, DeviceProfile};
use adc_sync::gateway::simulator::SimulatedAdc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

const WINDOW_SIZES: &[usize] = &[1, 10, 100, 1000];
const RAW_POINTS: usize = 100_000;
const SOURCE: &str = "MAIN.ADC1.valuebuffer.values";

fn benchmark_window_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("averager");
    let raw: Vec<f64> = (0..RAW_POINTS).map(|i| (i % 97) as f64).collect();
    group.throughput(Throughput::Elements(RAW_POINTS as u64));

    for &window_size in WINDOW_SIZES {
        group.bench_with_input(
            BenchmarkId::new("reduce", window_size),
            &window_size,
            |b, &size| {
                let averager = SampleAverager::new(size).unwrap();
                b.iter(|| averager.reduce(black_box(&raw)));
            },
        );
    }

    group.finish();
}

fn benchmark_index_tracking(c: &mut Criterion) {
    c.bench_function("tracker_progress_1000_steps", |b| {
        let averager = SampleAverager::new(10).unwrap();
        b.iter(|| {
            let mut tracker = BufferIndexTracker::default();
            let mut delivered = 0;
            for index in (0..RAW_POINTS).step_by(100) {
                if let adc_sync::acquisition::IndexProgress::Available(range) =
                    tracker.progress(black_box(index), averager, 10_000)
                {
                    delivered += range.len();
                    tracker.advance(&range);
                }
            }
            delivered
        });
    });
}

fn benchmark_streamed_readout(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");

    for &chunk in &[10usize, 100, 1000] {
        group.throughput(Throughput::Elements(10_000));
        group.bench_with_input(BenchmarkId::new("read_available", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let device = Arc::new(SimulatedAdc::new(DeviceProfile::buffered()));
                let mut controller =
                    AcquisitionController::new(device.clone(), ControllerConfig::default()).unwrap();
                controller.add_channel(ChannelId(1)).unwrap();
                controller.configure(0.01, 1000).unwrap();
                controller.start().unwrap();

                let samples = vec![1.0; chunk];
                let mut points = 0;
                for _ in 0..10_000 / chunk {
                    device.feed(SOURCE, &samples);
                    points += controller.read_available(ChannelId(1)).unwrap().len();
                }
                points
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_window_reduction,
    benchmark_index_tracking,
    benchmark_streamed_readout
);
criterion_main!(benches);
