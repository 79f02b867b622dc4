// benches/cv_benchmarks.rs
#![allow(clippy::needless_range_loop)]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use handcv_rs::core::pipeline::{HandPipeline, PipelineConfig};
use handcv_rs::cv::scalar::ScalarCV;
use handcv_rs::cv::PixelOps;
use handcv_rs::FrameBuffer;

const SIZES: [(usize, usize); 3] = [(320, 240), (640, 480), (1280, 720)];

fn bench_absdiff(c: &mut Criterion) {
    let mut group = c.benchmark_group("Absdiff");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let frame: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let acc: Vec<f32> = (0..size).map(|i| ((i * 7) % 256) as f32).collect();
        let mut out = vec![0u8; size];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| ScalarCV::absdiff(black_box(&frame), black_box(&acc), black_box(&mut out)))
        });
    }
    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("Threshold");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let mut out = vec![0u8; size];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| ScalarCV::threshold(black_box(&data), black_box(&mut out), black_box(25)))
        });
    }
    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("AccumulateWeighted");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let frame: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let mut acc = vec![0.0f32; size];
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| {
                ScalarCV::accumulate_weighted(black_box(&frame), black_box(&mut acc), 0.5)
            })
        });
    }
    group.finish();
}

/// Full warm pipeline over a frame with a centered square blob, dominated
/// by contour tracing and the ROI pass.
fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("ProcessFrame");
    for &(width, height) in SIZES.iter() {
        let size = width * height;
        let mut config = PipelineConfig::new(width as u32, height as u32);
        config.warmup_frames = 1;
        let mut pipeline = HandPipeline::<ScalarCV>::new(config).unwrap();

        let bg = vec![30u8; size];
        pipeline.process(&FrameBuffer::new(&bg, width as u32, height as u32));

        let mut data = bg.clone();
        let (cx, cy) = (width / 2, height / 2);
        for y in (cy - height / 8)..(cy + height / 8) {
            for x in (cx - width / 8)..(cx + width / 8) {
                data[y * width + x] = 220;
            }
        }
        let size_str = format!("{}x{}", width, height);

        group.bench_with_input(BenchmarkId::new("scalar", &size_str), &size_str, |b, _| {
            b.iter(|| {
                pipeline.process(black_box(&FrameBuffer::new(
                    &data,
                    width as u32,
                    height as u32,
                )))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_absdiff,
    bench_threshold,
    bench_accumulate,
    bench_process_frame
);
criterion_main!(benches);
