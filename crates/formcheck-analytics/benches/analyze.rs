//! Session Analysis Benchmarks
//!
//! # Running Benchmarks
//! ```bash
//! cargo bench --package formcheck-analytics --bench analyze
//! ```
//!
//! # Metrics Measured
//! - Throughput (frames/second) for a single session
//! - Batch throughput across sessions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use formcheck_analytics::{analyze, analyze_batch, AnalyzeOptions};
use formcheck_models::{Frame, LandmarkPoint, PoseLandmark, Session, POSE_LANDMARK_COUNT};

/// Synthetic side-view squat: knee angle swings between 175° and 85°.
fn squat_session(frames: usize) -> Session {
    use PoseLandmark::*;

    let frames = (0..frames)
        .map(|i| {
            let phase = (i as f64 / 30.0) * std::f64::consts::TAU;
            let knee = 130.0 + 45.0 * phase.cos();
            let (sin, cos) = (std::f64::consts::PI - knee.to_radians()).sin_cos();

            let mut landmarks = vec![None; POSE_LANDMARK_COUNT];
            let mut put = |left: PoseLandmark, right: PoseLandmark, x: f64, y: f64| {
                landmarks[left.index()] = Some(LandmarkPoint::new(x, y).with_visibility(0.9));
                landmarks[right.index()] = Some(LandmarkPoint::new(x + 0.01, y).with_visibility(0.9));
            };
            put(LeftShoulder, RightShoulder, 0.5, 0.2);
            put(LeftEar, RightEar, 0.52, 0.12);
            put(LeftHip, RightHip, 0.5, 0.5);
            put(LeftKnee, RightKnee, 0.5 + 0.2 * sin, 0.5 + 0.2 * cos);
            put(LeftAnkle, RightAnkle, 0.5, 0.9);

            Frame::new(i as u64 * 33, landmarks)
        })
        .collect();

    Session::new("squat", frames)
}

fn bench_single_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    let options = AnalyzeOptions::default();
    for frames in [300usize, 1_800, 9_000] {
        let session = squat_session(frames);
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(BenchmarkId::new("squat", frames), &session, |b, session| {
            b.iter(|| analyze(black_box(session), &options))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_batch");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    let options = AnalyzeOptions::default();
    let sessions: Vec<Session> = (0..32).map(|_| squat_session(1_800)).collect();
    group.throughput(Throughput::Elements((32 * 1_800) as u64));
    group.bench_function("32x1800", |b| {
        b.iter(|| analyze_batch(black_box(&sessions), &options))
    });

    group.finish();
}

criterion_group!(benches, bench_single_session, bench_batch);
criterion_main!(benches);
