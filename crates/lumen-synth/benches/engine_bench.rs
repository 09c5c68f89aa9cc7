//! Criterion benchmarks for the synthesis engine
//!
//! Run with: cargo bench -p lumen-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lumen_synth::constants::SAMPLES_PER_CONTROL_TICK;
use lumen_synth::{PulseSynth, StringVoice, SynthEngine, SynthRng};
use lumen_core::FreqGainTable;

// ============================================================================
// Full engine
// ============================================================================

fn bench_engine_control_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    // idle: no active chords, the tick is pure bookkeeping
    let mut idle = SynthEngine::new(1);
    for _ in 0..2000 {
        idle.update(2000, 500);
    }
    group.bench_function("control_tick_idle", |b| {
        b.iter(|| black_box(idle.update(2000, 500)))
    });

    // busy: saturated accumulators, pulses firing
    let mut busy = SynthEngine::new(1);
    for _ in 0..1100 {
        busy.update(2000, 500);
    }
    group.bench_function("control_tick_busy", |b| {
        let mut tick = 0u32;
        b.iter(|| {
            tick += 1;
            let raw = if tick % 2 == 0 { 200 } else { 12_000 };
            black_box(busy.update(raw, 500))
        })
    });

    group.finish();
}

fn bench_engine_audio_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine_Audio");

    for &active_scaled in &[500, 220] {
        let mut engine = SynthEngine::new(1);
        for _ in 0..1100 {
            engine.update(2000, active_scaled);
        }
        for tick in 0..64 {
            let raw = if tick % 2 == 0 { 200 } else { 12_000 };
            engine.update(raw, active_scaled);
        }

        group.bench_with_input(
            BenchmarkId::new("block", active_scaled),
            &active_scaled,
            |b, _| {
                b.iter(|| {
                    let mut sum = 0i32;
                    for _ in 0..SAMPLES_PER_CONTROL_TICK {
                        sum += i32::from(engine.process());
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Hot components
// ============================================================================

fn bench_string_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("String");

    let mut rng = SynthRng::seed_from_u64(1);
    let table = FreqGainTable::build(300.0, 6000.0, 0.001, 0.8);
    let mut string = StringVoice::new(101, 0);
    string.set_light_range(0, 250);
    for _ in 0..8 {
        string.update_levels(100, 8000);
        string.update(&mut rng, &table);
    }

    group.bench_function("process_active", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for _ in 0..SAMPLES_PER_CONTROL_TICK {
                sum += string.process();
            }
            black_box(sum)
        })
    });

    group.finish();
}

fn bench_pulse_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pulse");

    let mut pool = PulseSynth::new();
    for i in 0..12 {
        pool.trigger(200.0 + i as f32 * 120.0, 35.0, 2.0, 20);
    }
    pool.update();

    group.bench_function("process_full_pool", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for _ in 0..SAMPLES_PER_CONTROL_TICK {
                sum += pool.process();
            }
            black_box(sum)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_control_tick,
    bench_engine_audio_block,
    bench_string_process,
    bench_pulse_pool
);
criterion_main!(benches);
