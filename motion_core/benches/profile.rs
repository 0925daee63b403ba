use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, black_box, criterion_group, criterion_main};
use motion_core::{Baseline, MotionProfile, ProfileCfg, evaluate, plan};

// Deterministic pseudo-random targets so runs are comparable.
fn synth_targets(n: usize, span: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..n)
        .map(|_| {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            state = x;
            ((x as f32) / (u32::MAX as f32 + 1.0) * 2.0 - 1.0) * span
        })
        .collect()
}

fn configure<'a>(c: &'a mut Criterion, name: &str) -> BenchmarkGroup<'a, WallTime> {
    let mut g = c.benchmark_group(name);
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p motion_core --bench profile
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(10));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }
    g
}

pub fn bench_plan(c: &mut Criterion) {
    let mut g = configure(c, "plan");
    let cfg = ProfileCfg {
        max_velocity: 10.0,
        max_acceleration: 5.0,
        initial_position: 0.0,
    };
    let targets = synth_targets(1024, 500.0, 0xC0FFEE);
    for (name, velocity) in [("from_rest", 0.0f32), ("reversing", -8.0)] {
        let baseline = Baseline {
            position: 0.0,
            velocity,
        };
        g.bench_function(name, |b| {
            b.iter(|| {
                for &t in &targets {
                    let p = plan(black_box(t), black_box(baseline), &cfg);
                    let _ = black_box(p);
                }
            })
        });
    }
    g.finish();
}

pub fn bench_tick(c: &mut Criterion) {
    let mut g = configure(c, "tick");
    let targets = synth_targets(64, 100.0, 0xBEEF);
    g.bench_function("evaluate_1khz", |b| {
        let mut profile = match MotionProfile::new(10.0, 5.0, 0.0) {
            Ok(p) => p,
            Err(e) => panic!("bench profile: {e}"),
        };
        let _ = profile.update(100.0, 0.0);
        let live = *profile.plan();
        b.iter(|| {
            for i in 0..1000 {
                black_box(evaluate(black_box(&live), i as f32 * 0.012));
            }
        })
    });
    g.bench_function("retarget_every_50_ticks", |b| {
        b.iter(|| {
            let Ok(mut profile) = MotionProfile::new(10.0, 5.0, 0.0) else {
                return;
            };
            for &t in &targets {
                for k in 0..50 {
                    let _ = black_box(profile.update(t, k as f32 * 0.001));
                }
            }
        })
    });
    g.finish();
}

criterion_group!(profile, bench_plan, bench_tick);
criterion_main!(profile);
