//! Retarget Example
//!
//! Drives one axis towards 100, changes its mind to -20 after three seconds,
//! and prints a coarse trace. Run with `cargo run -p motion_core --example retarget`.

use motion_config::{Schedule, ScheduleRow};
use motion_core::{MotionProfile, RunCfg, run};
use motion_traits::{ManualClock, SetpointSink};

/// Prints one line every `every` samples.
struct Trace {
    every: u64,
    n: u64,
}

impl SetpointSink for Trace {
    fn apply(
        &mut self,
        time_s: f64,
        position: f32,
        velocity: f32,
        acceleration: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.n % self.every == 0 {
            println!("{time_s:6.2}s  x={position:9.3}  v={velocity:8.3}  a={acceleration:6.2}");
        }
        self.n += 1;
        Ok(())
    }
}

fn main() -> Result<(), eyre::Report> {
    let profile = MotionProfile::builder()
        .with_max_velocity(10.0)
        .with_max_acceleration(5.0)
        .build()?;

    let schedule = Schedule::from_rows(vec![
        ScheduleRow {
            time_s: 0.0,
            target: 100.0,
        },
        ScheduleRow {
            time_s: 3.0,
            target: -20.0,
        },
    ])?;

    let cfg = RunCfg {
        tick_hz: 100,
        max_run_ms: 60_000,
    };
    let mut sink = Trace { every: 25, n: 0 };
    let summary = run(profile, &schedule, &mut sink, &ManualClock::new(), &cfg, None)?;

    println!(
        "settled at {:.3} after {:.2}s ({} replans, peak speed {:.2})",
        summary.final_position, summary.duration_s, summary.replans, summary.peak_speed
    );
    Ok(())
}
