//! Engine assembly from config, setpoint printing, and command execution.

use crate::cli::{LAST_RUN, RunContext};
use eyre::WrapErr;
use motion_config::{Config, Schedule};
use motion_core::error::{AbortReason, Result as CoreResult, RunError};
use motion_core::{Baseline, MotionProfile, Plan, ProfileCfg, RunCfg, RunSummary};
use motion_traits::{Clock, ManualClock, MonotonicClock, NullSink, SetpointSink};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicBool;

pub fn abort_reason_name(r: &AbortReason) -> &'static str {
    match r {
        AbortReason::MaxRuntime => "MaxRuntime",
        AbortReason::Interrupted => "Interrupted",
    }
}

/// Writes every Nth setpoint as text or a JSON line; remembers the last one
/// so an aborted run can still report how far it got.
pub struct SetpointPrinter<W: Write> {
    out: W,
    json: bool,
    every: u64,
    seen: u64,
    last_time_s: f64,
    last_position: f32,
}

impl<W: Write> SetpointPrinter<W> {
    pub fn new(out: W, json: bool, every: u64) -> Self {
        Self {
            out,
            json,
            every,
            seen: 0,
            last_time_s: 0.0,
            last_position: 0.0,
        }
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn last_time_s(&self) -> f64 {
        self.last_time_s
    }

    pub fn last_position(&self) -> f32 {
        self.last_position
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SetpointSink for SetpointPrinter<W> {
    fn apply(
        &mut self,
        time_s: f64,
        position: f32,
        velocity: f32,
        acceleration: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let due = self.every > 0 && self.seen % self.every == 0;
        self.seen += 1;
        self.last_time_s = time_s;
        self.last_position = position;
        if !due {
            return Ok(());
        }
        if self.json {
            let line = json!({
                "t": time_s,
                "position": position,
                "velocity": velocity,
                "acceleration": acceleration,
            });
            writeln!(self.out, "{line}")?;
        } else {
            writeln!(
                self.out,
                "t={time_s:>9.3}s  pos={position:>12.4}  vel={velocity:>10.4}  acc={acceleration:>9.3}"
            )?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.out.flush()?;
        Ok(())
    }
}

/// Build the engine from the validated config.
pub fn build_profile(cfg: &Config) -> CoreResult<MotionProfile> {
    let pcfg = ProfileCfg::from(cfg);
    MotionProfile::builder().with_cfg(&pcfg).build()
}

/// Runner settings with the CLI override applied.
pub fn run_cfg(cfg: &Config, max_run_ms_override: Option<u64>) -> RunCfg {
    let mut run = RunCfg::from(&cfg.runner);
    if let Some(ms) = max_run_ms_override {
        run.max_run_ms = ms;
    }
    run
}

fn drive<S: SetpointSink>(
    profile: MotionProfile,
    schedule: &Schedule,
    sink: &mut S,
    run: &RunCfg,
    realtime: bool,
    shutdown: &AtomicBool,
) -> CoreResult<RunSummary> {
    if realtime {
        motion_core::run(profile, schedule, sink, &MonotonicClock::new(), run, Some(shutdown))
    } else {
        motion_core::run(profile, schedule, sink, &ManualClock::new(), run, Some(shutdown))
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_move(
    cfg: &Config,
    target: Option<f32>,
    schedule_path: Option<&Path>,
    max_run_ms_override: Option<u64>,
    realtime: bool,
    every: u64,
    json_mode: bool,
    shutdown: &AtomicBool,
) -> CoreResult<RunSummary> {
    let schedule = match (schedule_path, target) {
        (Some(path), _) => motion_config::load_schedule_csv(path)?,
        (None, Some(t)) => Schedule::single(t)?,
        (None, None) => eyre::bail!("either --target or --schedule is required"),
    };
    let run = run_cfg(cfg, max_run_ms_override);
    let profile = build_profile(cfg)?;
    let final_target = schedule.final_target();
    let _ = LAST_RUN.set(RunContext {
        target: final_target,
        max_run_ms: run.max_run_ms,
        tick_hz: run.tick_hz,
    });

    let stdout = std::io::stdout();
    let mut printer = SetpointPrinter::new(stdout.lock(), json_mode, every);
    let result = drive(profile, &schedule, &mut printer, &run, realtime, shutdown);

    match &result {
        Ok(s) => {
            if json_mode {
                let line = json!({
                    "target": s.final_target,
                    "final_position": s.final_position,
                    "duration_ms": (s.duration_s * 1000.0).round() as u64,
                    "ticks": s.ticks,
                    "replans": s.replans,
                    "peak_speed": s.peak_speed,
                    "abort_reason": serde_json::Value::Null,
                });
                writeln!(printer.into_inner(), "{line}").wrap_err("write summary")?;
            } else {
                writeln!(
                    printer.into_inner(),
                    "move complete: position {:.4} (target {:.4}) in {:.3}s, {} ticks, {} replans, peak speed {:.4}",
                    s.final_position,
                    s.final_target,
                    s.duration_s,
                    s.ticks,
                    s.replans,
                    s.peak_speed
                )
                .wrap_err("write summary")?;
            }
        }
        Err(e) => {
            if let (true, Some(RunError::Abort(reason))) = (json_mode, e.downcast_ref::<RunError>())
            {
                let line = json!({
                    "target": final_target,
                    "final_position": serde_json::Value::Null,
                    "last_position": printer.last_position(),
                    "duration_ms": (printer.last_time_s() * 1000.0).round() as u64,
                    "ticks": printer.seen(),
                    "replans": serde_json::Value::Null,
                    "abort_reason": abort_reason_name(reason),
                });
                // Best effort: the abort itself is the error being reported.
                let _ = writeln!(printer.into_inner(), "{line}");
            }
        }
    }
    result
}

/// Print the plan that takes the axis from the given state to `target`.
pub fn print_plan(
    cfg: &Config,
    target: f32,
    from_position: Option<f32>,
    from_velocity: f32,
    json_mode: bool,
) -> CoreResult<Plan> {
    let pcfg = ProfileCfg::from(cfg);
    let baseline = Baseline {
        position: from_position.unwrap_or(pcfg.initial_position),
        velocity: from_velocity,
    };
    let plan = motion_core::plan(target, baseline, &pcfg)?;

    let mut out = std::io::stdout().lock();
    if json_mode {
        let line = json!({
            "target": plan.target,
            "from_position": baseline.position,
            "from_velocity": baseline.velocity,
            "direction": format!("{:?}", plan.direction),
            "shape": format!("{:?}", plan.shape),
            "t_brake": plan.t_brake,
            "t_accel": plan.t_accel,
            "t_cruise": plan.t_cruise,
            "t_decel": plan.t_decel,
            "d_brake": plan.d_brake,
            "d_accel": plan.d_accel,
            "d_cruise": plan.d_cruise,
            "d_decel": plan.d_decel,
            "peak_speed": plan.peak_speed,
            "duration_s": plan.total_duration(),
        });
        writeln!(out, "{line}").wrap_err("write plan")?;
    } else {
        writeln!(
            out,
            "{:?} move {:?} from {:.4} (v={:.4}) to {:.4}",
            plan.shape, plan.direction, baseline.position, baseline.velocity, plan.target
        )
        .wrap_err("write plan")?;
        writeln!(out, "  brake  {:>9.4}s  {:>12.4}", plan.t_brake, plan.d_brake)?;
        writeln!(out, "  accel  {:>9.4}s  {:>12.4}", plan.t_accel, plan.d_accel)?;
        writeln!(out, "  cruise {:>9.4}s  {:>12.4}", plan.t_cruise, plan.d_cruise)?;
        writeln!(out, "  decel  {:>9.4}s  {:>12.4}", plan.t_decel, plan.d_decel)?;
        writeln!(
            out,
            "  total  {:>9.4}s  peak speed {:.4}",
            plan.total_duration(),
            plan.peak_speed
        )?;
    }
    Ok(plan)
}

/// Build the engine and simulate a one-unit move at the configured rate.
pub fn self_check(cfg: &Config) -> CoreResult<RunSummary> {
    let profile = build_profile(cfg)?;
    let target = profile.position() + 1.0;
    let schedule = Schedule::single(target)?;
    let run = run_cfg(cfg, None);
    let clock = ManualClock::new();
    let epoch = clock.now();
    let summary = motion_core::run(profile, &schedule, &mut NullSink, &clock, &run, None)?;
    if summary.final_position != target {
        eyre::bail!(
            "self-check ended at {} instead of {}",
            summary.final_position,
            target
        );
    }
    tracing::debug!(simulated_s = clock.secs_since(epoch), "self-check done");
    Ok(summary)
}
