use crate::config::RunCfg;
use crate::error::{AbortReason, ProfileError, Result as CoreResult, RunError};
use crate::profile::MotionProfile;
use crate::types::Setpoint;
use crate::util::period_secs;
use motion_config::Schedule;
use motion_traits::{Clock, SetpointSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Per-tick driver for a [`MotionProfile`].
///
/// `MotionProfile::update` takes the time elapsed since the last replan.
/// `Ticker` accepts per-tick deltas instead: it accumulates them and restarts
/// the origin whenever the target changes. On a change, the new plan's
/// baseline is the state produced on the previous tick, so the first elapsed
/// value of the new plan is that tick's `dt`.
#[derive(Debug, Clone)]
pub struct Ticker {
    profile: MotionProfile,
    elapsed: f64,
}

impl Ticker {
    pub fn new(profile: MotionProfile) -> Self {
        Self {
            profile,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds towards `target`.
    pub fn tick(&mut self, target: f32, dt: f64) -> Result<Setpoint, ProfileError> {
        if !dt.is_finite() {
            return Err(ProfileError::NonFinite("tick period"));
        }
        let dt = dt.max(0.0);
        let elapsed = if self.profile.last_target() == Some(target) {
            self.elapsed + dt
        } else {
            dt
        };
        self.profile.update(target, elapsed as f32)?;
        self.elapsed = elapsed;
        Ok(*self.profile.setpoint())
    }

    /// Seconds since the live plan was made.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut MotionProfile {
        &mut self.profile
    }

    pub fn into_inner(self) -> MotionProfile {
        self.profile
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub final_position: f32,
    pub final_target: f32,
    /// Loop time at completion, in seconds.
    pub duration_s: f64,
    pub ticks: u64,
    pub replans: u64,
    /// Largest |velocity| emitted.
    pub peak_speed: f32,
    /// Ticks that started after their deadline (real-time pacing only).
    pub missed_deadlines: u64,
}

#[inline]
fn loop_time_exceeds(t_s: f64, max_run_ms: u64) -> bool {
    t_s * 1000.0 >= max_run_ms as f64
}

#[inline]
fn deadline(start: Instant, period_s: f64, tick: u64) -> Instant {
    start + Duration::from_secs_f64(period_s * (tick as f64))
}

/// Drive `profile` through `schedule` at `cfg.tick_hz` until the final target
/// is reached, pushing every setpoint to `sink`.
///
/// Loop time advances by exactly one period per tick; `clock` only paces the
/// loop, so a `ManualClock` runs a deterministic simulation as fast as
/// possible while a `MonotonicClock` runs in real time. The sink is flushed
/// on every exit path.
pub fn run<K, S>(
    profile: MotionProfile,
    schedule: &Schedule,
    sink: &mut S,
    clock: &K,
    cfg: &RunCfg,
    shutdown: Option<&AtomicBool>,
) -> CoreResult<RunSummary>
where
    K: Clock,
    S: SetpointSink,
{
    let result = drive(profile, schedule, sink, clock, cfg, shutdown);
    if let Err(e) = sink.flush() {
        tracing::warn!(error = %e, "setpoint sink flush failed");
        if result.is_ok() {
            return Err(crate::error::Report::new(RunError::Sink(e.to_string())));
        }
    }
    match &result {
        Ok(summary) => tracing::info!(
            final_position = summary.final_position,
            duration_s = summary.duration_s,
            ticks = summary.ticks,
            replans = summary.replans,
            "run complete"
        ),
        Err(e) => tracing::error!(error = %e, "run aborted"),
    }
    result
}

fn drive<K, S>(
    profile: MotionProfile,
    schedule: &Schedule,
    sink: &mut S,
    clock: &K,
    cfg: &RunCfg,
    shutdown: Option<&AtomicBool>,
) -> CoreResult<RunSummary>
where
    K: Clock,
    S: SetpointSink,
{
    let period = period_secs(cfg.tick_hz);
    let final_target = schedule.final_target();
    let last_command_s = schedule.rows().last().map_or(0.0, |r| r.time_s);
    let replans_before = profile.replan_count();
    let mut ticker = Ticker::new(profile);
    let mut peak_speed = 0.0f32;
    let mut missed_deadlines = 0u64;

    tracing::info!(
        target = final_target,
        commands = schedule.rows().len(),
        tick_hz = cfg.tick_hz,
        "run start"
    );

    let start = clock.now();
    let mut tick: u64 = 0;
    loop {
        if shutdown.is_some_and(|f| f.load(Ordering::Relaxed)) {
            return Err(crate::error::Report::new(RunError::Abort(
                AbortReason::Interrupted,
            )));
        }

        let t = tick as f64 * period;
        if loop_time_exceeds(t, cfg.max_run_ms) {
            return Err(crate::error::Report::new(RunError::Abort(
                AbortReason::MaxRuntime,
            )));
        }

        let sp = match schedule.target_at(t) {
            Some(target) => {
                let dt = if tick == 0 { 0.0 } else { period };
                ticker.tick(target, dt)?
            }
            // Nothing commanded yet: hold the current state.
            None => *ticker.profile().setpoint(),
        };
        peak_speed = peak_speed.max(sp.velocity.abs());

        sink.apply(t, sp.position, sp.velocity, sp.acceleration)
            .map_err(|e| crate::error::Report::new(RunError::Sink(e.to_string())))?;

        let profile = ticker.profile();
        if t >= last_command_s && sp.finished && profile.last_target() == Some(final_target) {
            return Ok(RunSummary {
                final_position: sp.position,
                final_target,
                duration_s: t,
                ticks: tick + 1,
                replans: profile.replan_count() - replans_before,
                peak_speed,
                missed_deadlines,
            });
        }

        tick += 1;
        let next = deadline(start, period, tick);
        match next.checked_duration_since(clock.now()) {
            Some(wait) => clock.sleep(wait),
            None => {
                missed_deadlines += 1;
                tracing::trace!(tick, "tick deadline missed");
            }
        }
    }
}
