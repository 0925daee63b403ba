//! Piecewise closed-form evaluation of a [`Plan`].
//!
//! `elapsed` is the time since the plan was created (its baseline instant),
//! not a per-tick increment.
//!
//! | segment | window                         | acceleration   |
//! |---------|--------------------------------|----------------|
//! | Ramp    | `e <= t_brake + t_accel`       | `ramp_accel`   |
//! | Cruise  | up to `ramp_end + t_cruise`    | `0`            |
//! | Decel   | up to `total_duration()`       | `-dir * a_max` |
//! | Done    | `e >= total_duration()`        | `0`            |
//!
//! The ramp folds braking and accelerating into one arc: when braking is
//! required the baseline velocity opposes `direction`, so a single constant
//! acceleration first cancels it and then speeds up towards the target.

use crate::planner::Plan;
use crate::types::{Segment, Setpoint};

/// Setpoint of `plan` at `elapsed` seconds after its baseline.
///
/// Negative elapsed times are treated as zero.
pub fn evaluate(plan: &Plan, elapsed: f32) -> Setpoint {
    let e = elapsed.max(0.0);
    if e >= plan.total_duration() {
        return Setpoint::done(plan.target);
    }

    let dir = plan.direction.factor();
    let base = plan.baseline;
    let ramp_end = plan.ramp_end();

    if e <= ramp_end {
        return Setpoint {
            position: base.position + base.velocity * e + 0.5 * plan.ramp_accel * e * e,
            velocity: base.velocity + plan.ramp_accel * e,
            acceleration: plan.ramp_accel,
            segment: Segment::Ramp,
            finished: false,
        };
    }

    // Distance covered (along `dir`) when the ramp ends.
    let ramp_dist = plan.d_accel - plan.d_brake;

    let cruise_end = plan.cruise_end();
    if e < cruise_end {
        let u = e - ramp_end;
        return Setpoint {
            position: base.position + dir * (ramp_dist + plan.peak_speed * u),
            velocity: dir * plan.peak_speed,
            acceleration: 0.0,
            segment: Segment::Cruise,
            finished: false,
        };
    }

    let u = e - cruise_end;
    let a = plan.accel_limit;
    Setpoint {
        position: base.position
            + dir * (ramp_dist + plan.d_cruise + plan.peak_speed * u - 0.5 * a * u * u),
        velocity: dir * (plan.peak_speed - a * u),
        acceleration: -dir * a,
        segment: Segment::Decel,
        finished: false,
    }
}
