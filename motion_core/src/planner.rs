//! Closed-form planning of a constant-acceleration move.
//!
//! Given the live kinematic state (the baseline) and a commanded target,
//! [`plan`] decides whether the axis must brake first, whether the move
//! reaches the velocity limit (trapezoidal) or not (triangular), and the exact
//! duration and length of every phase.
//!
//! All durations and distances are stored as non-negative magnitudes; the
//! sign of motion lives in [`Plan::direction`]. Nothing here allocates.

use crate::config::ProfileCfg;
use crate::error::ProfileError;
use crate::types::{Baseline, Direction, Shape};

/// The live plan: everything the evaluator needs to produce setpoints until
/// the next target change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Plan {
    pub direction: Direction,
    pub shape: Shape,

    /// Time to bring the baseline velocity to zero (reversal/start only).
    pub t_brake: f32,
    pub t_accel: f32,
    pub t_cruise: f32,
    pub t_decel: f32,

    pub d_brake: f32,
    pub d_accel: f32,
    pub d_cruise: f32,
    pub d_decel: f32,
    /// Distance left to cover once braking is done.
    pub d_total: f32,

    /// Speed at the end of the ramp: the velocity limit when trapezoidal.
    pub peak_speed: f32,
    /// Signed acceleration applied throughout the ramp phase.
    pub ramp_accel: f32,
    /// Acceleration limit in force when the plan was made.
    pub accel_limit: f32,

    pub baseline: Baseline,
    pub target: f32,
}

impl Plan {
    /// Zero-length plan holding `position`.
    pub fn idle(position: f32) -> Self {
        Self {
            baseline: Baseline {
                position,
                velocity: 0.0,
            },
            target: position,
            ..Self::default()
        }
    }

    /// End of the ramp (brake + accel) phase, relative to the baseline.
    #[inline]
    pub fn ramp_end(&self) -> f32 {
        self.t_brake + self.t_accel
    }

    /// End of the cruise phase, relative to the baseline.
    #[inline]
    pub fn cruise_end(&self) -> f32 {
        self.ramp_end() + self.t_cruise
    }

    /// Sum of all phase durations; the plan is finished from here on.
    #[inline]
    pub fn total_duration(&self) -> f32 {
        self.cruise_end() + self.t_decel
    }

    /// Whether the axis must stop before heading for the target.
    #[inline]
    pub fn brakes(&self) -> bool {
        self.t_brake > 0.0
    }
}

/// Compute a new plan that takes `baseline` to `target` within `cfg` limits.
///
/// Fails only on invalid limits, non-finite inputs, or a negative radicand in
/// the triangular peak-speed computation.
pub fn plan(target: f32, baseline: Baseline, cfg: &ProfileCfg) -> Result<Plan, ProfileError> {
    if !target.is_finite() {
        return Err(ProfileError::NonFinite("target position"));
    }
    if !(baseline.position.is_finite() && baseline.velocity.is_finite()) {
        return Err(ProfileError::NonFinite("baseline state"));
    }
    cfg.validate()?;

    let max_vel = cfg.max_velocity;
    let max_acc = cfg.max_acceleration;
    let speed0 = baseline.velocity.abs();
    let heading = Direction::of(baseline.velocity);

    // Braking time/distance, in case it is needed.
    let mut t_brake = speed0 / max_acc;
    let mut d_brake = t_brake * speed0 / 2.0;

    // Direction is decided from where the axis would come to rest.
    let stop_point = baseline.position + heading.factor() * d_brake;
    let mut direction = Direction::of(target - stop_point);
    if direction == Direction::Hold {
        // Braking lands exactly on target: decelerate against the motion.
        direction = heading.opposite();
    }
    let braking = direction != heading;
    let dir = direction.factor();

    let mut t_accel;
    let mut d_accel;
    let mut ramp_accel = dir * max_acc;
    if braking {
        t_accel = max_vel / max_acc;
        d_accel = t_accel * max_vel / 2.0;
    } else {
        t_brake = 0.0;
        d_brake = 0.0;
        if speed0 <= max_vel {
            t_accel = (max_vel - speed0) / max_acc;
        } else {
            // Live speed above a lowered limit: shed the excess first.
            t_accel = (speed0 - max_vel) / max_acc;
            ramp_accel = -ramp_accel;
        }
        d_accel = t_accel * (max_vel + speed0) / 2.0;
    }

    let mut d_total = (target - baseline.position + dir * d_brake).abs();

    let mut t_decel = max_vel / max_acc;
    let mut d_decel = t_decel * max_vel / 2.0;
    let mut d_cruise = d_total - (d_accel + d_decel);
    let mut t_cruise = d_cruise / max_vel;

    let shape;
    let peak_speed;
    if t_cruise > 0.0 {
        shape = Shape::Trapezoidal;
        peak_speed = max_vel;
    } else {
        shape = Shape::Triangular;
        if braking {
            peak_speed = checked_sqrt(max_acc * d_total)?;
            t_accel = peak_speed / max_acc;
            d_accel = t_accel * peak_speed / 2.0;
        } else {
            d_total = (target - baseline.position).abs();
            ramp_accel = dir * max_acc;
            if speed0 > max_vel {
                // Only reachable when the stop distance equals the distance
                // left; decelerate straight from the live speed.
                peak_speed = speed0;
            } else {
                let radicand = 0.5 * baseline.velocity * baseline.velocity + max_acc * d_total;
                peak_speed = checked_sqrt(radicand)?.max(speed0);
            }
            t_accel = (peak_speed - speed0) / max_acc;
            d_accel = t_accel * (peak_speed + speed0) / 2.0;
        }
        t_decel = peak_speed / max_acc;
        d_decel = t_decel * peak_speed / 2.0;
        t_cruise = 0.0;
        d_cruise = 0.0;
    }

    Ok(Plan {
        direction,
        shape,
        t_brake,
        t_accel,
        t_cruise,
        t_decel,
        d_brake,
        d_accel,
        d_cruise,
        d_decel,
        d_total,
        peak_speed,
        ramp_accel,
        accel_limit: max_acc,
        baseline,
        target,
    })
}

#[inline]
fn checked_sqrt(radicand: f32) -> Result<f32, ProfileError> {
    if radicand >= 0.0 {
        Ok(radicand.sqrt())
    } else {
        Err(ProfileError::NumericDomain { radicand })
    }
}
