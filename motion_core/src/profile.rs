//! The motion profile engine: one instance per controlled axis.

use crate::config::{ProfileCfg, check_max_acceleration, check_max_velocity};
use crate::error::ProfileError;
use crate::evaluator::evaluate;
use crate::planner::{self, Plan};
use crate::types::{Baseline, Setpoint};

/// Position/velocity/acceleration setpoint generator for a single axis.
///
/// Call [`MotionProfile::update`] once per control tick with the commanded
/// target and the time elapsed since the target last changed. A new target
/// replans from the live position and velocity, so position stays continuous
/// across retargets (velocity and acceleration may step).
///
/// All methods take `&mut self` and never block or allocate; share an axis
/// across threads only behind a lock.
#[derive(Debug, Clone)]
pub struct MotionProfile {
    cfg: ProfileCfg,
    plan: Plan,
    output: Setpoint,
    // None until the first command so that the first update always plans.
    last_target: Option<f32>,
    replans: u64,
}

impl MotionProfile {
    /// Validate limits and start at rest at `initial_position`.
    pub fn new(
        max_velocity: f32,
        max_acceleration: f32,
        initial_position: f32,
    ) -> Result<Self, ProfileError> {
        Self::from_cfg(ProfileCfg {
            max_velocity,
            max_acceleration,
            initial_position,
        })
    }

    pub fn from_cfg(cfg: ProfileCfg) -> Result<Self, ProfileError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            plan: Plan::idle(cfg.initial_position),
            output: Setpoint::idle(cfg.initial_position),
            last_target: None,
            replans: 0,
        })
    }

    /// Start building a profile.
    pub fn builder() -> crate::builder::ProfileBuilder<crate::builder::Missing, crate::builder::Missing>
    {
        crate::builder::ProfileBuilder::default()
    }

    /// Advance to `elapsed` seconds since the last replan and return the new
    /// position setpoint.
    ///
    /// If `target` differs from the previously commanded target, a new plan
    /// is computed first from the current position and velocity; the caller
    /// is expected to restart its elapsed-time origin at that instant.
    /// On error the previous plan and output are left untouched.
    pub fn update(&mut self, target: f32, elapsed: f32) -> Result<f32, ProfileError> {
        if !target.is_finite() {
            return Err(ProfileError::NonFinite("target position"));
        }
        if !elapsed.is_finite() {
            return Err(ProfileError::NonFinite("elapsed time"));
        }
        let elapsed = if elapsed < 0.0 {
            tracing::trace!(elapsed, "negative elapsed time clamped to 0");
            0.0
        } else {
            elapsed
        };

        if self.last_target != Some(target) {
            self.replan(target)?;
        }

        self.output = evaluate(&self.plan, elapsed);
        Ok(self.output.position)
    }

    fn replan(&mut self, target: f32) -> Result<(), ProfileError> {
        let baseline = Baseline {
            position: self.output.position,
            velocity: self.output.velocity,
        };
        let plan = planner::plan(target, baseline, &self.cfg)?;
        tracing::debug!(
            target,
            from = baseline.position,
            velocity = baseline.velocity,
            direction = ?plan.direction,
            shape = ?plan.shape,
            duration_s = plan.total_duration(),
            "replan"
        );
        self.plan = plan;
        self.last_target = Some(target);
        self.output.finished = false;
        self.replans = self.replans.saturating_add(1);
        Ok(())
    }

    pub fn position(&self) -> f32 {
        self.output.position
    }

    pub fn velocity(&self) -> f32 {
        self.output.velocity
    }

    pub fn acceleration(&self) -> f32 {
        self.output.acceleration
    }

    /// True once the last evaluation passed the final phase boundary.
    pub fn is_finished(&self) -> bool {
        self.output.finished
    }

    /// Full output of the last evaluation.
    pub fn setpoint(&self) -> &Setpoint {
        &self.output
    }

    /// The live plan.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn config(&self) -> &ProfileCfg {
        &self.cfg
    }

    /// Target of the live plan, if any command was issued since init/reset.
    pub fn last_target(&self) -> Option<f32> {
        self.last_target
    }

    /// Number of plans computed since construction.
    pub fn replan_count(&self) -> u64 {
        self.replans
    }

    /// Takes effect at the next replan.
    pub fn set_max_velocity(&mut self, max_velocity: f32) -> Result<(), ProfileError> {
        check_max_velocity(max_velocity)?;
        self.cfg.max_velocity = max_velocity;
        Ok(())
    }

    /// Takes effect at the next replan.
    pub fn set_max_acceleration(&mut self, max_acceleration: f32) -> Result<(), ProfileError> {
        check_max_acceleration(max_acceleration)?;
        self.cfg.max_acceleration = max_acceleration;
        Ok(())
    }

    /// Set the reset position and move the current and baseline position to
    /// it immediately. Velocity and acceleration are left as they are.
    pub fn set_initial_position(&mut self, position: f32) -> Result<(), ProfileError> {
        if !position.is_finite() {
            return Err(ProfileError::NonFinite("initial position"));
        }
        self.cfg.initial_position = position;
        self.output.position = position;
        self.plan.baseline.position = position;
        Ok(())
    }

    /// Back to rest at the initial position with no plan.
    pub fn reset(&mut self) {
        self.plan = Plan::idle(self.cfg.initial_position);
        self.output = Setpoint::idle(self.cfg.initial_position);
        self.last_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    #[test]
    fn starts_idle_at_initial_position() {
        let p = MotionProfile::new(10.0, 5.0, 3.0).unwrap();
        assert_eq!(p.position(), 3.0);
        assert_eq!(p.velocity(), 0.0);
        assert_eq!(p.acceleration(), 0.0);
        assert!(!p.is_finished());
        assert_eq!(p.setpoint().segment, Segment::Idle);
        assert_eq!(p.last_target(), None);
        assert_eq!(p.plan().total_duration(), 0.0);
    }

    #[test]
    fn first_command_to_zero_plans_from_nonzero_start() {
        let mut p = MotionProfile::new(10.0, 5.0, 20.0).unwrap();
        let pos = p.update(0.0, 0.0).unwrap();
        assert_eq!(pos, 20.0);
        assert_eq!(p.replan_count(), 1);
        let pos = p.update(0.0, 1.0).unwrap();
        assert!(pos < 20.0 && pos > 0.0, "moved smoothly, got {pos}");
    }

    #[test]
    fn failed_replan_keeps_previous_state() {
        let mut p = MotionProfile::new(10.0, 5.0, 0.0).unwrap();
        p.update(100.0, 3.0).unwrap();
        let before = *p.setpoint();
        assert!(p.update(f32::INFINITY, 3.1).is_err());
        assert_eq!(*p.setpoint(), before);
        assert_eq!(p.last_target(), Some(100.0));
    }

    #[test]
    fn setters_validate() {
        let mut p = MotionProfile::new(10.0, 5.0, 0.0).unwrap();
        assert!(p.set_max_velocity(0.0).is_err());
        assert!(p.set_max_acceleration(-2.0).is_err());
        assert!(p.set_initial_position(f32::NAN).is_err());
        assert_eq!(p.config().max_velocity, 10.0);
        p.set_max_velocity(4.0).unwrap();
        assert_eq!(p.config().max_velocity, 4.0);
    }

    #[test]
    fn set_initial_position_moves_baseline_but_keeps_velocity() {
        let mut p = MotionProfile::new(10.0, 5.0, 0.0).unwrap();
        p.update(100.0, 1.0).unwrap();
        let v = p.velocity();
        p.set_initial_position(-4.0).unwrap();
        assert_eq!(p.position(), -4.0);
        assert_eq!(p.plan().baseline.position, -4.0);
        assert_eq!(p.velocity(), v);
        assert_eq!(p.config().initial_position, -4.0);
    }
}
