//! Runtime configuration types for the profile engine and tick runner.
//!
//! These are separate from the TOML-deserialized config in `motion_config`.

use crate::error::ProfileError;

/// Kinematic limits and reset position of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileCfg {
    /// Velocity limit (units/s), > 0.
    pub max_velocity: f32,
    /// Acceleration limit (units/s^2), > 0.
    pub max_acceleration: f32,
    /// Position restored by `reset`.
    pub initial_position: f32,
}

impl ProfileCfg {
    /// Reject limits the planner cannot divide by.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_max_velocity(self.max_velocity)?;
        check_max_acceleration(self.max_acceleration)?;
        if !self.initial_position.is_finite() {
            return Err(ProfileError::NonFinite("initial position"));
        }
        Ok(())
    }
}

pub(crate) fn check_max_velocity(v: f32) -> Result<(), ProfileError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidConfiguration(
            "max velocity must be finite and > 0",
        ))
    }
}

pub(crate) fn check_max_acceleration(a: f32) -> Result<(), ProfileError> {
    if a.is_finite() && a > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidConfiguration(
            "max acceleration must be finite and > 0",
        ))
    }
}

/// Pacing for the tick runner.
#[derive(Debug, Clone)]
pub struct RunCfg {
    /// Control loop rate in Hz.
    pub tick_hz: u32,
    /// Hard cap on a single run in milliseconds of loop time.
    pub max_run_ms: u64,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self {
            tick_hz: 1000,
            max_run_ms: 60_000,
        }
    }
}
