//! Type-state builder for `MotionProfile`.
//!
//! The builder enforces at compile time that both limits are provided
//! before `build()` is available. `try_build()` is always available for dynamic checks.

use std::marker::PhantomData;

use crate::config::ProfileCfg;
use crate::error::{BuildError, ProfileError, Result};
use crate::profile::MotionProfile;

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `MotionProfile`. All fields are validated on `build()`.
pub struct ProfileBuilder<V, A> {
    max_velocity: Option<f32>,
    max_acceleration: Option<f32>,
    initial_position: f32,
    _v: PhantomData<V>,
    _a: PhantomData<A>,
}

impl Default for ProfileBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            max_velocity: None,
            max_acceleration: None,
            initial_position: 0.0,
            _v: PhantomData,
            _a: PhantomData,
        }
    }
}

impl<V, A> ProfileBuilder<V, A> {
    fn retag<V2, A2>(self) -> ProfileBuilder<V2, A2> {
        ProfileBuilder {
            max_velocity: self.max_velocity,
            max_acceleration: self.max_acceleration,
            initial_position: self.initial_position,
            _v: PhantomData,
            _a: PhantomData,
        }
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> ProfileBuilder<Set, A> {
        self.max_velocity = Some(max_velocity);
        self.retag()
    }

    pub fn with_max_acceleration(mut self, max_acceleration: f32) -> ProfileBuilder<V, Set> {
        self.max_acceleration = Some(max_acceleration);
        self.retag()
    }

    pub fn with_initial_position(mut self, position: f32) -> Self {
        self.initial_position = position;
        self
    }

    /// Take limits and initial position from an existing config.
    pub fn with_cfg(mut self, cfg: &ProfileCfg) -> ProfileBuilder<Set, Set> {
        self.max_velocity = Some(cfg.max_velocity);
        self.max_acceleration = Some(cfg.max_acceleration);
        self.initial_position = cfg.initial_position;
        self.retag()
    }

    /// Validate and build regardless of type-state.
    pub fn try_build(self) -> Result<MotionProfile> {
        let max_velocity = self
            .max_velocity
            .ok_or_else(|| eyre::Report::new(BuildError::MissingMaxVelocity))?;
        let max_acceleration = self
            .max_acceleration
            .ok_or_else(|| eyre::Report::new(BuildError::MissingMaxAcceleration))?;
        validate_and_build(ProfileCfg {
            max_velocity,
            max_acceleration,
            initial_position: self.initial_position,
        })
    }
}

impl ProfileBuilder<Set, Set> {
    pub fn build(self) -> Result<MotionProfile> {
        self.try_build()
    }
}

/// Validate configuration and construct the engine; shared by every build path.
fn validate_and_build(cfg: ProfileCfg) -> Result<MotionProfile> {
    MotionProfile::from_cfg(cfg).map_err(|e| {
        let msg = match e {
            ProfileError::InvalidConfiguration(msg) | ProfileError::NonFinite(msg) => msg,
            ProfileError::NumericDomain { .. } => "numeric domain",
        };
        eyre::Report::new(BuildError::InvalidConfig(msg))
    })
}
