//! Small value types shared by the planner, evaluator and engine.

/// Sign of net motion for a plan. `Hold` is the exact zero case and must be
/// kept distinct from either direction when selecting the braking branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Reverse,
    #[default]
    Hold,
    Forward,
}

impl Direction {
    /// Sign of `x` with `sign(0) = 0`. NaN maps to `Hold`.
    #[inline]
    pub fn of(x: f32) -> Self {
        if x < 0.0 {
            Self::Reverse
        } else if x > 0.0 {
            Self::Forward
        } else {
            Self::Hold
        }
    }

    /// -1, 0 or +1.
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            Self::Reverse => -1.0,
            Self::Hold => 0.0,
            Self::Forward => 1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Reverse => Self::Forward,
            Self::Hold => Self::Hold,
            Self::Forward => Self::Reverse,
        }
    }
}

/// Whether the plan reaches the velocity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Accelerate, cruise at the velocity limit, decelerate.
    Trapezoidal,
    /// Accelerate straight into decelerate around a lower peak speed.
    #[default]
    Triangular,
}

/// Phase of the live plan that produced a setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    /// Nothing evaluated since init/reset.
    #[default]
    Idle,
    /// Braking and accelerating, folded into one constant-acceleration arc.
    Ramp,
    Cruise,
    Decel,
    /// Target reached; sticky until the next replan.
    Done,
}

/// Kinematic snapshot taken when a plan is created; origin of its equations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Baseline {
    pub position: f32,
    pub velocity: f32,
}

/// Output of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Setpoint {
    pub position: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub segment: Segment,
    pub finished: bool,
}

impl Setpoint {
    /// At rest at `position`, nothing evaluated yet.
    pub fn idle(position: f32) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// At rest on target; the plan is complete.
    pub fn done(target: f32) -> Self {
        Self {
            position: target,
            velocity: 0.0,
            acceleration: 0.0,
            segment: Segment::Done,
            finished: true,
        }
    }
}
