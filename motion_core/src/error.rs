use thiserror::Error;

/// Errors raised by the planner/evaluator hot path. Allocation-free so they
/// can be returned from inside the control loop.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProfileError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("numeric domain error: negative radicand {radicand} in peak speed")]
    NumericDomain { radicand: f32 },
    #[error("non-finite input: {0}")]
    NonFinite(&'static str),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing max velocity")]
    MissingMaxVelocity,
    #[error("missing max acceleration")]
    MissingMaxAcceleration,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    #[error("max run time exceeded")]
    MaxRuntime,
    #[error("interrupted")]
    Interrupted,
}

#[derive(Debug, Error, Clone)]
pub enum RunError {
    #[error("run aborted: {0}")]
    Abort(AbortReason),
    #[error("setpoint sink error: {0}")]
    Sink(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
