pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Consumer of generated setpoints (servo drive, logger, plotter, ...).
///
/// Times are seconds since the start of the run; kinematic values use the
/// same length/time units as the profile limits.
pub trait SetpointSink {
    fn apply(
        &mut self,
        time_s: f64,
        position: f32,
        velocity: f32,
        acceleration: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Called once the run has ended, successfully or not.
    fn flush(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}

/// Sink that drops everything; handy when only the final state matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SetpointSink for NullSink {
    fn apply(
        &mut self,
        _time_s: f64,
        _position: f32,
        _velocity: f32,
        _acceleration: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
