use motion_core::error::{AbortReason, ProfileError, RunError};
use motion_core::{MotionProfile, RunCfg, run};
use motion_config::Schedule;
use motion_traits::{ManualClock, SetpointSink};

/// A drive that accepts a few setpoints, then drops off the bus.
struct FlakyDrive {
    left: u32,
}

impl SetpointSink for FlakyDrive {
    fn apply(
        &mut self,
        _time_s: f64,
        _position: f32,
        _velocity: f32,
        _acceleration: f32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.left == 0 {
            return Err("bus timeout".into());
        }
        self.left -= 1;
        Ok(())
    }
}

#[test]
fn sink_errors_map_to_run_error_sink() {
    let err = run(
        MotionProfile::new(1.0, 1.0, 0.0).unwrap(),
        &Schedule::single(5.0).unwrap(),
        &mut FlakyDrive { left: 2 },
        &ManualClock::new(),
        &RunCfg::default(),
        None,
    )
    .expect_err("expected sink error");
    match err.downcast_ref::<RunError>() {
        Some(RunError::Sink(msg)) => assert_eq!(msg, "bus timeout"),
        other => panic!("expected Sink, got: {other:?}"),
    }
}

#[test]
fn error_messages_are_human_readable() {
    assert_eq!(
        ProfileError::InvalidConfiguration("max velocity must be finite and > 0").to_string(),
        "invalid configuration: max velocity must be finite and > 0"
    );
    assert!(
        ProfileError::NumericDomain { radicand: -2.0 }
            .to_string()
            .contains("-2")
    );
    assert_eq!(
        RunError::Abort(AbortReason::MaxRuntime).to_string(),
        "run aborted: max run time exceeded"
    );
    assert_eq!(
        RunError::Abort(AbortReason::Interrupted).to_string(),
        "run aborted: interrupted"
    );
}

#[test]
fn non_finite_commands_are_rejected_without_state_change() {
    let mut p = MotionProfile::new(10.0, 5.0, 0.0).unwrap();
    assert_eq!(
        p.update(f32::NAN, 0.0).unwrap_err(),
        ProfileError::NonFinite("target position")
    );
    assert_eq!(
        p.update(1.0, f32::INFINITY).unwrap_err(),
        ProfileError::NonFinite("elapsed time")
    );
    assert_eq!(p.replan_count(), 0);
    assert_eq!(p.last_target(), None);
}
