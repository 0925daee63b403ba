use motion_core::{MotionProfile, Plan, Setpoint, evaluate};
use proptest::prelude::*;

const EPS: f32 = 1e-4;

fn boundaries(p: &Plan) -> [f32; 3] {
    [p.ramp_end(), p.cruise_end(), p.total_duration()]
}

fn position_tolerance(p: &Plan, max_velocity: f32) -> f32 {
    let scale = p.baseline.position.abs() + p.target.abs() + p.d_total + p.d_brake;
    2.0 * EPS * max_velocity + 1e-3 + 2e-5 * scale
}

fn check_plan(p: &Plan, max_velocity: f32) -> Result<(), TestCaseError> {
    // continuity at every phase boundary
    let tol = position_tolerance(p, max_velocity);
    for b in boundaries(p) {
        if b <= EPS {
            continue;
        }
        let before = evaluate(p, b - EPS).position;
        let after = evaluate(p, b + EPS).position;
        prop_assert!(
            (before - after).abs() <= tol,
            "jump at {} of {}: {} -> {} ({:?})",
            b,
            (before - after).abs(),
            before,
            after,
            p
        );
    }

    // velocity bound over the whole plan
    let total = p.total_duration();
    let bound = max_velocity.max(p.baseline.velocity.abs()) * (1.0 + 1e-4) + 1e-4;
    for i in 0..=200 {
        let e = total * (i as f32) / 200.0;
        let sp = evaluate(p, e);
        prop_assert!(
            sp.velocity.abs() <= bound,
            "|v|={} > {} at {}",
            sp.velocity.abs(),
            bound,
            e
        );
    }

    // termination
    let end: Setpoint = evaluate(p, total + EPS);
    prop_assert!(end.finished);
    prop_assert_eq!(end.position, p.target);
    prop_assert_eq!(end.velocity, 0.0);
    prop_assert_eq!(end.acceleration, 0.0);
    Ok(())
}

proptest! {
    #[test]
    fn rest_to_rest_plans_are_continuous_bounded_and_terminate(
        max_velocity in 0.5f32..50.0,
        max_acceleration in 0.5f32..50.0,
        start in -100.0f32..100.0,
        target in -100.0f32..100.0,
    ) {
        let mut p = MotionProfile::new(max_velocity, max_acceleration, start).unwrap();
        p.update(target, 0.0).unwrap();
        prop_assert_eq!(p.position(), start);
        check_plan(p.plan(), max_velocity)?;
        if p.plan().shape == motion_core::Shape::Triangular {
            prop_assert!(p.plan().peak_speed <= max_velocity * (1.0 + 1e-5));
        }
    }

    #[test]
    fn retargeting_mid_motion_is_continuous_and_terminates(
        max_velocity in 0.5f32..50.0,
        max_acceleration in 0.5f32..50.0,
        first in -100.0f32..100.0,
        second in -100.0f32..100.0,
        fraction in 0.0f32..1.0,
    ) {
        prop_assume!(first != second);
        let mut p = MotionProfile::new(max_velocity, max_acceleration, 0.0).unwrap();
        p.update(first, 0.0).unwrap();
        let at = p.plan().total_duration() * fraction;
        let before = p.update(first, at).unwrap();
        let v_before = p.velocity();

        let after = p.update(second, 0.0).unwrap();
        prop_assert_eq!(after, before);
        prop_assert_eq!(p.plan().baseline.velocity, v_before);
        check_plan(p.plan(), max_velocity)?;

        let total = p.plan().total_duration();
        p.update(second, total + 1.0).unwrap();
        prop_assert!(p.is_finished());
        prop_assert_eq!(p.position(), second);
    }

    #[test]
    fn repeated_target_never_replans(
        target in -100.0f32..100.0,
        ticks in 1usize..200,
    ) {
        let mut p = MotionProfile::new(10.0, 5.0, 0.0).unwrap();
        p.update(target, 0.0).unwrap();
        let plan = *p.plan();
        for i in 0..ticks {
            p.update(target, i as f32 * 0.05).unwrap();
        }
        prop_assert_eq!(p.replan_count(), 1);
        prop_assert_eq!(*p.plan(), plan);
    }

    #[test]
    fn moves_are_symmetric_in_direction(
        max_velocity in 0.5f32..50.0,
        max_acceleration in 0.5f32..50.0,
        distance in 0.0f32..200.0,
    ) {
        let mut fwd = MotionProfile::new(max_velocity, max_acceleration, 0.0).unwrap();
        let mut rev = MotionProfile::new(max_velocity, max_acceleration, 0.0).unwrap();
        fwd.update(distance, 0.0).unwrap();
        rev.update(-distance, 0.0).unwrap();
        let (a, b) = (fwd.plan(), rev.plan());
        prop_assert_eq!(a.shape, b.shape);
        prop_assert_eq!(a.total_duration(), b.total_duration());
        prop_assert_eq!(a.peak_speed, b.peak_speed);
        prop_assert_eq!(a.direction.factor(), -b.direction.factor());
    }
}
