#![no_main]
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;
use motion_core::{Baseline, ProfileCfg, evaluate, plan};

#[derive(Debug, Arbitrary)]
struct Move {
    target: f32,
    position: f32,
    velocity: f32,
    max_velocity: f32,
    max_acceleration: f32,
    probes: [f32; 4],
}

fuzz_target!(|m: Move| {
    let cfg = ProfileCfg {
        max_velocity: m.max_velocity,
        max_acceleration: m.max_acceleration,
        initial_position: 0.0,
    };
    let baseline = Baseline {
        position: m.position,
        velocity: m.velocity,
    };
    let Ok(p) = plan(m.target, baseline, &cfg) else {
        return;
    };
    for e in m.probes {
        let _ = evaluate(&p, e);
    }
    // Past the end the plan always reports the target.
    let end = evaluate(&p, p.total_duration());
    if p.total_duration().is_finite() {
        assert!(end.finished);
        assert_eq!(end.position.to_bits(), m.target.to_bits());
    }
});
