//! `From` implementations bridging `motion_config` types to `motion_core` types.

use crate::config::{ProfileCfg, RunCfg};

// ── ProfileCfg ───────────────────────────────────────────────────────────────

impl From<&motion_config::Config> for ProfileCfg {
    fn from(c: &motion_config::Config) -> Self {
        Self {
            max_velocity: c.limits.max_velocity,
            max_acceleration: c.limits.max_acceleration,
            initial_position: c.axis.initial_position,
        }
    }
}

// ── RunCfg ───────────────────────────────────────────────────────────────────

/// A zero `max_run_ms` in the file means "use the runtime default".
impl From<&motion_config::RunnerCfg> for RunCfg {
    fn from(c: &motion_config::RunnerCfg) -> Self {
        let defaults = RunCfg::default();
        Self {
            tick_hz: c.tick_hz,
            max_run_ms: if c.max_run_ms == 0 {
                defaults.max_run_ms
            } else {
                c.max_run_ms
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_toml_sections() {
        let cfg = motion_config::load_toml(
            "[limits]\nmax_velocity = 4.0\nmax_acceleration = 2.0\n[axis]\ninitial_position = 1.5\n[runner]\ntick_hz = 200\n",
        )
        .unwrap();
        let p = ProfileCfg::from(&cfg);
        assert_eq!(p.max_velocity, 4.0);
        assert_eq!(p.max_acceleration, 2.0);
        assert_eq!(p.initial_position, 1.5);
        let r = RunCfg::from(&cfg.runner);
        assert_eq!(r.tick_hz, 200);
        assert_eq!(r.max_run_ms, RunCfg::default().max_run_ms);
    }
}
