use motion_config::load_toml;
use rstest::rstest;

const VALID: &str = r#"
[limits]
max_velocity = 10.0
max_acceleration = 5.0

[axis]
initial_position = 0.0

[runner]
tick_hz = 500
max_run_ms = 60000

[logging]
level = "info"
rotation = "daily"
"#;

#[test]
fn accepts_full_valid_config() {
    let cfg = load_toml(VALID).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.runner.tick_hz, 500);
    assert_eq!(cfg.limits.max_velocity, 10.0);
}

#[test]
fn missing_limits_section_is_a_parse_error() {
    let toml = r#"
[axis]
initial_position = 1.0
"#;
    assert!(load_toml(toml).is_err());
}

#[rstest]
#[case("max_velocity = 0.0\nmax_acceleration = 5.0", "limits.max_velocity must be > 0")]
#[case("max_velocity = -1.0\nmax_acceleration = 5.0", "limits.max_velocity must be > 0")]
#[case("max_velocity = 10.0\nmax_acceleration = 0.0", "limits.max_acceleration must be > 0")]
#[case("max_velocity = 10.0\nmax_acceleration = -3.0", "limits.max_acceleration must be > 0")]
#[case("max_velocity = inf\nmax_acceleration = 5.0", "limits.max_velocity must be > 0")]
fn rejects_non_positive_limits(#[case] limits: &str, #[case] needle: &str) {
    let toml = format!("[limits]\n{limits}\n");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject limits");
    assert!(
        format!("{err}").contains(needle),
        "unexpected message: {err}"
    );
}

#[test]
fn rejects_zero_tick_hz() {
    let toml = r#"
[limits]
max_velocity = 10.0
max_acceleration = 5.0

[runner]
tick_hz = 0
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject tick_hz=0");
    assert!(format!("{err}").contains("tick_hz must be > 0"));
}

#[test]
fn rejects_unknown_rotation() {
    let toml = r#"
[limits]
max_velocity = 10.0
max_acceleration = 5.0

[logging]
rotation = "weekly"
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject rotation");
    assert!(format!("{err}").contains("logging.rotation"));
}
