#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = motion_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // A validated config must always build an engine.
    let pcfg = motion_core::ProfileCfg::from(&cfg);
    if let Err(e) = motion_core::MotionProfile::from_cfg(pcfg) {
        panic!("validated config rejected by engine: {e}");
    }
});
