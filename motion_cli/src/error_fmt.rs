//! Human-readable error descriptions and structured JSON error formatting.

use crate::cli::LAST_RUN;
use crate::motion::abort_reason_name;
use motion_core::error::{AbortReason, BuildError, ProfileError, RunError};

/// Marker wrapped around config-file problems so they map to the
/// invalid-configuration exit code.
pub const INVALID_CONFIG: &str = "invalid configuration";

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingMaxVelocity => {
                "What happened: No velocity limit was provided to the profile engine.\nLikely causes: The builder was used without with_max_velocity(...).\nHow to fix: Set limits.max_velocity in the config.".to_string()
            }
            BuildError::MissingMaxAcceleration => {
                "What happened: No acceleration limit was provided to the profile engine.\nLikely causes: The builder was used without with_max_acceleration(...).\nHow to fix: Set limits.max_acceleration in the config.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Zero, negative or non-finite limits in the TOML.\nHow to fix: Edit the [limits] and [axis] sections, then rerun."
            ),
        };
    }

    if let Some(re) = err.downcast_ref::<RunError>() {
        return match re {
            RunError::Abort(AbortReason::MaxRuntime) => {
                let cap = LAST_RUN
                    .get()
                    .map(|c| format!(" ({} ms)", c.max_run_ms))
                    .unwrap_or_default();
                format!(
                    "What happened: max run time{cap} was exceeded before the axis settled.\nLikely causes: Long move for the configured limits, or a schedule that keeps retargeting.\nHow to fix: Increase runner.max_run_ms (or --max-run-ms), or raise the velocity/acceleration limits."
                )
            }
            RunError::Abort(AbortReason::Interrupted) => {
                "What happened: The run was interrupted.\nLikely causes: Ctrl-C or a termination signal.\nHow to fix: Start a new run; the axis state is not persisted.".to_string()
            }
            RunError::Sink(msg) => format!(
                "What happened: Setpoint output failed ({msg}).\nLikely causes: Closed pipe or full disk on stdout.\nHow to fix: Check where stdout is redirected, or use --every to print less."
            ),
        };
    }

    if let Some(pe) = err.downcast_ref::<ProfileError>() {
        return match pe {
            ProfileError::InvalidConfiguration(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Zero, negative or non-finite limits.\nHow to fix: Edit the [limits] section of the config."
            ),
            ProfileError::NumericDomain { radicand } => format!(
                "What happened: Peak-speed computation hit a negative radicand ({radicand}).\nLikely causes: Extreme start velocity or distances beyond f32 precision.\nHow to fix: Scale units down, or re-run with --log-level=debug to see the plan."
            ),
            ProfileError::NonFinite(what) => format!(
                "What happened: Non-finite {what} (NaN or infinity).\nLikely causes: A NaN/inf value on the command line or in the schedule.\nHow to fix: Pass finite numbers."
            ),
        };
    }

    // String-based heuristics for errors coming from config or schedule loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("schedule csv must have headers") {
        return "Invalid headers in schedule CSV. Expected 'time_s,target'.".to_string();
    }

    if lower.starts_with("read config") {
        return format!(
            "What happened: Could not read the config file.\nLikely causes: Wrong --config path or missing permissions.\nHow to fix: Point --config at a readable TOML file. Original: {msg}"
        );
    }

    if lower.starts_with(INVALID_CONFIG) {
        let cause = err
            .chain()
            .nth(1)
            .map(ToString::to_string)
            .unwrap_or_default();
        return format!(
            "What happened: Configuration is invalid or incomplete ({cause}).\nLikely causes: Missing [limits] (max_velocity, max_acceleration) or out-of-range values.\nHow to fix: Edit the TOML config and try again."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: invalid configuration 2, numeric domain 3,
/// max runtime 4, interrupted 5, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(RunError::Abort(reason)) = err.downcast_ref::<RunError>() {
        return match reason {
            AbortReason::MaxRuntime => 4,
            AbortReason::Interrupted => 5,
        };
    }
    if let Some(pe) = err.downcast_ref::<ProfileError>() {
        return match pe {
            ProfileError::NumericDomain { .. } => 3,
            ProfileError::InvalidConfiguration(_) | ProfileError::NonFinite(_) => 2,
        };
    }
    if err.downcast_ref::<BuildError>().is_some() || err.to_string().starts_with(INVALID_CONFIG) {
        return 2;
    }
    1
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(re) = err.downcast_ref::<RunError>() {
        return match re {
            RunError::Abort(reason) => abort_reason_name(reason),
            RunError::Sink(_) => "Sink",
        };
    }
    if let Some(pe) = err.downcast_ref::<ProfileError>() {
        return match pe {
            ProfileError::InvalidConfiguration(_) => "InvalidConfiguration",
            ProfileError::NumericDomain { .. } => "NumericDomain",
            ProfileError::NonFinite(_) => "NonFinite",
        };
    }
    if exit_code_for_error(err) == 2 {
        return "InvalidConfiguration";
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = reason_name(err);
    let msg = humanize(err);
    let details = match err.downcast_ref::<RunError>() {
        Some(RunError::Abort(AbortReason::MaxRuntime)) => LAST_RUN
            .get()
            .map(|c| json!({ "max_run_ms": c.max_run_ms, "tick_hz": c.tick_hz, "target": c.target })),
        _ => match err.downcast_ref::<ProfileError>() {
            Some(ProfileError::NumericDomain { radicand }) => Some(json!({ "radicand": radicand })),
            _ => None,
        },
    };

    let obj = if let Some(d) = details {
        json!({ "reason": reason, "details": d, "message": msg })
    } else {
        json!({ "reason": reason, "message": msg })
    };
    obj.to_string()
}
