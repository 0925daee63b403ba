//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();
/// Effective limits of the current run (for JSON error details).
pub static LAST_RUN: OnceLock<RunContext> = OnceLock::new();

#[derive(Copy, Clone, Debug)]
pub struct RunContext {
    pub target: f32,
    pub max_run_ms: u64,
    pub tick_hz: u32,
}

#[derive(Parser, Debug)]
#[command(name = "motion_cli", version, about = "Trapezoidal motion profile generator")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/motion_config.toml")]
    pub config: PathBuf,

    /// Emit setpoints, summaries and errors as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins if set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan a single move and print its phases
    Plan {
        /// Target position
        #[arg(long, allow_negative_numbers = true)]
        target: f32,
        /// Start position (defaults to axis.initial_position)
        #[arg(long, value_name = "P", allow_negative_numbers = true)]
        from_position: Option<f32>,
        /// Start velocity
        #[arg(long, value_name = "V", default_value_t = 0.0, allow_negative_numbers = true)]
        from_velocity: f32,
    },
    /// Drive the axis to a target (or through a retarget schedule)
    Run {
        /// Target position, commanded at t = 0
        #[arg(
            long,
            allow_negative_numbers = true,
            required_unless_present = "schedule",
            conflicts_with = "schedule"
        )]
        target: Option<f32>,
        /// Retarget schedule CSV with headers time_s,target
        #[arg(long, value_name = "CSV")]
        schedule: Option<PathBuf>,
        /// Override runner.max_run_ms (loop time)
        #[arg(long, value_name = "MS")]
        max_run_ms: Option<u64>,
        /// Pace ticks against the wall clock instead of simulating
        #[arg(long, action = ArgAction::SetTrue)]
        realtime: bool,
        /// Print every Nth setpoint (0 prints only the summary)
        #[arg(long, value_name = "N", default_value_t = 1)]
        every: u64,
    },
    /// Build the engine from config and simulate a short move
    SelfCheck,
}
