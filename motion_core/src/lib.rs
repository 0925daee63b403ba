#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Trapezoidal/triangular motion profile generation for a single axis.
//!
//! Computes position, velocity and acceleration setpoints in closed form
//! under fixed velocity and acceleration limits, replanning instantly and
//! without a position jump whenever the commanded target changes mid-motion.
//!
//! ## Architecture
//!
//! - **Planner**: phase durations/distances for a new target (`planner` module)
//! - **Evaluator**: setpoint at a given time into the live plan (`evaluator` module)
//! - **Engine**: state, replan-on-change and accessors (`MotionProfile`)
//! - **Runner**: per-tick driver, retarget schedules and pacing (`runner` module)
//! - **Configuration**: runtime config structs and TOML mapping (`config`, `conversions`)
//!
//! The planner, evaluator and engine are synchronous, allocation-free and
//! perform no I/O; they are meant to be called from inside a control loop.

pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod evaluator;
pub mod planner;
pub mod profile;
pub mod runner;
pub mod types;
pub mod util;

pub use builder::ProfileBuilder;
pub use config::{ProfileCfg, RunCfg};
pub use error::{AbortReason, BuildError, ProfileError, RunError};
pub use evaluator::evaluate;
pub use planner::{Plan, plan};
pub use profile::MotionProfile;
pub use runner::{RunSummary, Ticker, run};
pub use types::{Baseline, Direction, Segment, Setpoint, Shape};
