#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and schedule parsing for the motion profile generator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Retarget schedule CSV loader enforces headers and time ordering so the
//!   runner can replay mid-motion target changes deterministically.
use serde::Deserialize;

/// Retarget schedule CSV schema.
///
/// Expected headers:
/// time_s,target
///
/// Example:
/// time_s,target
/// 0.0,100.0
/// 5.5,50.0
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ScheduleRow {
    /// Seconds since the start of the run at which `target` is commanded.
    pub time_s: f64,
    pub target: f32,
}

#[derive(Debug, Deserialize)]
pub struct Limits {
    /// Velocity limit (units/s), must be > 0
    pub max_velocity: f32,
    /// Acceleration limit (units/s^2), must be > 0
    pub max_acceleration: f32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Axis {
    /// Position restored by `reset` and used as the starting point
    pub initial_position: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunnerCfg {
    /// Control loop rate used by the simulator/pacer
    pub tick_hz: u32,
    /// Hard cap on a single run in milliseconds (0 = runner default)
    pub max_run_ms: u64,
}

impl Default for RunnerCfg {
    fn default() -> Self {
        Self {
            tick_hz: 1000,
            max_run_ms: 0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub limits: Limits,
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub runner: RunnerCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Time-ordered list of commanded targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    /// Build a schedule, enforcing finite values and strictly increasing,
    /// non-negative times.
    pub fn from_rows(rows: Vec<ScheduleRow>) -> eyre::Result<Self> {
        if rows.is_empty() {
            eyre::bail!("schedule requires at least one row");
        }
        for (i, row) in rows.iter().enumerate() {
            if !row.time_s.is_finite() || row.time_s < 0.0 {
                eyre::bail!("schedule row {i}: time_s must be finite and >= 0");
            }
            if !row.target.is_finite() {
                eyre::bail!("schedule row {i}: target must be finite");
            }
            if i > 0 && row.time_s <= rows[i - 1].time_s {
                eyre::bail!(
                    "schedule times must be strictly increasing (rows {} and {})",
                    i - 1,
                    i
                );
            }
        }
        Ok(Self { rows })
    }

    /// Single-target schedule commanded at t = 0.
    pub fn single(target: f32) -> eyre::Result<Self> {
        Self::from_rows(vec![ScheduleRow {
            time_s: 0.0,
            target,
        }])
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Target commanded last; the run is complete once it is reached.
    pub fn final_target(&self) -> f32 {
        // from_rows guarantees at least one row
        self.rows.last().map_or(0.0, |r| r.target)
    }

    /// Target in force at `time_s` (the latest row not after it), if any.
    pub fn target_at(&self, time_s: f64) -> Option<f32> {
        self.rows
            .iter()
            .take_while(|r| r.time_s <= time_s)
            .last()
            .map(|r| r.target)
    }
}

impl TryFrom<Vec<ScheduleRow>> for Schedule {
    type Error = eyre::Report;
    fn try_from(rows: Vec<ScheduleRow>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl TryFrom<&[ScheduleRow]> for Schedule {
    type Error = eyre::Report;
    fn try_from(rows: &[ScheduleRow]) -> Result<Self, Self::Error> {
        Self::from_rows(rows.to_vec())
    }
}

pub fn load_schedule_csv(path: &std::path::Path) -> eyre::Result<Schedule> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open schedule CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["time_s", "target"];
    let actual: Vec<String> = headers.iter().map(|s| s.trim().to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "schedule CSV must have headers 'time_s,target', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ScheduleRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    Schedule::try_from(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Limits
        if !self.limits.max_velocity.is_finite() || self.limits.max_velocity <= 0.0 {
            eyre::bail!("limits.max_velocity must be > 0");
        }
        if !self.limits.max_acceleration.is_finite() || self.limits.max_acceleration <= 0.0 {
            eyre::bail!("limits.max_acceleration must be > 0");
        }

        // Axis
        if !self.axis.initial_position.is_finite() {
            eyre::bail!("axis.initial_position must be finite");
        }

        // Runner
        if self.runner.tick_hz == 0 {
            eyre::bail!("runner.tick_hz must be > 0");
        }
        if self.runner.tick_hz > 100_000 {
            eyre::bail!("runner.tick_hz is unreasonably large (>100kHz)");
        }
        if self.runner.max_run_ms > 24 * 60 * 60 * 1000 {
            eyre::bail!("runner.max_run_ms is unreasonably large (>24h)");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time_s: f64, target: f32) -> ScheduleRow {
        ScheduleRow { time_s, target }
    }

    #[test]
    fn target_at_picks_latest_row_not_after_time() {
        let s = Schedule::from_rows(vec![row(0.0, 100.0), row(5.0, 50.0), row(7.5, -20.0)])
            .unwrap();
        assert_eq!(s.target_at(0.0), Some(100.0));
        assert_eq!(s.target_at(4.999), Some(100.0));
        assert_eq!(s.target_at(5.0), Some(50.0));
        assert_eq!(s.target_at(100.0), Some(-20.0));
        assert_eq!(s.final_target(), -20.0);
    }

    #[test]
    fn target_at_is_none_before_first_row() {
        let s = Schedule::from_rows(vec![row(1.0, 3.0)]).unwrap();
        assert_eq!(s.target_at(0.5), None);
    }

    #[test]
    fn rejects_unordered_and_empty() {
        assert!(Schedule::from_rows(vec![]).is_err());
        assert!(Schedule::from_rows(vec![row(1.0, 0.0), row(1.0, 2.0)]).is_err());
        assert!(Schedule::from_rows(vec![row(-1.0, 0.0)]).is_err());
        assert!(Schedule::from_rows(vec![row(0.0, f32::NAN)]).is_err());
    }

    #[test]
    fn defaults_fill_optional_sections() {
        let cfg = load_toml("[limits]\nmax_velocity = 1.0\nmax_acceleration = 2.0\n").unwrap();
        assert_eq!(cfg.runner.tick_hz, 1000);
        assert_eq!(cfg.axis.initial_position, 0.0);
        assert!(cfg.logging.file.is_none());
        cfg.validate().unwrap();
    }
}
