#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
//! `motion_cli`: plan and drive trapezoidal moves from a TOML config.

mod cli;
mod error_fmt;
mod motion;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use error_fmt::{INVALID_CONFIG, exit_code_for_error, format_error_json, humanize};
use eyre::{Result, WrapErr};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn main() {
    // Keep panic reports readable; errors are rendered by humanize below.
    let _ = color_eyre::install();

    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = real_main(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn real_main(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli.config)?;
    init_tracing(cli.json, &cli.log_level, &cfg.logging)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
    }

    match cli.cmd {
        Commands::Plan {
            target,
            from_position,
            from_velocity,
        } => {
            motion::print_plan(&cfg, target, from_position, from_velocity, cli.json)?;
        }
        Commands::Run {
            target,
            schedule,
            max_run_ms,
            realtime,
            every,
        } => {
            motion::run_move(
                &cfg,
                target,
                schedule.as_deref(),
                max_run_ms,
                realtime,
                every,
                cli.json,
                &shutdown,
            )?;
        }
        Commands::SelfCheck => {
            let summary = motion::self_check(&cfg)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "self_check": "ok", "ticks": summary.ticks })
                );
            } else {
                println!(
                    "ok: engine settled in {:.3}s ({} ticks)",
                    summary.duration_s, summary.ticks
                );
            }
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<motion_config::Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = motion_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("parse {}: {e}", path.display()))
        .wrap_err(INVALID_CONFIG)?;
    cfg.validate().wrap_err(INVALID_CONFIG)?;
    Ok(cfg)
}

/// Console logs go to stderr (pretty or JSON); `[logging] file` adds a JSON
/// file layer with optional rotation. `RUST_LOG` overrides `--log-level`.
fn init_tracing(json: bool, level: &str, logging: &motion_config::Logging) -> Result<()> {
    let console_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let pretty = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter())
    });
    let json_console = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter())
    });

    let file_layer = match logging.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file}"))?;
            let rotation = match logging.rotation.as_deref() {
                Some("daily") => Rotation::DAILY,
                Some("hourly") => Rotation::HOURLY,
                _ => Rotation::NEVER,
            };
            let appender = RollingFileAppender::new(rotation, dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            let file_level = logging.level.as_deref().unwrap_or(level);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(EnvFilter::new(file_level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(pretty)
        .with(json_console)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))
}
