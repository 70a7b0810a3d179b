use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Context;
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::utils::expand_and_resolve_path;

pub const DEFAULT_LOG_PATH: &str = "ontalign.log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" | "warning" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" | "none" => LevelFilter::Off,
            _ => return Err(format!("Invalid log level: {}", s)),
        };
        Ok(LogLevel(level))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogMode {
    Path,
    Terminal,
    Discard,
}
impl std::str::FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s.to_lowercase().as_str() {
            "path" | "file" => LogMode::Path,
            "terminal" | "term" | "cli" => LogMode::Terminal,
            "discard" | "none" => LogMode::Discard,
            _ => return Err(format!("Invalid log mode: {}", s)),
        };
        Ok(mode)
    }
}

/// Install env_logger as the global logger. RUST_LOG, when set, takes precedence over the given level.
/// Log lines go to stderr so they never mix with the prompts on stdout
pub fn setup_global_logger(
    log_level: LogLevel,
    log_mode: LogMode,
    log_path: PathBuf,
) -> anyhow::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(log_level.into());
    builder.parse_default_env();

    match log_mode {
        LogMode::Discard => {
            builder.filter_level(LevelFilter::Off);
        }

        LogMode::Terminal => {
            builder.target(Target::Stderr);
        }

        LogMode::Path => {
            let path = expand_and_resolve_path(&log_path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.write_style(env_logger::WriteStyle::Never);
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder.try_init()?;
    Ok(())
}
