use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;

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

///////////////////////////////
/// Install the global logger. RUST_LOG, if set, refines the chosen level
pub fn setup_global_logger(
    log_level: LogLevel,
    log_mode: LogMode,
    log_path: &Path,
) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level.into());
    builder.parse_default_env();

    match log_mode {
        LogMode::Terminal => {
            builder.target(env_logger::Target::Stderr);
        }
        LogMode::Path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_path.display(), e))?;

            // File drain, no colors
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.write_style(env_logger::WriteStyle::Never);
        }
        LogMode::Discard => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("Logger already initialized: {}", e))
}
