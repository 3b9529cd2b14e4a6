//! Logger module for msh
//!
//! Go-style simple logging: `LEVEL message`, written to stderr so that the
//! script keeps stdout to itself.
//!
//! # Usage
//!
//! ```rust
//! use msh::util::logger;
//!
//! logger::init();
//! tracing::error!("Hello, {}", "world");
//! ```

use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Environment variable holding the log level
pub const LOG_ENV: &str = "MSH_LOG";

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level `{}`", other)),
        }
    }
}

/// Initialize logger with default configuration (ERROR level)
pub fn init() {
    init_with_level(LogLevel::default());
}

/// Initialize logger with custom level (Go style: `LEVEL message`)
///
/// Calling this more than once keeps the first subscriber.
pub fn init_with_level(level: LogLevel) {
    let filter = LevelFilter::from(level);

    // 不显示时间、不显示模块路径、无颜色
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    let _ = Registry::default().with(layer).try_init();
}

/// Initialize logger from `MSH_LOG`, falling back to ERROR
///
/// An unrecognised value is reported once the subscriber is up.
pub fn init_from_env() {
    match std::env::var(LOG_ENV) {
        Ok(raw) => match raw.parse::<LogLevel>() {
            Ok(level) => init_with_level(level),
            Err(e) => {
                init();
                tracing::error!("ignoring {}: {}", LOG_ENV, e);
            }
        },
        Err(_) => init(),
    }
}
