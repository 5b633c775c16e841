//! # Logging
//!
//! Log configuration for the CLI and the HTTP server. Events go to stderr
//! through a `tracing-subscriber` formatter so stdout stays free for
//! converted text.
//!
//! Settings come from, in increasing priority:
//!
//! 1. Defaults (`info`, `text`)
//! 2. `ASCIIFY_LOG_LEVEL` / `ASCIIFY_LOG_FORMAT`
//! 3. CLI flags
//!
//! `RUST_LOG`, when set, replaces the level filter entirely.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        })
    }
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        match spec.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" | "verbose" => Ok(Self::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

/// Resolved log configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogOptions {
    /// Defaults overridden by `ASCIIFY_LOG_FORMAT` / `ASCIIFY_LOG_LEVEL`.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let format = env::var("ASCIIFY_LOG_FORMAT").ok();
        let level = env::var("ASCIIFY_LOG_LEVEL").ok();
        Self::default().with_overrides(
            format.and_then(|f| f.parse().ok()),
            level.and_then(|l| l.parse().ok()),
        )
    }

    #[must_use]
    pub fn with_overrides(self, format: Option<LogFormat>, level: Option<LogLevel>) -> Self {
        Self {
            format: format.unwrap_or(self.format),
            level: level.unwrap_or(self.level),
        }
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(options: LogOptions) {
    use std::io::IsTerminal;
    use std::sync::OnceLock;
    use tracing_subscriber::{EnvFilter, fmt};

    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let use_ansi = env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(options.level.to_string()));

        let builder = fmt::fmt()
            .with_env_filter(filter)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match options.format {
            LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
            LogFormat::Text => tracing::subscriber::set_global_default(builder.compact().finish()),
        };
    });
}
