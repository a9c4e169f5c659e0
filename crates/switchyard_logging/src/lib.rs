//! Tracing setup and formatting helpers for hosts embedding the engine.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// How chatty the engine's tracing output is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
pub enum VerbosityLevel {
    /// Warnings and errors only.
    #[default]
    Default,

    /// Adds per-project discovery, routing, and execution progress.
    /// Corresponds to `-v`.
    Verbose,

    /// Everything, including cache decisions and debug-session
    /// correlation. Corresponds to `-vv`.
    Trace,
}

impl VerbosityLevel {
    /// Maps a count of repeated `-v` flags to a level.
    #[must_use]
    pub const fn from_flag_count(count: u8) -> Self {
        match count {
            0 => Self::Default,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Default => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Installs the global tracing subscriber: compact fmt output on stderr,
/// filtered by `level` unless overridden through `RUST_LOG`.
///
/// Safe to call more than once; only the first call wins, so embedder and
/// test setups do not fight over the global dispatcher.
pub fn setup_tracing(level: VerbosityLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.level_filter().into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Human-readable duration for log lines: `846ms`, `2.41s`, `1m 12s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs >= 60 {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    } else if total_secs >= 1 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
