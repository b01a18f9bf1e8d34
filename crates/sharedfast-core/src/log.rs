//! Logging bootstrap. Installs a `tracing` subscriber that writes to stderr.
//!
//! The filter comes from `SHAREDFAST_LOG` or `RUST_LOG` when set, otherwise from
//! [`LogConfig::level`]. Safe to call more than once; the first call wins.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const ENV_FILTER_VARS: [&str; 2] = ["SHAREDFAST_LOG", "RUST_LOG"];

static INSTALLED: OnceLock<bool> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Include module targets in each line.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Maps a `-v` count onto a level: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            with_target: verbose >= 2,
        }
    }
}

/// Installs the global subscriber. Returns whether this call (or an earlier one) succeeded.
pub fn init(config: LogConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let directive = ENV_FILTER_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|d| !d.trim().is_empty());
        let filter = match directive.map(EnvFilter::try_new) {
            Some(Ok(filter)) => filter,
            _ => EnvFilter::default().add_directive(config.level.into()),
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(config.with_target)
            .try_init()
            .is_ok()
    })
}
