//! Configuration for the testgrid command line tool
//!
//! This module provides the CLI definition and the checks run on it before a
//! log is opened.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use testgrid_logs::summary::DEFAULT_FAILING_LIMIT;

/// Path argument that selects stdin instead of a file
pub const STDIN_PATH: &str = "-";

/// testgrid - structured test results from CI build logs
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "testgrid")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `parse` on stdin)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Pretty-print JSON output
    #[arg(long, env = "TESTGRID_PRETTY", default_value = "false")]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout only carries JSON.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a build log and print every test record as JSON
    ///
    /// Example:
    ///   curl -s "$LOG_URL" | testgrid parse
    Parse {
        /// Build log to read (`-` or omitted for stdin)
        log: Option<PathBuf>,
    },

    /// Print pass/fail/skip counts and the first failing tests
    Summary {
        /// Build log to read (`-` or omitted for stdin)
        log: Option<PathBuf>,

        /// Number of failing test names to list
        #[arg(long, default_value_t = DEFAULT_FAILING_LIMIT)]
        limit: usize,
    },

    /// Print only the failing tests, with their captured output
    Failures {
        /// Build log to read (`-` or omitted for stdin)
        log: Option<PathBuf>,
    },
}

/// Where the build log comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl LogSource {
    fn from_arg(log: Option<&Path>) -> Self {
        match log {
            Some(path) if path != Path::new(STDIN_PATH) => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }
}

impl std::fmt::Display for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// The subcommand to run, with `parse` on stdin as the default
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Parse { log: None })
    }

    /// Get the log source selected by the subcommand
    #[must_use]
    pub fn log_source(&self) -> LogSource {
        match &self.command {
            Some(
                Command::Parse { log } | Command::Summary { log, .. } | Command::Failures { log },
            ) => LogSource::from_arg(log.as_deref()),
            None => LogSource::Stdin,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log path doesn't exist or is not a regular file
    /// - The summary limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let LogSource::File(path) = self.log_source() {
            if !path.exists() {
                return Err(ConfigError::LogNotFound(path));
            }
            if !path.is_file() {
                return Err(ConfigError::LogNotAFile(path));
            }
        }

        if let Some(Command::Summary { limit: 0, .. }) = self.command {
            return Err(ConfigError::InvalidLimit);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Build the log filter from `RUST_LOG`-style directives
    ///
    /// Directives in `rust_log` win; `log_level()` applies only when there
    /// are none.
    #[must_use]
    pub fn env_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.log_level().into())
            .parse_lossy(rust_log.unwrap_or_default())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Log file not found
    #[error("Log file not found: {0}")]
    LogNotFound(PathBuf),

    /// Log path is not a regular file
    #[error("Log path is not a file: {0}")]
    LogNotAFile(PathBuf),

    /// Summary limit must list at least one test
    #[error("--limit must be at least 1")]
    InvalidLimit,
}
