//! testgrid: structured test results from CI build logs
//!
//! This binary reads a CI build log from a file or stdin and prints the test
//! records found in it as JSON.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use testgrid::commands;
use testgrid::config::Config;

fn main() -> Result<()> {
    let config = Config::parse();
    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();

    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(config.env_filter(rust_log.as_deref()))
        .init();

    config.validate()?;
    debug!(source = %config.log_source(), "starting testgrid");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&config, &mut out)
}
