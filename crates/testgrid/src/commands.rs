// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Subcommand implementations
//!
//! Each command reads one build log, parses it and writes JSON to the given
//! writer. The log file is opened and closed within [`read_records`], so the
//! handle is released on every exit path, including a failed read.

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Command, Config, LogSource};
use testgrid_logs::{FailingExcerpt, RunSummary, TestRecord, parse_log, records_to_json};

/// JSON document printed by `testgrid summary`
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    /// Where the log was read from
    pub source: String,
    /// When the log was parsed
    pub parsed_at: DateTime<Utc>,
    /// Counts and failing test names
    #[serde(flatten)]
    pub summary: &'a RunSummary,
    /// Leading failing tests for a short report
    pub excerpt: FailingExcerpt<'a>,
}

/// Run the configured subcommand, writing its output to `out`
///
/// # Errors
///
/// Returns an error if the log cannot be opened or read, or if writing the
/// output fails.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let source = config.log_source();
    let records = read_records(&source)?;
    info!(source = %source, tests = records.len(), "parsed build log");

    match config.subcommand() {
        Command::Parse { .. } => {
            let json = records_to_json(&records, config.pretty)?;
            writeln!(out, "{json}")?;
        }
        Command::Summary { limit, .. } => {
            let summary = RunSummary::from_records(&records);
            debug!(
                passed = summary.passed,
                failed = summary.failed,
                skipped = summary.skipped,
                "computed summary"
            );
            let report = SummaryReport {
                source: source.to_string(),
                parsed_at: Utc::now(),
                summary: &summary,
                excerpt: summary.failing_excerpt(limit),
            };
            write_json(out, &report, config.pretty)?;
        }
        Command::Failures { .. } => {
            let failing: Vec<TestRecord> = records.into_iter().filter(TestRecord::failed).collect();
            let json = records_to_json(&failing, config.pretty)?;
            writeln!(out, "{json}")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Parse the build log named by `source`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the stream fails mid-read.
pub fn read_records(source: &LogSource) -> Result<Vec<TestRecord>> {
    match source {
        LogSource::Stdin => {
            let stdin = io::stdin();
            parse_log(stdin.lock()).context("failed to read build log from stdin")
        }
        LogSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            parse_log(BufReader::new(file))
                .with_context(|| format!("failed to read log file {}", path.display()))
        }
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
