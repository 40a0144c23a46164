// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Build log parsing
//!
//! Turns line-oriented test harness output into one [`TestRecord`] per test.
//! The harness prints four kinds of lines we care about:
//!
//! - `=== RUN   TestName` (also `CONT` and `NAME`) when a test starts or resumes
//! - `--- PASS: TestName (0.01s)` when a test finishes
//! - `=== FAIL: . TestName (0.00s)` when a test finishes and keeps logging
//! - indented diagnostic output belonging to the most recently announced test
//!
//! Everything else is noise. Parsing never fails on content; only a read error
//! on the stream is reported.
//!
//! # Example
//!
//! ```
//! use testgrid_logs::parser::parse_str;
//! use testgrid_logs::record::Outcome;
//!
//! let records = parse_str("--- PASS: TestFoo (0.01s)\n");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].result, Outcome::Pass);
//! ```

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;
use std::time::Duration;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::duration::parse_duration;
use crate::error::LogError;
use crate::record::{Outcome, TestRecord};

// Whitespace classes are ASCII only: Unicode spaces such as U+3000 never
// delimit a marker.
static TEST_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\n\f\r]*===[ \t\n\f\r]+(?:RUN|CONT|NAME)[ \t\n\f\r]+[^ \t\n\f\r]+")
        .expect("test start pattern is valid")
});

static PRIMARY_RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[ \t\n\f\r]*---[ \t\n\f\r]+(?P<outcome>PASS|FAIL|SKIP):[ \t\n\f\r]+",
        r"(?P<name>[^ \t\n\f\r]+) \((?P<duration>[^)]+)\)",
    ))
    .expect("primary result pattern is valid")
});

static SECONDARY_RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[ \t\n\f\r]*===[ \t\n\f\r]+(?P<outcome>PASS|FAIL|SKIP): \. ",
        r"(?P<name>[^ \t\n\f\r]+) \((?P<duration>[^)]+)\)",
    ))
    .expect("secondary result pattern is valid")
});

/// How a single log line was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Shell trace, inline JSON or a top-level `FAIL` summary; discarded
    Noise,
    /// `=== RUN|CONT|NAME`; detaches the current test
    TestStart,
    /// `--- PASS|FAIL|SKIP: name (duration)`; records a result and detaches
    PrimaryResult,
    /// `=== PASS|FAIL|SKIP: . name (duration)`; records a result and attaches
    SecondaryResult,
    /// Indented output appended to the current test
    Diagnostic,
    /// Anything else, including indented output with no current test
    Dropped,
}

/// A result line pulled apart into its fields
struct ResultLine<'a> {
    name: &'a str,
    outcome: Outcome,
    duration: Duration,
}

impl<'a> ResultLine<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let name = caps.name("name")?.as_str();
        let outcome = caps.name("outcome")?.as_str().parse().ok()?;
        let text = caps.name("duration")?.as_str();
        let duration = parse_duration(text).unwrap_or_else(|| {
            trace!(test = name, duration = text, "unparseable duration, using zero");
            Duration::ZERO
        });
        Some(Self {
            name,
            outcome,
            duration,
        })
    }
}

/// Line-at-a-time build log parser
///
/// Feed lines with [`LogParser::process_line`] and collect the sorted records
/// with [`LogParser::finish`]. Each parser owns its state, so independent logs
/// can be parsed concurrently with separate parsers.
#[derive(Debug, Default)]
pub struct LogParser {
    records: Vec<TestRecord>,
    by_name: HashMap<String, usize>,
    current: Option<usize>,
    lines: usize,
}

impl LogParser {
    /// Create a new parser with no records
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line (without its line terminator) and update state
    pub fn process_line(&mut self, line: &str) -> LineKind {
        self.lines += 1;

        if is_noise(line) {
            return LineKind::Noise;
        }

        if TEST_START_RE.is_match(line) {
            self.current = None;
            return LineKind::TestStart;
        }

        if let Some(result) = PRIMARY_RESULT_RE
            .captures(line)
            .and_then(|caps| ResultLine::from_captures(&caps))
        {
            self.record_result(&result);
            self.current = None;
            return LineKind::PrimaryResult;
        }

        if let Some(result) = SECONDARY_RESULT_RE
            .captures(line)
            .and_then(|caps| ResultLine::from_captures(&caps))
        {
            let idx = self.record_result(&result);
            self.current = Some(idx);
            return LineKind::SecondaryResult;
        }

        match self.current {
            Some(idx) if is_diagnostic(line) => {
                self.records[idx].logs.push(line.to_string());
                LineKind::Diagnostic
            }
            _ => LineKind::Dropped,
        }
    }

    /// Look up or create the record for a result line, returning its index
    fn record_result(&mut self, result: &ResultLine<'_>) -> usize {
        if let Some(&idx) = self.by_name.get(result.name) {
            self.records[idx].merge(result.outcome, result.duration);
            return idx;
        }

        let idx = self.records.len();
        self.records.push(TestRecord::new(
            result.name,
            result.outcome,
            result.duration,
        ));
        self.by_name.insert(result.name.to_string(), idx);
        idx
    }

    /// Records seen so far, in first-appearance order
    #[must_use]
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Name of the test that indented lines are currently attributed to
    #[must_use]
    pub fn current_test(&self) -> Option<&str> {
        self.current.map(|idx| self.records[idx].name.as_str())
    }

    /// Number of distinct tests seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no test has been seen yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish parsing and return the records sorted by test name
    #[must_use]
    pub fn finish(self) -> Vec<TestRecord> {
        let mut records = self.records;
        records.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(
            lines = self.lines,
            tests = records.len(),
            "finished parsing build log"
        );
        records
    }
}

/// Shell traces (`+ cmd`), inline JSON and the harness-level `FAIL` summary
fn is_noise(line: &str) -> bool {
    line.starts_with('+') || line.starts_with('{') || line.starts_with("FAIL")
}

/// Indented output (leading space or tab) that is not itself a marker line
fn is_diagnostic(line: &str) -> bool {
    if !line.starts_with([' ', '\t']) {
        return false;
    }
    let trimmed = line.trim();
    !trimmed.starts_with("---") && !trimmed.starts_with("===")
}

/// Parse a complete build log from a buffered reader
///
/// Lines are split on `\n` with an optional preceding `\r` removed. Bytes that
/// are not valid UTF-8 are replaced rather than treated as an error.
///
/// # Errors
///
/// Returns `LogError::Io` if the reader fails before end of stream. Records
/// gathered up to that point are discarded.
pub fn parse_log<R: BufRead>(mut reader: R) -> Result<Vec<TestRecord>, LogError> {
    let mut parser = LogParser::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = strip_line_terminator(&buf);
        parser.process_line(&String::from_utf8_lossy(line));
    }

    Ok(parser.finish())
}

/// Parse a build log that is already in memory
///
/// Lines are terminated the same way as in [`parse_log`], including a bare
/// `\r` at end of input.
#[must_use]
pub fn parse_str(log: &str) -> Vec<TestRecord> {
    let mut parser = LogParser::new();
    for line in log.split_inclusive('\n') {
        let line = line.strip_suffix('\n').unwrap_or(line);
        parser.process_line(line.strip_suffix('\r').unwrap_or(line));
    }
    parser.finish()
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Lines drawn from every shape the parser distinguishes
    fn log_line() -> impl Strategy<Value = String> {
        let name = "Test[A-D](/[a-c])?";
        let outcome = prop_oneof![Just("PASS"), Just("FAIL"), Just("SKIP")];
        let duration = prop_oneof![
            Just("0.00s".to_string()),
            Just("bogus".to_string()),
            (0u32..5000).prop_map(|ms| format!("{}.{:03}s", ms / 1000, ms % 1000)),
        ];
        prop_oneof![
            (outcome.clone(), name, duration.clone())
                .prop_map(|(o, n, d)| format!("--- {o}: {n} ({d})")),
            (outcome, name, duration).prop_map(|(o, n, d)| format!("=== {o}: . {n} ({d})")),
            name.prop_map(|n| format!("=== RUN   {n}")),
            "[ \t]{1,4}[a-z ]{0,20}",
            "[+{][ -~]{0,20}",
            Just("FAIL".to_string()),
            "[ -~]{0,30}",
        ]
    }

    fn log_text() -> impl Strategy<Value = String> {
        let ending = prop_oneof![Just("\n"), Just("\r\n"), Just("\r"), Just("")];
        proptest::collection::vec((log_line(), ending), 0..40).prop_map(|lines| {
            lines
                .into_iter()
                .map(|(line, ending)| line + ending)
                .collect::<String>()
        })
    }

    fn noise_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\+[ -~]{0,30}",
            "\\{[ -~]{0,30}",
            "FAIL[ -~]{0,30}",
        ]
    }

    proptest! {
        /// Property: parsing the same text twice gives identical output
        #[test]
        fn prop_parse_is_deterministic(log in log_text()) {
            prop_assert_eq!(parse_str(&log), parse_str(&log));
        }

        /// Property: output is sorted by name and names are unique
        #[test]
        fn prop_names_sorted_and_unique(log in log_text()) {
            let records = parse_str(&log);
            for pair in records.windows(2) {
                prop_assert!(pair[0].name < pair[1].name);
            }
        }

        /// Property: every record has a non-empty name
        #[test]
        fn prop_names_non_empty(log in log_text()) {
            prop_assert!(parse_str(&log).iter().all(|r| !r.name.is_empty()));
        }

        /// Property: a later zero duration never erases an earlier non-zero one
        #[test]
        fn prop_duration_never_regresses(ms in 1u32..100_000, secondary in any::<bool>()) {
            let later = if secondary {
                "=== FAIL: . TestKeep (0.00s)"
            } else {
                "--- FAIL: TestKeep (garbage)"
            };
            let log = format!("--- PASS: TestKeep ({ms}ms)\n{later}\n");
            let records = parse_str(&log);
            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(records[0].duration, Duration::from_millis(u64::from(ms)));
            prop_assert_eq!(records[0].result, Outcome::Fail);
        }

        /// Property: noise-only logs produce nothing
        #[test]
        fn prop_noise_only_is_empty(lines in proptest::collection::vec(noise_line(), 0..30)) {
            prop_assert!(parse_str(&lines.join("\n")).is_empty());
        }

        /// Property: the streaming reader and the in-memory path agree
        #[test]
        fn prop_reader_matches_str(log in log_text()) {
            let from_reader = parse_log(std::io::Cursor::new(log.as_bytes())).expect("in-memory read");
            prop_assert_eq!(from_reader, parse_str(&log));
        }
    }
}
