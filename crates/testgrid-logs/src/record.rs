// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test record types

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Outcome of a single test, as reported by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skip,
}

impl Outcome {
    /// Lowercase name used in stored results
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a keyword is not one of `pass`, `fail` or `skip`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised test outcome: {0}")]
pub struct UnknownOutcome(pub String);

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pass") {
            Ok(Self::Pass)
        } else if s.eq_ignore_ascii_case("fail") {
            Ok(Self::Fail)
        } else if s.eq_ignore_ascii_case("skip") {
            Ok(Self::Skip)
        } else {
            Err(UnknownOutcome(s.to_string()))
        }
    }
}

/// Everything a build log said about one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Test name, unique within one parsed log
    pub name: String,
    /// Last outcome reported for the test
    pub result: Outcome,
    /// Reported duration (zero when the log gave none)
    #[serde(with = "crate::duration::nanos")]
    pub duration: Duration,
    /// Diagnostic lines attributed to the test, verbatim
    pub logs: Vec<String>,
}

impl TestRecord {
    /// Create a record with no captured logs
    #[must_use]
    pub fn new(name: impl Into<String>, result: Outcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            result,
            duration,
            logs: Vec::new(),
        }
    }

    /// Fold a later result line for the same test into this record.
    ///
    /// The outcome always follows the latest line; a zero duration never
    /// replaces a known one.
    pub fn merge(&mut self, result: Outcome, duration: Duration) {
        self.result = result;
        if !duration.is_zero() {
            self.duration = duration;
        }
    }

    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result == Outcome::Pass
    }

    /// Check if the test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.result == Outcome::Fail
    }

    /// Check if the test was skipped
    #[must_use]
    pub fn skipped(&self) -> bool {
        self.result == Outcome::Skip
    }

    /// Human readable duration: `5ms` below a second, `2.50s` above
    #[must_use]
    pub fn duration_display(&self) -> String {
        let ms = self.duration.as_millis();
        if ms < 1000 {
            format!("{ms}ms")
        } else {
            format!("{:.2}s", self.duration.as_secs_f64())
        }
    }
}

/// Encode records as a JSON array, the shape handed to result storage
///
/// # Errors
///
/// Returns `LogError::Json` if serialization fails.
pub fn records_to_json(records: &[TestRecord], pretty: bool) -> Result<String, LogError> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
