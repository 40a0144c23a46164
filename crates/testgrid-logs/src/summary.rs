// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Pass/fail accounting over parsed records

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::record::{Outcome, TestRecord};

/// Number of failing test names a report shows before eliding the rest
pub const DEFAULT_FAILING_LIMIT: usize = 5;

/// Aggregated counts for one parsed build log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Distinct tests seen
    pub total: usize,
    /// Tests whose last outcome was `pass`
    pub passed: usize,
    /// Tests whose last outcome was `fail`
    pub failed: usize,
    /// Tests whose last outcome was `skip`
    pub skipped: usize,
    /// Sum of reported durations, in nanoseconds when serialized
    #[serde(with = "crate::duration::nanos")]
    pub total_duration: Duration,
    /// Names of failing tests, in record order
    pub failing: Vec<String>,
}

/// The head of the failing list plus how many names were left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingExcerpt<'a> {
    /// Failing test names to show
    pub shown: Vec<&'a str>,
    /// Failing tests not included in `shown`
    pub remaining: usize,
}

impl RunSummary {
    /// Tally a record set
    #[must_use]
    pub fn from_records(records: &[TestRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            passed: 0,
            failed: 0,
            skipped: 0,
            total_duration: Duration::ZERO,
            failing: Vec::new(),
        };

        for record in records {
            match record.result {
                Outcome::Pass => summary.passed += 1,
                Outcome::Fail => {
                    summary.failed += 1;
                    summary.failing.push(record.name.clone());
                }
                Outcome::Skip => summary.skipped += 1,
            }
            summary.total_duration = summary.total_duration.saturating_add(record.duration);
        }

        summary
    }

    /// Check if no test failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// First `limit` failing test names and the count of the rest
    #[must_use]
    pub fn failing_excerpt(&self, limit: usize) -> FailingExcerpt<'_> {
        let shown: Vec<&str> = self
            .failing
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect();
        FailingExcerpt {
            remaining: self.failing.len() - shown.len(),
            shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn records(outcomes: &[(&str, Outcome, u64)]) -> Vec<TestRecord> {
        outcomes
            .iter()
            .map(|(name, outcome, ms)| TestRecord::new(*name, *outcome, Duration::from_millis(*ms)))
            .collect()
    }

    #[test]
    fn test_counts_by_outcome() {
        let summary = RunSummary::from_records(&records(&[
            ("TestA", Outcome::Pass, 10),
            ("TestB", Outcome::Fail, 20),
            ("TestC", Outcome::Skip, 0),
            ("TestD", Outcome::Fail, 5),
        ]));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total_duration, Duration::from_millis(35));
        assert_eq!(summary.failing, vec!["TestB", "TestD"]);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_summary_passes() {
        let summary = RunSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.all_passed());
        assert_eq!(summary.failing_excerpt(DEFAULT_FAILING_LIMIT).remaining, 0);
    }

    #[test]
    fn test_failing_excerpt_elides_tail() {
        let failing: Vec<(String, Outcome, u64)> = (0..8)
            .map(|i| (format!("TestFail{i}"), Outcome::Fail, 1))
            .collect();
        let borrowed: Vec<(&str, Outcome, u64)> = failing
            .iter()
            .map(|(n, o, d)| (n.as_str(), *o, *d))
            .collect();
        let summary = RunSummary::from_records(&records(&borrowed));

        let excerpt = summary.failing_excerpt(DEFAULT_FAILING_LIMIT);
        assert_eq!(excerpt.shown.len(), 5);
        assert_eq!(excerpt.shown[0], "TestFail0");
        assert_eq!(excerpt.remaining, 3);

        let everything = summary.failing_excerpt(100);
        assert_eq!(everything.shown.len(), 8);
        assert_eq!(everything.remaining, 0);
    }

    #[test]
    fn test_summary_serializes_duration_as_nanos() {
        let summary = RunSummary::from_records(&records(&[("TestA", Outcome::Pass, 2)]));
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["total_duration"], serde_json::json!(2_000_000u64));
        assert_eq!(json["passed"], serde_json::json!(1));
    }
}
