// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testgrid-logs: CI build log processing for testgrid
//!
//! This library crate turns the raw text output of a CI test run into one
//! structured record per test: name, outcome, duration and the diagnostic
//! lines the harness printed for it.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use testgrid_logs::{parse_log, RunSummary};
//!
//! let file = File::open("build-log.txt").unwrap();
//! let records = parse_log(BufReader::new(file)).unwrap();
//! let summary = RunSummary::from_records(&records);
//! println!("{} passed, {} failed", summary.passed, summary.failed);
//! ```

#![warn(missing_docs)]

pub mod duration;
pub mod error;
pub mod parser;
pub mod record;
pub mod summary;

pub use duration::parse_duration;
pub use error::LogError;
pub use parser::{LineKind, LogParser, parse_log, parse_str};
pub use record::{Outcome, TestRecord, records_to_json};
pub use summary::{FailingExcerpt, RunSummary};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::parser::{LogParser, parse_log, parse_str};
    pub use crate::record::{Outcome, TestRecord};
    pub use crate::summary::RunSummary;
}
