// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testgrid-logs

use thiserror::Error;

/// Errors that can occur during build log processing
///
/// Malformed log content is never an error: unrecognised lines are dropped and
/// unparseable durations become zero. Only failures of the underlying stream
/// (and of encoding the results) surface here.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log stream could not be read to completion
    #[error("IO error while reading build log: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding test records as JSON
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}
