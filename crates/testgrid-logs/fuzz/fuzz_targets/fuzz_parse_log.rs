// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for streaming build log parsing
//!
//! This fuzzes `parse_log` over raw bytes, including invalid UTF-8 and
//! mixed line endings. An in-memory reader never fails, so neither may the parse.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testgrid_logs::parse_log;

fuzz_target!(|data: &[u8]| {
    let records = parse_log(std::io::Cursor::new(data)).expect("in-memory reader cannot fail");
    assert!(records.iter().all(|r| !r.name.is_empty()));
});
