// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for in-memory build log parsing
//!
//! This fuzzes `parse_str` and checks the ordering and uniqueness of the
//! returned records.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testgrid_logs::parse_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let records = parse_str(input);
        for pair in records.windows(2) {
            assert!(pair[0].name < pair[1].name);
        }
    }
});
