// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for harness duration text

#![no_main]

use libfuzzer_sys::fuzz_target;

use testgrid_logs::parse_duration;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // parse_duration should never panic on any input
        let _ = parse_duration(input);
    }
});
