// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for environment variable configuration
//!
//! Kept in a separate test binary so the variable does not leak into tests
//! that assume a clean environment.


use clap::Parser;
use test_utils::EnvGuard;
use testgrid::config::Config;

#[test]
fn test_pretty_from_environment() {
    let _guard = EnvGuard::set("TESTGRID_PRETTY", "true");
    let config = Config::try_parse_from(["testgrid", "parse"]).expect("parse should succeed");
    assert!(config.pretty);
}
