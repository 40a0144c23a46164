//! testgrid library
//!
//! This module exports the command line configuration and commands of the
//! testgrid binary for use in integration tests.

pub mod commands;
pub mod config;
