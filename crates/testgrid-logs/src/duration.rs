// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Duration text as printed by test harnesses
//!
//! Harnesses print elapsed time with unit suffixes such as `0.42s`, `250ms` or
//! `1m30.5s`. [`parse_duration`] understands these forms and returns `None` for
//! anything else, leaving it to the caller to decide what "no duration" means.

use std::time::Duration;

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{b5}s", 1_000),
    ("\u{3bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 60 * 60 * 1_000_000_000),
];

// Fraction digits past this scale no longer affect a nanosecond result.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

/// Parse a harness duration such as `12.34s` or `1h2m3.5s`
///
/// Returns `None` for empty text, negative intervals, a missing or unknown
/// unit, or a value that does not fit in `u64` nanoseconds.
#[must_use]
pub fn parse_duration(text: &str) -> Option<Duration> {
    let mut rest = text.strip_prefix('+').unwrap_or(text);
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_len = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit, tail) = after_fraction.split_at(unit_len);
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)?;

        total = total.checked_add(component_nanos(whole, fraction, scale)?)?;
        rest = tail;
    }

    let nanos = u64::try_from(total).ok()?;
    Some(Duration::from_nanos(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn component_nanos(whole: &str, fraction: &str, unit: u128) -> Option<u128> {
    let mut value: u128 = 0;
    for digit in whole.bytes() {
        value = value.checked_mul(10)?.checked_add(u128::from(digit - b'0'))?;
        if value > u128::from(u64::MAX) {
            return None;
        }
    }
    let mut nanos = value.checked_mul(unit)?;

    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in fraction.bytes() {
        if denominator >= MAX_FRACTION_SCALE {
            break;
        }
        numerator = numerator * 10 + u128::from(digit - b'0');
        denominator *= 10;
    }
    nanos = nanos.checked_add(numerator * unit / denominator)?;
    Some(nanos)
}

/// Serde adapter storing a `Duration` as integer nanoseconds
pub(crate) mod nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}
