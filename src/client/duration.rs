//! Hold duration parsing.
//!
//! Accepts a sequence of decimal numbers, each with a unit suffix, such as
//! `"300ms"`, `"1.5s"` or `"1m30s"`. Valid units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. A bare `"0"` is also accepted.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// One `<number><unit>` term, anchored at the start of the remaining input.
static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h)")
        .expect("duration pattern is valid")
});

// ============================================================================
// Parsing
// ============================================================================

/// Parses a duration string such as `"500ms"` or `"1m30s"`.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] for empty, negative, unit-less or
/// otherwise malformed input.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lirc_client::parse_duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::invalid_duration(input, "empty duration"));
    }
    if trimmed.starts_with('-') {
        return Err(Error::invalid_duration(input, "duration must not be negative"));
    }

    let mut rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let caps = TERM
            .captures(rest)
            .ok_or_else(|| Error::invalid_duration(input, format!("unexpected '{rest}'")))?;

        let unit = unit_nanos(&caps[2])
            .ok_or_else(|| Error::invalid_duration(input, format!("unknown unit '{}'", &caps[2])))?;
        let term = term_nanos(&caps[1], unit)
            .ok_or_else(|| Error::invalid_duration(input, "duration out of range"))?;

        total = total
            .checked_add(term)
            .ok_or_else(|| Error::invalid_duration(input, "duration out of range"))?;
        rest = &rest[caps[0].len()..];
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| Error::invalid_duration(input, "duration out of range"))
}

/// Converts `"<whole>[.<frac>]"` of `unit` nanoseconds into nanoseconds.
///
/// Fraction digits past nanosecond precision are ignored.
fn term_nanos(number: &str, unit: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit)?;

    let frac = &frac[..frac.len().min(18)];
    if !frac.is_empty() {
        let scale = 10_u128.pow(frac.len() as u32);
        let frac: u128 = frac.parse().ok()?;
        nanos = nanos.checked_add(frac * unit / scale)?;
    }

    Some(nanos)
}

/// Length of one unit in nanoseconds.
fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60_000_000_000),
        "h" => Some(3_600_000_000_000),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
