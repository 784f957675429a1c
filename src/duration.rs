//! Duration grammar: a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix, e.g. `300ms`, `1.5h`, `2h45m`.
//!
//! Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`. The bare
//! string `0` needs no unit. A leading `+` is accepted; a leading `-` only
//! for zero.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("negative duration")]
    Negative,
    #[error("expected a number")]
    ExpectedNumber,
    #[error("missing unit")]
    MissingUnit,
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("duration out of range")]
    Overflow,
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

// Fraction digits past this carry no weight even in hours.
const MAX_FRACTION_DIGITS: usize = 18;

pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(tail) => take_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::ExpectedNumber);
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit);
        }
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let whole_nanos = parse_u128(whole)?
            .checked_mul(scale)
            .ok_or(DurationError::Overflow)?;
        total = total
            .checked_add(whole_nanos)
            .and_then(|t| t.checked_add(fraction_nanos(fraction, scale)))
            .ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    if total > u128::from(u64::MAX) {
        return Err(DurationError::Overflow);
    }
    if negative && total != 0 {
        return Err(DurationError::Negative);
    }
    Ok(Duration::from_nanos(total as u64))
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_u128(digits: &str) -> Result<u128, DurationError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse::<u128>().map_err(|_| DurationError::Overflow)
}

fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    // At most 18 ASCII digits, always fits.
    let numerator: u128 = digits.parse().unwrap_or(0);
    numerator * scale / 10u128.pow(digits.len() as u32)
}
