use std::time::Duration;

use super::types::{Network, QueryType};
use crate::error::{AppError, AppResult, ValidationError};

const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Fraction digits beyond this carry no information at nanosecond precision.
const MAX_FRACTION_DIGITS: usize = 18;

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" | "" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

pub(super) fn parse_network(s: &str) -> Result<Network, ValidationError> {
    s.parse::<Network>()
}

pub(super) fn parse_query_type(s: &str) -> Result<QueryType, ValidationError> {
    s.parse::<QueryType>()
}

pub(super) fn parse_timeout_arg(s: &str) -> Result<Duration, ValidationError> {
    let duration = parse_duration_value(s)?;
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}

/// Parses durations such as `100ms`, `1.5s`, `1m30s` or `250us`.
///
/// A bare number is read as seconds. Supported units are `ns`, `us`
/// (`µs`), `ms`, `s`, `m` and `h`; segments may be chained and may carry a
/// decimal fraction.
///
/// # Errors
///
/// Returns an error when the value is empty, malformed, uses an unknown
/// unit, or does not fit in a `Duration`.
pub fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    if value.chars().all(|ch| ch.is_ascii_digit()) {
        let secs: u64 = value
            .parse()
            .map_err(|err| ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })?;
        return Ok(Duration::from_secs(secs));
    }

    let mut rest = value;
    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
            .unwrap_or(rest.len());
        let (number, after_number) = rest.split_at(number_len);
        let unit_len = after_number
            .find(|ch: char| ch.is_ascii_digit() || ch == '.')
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);

        let unit_nanos = unit_nanos(unit)?;
        let segment = segment_nanos(value, number, unit_nanos)?;
        total_nanos = total_nanos
            .checked_add(segment)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = tail;
    }

    nanos_to_duration(total_nanos)
}

fn unit_nanos(unit: &str) -> Result<u128, ValidationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(1_000),
        "ms" => Ok(1_000_000),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60 * NANOS_PER_SEC),
        "h" => Ok(3_600 * NANOS_PER_SEC),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}

fn segment_nanos(value: &str, number: &str, unit_nanos: u128) -> Result<u128, ValidationError> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    if fraction.contains('.') {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }

    let whole_nanos = if whole.is_empty() {
        0
    } else {
        let parsed: u64 = whole
            .parse()
            .map_err(|err| ValidationError::InvalidDurationNumber {
                value: value.to_owned(),
                source: err,
            })?;
        u128::from(parsed)
            .checked_mul(unit_nanos)
            .ok_or(ValidationError::DurationOverflow)?
    };

    let fraction = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if fraction.is_empty() {
        return Ok(whole_nanos);
    }
    let digits: u64 = fraction
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;
    let exponent = u32::try_from(fraction.len()).map_err(|_err| ValidationError::DurationOverflow)?;
    let scale = 10_u128
        .checked_pow(exponent)
        .ok_or(ValidationError::DurationOverflow)?;
    let fraction_nanos = u128::from(digits)
        .checked_mul(unit_nanos)
        .and_then(|scaled| scaled.checked_div(scale))
        .ok_or(ValidationError::DurationOverflow)?;

    whole_nanos
        .checked_add(fraction_nanos)
        .ok_or(ValidationError::DurationOverflow)
}

fn nanos_to_duration(total_nanos: u128) -> Result<Duration, ValidationError> {
    let secs = total_nanos
        .checked_div(NANOS_PER_SEC)
        .and_then(|secs| u64::try_from(secs).ok())
        .ok_or(ValidationError::DurationOverflow)?;
    let sub_nanos = total_nanos
        .checked_rem(NANOS_PER_SEC)
        .and_then(|nanos| u32::try_from(nanos).ok())
        .ok_or(ValidationError::DurationOverflow)?;
    Ok(Duration::new(secs, sub_nanos))
}
