use std::time::Duration;

use super::types::PositiveU64;
use crate::error::{AppError, AppResult, ValidationError};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60_000_000_000;
const NANOS_PER_HOUR: u128 = 3_600_000_000_000;
/// Fraction digits beyond this are below nanosecond precision for every unit.
const MAX_FRACTION_DIGITS: usize = 15;

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::validation)
}

/// Parses `90`, `90s`, `1m30s`, `1.5m`, `250ms` or `1h` style durations.
///
/// A bare integer is read as seconds. Compound values must carry a unit on
/// every segment; each segment may have a decimal fraction.
pub(crate) fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    if value.bytes().all(|byte| byte.is_ascii_digit()) {
        let secs = parse_number(value, value)?;
        return ensure_positive(Duration::from_secs(secs));
    }

    let mut total_nanos: u128 = 0;
    let mut rest = value;
    while !rest.is_empty() {
        let number_len = rest
            .find(|ch: char| !is_number_char(ch))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid_format(value));
        }
        let (num_part, tail) = rest.split_at(number_len);
        let unit_len = tail.find(is_number_char).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let segment = segment_nanos(num_part, unit, value)?;
        total_nanos = total_nanos
            .checked_add(segment)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = next;
    }

    let nanos = u64::try_from(total_nanos).map_err(|_err| ValidationError::DurationOverflow)?;
    ensure_positive(Duration::from_nanos(nanos))
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn invalid_format(value: &str) -> ValidationError {
    ValidationError::InvalidDurationFormat {
        value: value.to_owned(),
    }
}

fn parse_number(digits: &str, value: &str) -> Result<u64, ValidationError> {
    digits
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
}

/// Nanoseconds in `number` (`12`, `1.5`, `.5`) of `unit`.
fn segment_nanos(number: &str, unit: &str, value: &str) -> Result<u128, ValidationError> {
    let scale = unit_nanos(unit, value)?;
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid_format(value));
    }

    let whole_nanos = if whole.is_empty() {
        0
    } else {
        u128::from(parse_number(whole, value)?)
            .checked_mul(scale)
            .ok_or(ValidationError::DurationOverflow)?
    };

    let fraction = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if fraction.is_empty() {
        return Ok(whole_nanos);
    }
    let digits = u32::try_from(fraction.len()).map_err(|_err| invalid_format(value))?;
    let divisor = 10_u128
        .checked_pow(digits)
        .ok_or(ValidationError::DurationOverflow)?;
    let fraction_nanos = u128::from(parse_number(fraction, value)?)
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_div(divisor))
        .ok_or(ValidationError::DurationOverflow)?;

    whole_nanos
        .checked_add(fraction_nanos)
        .ok_or(ValidationError::DurationOverflow)
}

fn unit_nanos(unit: &str, value: &str) -> Result<u128, ValidationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SECOND),
        "m" => Ok(NANOS_PER_MINUTE),
        "h" => Ok(NANOS_PER_HOUR),
        "" => Err(invalid_format(value)),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}

fn ensure_positive(duration: Duration) -> Result<Duration, ValidationError> {
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}
