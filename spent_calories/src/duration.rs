//! Compact duration expressions like `45m`, `1h30m` or `1.5h`.
//!
//! ```norust
//! duration = [ "+" | "-" ] ( "0" | pair { pair } )
//! pair     = number unit
//! number   = digits [ "." [ digits ] ] | "." digits
//! unit     = "ns" | "us" | "µs" | "μs" | "ms" | "s" | "m" | "h"
//! ```
//!
//! Pairs are summed, so `1h90m` is the same as `2h30m`. The result must fit
//! into a signed 64-bit count of nanoseconds.

use time::Duration;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

const UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", 1_000),
    // U+00B5 micro sign
    ("µs", 1_000),
    // U+03BC greek small letter mu
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 60 * 60 * NANOS_PER_SECOND),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("missing number in duration {0:?}")]
    MissingNumber(String),
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
    #[error("duration {0:?} is out of range")]
    OutOfRange(String),
}

/// Parse duration expression.
///
/// Sign is kept, so `-1h` is a valid negative duration. Deciding whether
/// such value makes sense is up to the caller.
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

    let out_of_range = || DurationError::OutOfRange(input.to_owned());

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => {
                let (fraction, after_fraction) = split_digits(after_dot);
                (Some(fraction), after_fraction)
            }
            None => (None, after_whole),
        };

        if whole.is_empty() && fraction.is_none_or(str::is_empty) {
            return Err(DurationError::MissingNumber(input.to_owned()));
        }

        let unit_end = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, next) = after_number.split_at(unit_end);

        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_owned()));
        }

        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| DurationError::UnknownUnit {
                unit: unit.to_owned(),
                input: input.to_owned(),
            })?;

        let value = scaled(whole, fraction.unwrap_or_default(), scale).ok_or_else(out_of_range)?;
        total = total.checked_add(value).ok_or_else(out_of_range)?;

        rest = next;
    }

    let nanos = match negative {
        true => -i128::from(total),
        false => i128::from(total),
    };

    i64::try_from(nanos)
        .map(Duration::nanoseconds)
        .map_err(|_| out_of_range())
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    s.split_at(end)
}

/// Nanoseconds for `whole.fraction` of unit `scale`. Fraction digits which
/// can't affect the result are dropped.
fn scaled(whole: &str, fraction: &str, scale: u64) -> Option<u64> {
    let whole = match whole.is_empty() {
        true => 0,
        false => whole.parse::<u64>().ok()?,
    };

    let mut numerator: u64 = 0;
    let mut denominator: u64 = 1;
    for digit in fraction.bytes() {
        if denominator > u64::MAX / 10 {
            break;
        }

        numerator = numerator * 10 + u64::from(digit - b'0');
        denominator *= 10;
    }

    let fractional = u128::from(numerator) * u128::from(scale) / u128::from(denominator);

    whole
        .checked_mul(scale)?
        .checked_add(u64::try_from(fractional).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("45m"), Ok(Duration::minutes(45)));
        assert_eq!(parse_duration("3h"), Ok(Duration::hours(3)));
        assert_eq!(parse_duration("30s"), Ok(Duration::seconds(30)));
        assert_eq!(parse_duration("300ms"), Ok(Duration::milliseconds(300)));
        assert_eq!(parse_duration("15us"), Ok(Duration::microseconds(15)));
        assert_eq!(parse_duration("15µs"), Ok(Duration::microseconds(15)));
        assert_eq!(parse_duration("15μs"), Ok(Duration::microseconds(15)));
        assert_eq!(parse_duration("7ns"), Ok(Duration::nanoseconds(7)));
    }

    #[test]
    fn chained_units() {
        assert_eq!(
            parse_duration("1h30m"),
            Ok(Duration::hours(1) + Duration::minutes(30))
        );
        assert_eq!(parse_duration("1h0m0s"), Ok(Duration::hours(1)));
        assert_eq!(parse_duration("1h90m"), parse_duration("2h30m"));
        assert_eq!(
            parse_duration("1m1s1ms"),
            Ok(Duration::minutes(1) + Duration::seconds(1) + Duration::milliseconds(1))
        );
    }

    #[test]
    fn fractions() {
        assert_eq!(parse_duration("1.5h"), Ok(Duration::minutes(90)));
        assert_eq!(parse_duration(".5m"), Ok(Duration::seconds(30)));
        assert_eq!(parse_duration("1.h"), Ok(Duration::hours(1)));
        assert_eq!(
            parse_duration("0.333333333333333333333s"),
            Ok(Duration::nanoseconds(333_333_333))
        );
    }

    #[test]
    fn signs_and_zero() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("-0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("+5s"), Ok(Duration::seconds(5)));
        assert_eq!(parse_duration("-1h"), Ok(Duration::hours(-1)));
    }

    #[test]
    fn malformed() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert_eq!(parse_duration("-"), Err(DurationError::Empty));
        assert_eq!(
            parse_duration("10"),
            Err(DurationError::MissingUnit("10".to_owned()))
        );
        assert_eq!(
            parse_duration("1h30"),
            Err(DurationError::MissingUnit("1h30".to_owned()))
        );
        assert_eq!(
            parse_duration("h"),
            Err(DurationError::MissingNumber("h".to_owned()))
        );
        assert_eq!(
            parse_duration(".s"),
            Err(DurationError::MissingNumber(".s".to_owned()))
        );
        assert_eq!(
            parse_duration("3d"),
            Err(DurationError::UnknownUnit {
                unit: "d".to_owned(),
                input: "3d".to_owned()
            })
        );
        assert!(matches!(
            parse_duration(" 1h"),
            Err(DurationError::MissingNumber(_))
        ));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            parse_duration("2562047h"),
            Ok(Duration::hours(2_562_047))
        );
        assert_eq!(
            parse_duration("2562048h"),
            Err(DurationError::OutOfRange("2562048h".to_owned()))
        );
        assert_eq!(
            parse_duration("-9223372036854775808ns"),
            Ok(Duration::nanoseconds(i64::MIN))
        );
        assert!(matches!(
            parse_duration("99999999999999999999s"),
            Err(DurationError::OutOfRange(_))
        ));
    }
}
