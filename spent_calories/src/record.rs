//! Comma separated activity records.
//!
//! Two shapes are in use: `steps,duration` for daily walking and
//! `steps,activity,duration` for trainings. Fields are taken as is,
//! surrounding whitespace is not trimmed.

use time::Duration;

use crate::{Error, Invalid, parse_duration};

const SEPARATOR: char = ',';

/// Split record into exactly `N` fields.
pub fn split_fields<const N: usize>(data: &str) -> Result<[&str; N], Error> {
    let fields = data.split(SEPARATOR).collect::<Vec<_>>();

    <[&str; N]>::try_from(fields).map_err(|fields| Error::Format {
        expected: N,
        actual: fields.len(),
    })
}

/// Parse base-10 step count. Zero and negative counts are rejected.
pub fn parse_steps(field: &str) -> Result<u64, Error> {
    let steps = field.parse::<i64>()?;

    u64::try_from(steps)
        .ok()
        .filter(|steps| *steps > 0)
        .ok_or(Error::Validation(Invalid::Steps))
}

/// Parse duration expression which must be strictly positive.
pub fn parse_positive_duration(field: &str) -> Result<Duration, Error> {
    let duration = parse_duration(field)?;

    if !duration.is_positive() {
        return Err(Invalid::Duration.into());
    }

    Ok(duration)
}

/// Parse `steps,activity,duration` record.
///
/// Unlike [`parse_steps`] and [`parse_positive_duration`] a malformed
/// number is reported the same way as a non-positive one. The activity
/// label is returned verbatim.
pub fn parse_training(data: &str) -> Result<(u64, &str, Duration), Error> {
    let [steps, activity, duration] = split_fields::<3>(data)?;

    let steps = parse_steps(steps).map_err(|_| Invalid::Steps)?;
    let duration = parse_positive_duration(duration).map_err(|_| Invalid::Duration)?;

    Ok((steps, activity, duration))
}
