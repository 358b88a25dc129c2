//! # Daily steps
//!
//! Summary of a day of walking from `steps,duration` record. Unlike
//! [`spent_calories::distance`] the reported distance uses fixed step length
//! of 0.65 meters, while calories are still estimated by
//! [`spent_calories::walking_calories`].

use spent_calories::{
    Distance, Error, parse_positive_duration, parse_steps, split_fields, walking_calories,
};
use time::Duration;

/// Length of one step in meters
pub const STEP_LENGTH: f64 = 0.65;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DaySummary {
    pub steps: u64,
    pub distance: Distance,
    pub calories: f64,
}

impl std::fmt::Display for DaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Steps: {}.", self.steps)?;
        writeln!(f, "Distance: {:.2} km.", self.distance.as_kilometers())?;
        writeln!(f, "Calories burned: {:.2} kcal.", self.calories)
    }
}

/// Parse `steps,duration` record.
pub fn parse_package(data: &str) -> Result<(u64, Duration), Error> {
    let [steps, duration] = split_fields::<2>(data)?;

    let steps = parse_steps(steps)?;
    let duration = parse_positive_duration(duration)?;

    Ok((steps, duration))
}

/// Walked distance with fixed step length.
#[inline]
pub fn walked_distance(steps: u64) -> Distance {
    Distance::from_meters(steps as f64 * STEP_LENGTH)
}

/// Same as [`day_action_info`] but every error is returned to the caller.
///
/// # Params
/// - `weight` - weight of person in kilograms
/// - `height` - height of person
pub fn try_day_action_info(data: &str, weight: f64, height: f64) -> Result<DaySummary, Error> {
    let (steps, duration) = parse_package(data)?;

    let distance = walked_distance(steps);
    let calories = walking_calories(steps, weight, height, duration)?;

    tracing::debug!(
        steps,
        distance = distance.as_kilometers(),
        calories,
        "day summary"
    );

    Ok(DaySummary {
        steps,
        distance,
        calories,
    })
}

/// Text report for `steps,duration` record.
///
/// Bad data is logged and results in empty string, so the caller can't tell
/// it apart from a day without data.
pub fn day_action_info(data: &str, weight: f64, height: f64) -> String {
    match try_day_action_info(data, weight, height) {
        Ok(summary) if summary.steps > 0 => summary.to_string(),
        Ok(_) => String::new(),
        Err(e) => {
            tracing::warn!(record = data, "Failed to summarize day. Reason: {e}");

            String::new()
        }
    }
}
