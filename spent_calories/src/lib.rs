//! # Spent calories
//!
//! Step length is estimated from height:
//!
//! ```norust
//! L = 0.45 x H
//! D = L x steps / 1000
//! V = D / T
//! ```
//!
//! Energy spent during training:
//!
//! ```norust
//! E = (W x V x Tmin / 60) x K
//! ```
//!
//! Where:
//!
//! - L - step length
//! - H - height of person
//! - D - distance in kilometers
//! - V - mean speed in km/h
//! - T - duration in hours, Tmin - duration in minutes
//! - W - weight of person in kilograms
//! - K - activity coefficient, `1.0` for running and `0.5` for walking

use std::str::FromStr;

use time::Duration;

mod distance;
mod duration;
mod error;
mod record;

pub use self::{distance::*, duration::*, error::*, record::*};

pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;
pub const MINUTES_IN_HOUR: f64 = 60.0;

const SECONDS_IN_MINUTE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    Running,
    Walking,
}

impl Activity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Бег",
            Self::Walking => "Ходьба",
        }
    }

    pub const fn calories_coef(self) -> f64 {
        match self {
            Self::Running => 1.0,
            Self::Walking => WALKING_CALORIES_COEFFICIENT,
        }
    }

    /// Energy spent in kilocalories.
    ///
    /// # Params
    /// - `weight` - weight of person in kilograms
    /// - `height` - height of person, same unit as in [`distance`]
    pub fn spent_calories(
        self,
        steps: u64,
        weight: f64,
        height: f64,
        duration: Duration,
    ) -> Result<f64, Error> {
        validate(steps, weight, height, duration)?;

        self.calories_at_speed(weight, mean_speed(steps, height, duration), duration)
    }

    fn calories_at_speed(self, weight: f64, speed: f64, duration: Duration) -> Result<f64, Error> {
        if !(speed > 0.0) {
            return Err(Invalid::Speed.into());
        }

        Ok((weight * speed * minutes(duration) / MINUTES_IN_HOUR) * self.calories_coef())
    }
}

impl FromStr for Activity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Running, Self::Walking]
            .into_iter()
            .find(|this| this.label() == s)
            .ok_or_else(|| Error::UnknownActivity(s.to_owned()))
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Distance covered by `steps` with step length derived from `height`.
#[inline]
pub fn distance(steps: u64, height: f64) -> Distance {
    Distance::from_meters(STEP_LENGTH_COEFFICIENT * height * steps as f64)
}

/// Mean speed in km/h. Returns `0.0` for non-positive duration.
pub fn mean_speed(steps: u64, height: f64, duration: Duration) -> f64 {
    if !duration.is_positive() {
        return 0.0;
    }

    distance(steps, height).as_kilometers() / hours(duration)
}

pub fn running_calories(
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, Error> {
    Activity::Running.spent_calories(steps, weight, height, duration)
}

pub fn walking_calories(
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, Error> {
    Activity::Walking.spent_calories(steps, weight, height, duration)
}

#[inline]
pub fn hours(duration: Duration) -> f64 {
    minutes(duration) / MINUTES_IN_HOUR
}

#[inline]
pub fn minutes(duration: Duration) -> f64 {
    duration.as_seconds_f64() / SECONDS_IN_MINUTE
}

fn validate(steps: u64, weight: f64, height: f64, duration: Duration) -> Result<(), Error> {
    if steps == 0 {
        return Err(Invalid::Steps.into());
    }

    if !duration.is_positive() {
        return Err(Invalid::Duration.into());
    }

    let positive = |value: f64| value.is_finite() && value > 0.0;
    if !positive(weight) || !positive(height) {
        return Err(Invalid::BodyParameters.into());
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Training {
    pub activity: Activity,
    pub steps: u64,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "hours", serialize_with = "serialize_hours")
    )]
    pub duration: Duration,
    pub distance: Distance,
    /// Mean speed in km/h
    pub speed: f64,
    pub calories: f64,
}

#[cfg(feature = "serde")]
fn serialize_hours<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(hours(*duration))
}

impl std::fmt::Display for Training {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Training type: {}", self.activity)?;
        writeln!(f, "Duration: {:.2} h.", hours(self.duration))?;
        writeln!(f, "Distance: {:.2} km.", self.distance.as_kilometers())?;
        writeln!(f, "Speed: {:.2} km/h", self.speed)?;
        writeln!(f, "Calories burned: {:.2}", self.calories)
    }
}

/// Summary of `steps,activity,duration` record.
///
/// Distance and speed are calculated once and shared with calorie estimation.
pub fn training(data: &str, weight: f64, height: f64) -> Result<Training, Error> {
    let (steps, activity, duration) = parse_training(data).inspect_err(|e| {
        tracing::warn!(record = data, "Failed to parse training. Reason: {e}");
    })?;

    let activity = activity.parse::<Activity>()?;

    validate(steps, weight, height, duration)?;

    let distance = distance(steps, height);
    let speed = mean_speed(steps, height, duration);
    let calories = activity.calories_at_speed(weight, speed, duration)?;

    tracing::debug!(
        %activity,
        steps,
        distance = distance.as_kilometers(),
        speed,
        calories,
        "training summary"
    );

    Ok(Training {
        activity,
        steps,
        duration,
        distance,
        speed,
        calories,
    })
}

/// Text report for `steps,activity,duration` record. Every error is returned to the caller.
pub fn training_info(data: &str, weight: f64, height: f64) -> Result<String, Error> {
    training(data, weight, height).map(|this| this.to_string())
}
