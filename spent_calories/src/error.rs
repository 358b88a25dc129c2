use std::num::ParseIntError;

use crate::DurationError;

/// Domain constraint which was violated by otherwise well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    /// Step count is zero, negative or not a number
    Steps,
    /// Duration is zero, negative or not a duration
    Duration,
    /// Weight or height is not a positive number
    BodyParameters,
    /// Mean speed came out non-positive
    Speed,
}

impl std::fmt::Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Steps => "invalid step data",
            Self::Duration => "duration must be positive",
            Self::BodyParameters => "weight and height must be positive",
            Self::Speed => "mean speed must be positive",
        };

        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid record format: expected {expected} fields, got {actual}")]
    Format { expected: usize, actual: usize },
    #[error("failed to parse steps: {0}")]
    ParseSteps(#[from] ParseIntError),
    #[error("failed to parse duration: {0}")]
    ParseDuration(#[from] DurationError),
    #[error("{0}")]
    Validation(Invalid),
    #[error("unknown training type {0:?}")]
    UnknownActivity(String),
}

impl Error {
    /// Field is not a syntactically valid integer or duration.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::ParseSteps(_) | Self::ParseDuration(_))
    }
}

impl From<Invalid> for Error {
    fn from(value: Invalid) -> Self {
        Self::Validation(value)
    }
}
