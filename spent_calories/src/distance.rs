const METERS_IN_KILOMETER: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_kilometers(km: f64) -> Self {
        Self(km)
    }

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters / METERS_IN_KILOMETER)
    }

    pub const fn as_kilometers(self) -> f64 {
        self.0
    }

    pub const fn as_meters(self) -> f64 {
        self.0 * METERS_IN_KILOMETER
    }
}
