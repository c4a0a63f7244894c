//! Time of day as the slider reports it.

use serde::{Deserialize, Serialize};

/// Slider position in [0,120]; ten units per hour across a 12-hour card
/// starting at 6 AM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    pub const MIN: Self = Self(0);
    pub const NOON: Self = Self(60);
    pub const MAX: Self = Self(120);

    /// Range inputs never report values outside their bounds; clamp the same way.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Position across the full range, 0 at sunrise and 1 at sunset.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX.0)
    }

    /// Distance from solar noon in slider units.
    pub fn deviation_from_noon(self) -> u8 {
        self.0.abs_diff(Self::NOON.0)
    }
}

impl Default for TimeOfDay {
    // An unset range input sits at its midpoint.
    fn default() -> Self {
        Self::NOON
    }
}

impl From<i64> for TimeOfDay {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<TimeOfDay> for i64 {
    fn from(t: TimeOfDay) -> Self {
        i64::from(t.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_slider_bounds() {
        assert_eq!(TimeOfDay::new(-5).value(), 0);
        assert_eq!(TimeOfDay::new(500).value(), 120);
        assert_eq!(TimeOfDay::new(42).value(), 42);
    }

    #[test]
    fn default_is_noon() {
        assert_eq!(TimeOfDay::default(), TimeOfDay::NOON);
    }

    #[test]
    fn deviation_is_symmetric() {
        for d in 0..=60 {
            let lo = TimeOfDay::new(60 - d);
            let hi = TimeOfDay::new(60 + d);
            assert_eq!(lo.deviation_from_noon(), hi.deviation_from_noon());
        }
    }

    #[test]
    fn serde_is_a_plain_integer() {
        let t: TimeOfDay = serde_json::from_value(serde_json::json!(130)).unwrap();
        assert_eq!(t, TimeOfDay::MAX);
        assert_eq!(serde_json::to_value(TimeOfDay::new(7)).unwrap(), serde_json::json!(7));
    }
}
