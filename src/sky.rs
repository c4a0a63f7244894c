//! Sky colour as a function of the time of day.

use serde::{Deserialize, Serialize};

use crate::{
    color::{Rgb8, interpolate_color, named},
    time::TimeOfDay,
};

/// Top and bottom stops of a vertical sky gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyGradient {
    pub top: Rgb8,
    pub bottom: Rgb8,
}

pub const SUNRISE: SkyGradient = SkyGradient {
    top: named::PEACH_PUFF,
    bottom: named::LIGHT_SALMON,
};

pub const NOON: SkyGradient = SkyGradient {
    top: named::SKY_BLUE,
    bottom: named::LIGHT_BLUE,
};

pub const SUNSET: SkyGradient = SkyGradient {
    top: named::LIGHT_SALMON,
    bottom: named::TOMATO,
};

impl SkyGradient {
    pub fn lerp(self, other: Self, factor: f64) -> Self {
        Self {
            top: interpolate_color(self.top, other.top, factor),
            bottom: interpolate_color(self.bottom, other.bottom, factor),
        }
    }

    /// Colour at `t` in [0,1] down the container (0 = top edge).
    pub fn sample(self, t: f64) -> Rgb8 {
        interpolate_color(self.top, self.bottom, t.clamp(0.0, 1.0))
    }

    pub fn to_css(self) -> String {
        format!("linear-gradient(to bottom, {}, {})", self.top, self.bottom)
    }
}

/// Sunrise -> noon over the morning half, noon -> sunset over the afternoon.
pub fn sky_gradient(time: TimeOfDay) -> SkyGradient {
    let t = f64::from(time.value());
    let noon = f64::from(TimeOfDay::NOON.value());
    if t <= noon {
        SUNRISE.lerp(NOON, t / noon)
    } else {
        NOON.lerp(SUNSET, (t - noon) / noon)
    }
}
