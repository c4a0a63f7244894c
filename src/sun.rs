//! Sun placement along its arc and its shining/hidden appearance.

use serde::{Deserialize, Serialize};

use crate::{
    color::{Rgb8, named},
    time::TimeOfDay,
};

/// Distance from the top of the container at solar noon.
pub const NOON_TOP_PX: f64 = 20.0;
/// Extra drop at the ends of the range.
pub const ARC_DROP_PX: f64 = 100.0;
/// Left/right inset of the horizontal band, in percent.
pub const EDGE_INSET_PERCENT: f64 = 5.0;
/// Width of the horizontal band, in percent.
pub const TRAVEL_PERCENT: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Horizontal position as a percentage of the container width, in [5,95].
    pub left_percent: f64,
    /// Vertical offset from the container top in pixels, in [20,120].
    pub top_px: f64,
}

impl SunPosition {
    pub fn to_css(self) -> (String, String) {
        (
            format!("{}%", self.left_percent),
            format!("{}px", self.top_px),
        )
    }
}

/// V-shaped arc: highest at noon, dropping linearly towards both ends.
pub fn sun_position(time: TimeOfDay) -> SunPosition {
    let left_percent = time.fraction() * TRAVEL_PERCENT + EDGE_INSET_PERCENT;
    let deviation = f64::from(time.deviation_from_noon());
    let noon = f64::from(TimeOfDay::NOON.value());
    let top_px = NOON_TOP_PX + (deviation / noon) * ARC_DROP_PX;
    SunPosition {
        left_percent,
        top_px,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sunshine {
    #[default]
    Shining,
    Hidden,
}

impl Sunshine {
    pub fn is_shining(self) -> bool {
        matches!(self, Self::Shining)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Shining => Self::Hidden,
            Self::Hidden => Self::Shining,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Shining => "Sun is Shining",
            Self::Hidden => "Sun is Hidden (Cloudy)",
        }
    }

    pub fn appearance(self) -> SunAppearance {
        match self {
            Self::Shining => SunAppearance {
                opacity: 1.0,
                body: named::YELLOW,
                glow: vec![
                    Halo {
                        blur_px: 25,
                        color: named::YELLOW,
                    },
                    Halo {
                        blur_px: 35,
                        color: named::ORANGE,
                    },
                ],
            },
            Self::Hidden => SunAppearance {
                opacity: 0.5,
                body: named::CLOUD_GREY,
                glow: Vec::new(),
            },
        }
    }
}

/// One `0 0 <blur>px <color>` shadow around the sun disc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Halo {
    pub blur_px: u32,
    pub color: Rgb8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunAppearance {
    pub opacity: f32,
    pub body: Rgb8,
    /// Innermost first.
    pub glow: Vec<Halo>,
}

impl SunAppearance {
    pub fn box_shadow_css(&self) -> String {
        if self.glow.is_empty() {
            return "none".to_owned();
        }
        self.glow
            .iter()
            .map(|h| format!("0 0 {}px {}", h.blur_px, h.color))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
