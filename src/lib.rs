//! Sunbeam renders a sunshine recorder card widget.
//!
//! A time-of-day slider drives a sun along a simple arc, tints the sky
//! between sunrise, noon and sunset palettes, and burns a trace onto a
//! 380x60 recording card while the sun is shining.
//!
//! - Describe the host [`Page`] and mount a [`RecorderWidget`] on it
//! - Feed it [`WidgetEvent`]s (or replay a [`Session`])
//! - Read back the card and scene rasters, or the derived [`WidgetView`]
#![forbid(unsafe_code)]

mod foundation;

pub mod card;
pub mod color;
pub mod overlay;
pub mod page;
pub mod render;
pub mod scene;
pub mod session;
pub mod sky;
pub mod sun;
pub mod time;
pub mod widget;

pub use crate::card::{BurnMark, BurnTrace, Card, CardGeometry, hour_label};
pub use crate::color::{Rgb8, interpolate_color, interpolate_hex};
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{INIT_FAILURE_MESSAGE, RecorderError, RecorderResult};
pub use crate::page::{ElementKind, Page, WidgetEvent};
pub use crate::render::{FontSource, FrameRGBA};
pub use crate::session::Session;
pub use crate::sky::{SkyGradient, sky_gradient};
pub use crate::sun::{SunAppearance, SunPosition, Sunshine, sun_position};
pub use crate::time::TimeOfDay;
pub use crate::widget::{RecorderWidget, WidgetState, WidgetView};
