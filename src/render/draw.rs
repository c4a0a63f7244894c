use kurbo::{BezPath, Cap, Circle, Point, Rect, Shape as _};

use crate::color::Rgb8;

/// Flattening tolerance for curves (circles, round caps), in pixels.
pub const TOLERANCE: f64 = 0.05;

/// One resolved drawing command in surface pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgb8,
    },
    FillPath {
        path: BezPath,
        color: Rgb8,
    },
    StrokePath {
        path: BezPath,
        width: f64,
        cap: Cap,
        color: Rgb8,
    },
    /// A single-line label centred on `anchor.x`, baseline at `anchor.y`.
    Text {
        text: String,
        anchor: Point,
        size_px: f32,
        color: Rgb8,
    },
}

impl DrawOp {
    pub fn fill_rect(rect: Rect, color: Rgb8) -> Self {
        Self::FillRect { rect, color }
    }

    pub fn fill_circle(center: Point, radius: f64, color: Rgb8) -> Self {
        Self::FillPath {
            path: Circle::new(center, radius).to_path(TOLERANCE),
            color,
        }
    }

    pub fn line(from: Point, to: Point, width: f64, cap: Cap, color: Rgb8) -> Self {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        Self::StrokePath {
            path,
            width,
            cap,
            color,
        }
    }


    pub fn label(text: impl Into<String>, anchor: Point, size_px: f32, color: Rgb8) -> Self {
        Self::Text {
            text: text.into(),
            anchor,
            size_px,
            color,
        }
    }
}
