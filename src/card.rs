//! The recording card: its static face and the burn trace the sun leaves on it.

use kurbo::{Cap, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::{
    color::named,
    foundation::{
        core::Canvas,
        error::RecorderResult,
    },
    render::{CpuSurface, DrawOp, FontSource, FrameRGBA, TextEngine},
    time::TimeOfDay,
};

pub const HOURS_ON_CARD: u32 = 12;
/// First hour printed on the card (6 AM).
pub const FIRST_HOUR: u32 = 6;
pub const BURN_DOT_RADIUS: f64 = 3.0;
pub const BURN_LINE_WIDTH: f64 = 4.5;
pub const HOUR_LINE_WIDTH: f64 = 1.0;
pub const NOON_LINE_WIDTH: f64 = 2.0;
/// Edge labels are nudged inwards so they stay on the card.
pub const EDGE_LABEL_NUDGE: f64 = 5.0;
pub const LABEL_SIZE_PX: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub width: f64,
    pub height: f64,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self {
            width: 380.0,
            height: 60.0,
        }
    }
}

impl CardGeometry {
    pub fn pixels_per_hour(self) -> f64 {
        self.width / f64::from(HOURS_ON_CARD)
    }

    /// Largest jump between consecutive burns that still reads as one trace.
    pub fn continuity_threshold(self) -> f64 {
        self.pixels_per_hour() / 1.5
    }

    pub fn focus_x(self, time: TimeOfDay) -> f64 {
        time.fraction() * self.width
    }

    pub fn burn_y(self) -> f64 {
        self.height / 2.0
    }

    pub fn label_baseline(self) -> f64 {
        self.height / 2.0 + 15.0
    }

    pub fn canvas(self) -> Canvas {
        Canvas::new(self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

/// 12-hour clock label for gridline `index` (0 = 6 AM).
pub fn hour_label(index: u32) -> u32 {
    let mut hour = FIRST_HOUR + index;
    if hour > 12 {
        hour -= 12;
    }
    if hour == 0 {
        hour = 12;
    }
    hour
}

/// Background, hour grid, labels and the heavier noon line.
pub fn card_base_ops(geom: CardGeometry) -> Vec<DrawOp> {
    let pph = geom.pixels_per_hour();
    let baseline = geom.label_baseline();
    let mut ops = vec![DrawOp::fill_rect(
        Rect::new(0.0, 0.0, geom.width, geom.height),
        named::LINEN,
    )];

    for i in 0..=HOURS_ON_CARD {
        let x = f64::from(i) * pph;
        ops.push(DrawOp::line(
            Point::new(x, 0.0),
            Point::new(x, geom.height),
            HOUR_LINE_WIDTH,
            Cap::Butt,
            named::SADDLE_BROWN,
        ));

        let label_x = if i == 0 {
            x + EDGE_LABEL_NUDGE
        } else if i == HOURS_ON_CARD {
            x - EDGE_LABEL_NUDGE
        } else {
            x
        };
        ops.push(DrawOp::label(
            hour_label(i).to_string(),
            Point::new(label_x, baseline),
            LABEL_SIZE_PX,
            named::LABEL_GREY,
        ));
    }

    let noon_x = geom.width / 2.0;
    ops.push(DrawOp::line(
        Point::new(noon_x, 0.0),
        Point::new(noon_x, geom.height),
        NOON_LINE_WIDTH,
        Cap::Butt,
        named::SADDLE_BROWN,
    ));
    ops.push(DrawOp::label(
        "12",
        Point::new(noon_x, baseline),
        LABEL_SIZE_PX,
        named::LABEL_GREY,
    ));
    ops
}

/// What a single burn adds to the card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BurnMark {
    /// Continuation of the running trace.
    Connector { from: f64, to: f64 },
    /// A fresh, isolated scorch.
    Dot { at: f64 },
}

impl BurnMark {
    pub fn to_op(self, geom: CardGeometry) -> DrawOp {
        let y = geom.burn_y();
        match self {
            Self::Connector { from, to } => DrawOp::line(
                Point::new(from, y),
                Point::new(to, y),
                BURN_LINE_WIDTH,
                Cap::Round,
                named::SCORCH,
            ),
            Self::Dot { at } => {
                DrawOp::fill_circle(Point::new(at, y), BURN_DOT_RADIUS, named::SCORCH)
            }
        }
    }
}

/// Continuity state of the burn trace. The marks themselves live only in
/// the card's pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnTrace {
    last_burn_x: Option<f64>,
}

impl BurnTrace {
    pub fn last_burn_x(self) -> Option<f64> {
        self.last_burn_x
    }

    /// The mark a burn at `x` would make, without recording it.
    pub fn next_mark(self, x: f64, threshold: f64) -> BurnMark {
        match self.last_burn_x {
            Some(last) if (last - x).abs() < threshold => BurnMark::Connector { from: last, to: x },
            _ => BurnMark::Dot { at: x },
        }
    }

    pub fn burn(&mut self, x: f64, threshold: f64) -> BurnMark {
        let mark = self.next_mark(x, threshold);
        self.last_burn_x = Some(x);
        mark
    }

    pub fn break_continuity(&mut self) {
        self.last_burn_x = None;
    }
}

/// The card surface together with its trace state.
#[derive(Debug)]
pub struct Card {
    geometry: CardGeometry,
    pixels_per_hour: f64,
    trace: BurnTrace,
    surface: CpuSurface,
    text: TextEngine,
}

impl Card {
    /// A card labelled with the system sans-serif face.
    pub fn new(geometry: CardGeometry) -> RecorderResult<Self> {
        Self::with_font(geometry, &FontSource::System)
    }

    pub fn with_font(geometry: CardGeometry, font: &FontSource) -> RecorderResult<Self> {
        Ok(Self {
            geometry,
            pixels_per_hour: geometry.pixels_per_hour(),
            trace: BurnTrace::default(),
            surface: CpuSurface::new(geometry.canvas())?,
            text: TextEngine::new(font)?,
        })
    }

    pub fn geometry(&self) -> CardGeometry {
        self.geometry
    }

    pub fn pixels_per_hour(&self) -> f64 {
        self.pixels_per_hour
    }

    pub fn trace(&self) -> BurnTrace {
        self.trace
    }

    /// Repaints the blank face. This is the only way burns are removed.
    pub fn draw_base(&mut self) -> RecorderResult<()> {
        self.pixels_per_hour = self.geometry.pixels_per_hour();
        self.surface.clear_to_transparent();
        self.surface
            .draw_with_text(&card_base_ops(self.geometry), &mut self.text)?;
        self.trace.break_continuity();
        tracing::debug!(pixels_per_hour = self.pixels_per_hour, "card base drawn");
        Ok(())
    }

    pub fn burn(&mut self, x: f64) -> RecorderResult<BurnMark> {
        let mark = self.trace.burn(x, self.pixels_per_hour / 1.5);
        self.surface.draw(&[mark.to_op(self.geometry)])?;
        tracing::trace!(?mark, "burned card");
        Ok(mark)
    }

    pub fn break_trace(&mut self) {
        self.trace.break_continuity();
    }

    pub fn readback(&self) -> FrameRGBA {
        self.surface.readback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOM: CardGeometry = CardGeometry {
        width: 380.0,
        height: 60.0,
    };

    #[test]
    fn hour_labels_wrap_through_noon() {
        let labels: Vec<u32> = (0..=HOURS_ON_CARD).map(hour_label).collect();
        assert_eq!(labels, vec![6, 7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn geometry_derivations() {
        assert!((GEOM.pixels_per_hour() - 380.0 / 12.0).abs() < 1e-12);
        assert!((GEOM.continuity_threshold() - 380.0 / 18.0).abs() < 1e-12);
        assert_eq!(GEOM.focus_x(TimeOfDay::MIN), 0.0);
        assert_eq!(GEOM.focus_x(TimeOfDay::NOON), 190.0);
        assert_eq!(GEOM.focus_x(TimeOfDay::MAX), 380.0);
        assert_eq!(GEOM.canvas(), Canvas::new(380, 60));
    }

    #[test]
    fn base_has_background_thirteen_lines_and_noon_line() {
        let ops = card_base_ops(GEOM);
        let lines = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokePath { color, .. } if *color == named::SADDLE_BROWN))
            .count();
        assert_eq!(lines, 14);
        assert!(matches!(ops[0], DrawOp::FillRect { color, .. } if color == named::LINEN));
        assert!(ops.iter().any(|op| matches!(
            op,
            DrawOp::StrokePath { width, .. } if *width == NOON_LINE_WIDTH
        )));
    }

    #[test]
    fn labels_sit_on_their_lines_with_edges_nudged_inwards() {
        let labels: Vec<(String, Point)> = card_base_ops(GEOM)
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, anchor, color, size_px } => {
                    assert_eq!(color, named::LABEL_GREY);
                    assert_eq!(size_px, LABEL_SIZE_PX);
                    Some((text, anchor))
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 14);
        assert!(labels.iter().all(|(_, at)| at.y == 45.0));

        let pph = GEOM.pixels_per_hour();
        assert_eq!(labels[0], ("6".to_owned(), Point::new(5.0, 45.0)));
        assert_eq!(labels[12].0, "6");
        assert!((labels[12].1.x - 375.0).abs() < 1e-9);
        for (i, (text, at)) in labels.iter().enumerate().take(12).skip(1) {
            assert_eq!(*text, hour_label(i as u32).to_string());
            assert!((at.x - i as f64 * pph).abs() < 1e-9, "label {i} at {}", at.x);
        }
        assert_eq!(labels[13], ("12".to_owned(), Point::new(190.0, 45.0)));
    }

    #[test]
    fn base_stays_opaque_with_or_without_a_label_face() {
        let mut card = Card::new(GEOM).unwrap();
        card.draw_base().unwrap();
        let frame = card.readback();
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
        // Label row between hour lines is still linen at the far left edge.
        assert_eq!(frame.pixel(1, 5), Some([0xfa, 0xf0, 0xe6, 255]));
    }

    #[test]
    fn unreadable_label_font_fails_card_creation() {
        let font = FontSource::Bytes(std::sync::Arc::new(vec![0u8; 16]));
        assert!(Card::with_font(GEOM, &font).is_err());
    }

    #[test]
    fn close_burns_connect_and_far_burns_dot() {
        let threshold = GEOM.continuity_threshold();
        let mut trace = BurnTrace::default();
        assert_eq!(trace.burn(100.0, threshold), BurnMark::Dot { at: 100.0 });
        assert_eq!(
            trace.burn(103.0, threshold),
            BurnMark::Connector {
                from: 100.0,
                to: 103.0
            }
        );
        assert_eq!(trace.burn(160.0, threshold), BurnMark::Dot { at: 160.0 });
        assert_eq!(trace.last_burn_x(), Some(160.0));
    }

    #[test]
    fn delta_equal_to_threshold_is_a_jump() {
        let mut trace = BurnTrace::default();
        trace.burn(100.0, 20.0);
        assert_eq!(trace.next_mark(120.0, 20.0), BurnMark::Dot { at: 120.0 });
        assert_eq!(
            trace.next_mark(80.5, 20.0),
            BurnMark::Connector {
                from: 100.0,
                to: 80.5
            }
        );
    }

    #[test]
    fn broken_trace_always_restarts_with_a_dot() {
        let mut trace = BurnTrace::default();
        trace.burn(50.0, 20.0);
        trace.break_continuity();
        assert_eq!(trace.last_burn_x(), None);
        assert_eq!(trace.next_mark(50.0, 20.0), BurnMark::Dot { at: 50.0 });
    }

    #[test]
    fn draw_base_resets_trace_and_matches_fresh_card() {
        let mut fresh = Card::new(GEOM).unwrap();
        fresh.draw_base().unwrap();

        let mut card = Card::new(GEOM).unwrap();
        card.draw_base().unwrap();
        card.burn(95.0).unwrap();
        card.burn(98.0).unwrap();
        assert_ne!(card.readback(), fresh.readback());

        card.draw_base().unwrap();
        assert_eq!(card.trace().last_burn_x(), None);
        assert_eq!(card.readback(), fresh.readback());
    }

    #[test]
    fn burn_marks_scorch_the_centre_line() {
        let mut card = Card::new(GEOM).unwrap();
        card.draw_base().unwrap();
        card.burn(95.0).unwrap();
        let px = card.readback().pixel(95, 30).unwrap();
        assert_eq!(px, [0x5a, 0x2d, 0x0c, 255]);
    }
}
