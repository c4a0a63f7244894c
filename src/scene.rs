//! Rasterizes the meter container: sky, sun disc with glow, ray overlay.

use kurbo::Point;

use crate::{
    foundation::{core::Canvas, error::RecorderResult},
    render::{CpuSurface, DrawOp, FrameRGBA, halo::paint_halo},
    sky::SkyGradient,
    sun::{SunAppearance, SunPosition},
};

pub const SUN_DIAMETER_PX: f64 = 50.0;

/// Centre of the sun disc in container pixels.
pub fn sun_center(container: Canvas, position: SunPosition) -> Point {
    Point::new(
        position.left_percent / 100.0 * f64::from(container.width),
        position.top_px,
    )
}

#[tracing::instrument(level = "debug", skip(appearance, overlay))]
pub fn render_scene(
    container: Canvas,
    sky: SkyGradient,
    position: SunPosition,
    appearance: &SunAppearance,
    overlay: Option<&CpuSurface>,
) -> RecorderResult<FrameRGBA> {
    let mut base = CpuSurface::new(container)?;
    let last_row = container.height.saturating_sub(1).max(1);
    base.fill_rows(|y| sky.sample(f64::from(y) / f64::from(last_row)).opaque());

    let center = sun_center(container, position);
    let radius = SUN_DIAMETER_PX / 2.0;
    let mut sun = CpuSurface::new(container)?;

    // The first listed shadow paints on top, so lay them down back to front.
    for halo in appearance.glow.iter().rev() {
        paint_halo(&mut sun, center, radius, *halo);
    }
    sun.draw(&[DrawOp::fill_circle(center, radius, appearance.body)])?;

    base.composite(&sun, appearance.opacity)?;
    if let Some(overlay) = overlay {
        base.composite(overlay, 1.0)?;
    }
    Ok(base.readback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sky::{NOON, SUNRISE},
        sun::{Sunshine, sun_position},
        time::TimeOfDay,
    };

    const SMALL: Canvas = Canvas {
        width: 120,
        height: 150,
    };

    #[test]
    fn sky_runs_top_to_bottom() {
        let frame = render_scene(
            SMALL,
            SUNRISE,
            SunPosition {
                left_percent: 95.0,
                top_px: 120.0,
            },
            &Sunshine::Hidden.appearance(),
            None,
        )
        .unwrap();
        let top = SUNRISE.top;
        let bottom = SUNRISE.bottom;
        assert_eq!(frame.pixel(0, 0), Some([top.r, top.g, top.b, 255]));
        assert_eq!(
            frame.pixel(0, SMALL.height - 1),
            Some([bottom.r, bottom.g, bottom.b, 255])
        );
    }

    #[test]
    fn shining_sun_is_opaque_yellow_at_centre() {
        let pos = sun_position(TimeOfDay::NOON);
        let frame = render_scene(SMALL, NOON, pos, &Sunshine::Shining.appearance(), None).unwrap();
        let c = sun_center(SMALL, pos);
        assert_eq!(c, Point::new(60.0, 20.0));
        assert_eq!(frame.pixel(60, 20), Some([255, 255, 0, 255]));
    }

    #[test]
    fn hidden_sun_is_dimmed_and_unglowing() {
        let pos = sun_position(TimeOfDay::NOON);
        let hidden = render_scene(SMALL, NOON, pos, &Sunshine::Hidden.appearance(), None).unwrap();
        let px = hidden.pixel(60, 20).unwrap();
        // Half-opacity grey over sky blue: neither pure grey nor pure sky.
        assert_ne!(px, [0xcc, 0xcc, 0xcc, 255]);
        assert_ne!(px, [0x87, 0xce, 0xeb, 255]);

        // Well outside the disc there is no glow, so the sky shows through untouched.
        let shining = render_scene(SMALL, NOON, pos, &Sunshine::Shining.appearance(), None).unwrap();
        let outside = (60, 60);
        assert_ne!(
            shining.pixel(outside.0, outside.1),
            hidden.pixel(outside.0, outside.1)
        );
        let sky_row = NOON.sample(60.0 / 149.0);
        assert_eq!(
            hidden.pixel(outside.0, outside.1),
            Some([sky_row.r, sky_row.g, sky_row.b, 255])
        );
    }
}
