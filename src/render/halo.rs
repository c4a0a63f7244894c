//! The sun's glow. A CSS `0 0 <blur>px <color>` shadow around a disc is the
//! disc blurred by a Gaussian of sigma `blur / 2`, which away from a tight
//! curve is the normal CDF of the signed distance to the rim.

use kurbo::{Point, Rect};

use crate::{render::CpuSurface, sun::Halo};

/// Beyond this many sigmas past the rim the halo rounds to zero alpha.
const REACH_SIGMAS: f64 = 3.0;

pub fn sigma_for_blur(blur_px: u32) -> f64 {
    f64::from(blur_px) / 2.0
}

/// Halo alpha at `distance` from the centre of a disc of `radius`.
pub fn halo_coverage(distance: f64, radius: f64, blur_px: u32) -> f64 {
    if blur_px == 0 {
        return if distance <= radius { 1.0 } else { 0.0 };
    }
    normal_cdf((radius - distance) / sigma_for_blur(blur_px))
}

/// Blends one halo around the disc at `center` onto `target`.
pub fn paint_halo(target: &mut CpuSurface, center: Point, radius: f64, halo: Halo) {
    let reach = radius + REACH_SIGMAS * sigma_for_blur(halo.blur_px);
    let bounds = Rect::new(
        center.x - reach,
        center.y - reach,
        center.x + reach,
        center.y + reach,
    );
    target.shade(bounds, |p| {
        let coverage = halo_coverage(center.distance(p), radius, halo.blur_px);
        (coverage > 0.0).then(|| halo.color.with_opacity(coverage as f32))
    });
}

fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

// Abramowitz & Stegun 7.1.26; absolute error below 1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736 + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    sign * (1.0 - poly * (-x * x).exp())
}
