use crate::foundation::error::{RecorderError, RecorderResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel. `opacity` scales the whole
/// source pixel before blending.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let k = (opacity.clamp(0.0, 1.0) * 255.0).round() as u32;
    if k == 0 || src[3] == 0 {
        return dst;
    }
    let src = src.map(|c| div255(u32::from(c) * k));
    let keep = 255 - src[3];
    std::array::from_fn(|i| (src[i] + div255(u32::from(dst[i]) * keep)).min(255) as u8)
}

/// Blends `src` over `dst` pixel by pixel; both are tightly packed RGBA8.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> RecorderResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RecorderError::render(format!(
            "cannot blend {} source bytes onto {} target bytes",
            src.len(),
            dst.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Straight-alpha form of a premultiplied pixel, for the PNG encoder.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    match px[3] {
        0 => [0, 0, 0, 0],
        255 => px,
        a => {
            let a = u32::from(a);
            let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

// x / 255 rounded to nearest, for x <= 255 * 255.
fn div255(x: u32) -> u32 {
    (x + 127) / 255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invisible_sources_leave_dst_alone() {
        let dst = [10, 20, 30, 40];
        assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
        assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
    }

    #[test]
    fn dimmed_sun_over_sky_lands_between_the_two() {
        // Half-opacity #cccccc over opaque #87ceeb.
        let out = over([0x87, 0xce, 0xeb, 255], [0xcc, 0xcc, 0xcc, 255], 0.5);
        assert_eq!(out[3], 255);
        assert!(out[0] > 0x87 && out[0] < 0xcc);
        assert!(out[2] < 0xeb && out[2] > 0xcc);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src, 1.0), src);
    }

    #[test]
    fn over_half_opacity_blends() {
        let dst = [0, 0, 0, 255];
        let src = [255, 255, 255, 255];
        let out = over(dst, src, 0.5);
        assert_eq!(out[3], 255);
        assert!((127..=129).contains(&out[0]));
    }

    #[test]
    fn over_in_place_rejects_mismatched_buffers() {
        let mut dst = vec![0u8; 8];
        assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    }

    #[test]
    fn unpremultiply_restores_straight_channels() {
        assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
        assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
        assert_eq!(unpremultiply([64, 32, 0, 128]), [128, 64, 0, 128]);
    }
}
