/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Same arithmetic as the WS2812 driver's global brightness: the factor is
/// stored plus one, so `scale8(v, 255) == v` and `scale8(v, 0) == 0`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale a slice of RGB pixels into `out` with a single factor
pub fn scale_frame(frame: &[crate::Rgb], scale: u8, out: &mut [crate::Rgb]) {
    for (dst, src) in out.iter_mut().zip(frame) {
        dst.r = scale8(src.r, scale);
        dst.g = scale8(src.g, scale);
        dst.b = scale8(src.b, scale);
    }
}
