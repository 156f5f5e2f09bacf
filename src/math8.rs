/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linearly remap `value` from `in_min..=in_max` into `out_min..=out_max`
///
/// The input is clamped first; an empty input range maps to `out_min`.
#[allow(clippy::cast_possible_truncation)]
pub const fn remap(value: u16, in_min: u16, in_max: u16, out_min: u16, out_max: u16) -> u16 {
    if in_max <= in_min {
        return out_min;
    }
    let value = if value < in_min {
        in_min
    } else if value > in_max {
        in_max
    } else {
        value
    };

    let span_in = (in_max - in_min) as u32;
    let span_out = out_max.saturating_sub(out_min) as u32;
    let offset = (value - in_min) as u32 * span_out / span_in;
    out_min + offset as u16
}
