use crate::color::Rgb;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Three phase hue sweep: red to blue, blue to green, green to red.
///
/// Periodic over the full `u8` range. Neighbouring positions never differ by
/// more than 3 on any channel, including across the phase boundaries.
pub const fn color_wheel(pos: u8) -> Rgb {
    let pos = 255 - pos;
    if pos < 85 {
        return Rgb::new(255 - pos * 3, 0, pos * 3);
    }

    if pos < 170 {
        let pos = pos - 85;
        return Rgb::new(0, pos * 3, 255 - pos * 3);
    }

    let pos = pos - 170;
    Rgb::new(pos * 3, 255 - pos * 3, 0)
}

/// Scale every channel linearly by `factor`
///
/// The factor is clamped into `0.0..=1.0`, so `1.0` returns the color
/// unchanged and `0.0` returns black.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_brightness(color: Rgb, factor: f32) -> Rgb {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    let scale = |channel: u8| (f32::from(channel) * factor) as u8;

    Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}
