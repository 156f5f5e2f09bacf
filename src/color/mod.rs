mod utils;

use smart_leds::RGB8;
pub use utils::{color_wheel, rgb_from_u32, rgb_to_u32, scale_brightness};

pub type Rgb = RGB8;

pub const BLACK: Rgb = rgb_from_u32(0x00_0000);
pub const GRAY: Rgb = rgb_from_u32(0x7F_7F7F);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FFFF);
pub const RED: Rgb = rgb_from_u32(0xFF_0000);
pub const GREEN: Rgb = rgb_from_u32(0x00_FF00);
pub const BLUE: Rgb = rgb_from_u32(0x00_00FF);
pub const ORANGE: Rgb = rgb_from_u32(0xFF_A500);
pub const PURPLE: Rgb = rgb_from_u32(0x80_00FF);

pub const DARK_RED: Rgb = rgb_from_u32(0x7F_0000);
pub const DARK_GREEN: Rgb = rgb_from_u32(0x00_7F00);
pub const DARK_BLUE: Rgb = rgb_from_u32(0x00_007F);
/// Background color of the clock rings
pub const DARK_GRAY: Rgb = rgb_from_u32(0x3F_3F3F);
