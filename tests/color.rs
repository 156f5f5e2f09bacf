mod tests {
    use ledclock_core::color::{
        BLACK, DARK_GRAY, RED, Rgb, WHITE, color_wheel, rgb_from_u32, rgb_to_u32,
        scale_brightness,
    };

    #[test]
    fn test_rgb_u32_packing() {
        assert_eq!(rgb_from_u32(0xFF_8000), Rgb { r: 255, g: 128, b: 0 });
        assert_eq!(rgb_to_u32(Rgb { r: 1, g: 2, b: 3 }), 0x01_0203);
        assert_eq!(rgb_to_u32(DARK_GRAY), 0x3F_3F3F);
        assert_eq!(rgb_from_u32(0xAB_FF_FF_FF), WHITE);
    }

    #[test]
    fn test_color_wheel_anchors() {
        assert_eq!(color_wheel(255), RED);
        assert_eq!(color_wheel(0), RED);
        assert_eq!(color_wheel(170), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(color_wheel(85), Rgb { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn test_color_wheel_is_smooth() {
        for pos in 0..=255u8 {
            let a = color_wheel(pos);
            let b = color_wheel(pos.wrapping_add(1));
            assert!(a.r.abs_diff(b.r) <= 3, "red jumps at {pos}");
            assert!(a.g.abs_diff(b.g) <= 3, "green jumps at {pos}");
            assert!(a.b.abs_diff(b.b) <= 3, "blue jumps at {pos}");
        }
    }

    #[test]
    fn test_full_scale_keeps_wheel_colors() {
        for pos in 0..=255u8 {
            assert_eq!(scale_brightness(color_wheel(pos), 1.0), color_wheel(pos));
            assert_eq!(scale_brightness(color_wheel(pos), 0.0), BLACK);
        }
    }

    #[test]
    fn test_scale_brightness() {
        let color = Rgb { r: 200, g: 100, b: 10 };

        assert_eq!(scale_brightness(color, 1.0), color);
        assert_eq!(scale_brightness(color, 0.0), BLACK);
        assert_eq!(scale_brightness(color, 0.5), Rgb { r: 100, g: 50, b: 5 });
    }

    #[test]
    fn test_scale_brightness_clamps_factor() {
        let color = Rgb { r: 200, g: 100, b: 10 };

        assert_eq!(scale_brightness(color, 2.0), color);
        assert_eq!(scale_brightness(color, -1.0), BLACK);
        assert_eq!(scale_brightness(color, f32::NAN), BLACK);
    }
}
