mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ledclock_core::color::{BLACK, BLUE, GREEN, RED, Rgb, WHITE};
    use ledclock_core::driver::{LedDriver, SmartLedDriver, WatchdogControl};
    use ledclock_core::layout::{DEFAULT_LED_COUNT, LayoutError, MatrixLayout, Ring};
    use ledclock_core::overlay::PixelFn;
    use ledclock_core::renderer::{Horizontal, PixelRenderer, Vertical};
    use smart_leds::{RGB8, SmartLedsWrite};

    /// Writer that keeps every transmitted frame
    #[derive(Default)]
    struct FrameLog {
        frames: Vec<Vec<RGB8>>,
    }

    impl SmartLedsWrite for FrameLog {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.frames.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    /// Driver that counts calls instead of storing pixels
    #[derive(Default)]
    struct CountingDriver {
        pixel_writes: usize,
        brightness_writes: usize,
        transmits: usize,
        transmits_while_paused: usize,
        paused: bool,
    }

    impl WatchdogControl for CountingDriver {
        fn pause_watchdog(&mut self) {
            self.paused = true;
        }

        fn resume_watchdog(&mut self) {
            self.paused = false;
        }
    }

    impl LedDriver for CountingDriver {
        fn set_pixel_raw(&mut self, _index: usize, _color: Rgb) {
            self.pixel_writes += 1;
        }

        fn set_brightness_raw(&mut self, _level: u8) {
            self.brightness_writes += 1;
        }

        fn transmit_frame(&mut self) {
            self.transmits += 1;
            if self.paused {
                self.transmits_while_paused += 1;
            }
        }
    }

    type TestDriver = SmartLedDriver<FrameLog, DEFAULT_LED_COUNT>;
    type TestRenderer = PixelRenderer<TestDriver, DEFAULT_LED_COUNT>;

    fn renderer() -> TestRenderer {
        PixelRenderer::new(
            SmartLedDriver::new(FrameLog::default()),
            MatrixLayout::default(),
        )
        .unwrap()
    }

    fn lit(renderer: &TestRenderer) -> Vec<usize> {
        renderer
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, color)| **color != BLACK)
            .map(|(index, _)| index)
            .collect()
    }

    fn to_blue(_index: usize, color: &mut Rgb) {
        *color = BLUE;
    }

    #[test]
    fn test_layout_must_fit_buffer() {
        let result = PixelRenderer::<_, 50>::new(CountingDriver::default(), MatrixLayout::default());
        assert!(matches!(
            result,
            Err(LayoutError::BufferTooSmall {
                required: 109,
                capacity: 50
            })
        ));
    }

    #[test]
    fn test_set_pixel_out_of_range() {
        let mut renderer = renderer();

        renderer.set_pixel(DEFAULT_LED_COUNT, RED, false);
        renderer.set_pixel(usize::MAX, RED, true);

        assert_eq!(renderer.pixel(DEFAULT_LED_COUNT), None);
        assert!(lit(&renderer).is_empty());
    }

    #[test]
    fn test_override_unless_forced() {
        let mut renderer = renderer();
        renderer.set_color_override(to_blue as PixelFn);

        renderer.set_pixel(0, RED, false);
        renderer.set_pixel(1, RED, true);

        assert_eq!(renderer.pixel(0), Some(BLUE));
        assert_eq!(renderer.pixel(1), Some(RED));

        renderer.clear_color_override();
        renderer.set_pixel(2, RED, false);
        assert_eq!(renderer.pixel(2), Some(RED));
    }

    #[test]
    fn test_brightness_change_restores_pixels() {
        let mut renderer = renderer();
        renderer.set_pixel(0, WHITE, false);
        assert_eq!(renderer.driver().raw_pixels()[0], RGB8::new(4, 4, 4));

        renderer.set_brightness(150);

        assert_eq!(renderer.brightness(), 150);
        assert_eq!(renderer.driver().raw_pixels()[0], RGB8::new(150, 150, 150));
        assert_eq!(renderer.pixel(0), Some(WHITE));
    }

    #[test]
    fn test_unchanged_brightness_is_noop() {
        let mut renderer: PixelRenderer<CountingDriver, DEFAULT_LED_COUNT> =
            PixelRenderer::new(CountingDriver::default(), MatrixLayout::default()).unwrap();
        let brightness_writes = renderer.driver().brightness_writes;
        let pixel_writes = renderer.driver().pixel_writes;

        renderer.set_brightness(renderer.brightness());
        assert_eq!(renderer.driver().brightness_writes, brightness_writes);
        assert_eq!(renderer.driver().pixel_writes, pixel_writes);

        renderer.set_brightness(80);
        assert_eq!(renderer.driver().brightness_writes, brightness_writes + 1);
        assert_eq!(
            renderer.driver().pixel_writes,
            pixel_writes + DEFAULT_LED_COUNT
        );
    }

    #[test]
    fn test_show_suspends_watchdog() {
        let mut renderer: PixelRenderer<CountingDriver, DEFAULT_LED_COUNT> =
            PixelRenderer::new(CountingDriver::default(), MatrixLayout::default()).unwrap();

        renderer.show();
        renderer.show();

        assert_eq!(renderer.driver().transmits, 2);
        assert_eq!(renderer.driver().transmits_while_paused, 2);
        assert!(!renderer.driver().paused);
    }

    #[test]
    fn test_show_sends_driver_frame() {
        let mut renderer = renderer();
        renderer.set_brightness(255);
        renderer.set_pixel(3, GREEN, false);

        renderer.show();

        let frames = &renderer.driver().writer().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), DEFAULT_LED_COUNT);
        assert_eq!(frames[0][3], GREEN);
    }

    #[test]
    fn test_draw_char_clips_right_edge() {
        let mut renderer = renderer();

        let width = renderer.draw_char(16, 'M', RED);

        assert_eq!(width, 6);
        assert_eq!(lit(&renderer), vec![16, 33, 50, 67, 84]);
    }

    #[test]
    fn test_draw_char_offscreen() {
        let mut renderer = renderer();

        assert_eq!(renderer.draw_char(-10, 'A', RED), 4);
        assert_eq!(renderer.draw_char(17, 'A', RED), 4);
        assert_eq!(renderer.draw_char(i16::MIN, 'M', RED), 6);
        assert!(lit(&renderer).is_empty());
    }

    #[test]
    fn test_draw_char_clips_left_edge() {
        let mut renderer = renderer();

        // only the rightmost column of 'M' is visible
        renderer.draw_char(-4, 'M', RED);

        assert_eq!(lit(&renderer), vec![0, 17, 34, 51, 68]);
    }

    #[test]
    fn test_draw_text_upper_cases() {
        let mut upper = renderer();
        let mut lower = renderer();

        assert_eq!(upper.draw_text(0, "AB", RED), 8);
        assert_eq!(lower.draw_text(0, "ab", RED), 8);
        assert_eq!(upper.pixels(), lower.pixels());
        assert_eq!(upper.text_width("ab"), 8);
    }

    #[test]
    fn test_draw_text_places_glyphs() {
        let mut renderer = renderer();

        renderer.draw_text(0, "A1", RED);

        // top row: 'A' is .#. and '1' is .#.
        assert_eq!(renderer.pixel(0), Some(BLACK));
        assert_eq!(renderer.pixel(1), Some(RED));
        assert_eq!(renderer.pixel(5), Some(RED));
        // '1' second row is ##.
        assert_eq!(renderer.pixel(17 + 4), Some(RED));
    }

    #[test]
    fn test_draw_text_centered() {
        let mut renderer = renderer();

        assert_eq!(renderer.draw_text_centered("10", RED), 8);

        // starts at (17 - 7) / 2 = 5
        assert_eq!(renderer.pixel(6), Some(RED));
        assert_eq!(renderer.pixel(17 + 5), Some(RED));
        assert_eq!(renderer.pixel(4), Some(BLACK));
    }

    #[test]
    fn test_clear_regions() {
        let mut renderer = renderer();

        renderer.clear(RED, false);
        assert!(renderer.pixels()[..85].iter().all(|&color| color == RED));
        assert!(renderer.pixels()[85..].iter().all(|&color| color == BLACK));

        renderer.clear_ring(GREEN);
        assert!(renderer.pixels()[..85].iter().all(|&color| color == RED));
        assert!(renderer.pixels()[85..].iter().all(|&color| color == GREEN));

        renderer.clear(BLACK, true);
        assert!(lit(&renderer).is_empty());
    }

    #[test]
    fn test_clear_runs_override() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn count(_index: usize, _color: &mut Rgb) {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let mut renderer = renderer();
        renderer.set_color_override(count as PixelFn);
        renderer.clear(RED, true);

        assert_eq!(CALLS.load(Ordering::Relaxed), DEFAULT_LED_COUNT);
    }

    #[test]
    fn test_ring_pixels() {
        let mut renderer = renderer();

        renderer.draw_ring_pixel(Ring::Inner, 13, RED, false);
        renderer.draw_ring_pixel(Ring::Outer, 0, GREEN, false);

        assert_eq!(renderer.pixel(86), Some(RED));
        assert_eq!(renderer.pixel(97), Some(GREEN));
    }

    #[test]
    fn test_draw_pixel_xy_clips() {
        let mut renderer = renderer();

        renderer.draw_pixel_xy(2, 1, RED, false);
        renderer.draw_pixel_xy(17, 0, RED, false);
        renderer.draw_pixel_xy(0, -1, RED, false);

        assert_eq!(lit(&renderer), vec![19]);
    }

    #[test]
    fn test_move_horizontal() {
        let mut renderer = renderer();
        renderer.draw_pixel_xy(0, 0, RED, false);
        renderer.draw_pixel_xy(16, 2, GREEN, false);

        renderer.move_horizontal(Horizontal::Left);
        assert_eq!(lit(&renderer), vec![34 + 15]);
        assert_eq!(renderer.pixel(34 + 15), Some(GREEN));

        renderer.move_horizontal(Horizontal::Right);
        renderer.move_horizontal(Horizontal::Right);
        assert!(lit(&renderer).is_empty());
    }

    #[test]
    fn test_move_vertical() {
        let mut renderer = renderer();
        renderer.draw_pixel_xy(3, 0, RED, false);
        renderer.draw_pixel_xy(4, 4, GREEN, false);

        renderer.move_vertical(Vertical::Down);
        assert_eq!(lit(&renderer), vec![17 + 3]);

        renderer.move_vertical(Vertical::Up);
        assert_eq!(lit(&renderer), vec![3]);
        assert_eq!(renderer.pixel(3), Some(RED));
    }

    #[test]
    fn test_moves_leave_rings_alone() {
        let mut renderer = renderer();
        renderer.clear_ring(RED);

        renderer.move_horizontal(Horizontal::Left);
        renderer.move_vertical(Vertical::Up);

        assert!(renderer.pixels()[85..].iter().all(|&color| color == RED));
    }

    #[test]
    fn test_moves_bypass_override() {
        let mut renderer = renderer();
        renderer.draw_pixel_xy(5, 0, RED, false);
        renderer.set_color_override(to_blue as PixelFn);

        renderer.move_horizontal(Horizontal::Right);

        assert_eq!(renderer.pixel(6), Some(RED));
        assert_eq!(renderer.pixel(5), Some(BLACK));
    }

    #[test]
    fn test_draw_text_offscreen() {
        let mut renderer = renderer();

        assert_eq!(renderer.draw_text(-100, "AB", RED), 8);
        assert!(lit(&renderer).is_empty());

        assert_eq!(renderer.draw_text(17, "AB", RED), 8);
        assert!(lit(&renderer).is_empty());

        // 'B' covers x = -4..=-2
        assert_eq!(renderer.draw_text(-8, "AB", RED), 8);
        assert!(lit(&renderer).is_empty());
    }

    #[test]
    fn test_long_text_width_matches_drawing() {
        let mut renderer = renderer();
        let text = "M".repeat(6000);

        let drawn = renderer.draw_text(0, &text, RED);

        assert_eq!(drawn, i16::MAX);
        assert_eq!(renderer.text_width(&text), drawn);
    }

    #[test]
    fn test_clock_digits_fit_matrix() {
        let mut renderer = renderer();

        // digits at 0, 4, 10 and 14; the trailing spacer column falls off
        assert_eq!(renderer.draw_text(0, "12:34", RED), 18);
        assert_eq!(renderer.pixel(16), Some(RED));
        assert_eq!(renderer.pixel(14), Some(RED));
    }
}
