use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb};
use crate::driver::{LedDriver, with_interrupts_suspended};
use crate::font::{GLYPH_HEIGHT, glyph, text_width};
use crate::layout::{LayoutError, MatrixLayout, Ring};
use crate::overlay::{ColorOverride, OverrideSlot};
use crate::timing::{TimeSource, pause, wait_with_fast_forward};

/// Brightness pushed to the driver on construction
pub const INITIAL_BRIGHTNESS: u8 = 4;

/// Column advance assumed by [`PixelRenderer::draw_text_centered`]
const NOMINAL_ADVANCE: i16 = 4;

/// Horizontal shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Vertical shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Timings of the blocking animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTiming {
    /// Default delay per step of a matrix shift
    pub step: Duration,
    /// Default delay per column of scrolling text
    pub text_step: Duration,
    /// Pause after scrolling text has left the matrix
    pub text_hold: Duration,
    /// Delays are divided by this while a button is held
    pub fast_forward_divisor: u32,
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(15),
            text_step: Duration::from_millis(25),
            text_hold: Duration::from_millis(250),
            fast_forward_divisor: 3,
        }
    }
}

/// Frame composer in front of a [`LedDriver`]
///
/// Keeps the logical color of every LED independently of the driver, whose
/// stored data is destroyed by brightness changes. The logical buffer is
/// re-pushed to the driver after every brightness change.
pub struct PixelRenderer<D, const N: usize> {
    driver: D,
    layout: MatrixLayout,
    pixels: [Rgb; N],
    color_override: Option<OverrideSlot>,
    brightness: u8,
    timing: ScrollTiming,
}

impl<D: LedDriver, const N: usize> PixelRenderer<D, N> {
    /// Create a renderer for `layout`, which must fit into `N` pixels
    pub fn new(driver: D, layout: MatrixLayout) -> Result<Self, LayoutError> {
        layout.validate(N)?;

        let mut renderer = Self {
            driver,
            layout,
            pixels: [BLACK; N],
            color_override: None,
            brightness: INITIAL_BRIGHTNESS,
            timing: ScrollTiming::default(),
        };
        renderer.driver.set_brightness_raw(INITIAL_BRIGHTNESS);
        renderer.restore();

        #[cfg(feature = "esp32-log")]
        println!(
            "[PixelRenderer.new] {}x{} matrix, rings {}+{}",
            layout.width, layout.height, layout.inner_ring, layout.outer_ring
        );

        Ok(renderer)
    }

    /// Set the animation timings
    #[must_use]
    pub fn with_timing(mut self, timing: ScrollTiming) -> Self {
        self.timing = timing;
        self
    }

    pub const fn layout(&self) -> MatrixLayout {
        self.layout
    }

    pub const fn timing(&self) -> ScrollTiming {
        self.timing
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Logical colors of the whole chain
    pub fn pixels(&self) -> &[Rgb] {
        self.pixels.get(..self.len()).unwrap_or(&self.pixels)
    }

    /// Logical color of one LED
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels().get(index).copied()
    }

    const fn len(&self) -> usize {
        self.layout.total_len()
    }

    // Override hook

    /// Install a per-pixel override; replaces any previous one
    pub fn set_color_override(&mut self, color_override: impl Into<OverrideSlot>) {
        self.color_override = Some(color_override.into());
    }

    pub fn clear_color_override(&mut self) {
        self.color_override = None;
    }

    pub fn color_override_mut(&mut self) -> Option<&mut OverrideSlot> {
        self.color_override.as_mut()
    }

    /// Start composing a frame
    ///
    /// Lets the installed override reset its per-frame state.
    pub fn begin_frame(&mut self, now: Instant) {
        if let Some(color_override) = &mut self.color_override {
            color_override.tick(now);
        }
    }

    // Pixel primitives

    /// Write one LED
    ///
    /// Unless `force` is set, the override hook may change the color first.
    /// Out of range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgb, force: bool) {
        if index >= self.len() {
            return;
        }
        let mut color = color;
        if !force {
            if let Some(color_override) = &mut self.color_override {
                color_override.apply(index, &mut color);
            }
        }
        self.store(index, color);
    }

    /// Write the matrix cell at column `x`, row `y`; off-matrix cells are clipped
    pub fn draw_pixel_xy(&mut self, x: i16, y: i16, color: Rgb, force: bool) {
        if let Some(index) = self.layout.xy_index(x, y) {
            self.set_pixel(index, color, force);
        }
    }

    /// Fill the matrix with `color`, and the rings too when `include_ring` is set
    pub fn clear(&mut self, color: Rgb, include_ring: bool) {
        let end = if include_ring {
            self.len()
        } else {
            self.layout.matrix_len()
        };
        for index in 0..end {
            self.set_pixel(index, color, false);
        }
    }

    /// Fill both rings with `color`
    pub fn clear_ring(&mut self, color: Rgb) {
        for index in self.layout.matrix_len()..self.len() {
            self.set_pixel(index, color, false);
        }
    }

    /// Write the `pos`-th LED of `ring` (wrapping around the ring)
    pub fn draw_ring_pixel(&mut self, ring: Ring, pos: usize, color: Rgb, force: bool) {
        if let Some(index) = self.layout.ring_index(ring, pos) {
            self.set_pixel(index, color, force);
        }
    }

    fn store(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
            self.driver.set_pixel_raw(index, color);
        }
    }

    // Text

    /// Draw one character with its left edge at column `x`
    ///
    /// Columns outside the matrix are clipped. Returns the advance width
    /// (glyph width plus one), whether or not anything was drawn.
    pub fn draw_char(&mut self, x: i16, ch: char, color: Rgb) -> i16 {
        let glyph = glyph(ch);
        let rows = GLYPH_HEIGHT.min(usize::from(self.layout.height));

        for row in 0..rows {
            for col in 0..glyph.width() {
                if !glyph.is_lit(col, row) {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let y = row as i16;
                self.draw_pixel_xy(x.saturating_add(i16::from(col)), y, color, false);
            }
        }
        i16::from(glyph.advance())
    }

    /// Draw `text` (upper-cased) starting at column `x`
    ///
    /// Returns the total width consumed.
    pub fn draw_text(&mut self, x: i16, text: &str, color: Rgb) -> i16 {
        let mut cursor = x;
        let mut width: i16 = 0;
        for ch in text.chars() {
            let advance = self.draw_char(cursor, ch.to_ascii_uppercase(), color);
            cursor = cursor.saturating_add(advance);
            width = width.saturating_add(advance);
        }
        width
    }

    /// Width `draw_text` would return for `text`, without drawing
    pub fn text_width(&self, text: &str) -> i16 {
        text_width(text)
    }

    /// Draw `text` roughly centered on the matrix
    ///
    /// Assumes every character is three columns wide plus spacing; narrow and
    /// wide glyphs shift the result.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn draw_text_centered(&mut self, text: &str, color: Rgb) -> i16 {
        let chars = text.chars().count().min(i16::MAX as usize) as i16;
        let nominal = chars.saturating_mul(NOMINAL_ADVANCE).saturating_sub(1);
        let x = (i16::from(self.layout.width) - nominal) / 2;
        self.draw_text(x, text, color)
    }

    // Shifting and scrolling

    /// Shift the matrix one column; the vacated column turns black
    pub fn move_horizontal(&mut self, direction: Horizontal) {
        let width = usize::from(self.layout.width);
        for row in 0..usize::from(self.layout.height) {
            let start = row * width;
            match direction {
                Horizontal::Left => {
                    for col in 0..width {
                        let next = if col + 1 < width {
                            self.pixels[start + col + 1]
                        } else {
                            BLACK
                        };
                        self.set_pixel(start + col, next, true);
                    }
                }
                Horizontal::Right => {
                    for col in (0..width).rev() {
                        let next = if col > 0 {
                            self.pixels[start + col - 1]
                        } else {
                            BLACK
                        };
                        self.set_pixel(start + col, next, true);
                    }
                }
            }
        }
    }

    /// Shift the matrix one row; the vacated row turns black
    pub fn move_vertical(&mut self, direction: Vertical) {
        let height = usize::from(self.layout.height);
        match direction {
            Vertical::Up => {
                for row in 0..height {
                    self.copy_row(row, (row + 1 < height).then_some(row + 1));
                }
            }
            Vertical::Down => {
                for row in (0..height).rev() {
                    self.copy_row(row, row.checked_sub(1));
                }
            }
        }
    }

    fn copy_row(&mut self, row: usize, source: Option<usize>) {
        let width = usize::from(self.layout.width);
        for col in 0..width {
            let color = source.map_or(BLACK, |source| self.pixels[source * width + col]);
            self.set_pixel(row * width + col, color, true);
        }
    }

    /// Shift the matrix `steps` columns, showing each step
    ///
    /// Blocks for `steps * delay`; `None` uses [`ScrollTiming::step`].
    /// Scrolling by the matrix width leaves the matrix black.
    pub fn scroll_horizontal<T: TimeSource + ?Sized>(
        &mut self,
        steps: usize,
        direction: Horizontal,
        delay: Option<Duration>,
        clock: &mut T,
    ) {
        let delay = delay.unwrap_or(self.timing.step);
        for _ in 0..steps {
            self.move_horizontal(direction);
            self.show();
            pause(clock, delay);
        }
    }

    /// Shift the matrix `steps` rows, showing each step
    pub fn scroll_vertical<T: TimeSource + ?Sized>(
        &mut self,
        steps: usize,
        direction: Vertical,
        delay: Option<Duration>,
        clock: &mut T,
    ) {
        let delay = delay.unwrap_or(self.timing.step);
        for _ in 0..steps {
            self.move_vertical(direction);
            self.show();
            pause(clock, delay);
        }
    }

    /// Scroll `text` from the right edge until it has left the matrix
    ///
    /// Blocks until done. `delay` is the wait per column, `None` uses
    /// [`ScrollTiming::text_step`]. While `hurry` reports true (typically
    /// "any button held") every wait is shortened by the fast-forward divisor.
    pub fn draw_text_scrolling<T, F>(
        &mut self,
        text: &str,
        color: Rgb,
        delay: Option<Duration>,
        clock: &mut T,
        mut hurry: F,
    ) where
        T: TimeSource + ?Sized,
        F: FnMut() -> bool,
    {
        let delay = delay.unwrap_or(self.timing.text_step);
        let divisor = self.timing.fast_forward_divisor;
        let width = i16::from(self.layout.width);
        // drawn past the right edge: measures without lighting anything
        let text_width = self.draw_text(width, text, color);

        let mut x = width;
        while x >= -text_width {
            self.begin_frame(clock.now());
            self.clear(BLACK, false);
            self.draw_text(x, text, color);
            self.show();
            wait_with_fast_forward(clock, delay, divisor, &mut hurry);
            x -= 1;
        }
        wait_with_fast_forward(clock, self.timing.text_hold, divisor, &mut hurry);
    }

    // Brightness and output

    /// Last brightness pushed to the driver
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the driver brightness and re-push the logical buffer
    pub fn set_brightness(&mut self, level: u8) {
        if level == self.brightness {
            return;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[PixelRenderer.set_brightness] {} -> {}",
            self.brightness, level
        );

        self.driver.set_brightness_raw(level);
        self.brightness = level;
        self.restore();
    }

    /// Push every logical pixel to the driver again
    pub fn restore(&mut self) {
        let len = self.len();
        for (index, color) in self.pixels.iter().take(len).enumerate() {
            self.driver.set_pixel_raw(index, *color);
        }
    }

    /// Transmit the current frame with interrupts and the watchdog suspended
    pub fn show(&mut self) {
        with_interrupts_suspended(&mut self.driver, |driver| driver.transmit_frame());
    }
}
