//! LED driver seam and the interrupt-free transmission window

use smart_leds::{RGB8, SmartLedsWrite};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::math8::scale8;

/// Platform watchdog hooks
///
/// The default implementation does nothing, which is correct for platforms
/// where a critical section does not starve a watchdog.
pub trait WatchdogControl {
    fn pause_watchdog(&mut self) {}

    fn resume_watchdog(&mut self) {}
}

/// Raw addressable LED driver
///
/// Implementations may scale stored pixel data when the brightness changes,
/// destroying the unscaled colors. The renderer re-pushes its logical buffer
/// after every brightness change.
pub trait LedDriver: WatchdogControl {
    /// Store the color for one LED
    fn set_pixel_raw(&mut self, index: usize, color: Rgb);

    /// Change the global brightness scale (0-255)
    fn set_brightness_raw(&mut self, level: u8);

    /// Send the stored frame to the LEDs
    ///
    /// Timing critical; callers run it through [`with_interrupts_suspended`].
    fn transmit_frame(&mut self);
}

/// Run `f` with the watchdog paused and interrupts masked
///
/// The window must stay short: it covers a single frame transmission or a
/// single ADC burst.
pub fn with_interrupts_suspended<D, R>(device: &mut D, f: impl FnOnce(&mut D) -> R) -> R
where
    D: WatchdogControl + ?Sized,
{
    device.pause_watchdog();
    let result = critical_section::with(|_| f(device));
    device.resume_watchdog();
    result
}

/// [`LedDriver`] on top of any `smart-leds` writer
///
/// Pixels are stored already scaled by the current brightness, the same way
/// `NeoPixel` style drivers do it. Changing the brightness leaves the stored
/// data at the old scale until every pixel is written again.
pub struct SmartLedDriver<W, const N: usize> {
    writer: W,
    brightness: u8,
    pixels: [RGB8; N],
}

impl<W, const N: usize> SmartLedDriver<W, N>
where
    W: SmartLedsWrite,
    RGB8: Into<W::Color>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            brightness: u8::MAX,
            pixels: [RGB8 { r: 0, g: 0, b: 0 }; N],
        }
    }

    /// Stored (already scaled) pixel data
    pub fn raw_pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W, const N: usize> WatchdogControl for SmartLedDriver<W, N> {}

impl<W, const N: usize> LedDriver for SmartLedDriver<W, N>
where
    W: SmartLedsWrite,
    RGB8: Into<W::Color>,
{
    fn set_pixel_raw(&mut self, index: usize, color: Rgb) {
        let Some(pixel) = self.pixels.get_mut(index) else {
            return;
        };
        *pixel = RGB8 {
            r: scale8(color.r, self.brightness),
            g: scale8(color.g, self.brightness),
            b: scale8(color.b, self.brightness),
        };
    }

    fn set_brightness_raw(&mut self, level: u8) {
        self.brightness = level;
    }

    fn transmit_frame(&mut self) {
        if self.writer.write(self.pixels.iter().copied()).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedDriver.transmit_frame] write failed");
        }
    }
}
