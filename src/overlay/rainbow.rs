//! Rainbow override
//!
//! Replaces every lit pixel with a color wheel hue. Consecutive lit pixels
//! are four wheel positions apart and the whole sweep drifts over time.

use embassy_time::{Duration, Instant};

use super::ColorOverride;
use crate::color::{BLACK, DARK_GRAY, Rgb, color_wheel};

const DEFAULT_STEP_MS: u64 = 50;
const DEFAULT_BASE: u8 = 128;
const HUE_STEP: u8 = 4;

#[derive(Debug, Clone)]
pub struct RainbowOverride {
    step: Duration,
    last_step: Option<Instant>,
    base: u8,
    hue: u8,
}

impl Default for RainbowOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl RainbowOverride {
    pub const fn new() -> Self {
        Self {
            step: Duration::from_millis(DEFAULT_STEP_MS),
            last_step: None,
            base: DEFAULT_BASE,
            hue: 0,
        }
    }

    /// Set how often the sweep moves by one wheel position
    #[must_use]
    pub const fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Current starting wheel position
    pub const fn base(&self) -> u8 {
        self.base
    }
}

impl ColorOverride for RainbowOverride {
    fn apply(&mut self, _index: usize, color: &mut Rgb) {
        // the ring background keeps its color
        if *color == BLACK || *color == DARK_GRAY {
            return;
        }
        self.hue = self.hue.wrapping_add(HUE_STEP);
        *color = color_wheel(self.base.wrapping_add(self.hue));
    }

    fn tick(&mut self, now: Instant) {
        let last = *self.last_step.get_or_insert(now);
        if now.saturating_duration_since(last) > self.step {
            self.last_step = Some(now);
            self.base = self.base.wrapping_sub(1);
        }
        self.hue = 0;
    }
}
