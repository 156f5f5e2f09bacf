//! Shimmer override
//!
//! Dims every seventh lit matrix pixel, with the selection shifting by one
//! pixel per phase and the dimming following a triangle over the phase.

use embassy_time::{Duration, Instant};

use super::ColorOverride;
use crate::color::{BLACK, Rgb, scale_brightness};

const DEFAULT_PHASE_MS: u64 = 600;
const STRIDE: u32 = 7;
const MIN_LEVEL: f32 = 0.1;
const LEVEL_SPAN: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct ShimmerOverride {
    /// Pixels at or above this index (the rings) are left alone
    matrix_len: usize,
    phase: Duration,
    phase_start: Option<Instant>,
    now: Instant,
    jump: u8,
    lit_count: u32,
}

impl ShimmerOverride {
    pub const fn new(matrix_len: usize) -> Self {
        Self {
            matrix_len,
            phase: Duration::from_millis(DEFAULT_PHASE_MS),
            phase_start: None,
            now: Instant::from_millis(0),
            jump: 0,
            lit_count: 0,
        }
    }

    /// Set the phase duration
    #[must_use]
    pub const fn with_phase(mut self, phase: Duration) -> Self {
        self.phase = phase;
        self
    }

    /// Brightness factor for the current point of the phase
    #[allow(clippy::cast_precision_loss)]
    fn level(&self) -> f32 {
        let start = self.phase_start.unwrap_or(self.now);
        let elapsed = self.now.saturating_duration_since(start).as_millis();
        let phase = self.phase.as_millis().max(1);

        let mut fraction = elapsed as f32 / phase as f32;
        if elapsed < phase / 2 {
            fraction = 1.0 - fraction;
        }
        MIN_LEVEL + fraction * LEVEL_SPAN
    }
}

impl ColorOverride for ShimmerOverride {
    fn apply(&mut self, index: usize, color: &mut Rgb) {
        if *color == BLACK || index >= self.matrix_len {
            return;
        }

        self.lit_count = self.lit_count.wrapping_add(1);
        if self.lit_count.wrapping_add(u32::from(self.jump)).is_multiple_of(STRIDE) {
            *color = scale_brightness(*color, self.level());
        }
    }

    fn tick(&mut self, now: Instant) {
        let start = *self.phase_start.get_or_insert(now);
        if now.saturating_duration_since(start) > self.phase {
            self.phase_start = Some(now);
            self.jump = self.jump.wrapping_sub(1);
        }
        self.now = now;
        self.lit_count = 0;
    }
}
