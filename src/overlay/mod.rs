//! Per-pixel color overrides used for animated effects
//!
//! An override sees every non-forced pixel write of a compose cycle in
//! ascending index order and may change the color before it is stored.
//! All overrides live in an enum to avoid heap allocations.

mod rainbow;
mod shimmer;

use embassy_time::Instant;
pub use rainbow::RainbowOverride;
pub use shimmer::ShimmerOverride;

use crate::color::Rgb;

/// Stateless override function
pub type PixelFn = fn(index: usize, color: &mut Rgb);

pub trait ColorOverride {
    /// Change `color` before it is written to pixel `index`
    fn apply(&mut self, index: usize, color: &mut Rgb);

    /// Start a new compose cycle
    ///
    /// Called once per frame before any pixel is written. Resets per-frame
    /// counters and advances animation timers.
    fn tick(&mut self, _now: Instant) {}
}

/// Override slot - enum containing all possible overrides
#[derive(Debug, Clone)]
pub enum OverrideSlot {
    /// Moving sparkle over the matrix digits
    Shimmer(ShimmerOverride),
    /// Hue sweep over every lit pixel
    Rainbow(RainbowOverride),
    /// Plain function without state
    Custom(PixelFn),
}

impl ColorOverride for OverrideSlot {
    fn apply(&mut self, index: usize, color: &mut Rgb) {
        match self {
            Self::Shimmer(effect) => effect.apply(index, color),
            Self::Rainbow(effect) => effect.apply(index, color),
            Self::Custom(func) => func(index, color),
        }
    }

    fn tick(&mut self, now: Instant) {
        match self {
            Self::Shimmer(effect) => effect.tick(now),
            Self::Rainbow(effect) => effect.tick(now),
            Self::Custom(_) => {}
        }
    }
}

impl From<ShimmerOverride> for OverrideSlot {
    fn from(effect: ShimmerOverride) -> Self {
        Self::Shimmer(effect)
    }
}

impl From<RainbowOverride> for OverrideSlot {
    fn from(effect: RainbowOverride) -> Self {
        Self::Rainbow(effect)
    }
}

impl From<PixelFn> for OverrideSlot {
    fn from(func: PixelFn) -> Self {
        Self::Custom(func)
    }
}
