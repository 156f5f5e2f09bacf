//! Ambient light sensing
//!
//! Turns noisy ADC bursts into a stable display brightness in two stages:
//! 1. a circular history of remapped samples, averaged into an instant level
//! 2. an exponential follower that snaps toward large changes and drifts
//!    slowly over small ones, which hides lamp flicker

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::driver::{WatchdogControl, with_interrupts_suspended};
use crate::math8::remap;
use crate::timing::Cadence;

/// Top of the logical light level scale
pub const LEVEL_MAX: u16 = 100;

/// Raw samples averaged per reading
pub const ADC_SAMPLES: usize = 8;

/// Default number of readings kept in the history
pub const DEFAULT_HISTORY: usize = 80;

const DEFAULT_RAW_MIN: u16 = 10;
const DEFAULT_RAW_MAX: u16 = 100;
const DEFAULT_JITTER: u16 = 3;
const DEFAULT_UPDATE_INTERVAL_MS: u64 = 40;
const DEFAULT_MIN_BRIGHTNESS: u8 = 4;
const DEFAULT_MAX_BRIGHTNESS: u8 = 150;

/// Weight of the current level in the slow blend
const SLOW_BLEND_WEIGHT: f32 = 99.0;

/// Errors raised by sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorConfigError {
    /// `raw_min` is not below `raw_max`
    EmptyRawRange,
    /// `min` is above `max`
    InvertedBrightnessRange,
    /// The history buffer has no slots
    EmptyHistory,
}

/// Burst-capable analog input
pub trait AdcReader: WatchdogControl {
    /// Fill `samples` with consecutive raw readings
    ///
    /// Called with interrupts masked and the watchdog paused.
    fn read_burst(&mut self, samples: &mut [u16]);
}

/// Driver brightness bounds the light level is mapped into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    min: u8,
    max: u8,
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_BRIGHTNESS,
            max: DEFAULT_MAX_BRIGHTNESS,
        }
    }
}

impl BrightnessRange {
    pub const fn new(min: u8, max: u8) -> Result<Self, SensorConfigError> {
        if min > max {
            return Err(SensorConfigError::InvertedBrightnessRange);
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }

    /// Map a light level (0..=[`LEVEL_MAX`]) into the range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn map(self, level: f32) -> u8 {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, f32::from(LEVEL_MAX))
        };
        let span = f32::from(self.max - self.min);
        let value = f32::from(self.min) + libm::roundf(span * level / f32::from(LEVEL_MAX));
        (value as u8).clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSensorConfig {
    /// Raw readings at or below this are "dark" (the display itself lights
    /// the sensor a little)
    pub raw_min: u16,
    /// Raw readings at or above this are "bright"
    pub raw_max: u16,
    /// Changes up to this many levels count as noise
    pub jitter: u16,
    /// Minimum time between two smoothing steps
    pub update_interval: Duration,
    pub brightness: BrightnessRange,
}

impl Default for LightSensorConfig {
    fn default() -> Self {
        Self {
            raw_min: DEFAULT_RAW_MIN,
            raw_max: DEFAULT_RAW_MAX,
            jitter: DEFAULT_JITTER,
            update_interval: Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS),
            brightness: BrightnessRange::default(),
        }
    }
}

impl LightSensorConfig {
    #[must_use]
    pub const fn with_raw_range(mut self, raw_min: u16, raw_max: u16) -> Self {
        self.raw_min = raw_min;
        self.raw_max = raw_max;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: BrightnessRange) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_jitter(mut self, jitter: u16) -> Self {
        self.jitter = jitter;
        self
    }

    pub const fn validate(&self) -> Result<(), SensorConfigError> {
        if self.raw_min >= self.raw_max {
            return Err(SensorConfigError::EmptyRawRange);
        }
        if self.brightness.min > self.brightness.max {
            return Err(SensorConfigError::InvertedBrightnessRange);
        }
        Ok(())
    }
}

/// Smoothed ambient light reading
pub struct AmbientLightSensor<A, const H: usize = DEFAULT_HISTORY> {
    adc: A,
    config: LightSensorConfig,
    samples: [u16; ADC_SAMPLES],
    history: [u16; H],
    cursor: usize,
    level: f32,
    smoothing: Cadence,
}

impl<A: AdcReader, const H: usize> AmbientLightSensor<A, H> {
    /// Create the sensor and prime the history with a real reading
    pub fn new(adc: A, config: LightSensorConfig) -> Result<Self, SensorConfigError> {
        config.validate()?;
        if H == 0 {
            return Err(SensorConfigError::EmptyHistory);
        }

        let mut sensor = Self {
            adc,
            config,
            samples: [0; ADC_SAMPLES],
            history: [0; H],
            cursor: 0,
            level: 0.0,
            smoothing: Cadence::new(config.update_interval),
        };

        let first = sensor.read_level();
        sensor.history = [first; H];
        sensor.level = sensor.history_mean();

        #[cfg(feature = "esp32-log")]
        println!("[AmbientLightSensor.new] primed with level {}", first);

        Ok(sensor)
    }

    /// Sample the sensor and return the driver brightness
    ///
    /// Always within the configured [`BrightnessRange`].
    pub fn get(&mut self, now: Instant) -> u8 {
        self.update(now);
        self.config.brightness.map(self.level)
    }

    /// Smoothed light level (0..=[`LEVEL_MAX`])
    pub const fn level(&self) -> f32 {
        self.level
    }

    pub const fn config(&self) -> &LightSensorConfig {
        &self.config
    }

    /// Replace the brightness bounds, e.g. after a settings change
    pub fn set_brightness_range(&mut self, range: BrightnessRange) {
        self.config.brightness = range;
    }

    pub const fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn history(&self) -> &[u16] {
        &self.history
    }

    /// Sample once and run the smoothing stages
    pub fn update(&mut self, now: Instant) {
        let sample = self.read_level();
        self.record(sample);

        if self.smoothing.is_due(now) {
            let instant = self.history_mean();
            self.follow(instant);
        }
    }

    /// Store `sample` over the oldest slot unless it is within jitter of it
    ///
    /// Extremes are always stored so the mean can reach them.
    fn record(&mut self, sample: u16) {
        let Some(slot) = self.history.get_mut(self.cursor) else {
            return;
        };
        let is_extreme = sample == 0 || sample == LEVEL_MAX;
        if is_extreme || sample.abs_diff(*slot) > self.config.jitter {
            *slot = sample;
            self.cursor = (self.cursor + 1) % H;
        }
    }

    fn follow(&mut self, instant: f32) {
        let jitter = f32::from(self.config.jitter);
        if libm::fabsf(instant - self.level) > jitter {
            // move quickly toward a real change
            self.level = (instant + self.level) / 2.0;
        } else {
            let mut target = instant;
            if self.level >= f32::from(LEVEL_MAX) - jitter {
                // nudge up so the top of the scale is reachable
                target += 1.0;
            }
            self.level = (SLOW_BLEND_WEIGHT * self.level + target) / (SLOW_BLEND_WEIGHT + 1.0);
        }
        self.level = self.level.clamp(0.0, f32::from(LEVEL_MAX));
    }

    #[allow(clippy::cast_precision_loss)]
    fn history_mean(&self) -> f32 {
        let sum: u32 = self.history.iter().map(|&value| u32::from(value)).sum();
        sum as f32 / H as f32
    }

    /// Burst-read the ADC and remap the average into the logical scale
    #[allow(clippy::cast_possible_truncation)]
    fn read_level(&mut self) -> u16 {
        // the fast ADC path is unstable with interrupts enabled
        with_interrupts_suspended(&mut self.adc, |adc| adc.read_burst(&mut self.samples));

        let sum: u32 = self.samples.iter().map(|&value| u32::from(value)).sum();
        let average = (sum / ADC_SAMPLES as u32) as u16;
        remap(
            average,
            self.config.raw_min,
            self.config.raw_max,
            0,
            LEVEL_MAX,
        )
    }
}
