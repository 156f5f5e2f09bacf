#![no_std]

pub mod color;
pub mod driver;
pub mod font;
pub mod input;
pub mod layout;
pub mod math8;
pub mod overlay;
pub mod renderer;
pub mod sensor;
pub mod timing;

pub use color::Rgb;
pub use driver::{LedDriver, SmartLedDriver, WatchdogControl, with_interrupts_suspended};
pub use input::{
    Button, ButtonConfig, ButtonEvent, ButtonId, ButtonSet, HalPins, InputError, Level, PinId,
    PinReader,
};
pub use layout::{DEFAULT_LED_COUNT, LayoutError, MatrixLayout, Ring};
pub use overlay::{ColorOverride, OverrideSlot, RainbowOverride, ShimmerOverride};
pub use renderer::{Horizontal, PixelRenderer, ScrollTiming, Vertical};
pub use sensor::{
    AdcReader, AmbientLightSensor, BrightnessRange, LightSensorConfig, SensorConfigError,
};
pub use timing::{Cadence, Stopwatch, SystemClock, TickPacer, TickResult, TimeSource};

pub use embassy_time::{Duration, Instant};
