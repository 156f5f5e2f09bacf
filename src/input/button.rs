//! Single button state machine
//!
//! Raw pin state is debounced into a filtered "pressed" flag. Events are
//! derived by comparing that flag with the last reported state:
//! - released -> pressed: `Press`, once the press has been held for
//!   `delay_before_press`
//! - pressed -> released: `Release`, immediately
//! - steady hold: `Repeat` every `repeat_rate` once `repeat_delay` has passed

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::{ButtonEvent, InputError, Level, PinId, PinReader};

/// Upper bound of pins combined into one logical button
pub const MAX_PINS_PER_BUTTON: usize = 4;

const DEFAULT_DEBOUNCE_MS: u64 = 20;
const DEFAULT_REPEAT_DELAY_MS: u64 = 400;
const DEFAULT_REPEAT_RATE_MS: u64 = 100;

/// Timing and polarity of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    /// Level that counts as "pressed" on every pin
    pub active_level: Level,
    /// Raw changes are ignored for this long after an accepted transition
    pub debounce: Duration,
    /// The button must be held this long before `Press` is reported
    pub delay_before_press: Duration,
    /// Whether `Repeat` events are emitted while held
    pub can_repeat: bool,
    /// Hold time before the first `Repeat`
    pub repeat_delay: Duration,
    /// Minimum interval between `Repeat` events
    pub repeat_rate: Duration,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_level: Level::Low,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            delay_before_press: Duration::from_millis(0),
            can_repeat: false,
            repeat_delay: Duration::from_millis(DEFAULT_REPEAT_DELAY_MS),
            repeat_rate: Duration::from_millis(DEFAULT_REPEAT_RATE_MS),
        }
    }
}

impl ButtonConfig {
    #[must_use]
    pub const fn with_active_level(mut self, level: Level) -> Self {
        self.active_level = level;
        self
    }

    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub const fn with_delay_before_press(mut self, delay: Duration) -> Self {
        self.delay_before_press = delay;
        self
    }

    /// Enable `Repeat` events with the given initial delay and rate
    #[must_use]
    pub const fn with_repeat(mut self, delay: Duration, rate: Duration) -> Self {
        self.can_repeat = true;
        self.repeat_delay = delay;
        self.repeat_rate = rate;
        self
    }
}

/// One logical button made of one or more pins
///
/// All pins must be active at the same time for the button to count as
/// pressed.
#[derive(Debug, Clone)]
pub struct Button {
    pins: Vec<PinId, MAX_PINS_PER_BUTTON>,
    config: ButtonConfig,
    enabled: bool,

    /// Last raw combined pin reading
    raw_active: bool,
    /// Debounced state
    pressed: bool,
    /// State last reported through an event
    reported: bool,
    /// A press is being held but has not been reported yet
    press_pending: bool,

    /// Time of the last accepted transition
    state_since: Option<Instant>,
    last_repeat: Instant,
}

impl Button {
    pub fn new(pins: &[PinId], config: ButtonConfig) -> Result<Self, InputError> {
        if pins.is_empty() {
            return Err(InputError::NoPins);
        }
        let pins = Vec::from_slice(pins).map_err(|()| InputError::TooManyPins)?;

        Ok(Self {
            pins,
            config,
            enabled: true,
            raw_active: false,
            pressed: false,
            reported: false,
            press_pending: false,
            state_since: None,
            last_repeat: Instant::from_millis(0),
        })
    }

    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    pub const fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ButtonConfig) {
        self.config = config;
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Debounced pressed state; always false while disabled
    pub const fn is_pressed(&self) -> bool {
        self.enabled && self.pressed
    }

    /// Enable or disable the button; either way the state is reset
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        self.enabled = enabled;
        self.reset(now);
    }

    /// Forget the pressed state without emitting an event
    ///
    /// A button held across a reset is not reported again until it has been
    /// released and pressed anew.
    pub fn reset(&mut self, now: Instant) {
        self.state_since = Some(now);
        self.pressed = false;
        self.reported = false;
        self.press_pending = false;
    }

    /// Sample the pins and return the event due at `now`, if any
    pub fn poll<P: PinReader + ?Sized>(&mut self, now: Instant, pins: &mut P) -> Option<ButtonEvent> {
        if !self.enabled {
            return None;
        }
        self.sample(now, pins);
        self.next_event(now)
    }

    /// Raw combined pin state, bypassing the debounce filter
    pub fn is_raw_active<P: PinReader + ?Sized>(&self, pins: &mut P) -> bool {
        self.pins
            .iter()
            .all(|&pin| pins.read(pin) == Some(self.config.active_level))
    }

    fn time_in_state(&self, now: Instant) -> Duration {
        self.state_since
            .map_or(Duration::MAX, |since| now.saturating_duration_since(since))
    }

    fn sample<P: PinReader + ?Sized>(&mut self, now: Instant, pins: &mut P) {
        // contacts bounce right after a transition
        if self.time_in_state(now) < self.config.debounce {
            return;
        }

        let last = self.raw_active;
        self.raw_active = self.is_raw_active(pins);
        if last != self.raw_active && self.raw_active != self.pressed {
            self.state_since = Some(now);
            self.pressed = self.raw_active;
        }
    }

    fn next_event(&mut self, now: Instant) -> Option<ButtonEvent> {
        let in_state = self.time_in_state(now);

        if self.pressed != self.reported {
            if self.pressed && in_state < self.config.delay_before_press {
                self.press_pending = true;
                return None;
            }

            self.reported = self.pressed;
            self.press_pending = false;
            self.last_repeat = now;
            return Some(if self.pressed {
                ButtonEvent::Press
            } else {
                ButtonEvent::Release
            });
        }

        if !self.pressed {
            if self.press_pending {
                // released before the hold delay ran out
                self.press_pending = false;
                return Some(ButtonEvent::Release);
            }
            return None;
        }

        let since_repeat = now.saturating_duration_since(self.last_repeat);
        if in_state >= self.config.repeat_delay && since_repeat >= self.config.repeat_rate {
            self.last_repeat = now;
            if self.config.can_repeat {
                return Some(ButtonEvent::Repeat);
            }
        }
        None
    }
}
