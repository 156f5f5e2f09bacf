//! Debounced button input
//!
//! Buttons are polled from the main loop; each poll yields at most one
//! [`ButtonEvent`] per button. Pin access goes through [`PinReader`] so the
//! state machine runs unchanged on the host.

mod button;
mod pins;
mod registry;

pub use button::{Button, ButtonConfig, MAX_PINS_PER_BUTTON};
pub use pins::HalPins;
pub use registry::{ButtonId, ButtonSet};

/// GPIO number
pub type PinId = u8;

/// Electrical level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Event reported by a button poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The button went down (after the optional hold delay)
    Press,
    /// The button is still held; emitted at the repeat rate
    Repeat,
    /// The button went up
    Release,
}

/// Errors raised while configuring buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// A button needs at least one pin
    NoPins,
    /// More pins than [`MAX_PINS_PER_BUTTON`]
    TooManyPins,
    /// The button registry is at capacity
    RegistryFull,
    /// The pin table is at capacity
    TooManyInputs,
}

/// Digital pin access
pub trait PinReader {
    /// Read the level of `pin`
    ///
    /// Returns `None` when the pin is unknown or the read failed; such a pin
    /// never counts as active.
    fn read(&mut self, pin: PinId) -> Option<Level>;
}

impl<T: PinReader + ?Sized> PinReader for &mut T {
    fn read(&mut self, pin: PinId) -> Option<Level> {
        (**self).read(pin)
    }
}
