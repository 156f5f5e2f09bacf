use embedded_hal::digital::InputPin;
use heapless::Vec;

use super::{InputError, Level, PinId, PinReader};

/// [`PinReader`] over a fixed set of `embedded-hal` input pins
pub struct HalPins<P, const N: usize> {
    pins: Vec<(PinId, P), N>,
}

impl<P: InputPin, const N: usize> Default for HalPins<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> HalPins<P, N> {
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Make `pin` readable under the GPIO number `id`
    pub fn add(&mut self, id: PinId, pin: P) -> Result<(), InputError> {
        self.pins
            .push((id, pin))
            .map_err(|_| InputError::TooManyInputs)
    }
}

impl<P: InputPin, const N: usize> PinReader for HalPins<P, N> {
    fn read(&mut self, pin: PinId) -> Option<Level> {
        let (_, input) = self.pins.iter_mut().find(|(id, _)| *id == pin)?;
        match input.is_high() {
            Ok(true) => Some(Level::High),
            Ok(false) => Some(Level::Low),
            Err(_) => None,
        }
    }
}
