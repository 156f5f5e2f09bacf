use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Button, ButtonConfig, ButtonEvent, InputError, PinId, PinReader};

/// Handle of a button registered in a [`ButtonSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonId(u8);

impl ButtonId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// All buttons of the device
///
/// Owned by the input subsystem and passed by reference to whoever needs
/// button state.
#[derive(Debug, Clone, Default)]
pub struct ButtonSet<const N: usize> {
    buttons: Vec<Button, N>,
}

impl<const N: usize> ButtonSet<N> {
    pub const fn new() -> Self {
        Self {
            buttons: Vec::new(),
        }
    }

    /// Add a button bound to `pins`
    pub fn register(
        &mut self,
        pins: &[PinId],
        config: ButtonConfig,
    ) -> Result<ButtonId, InputError> {
        let id = u8::try_from(self.buttons.len()).map_err(|_| InputError::RegistryFull)?;
        let button = Button::new(pins, config)?;
        self.buttons
            .push(button)
            .map_err(|_| InputError::RegistryFull)?;

        #[cfg(feature = "esp32-log")]
        println!("[ButtonSet.register] button {} on pins {:?}", id, pins);

        Ok(ButtonId(id))
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.index())
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.get_mut(id.index())
    }

    /// Debounced state of one button; unknown ids read as released
    pub fn is_pressed(&self, id: ButtonId) -> bool {
        self.button(id).is_some_and(Button::is_pressed)
    }

    pub fn set_enabled(&mut self, id: ButtonId, enabled: bool, now: Instant) {
        if let Some(button) = self.button_mut(id) {
            button.set_enabled(enabled, now);
        }
    }

    /// Poll every enabled button once
    ///
    /// Returns at most one event per button, in registration order.
    pub fn poll<P: PinReader + ?Sized>(
        &mut self,
        now: Instant,
        pins: &mut P,
    ) -> Vec<(ButtonId, ButtonEvent), N> {
        let mut events = Vec::new();
        for (index, button) in self.buttons.iter_mut().enumerate() {
            let Some(event) = button.poll(now, pins) else {
                continue;
            };
            #[allow(clippy::cast_possible_truncation)]
            let id = ButtonId(index as u8);
            // capacity equals the number of buttons
            let _ = events.push((id, event));
        }
        events
    }

    /// Fast check of the raw pin state of every registered button
    ///
    /// Skips the debounce filter and the enabled flag; meant for "is anything
    /// held" checks inside blocking animations.
    pub fn are_any_pressed<P: PinReader + ?Sized>(&self, pins: &mut P) -> bool {
        self.buttons
            .iter()
            .any(|button| button.is_raw_active(pins))
    }
}
