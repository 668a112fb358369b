use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rppal::gpio::{Event, Gpio, InputPin, Trigger};
use tracing::debug;

use crate::devices::{ActivationSignal, DeviceError};

pub const BOUNCE_TIME: Duration = Duration::from_millis(100);

/// Push button wired between a GPIO pin and ground.
///
/// The internal pull-up keeps the pin high until the button is pressed.
/// Edges are debounced by rppal's interrupt thread, which updates the
/// cached pressed state.
pub struct Button {
    pin: InputPin,
    pressed: Arc<AtomicBool>,
}

impl Button {
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, DeviceError> {
        let mut input = gpio.get(pin)?.into_input_pullup();
        let pressed = Arc::new(AtomicBool::new(input.is_low()));

        let p = pressed.clone();
        input.set_async_interrupt(Trigger::Both, Some(BOUNCE_TIME), move |event: Event| {
            let is_pressed = event.trigger == Trigger::FallingEdge;
            p.store(is_pressed, Ordering::SeqCst);
            debug!(pin, is_pressed, "button edge");
        })?;

        Ok(Self { pin: input, pressed })
    }

    pub fn pin(&self) -> u8 {
        self.pin.pin()
    }
}

impl ActivationSignal for Button {
    fn is_active(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }
}

impl Drop for Button {
    fn drop(&mut self) {
        let _ = self.pin.clear_async_interrupt();
    }
}
