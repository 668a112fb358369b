//! The three devices the controller drives.
//!
//! The controller never touches GPIO directly, so the real devices in
//! [`crate::hardware`] can be swapped for simulated ones.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}

/// Contact that enables measuring, e.g. a button closed in reverse gear.
pub trait ActivationSignal {
    /// Debounced state of the contact.
    fn is_active(&self) -> bool;
}

/// Ranging sensor returning a smoothed distance.
pub trait DistanceSensor {
    /// Blocks until a usable distance in centimeters is available. Failed
    /// echoes are masked by the implementation.
    fn measure_distance_cm(&mut self) -> f64;
}

/// Buzzer or LED used to make the distance audible.
pub trait AudibleOutput {
    fn turn_on(&mut self) -> Result<(), DeviceError>;

    fn turn_off(&mut self) -> Result<(), DeviceError>;

    /// Toggles on and off until another command replaces it.
    fn pulse(&mut self, on_time: Duration, off_time: Duration) -> Result<(), DeviceError>;
}
