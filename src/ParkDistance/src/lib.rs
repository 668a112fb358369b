//! Parking assist: turns the distance reported by an ultrasonic sensor into
//! a beeping buzzer while a reverse-gear contact is closed.
//!
//! The closer the obstacle, the faster the beeps, up to a continuous tone
//! below the minimum distance. The control logic only talks to the three
//! traits in [`devices`]; the `rppal` backed implementations live in
//! [`hardware`].

pub mod alert;
pub mod config;
pub mod controller;
pub mod devices;
pub mod hardware;

pub use alert::{AlertState, DISTANCE_INFINITY, compute_alert};
pub use config::{AlertConfig, ConfigError};
pub use controller::ProximityAlertController;
pub use devices::{ActivationSignal, AudibleOutput, DeviceError, DistanceSensor};
