use thiserror::Error;

use crate::alert::{AlertState, compute_alert};

pub const DISTANCE_MIN_CM: f64 = 3.0;
pub const DISTANCE_MAX_CM: f64 = 30.0;
pub const FREQUENCY_MIN_HZ: f64 = 1.0;
pub const FREQUENCY_MAX_HZ: f64 = 8.0;

/// Rejected alert configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("distance range is empty: min {min_cm} cm must be below max {max_cm} cm")]
    DistanceRange { min_cm: f64, max_cm: f64 },

    #[error("frequency range is empty: min {min_hz} Hz must be below max {max_hz} Hz")]
    FrequencyRange { min_hz: f64, max_hz: f64 },
}

/// Domain and range of the distance to beep-frequency mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertConfig {
    distance_min_cm: f64,
    distance_max_cm: f64,
    frequency_min_hz: f64,
    frequency_max_hz: f64,
}

impl AlertConfig {
    pub fn new(
        distance_min_cm: f64,
        distance_max_cm: f64,
        frequency_min_hz: f64,
        frequency_max_hz: f64,
    ) -> Result<Self, ConfigError> {
        positive("distance_min_cm", distance_min_cm)?;
        positive("distance_max_cm", distance_max_cm)?;
        positive("frequency_min_hz", frequency_min_hz)?;
        positive("frequency_max_hz", frequency_max_hz)?;

        if distance_min_cm >= distance_max_cm {
            return Err(ConfigError::DistanceRange {
                min_cm: distance_min_cm,
                max_cm: distance_max_cm,
            });
        }
        if frequency_min_hz >= frequency_max_hz {
            return Err(ConfigError::FrequencyRange {
                min_hz: frequency_min_hz,
                max_hz: frequency_max_hz,
            });
        }

        Ok(Self {
            distance_min_cm,
            distance_max_cm,
            frequency_min_hz,
            frequency_max_hz,
        })
    }

    pub fn distance_min_cm(&self) -> f64 {
        self.distance_min_cm
    }

    pub fn distance_max_cm(&self) -> f64 {
        self.distance_max_cm
    }

    pub fn frequency_min_hz(&self) -> f64 {
        self.frequency_min_hz
    }

    pub fn frequency_max_hz(&self) -> f64 {
        self.frequency_max_hz
    }

    /// Alert for a distance sample under this configuration.
    pub fn alert_for(&self, distance_cm: f64) -> AlertState {
        compute_alert(
            distance_cm,
            self.distance_min_cm,
            self.distance_max_cm,
            self.frequency_min_hz,
            self.frequency_max_hz,
        )
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            distance_min_cm: DISTANCE_MIN_CM,
            distance_max_cm: DISTANCE_MAX_CM,
            frequency_min_hz: FREQUENCY_MIN_HZ,
            frequency_max_hz: FREQUENCY_MAX_HZ,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
