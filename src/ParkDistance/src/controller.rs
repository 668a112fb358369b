use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::alert::{AlertState, DISTANCE_INFINITY};
use crate::config::AlertConfig;
use crate::devices::{ActivationSignal, AudibleOutput, DeviceError, DistanceSensor};

pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Polls the activation contact and the distance sensor and keeps the
/// buzzer pattern in line with the measured distance.
pub struct ProximityAlertController<A, S, O> {
    config: AlertConfig,
    activation: A,
    sensor: S,
    output: O,
    poll_interval: Duration,
    last_state: Option<AlertState>,
    last_distance: Option<f64>,
}

impl<A, S, O> ProximityAlertController<A, S, O>
where
    A: ActivationSignal,
    S: DistanceSensor,
    O: AudibleOutput,
{
    pub fn new(config: AlertConfig, activation: A, sensor: S, output: O) -> Self {
        Self {
            config,
            activation,
            sensor,
            output,
            poll_interval: POLL_INTERVAL,
            last_state: None,
            last_distance: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs one poll cycle and returns the alert that was applied.
    pub fn step(&mut self) -> Result<AlertState, DeviceError> {
        let distance_cm = self.read_distance();
        let state = self.config.alert_for(distance_cm);
        self.apply(state)?;

        // beep frequency follows the distance, only log switches between patterns
        if self.last_state.map(|last| mem::discriminant(&last)) != Some(mem::discriminant(&state)) {
            info!(distance_cm, ?state, "alert changed");
            self.last_state = Some(state);
        }
        Ok(state)
    }

    /// Polls until `running` is cleared, then switches the output off.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), DeviceError> {
        while running.load(Ordering::SeqCst) {
            self.step()?;
            thread::sleep(self.poll_interval);
        }
        self.output.turn_off()
    }

    pub fn into_parts(self) -> (A, S, O) {
        (self.activation, self.sensor, self.output)
    }

    fn read_distance(&mut self) -> f64 {
        if !self.activation.is_active() {
            self.last_distance = None;
            return DISTANCE_INFINITY;
        }
        if self.last_distance.is_none() {
            info!("measurement started");
        }
        let distance_cm = self.sensor.measure_distance_cm();
        // the sensor only updates its reading every few dozen polls
        if self.last_distance != Some(distance_cm) {
            info!(distance_cm, "measured distance");
            self.last_distance = Some(distance_cm);
        }
        distance_cm
    }

    fn apply(&mut self, state: AlertState) -> Result<(), DeviceError> {
        if let Some(half) = state.half_cycle() {
            return self.output.pulse(half, half);
        }
        match state {
            AlertState::Continuous => self.output.turn_on(),
            _ => self.output.turn_off(),
        }
    }
}
