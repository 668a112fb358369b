use std::thread;
use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, InputPin, OutputPin};
use tracing::warn;

use crate::devices::{DeviceError, DistanceSensor};

/// Readings kept for smoothing.
pub const QUEUE_LEN: usize = 9;
/// Readings are clamped to this distance; also reported when no echo was
/// received yet.
pub const MAX_DISTANCE_CM: f64 = 100.0;

const TRIGGER_PULSE: Duration = Duration::from_micros(10);
const ECHO_TIMEOUT: Duration = Duration::from_millis(30);
// HC-SR04 needs ~60ms between pings or it picks up the previous echo
const PING_INTERVAL: Duration = Duration::from_millis(60);
const SPEED_OF_SOUND_CM_PER_S: f64 = 34_300.0;
// a full window's worth of missed pings
const STALE_AFTER: Duration = PING_INTERVAL.saturating_mul(QUEUE_LEN as u32);

/// Converts the width of the echo pulse into a one-way distance.
pub fn echo_to_cm(echo: Duration) -> f64 {
    echo.as_secs_f64() * SPEED_OF_SOUND_CM_PER_S / 2.0
}

/// Whether readings taken up to `last_ping` are too old to smooth new ones
/// with, e.g. after the sensor sat idle while the button was released.
fn is_stale(last_ping: Option<Instant>, now: Instant) -> bool {
    last_ping.is_some_and(|at| now.saturating_duration_since(at) >= STALE_AFTER)
}

/// Ring buffer of the latest readings with a median read-out.
#[derive(Debug, Clone)]
pub struct MedianWindow {
    ring: [f64; QUEUE_LEN],
    head: usize,
    count: usize,
}

impl MedianWindow {
    pub fn new() -> Self {
        Self {
            ring: [0.0; QUEUE_LEN],
            head: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.ring[self.head] = value;
        self.head = (self.head + 1) % QUEUE_LEN;
        if self.count < QUEUE_LEN {
            self.count += 1;
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.count
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn median(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let mut sorted = [0.0; QUEUE_LEN];
        let values = &mut sorted[..self.count];
        values.copy_from_slice(&self.ring[..self.count]);
        values.sort_by(f64::total_cmp);

        let mid = self.count / 2;
        if self.count % 2 == 1 {
            Some(values[mid])
        } else {
            Some((values[mid - 1] + values[mid]) / 2.0)
        }
    }
}

impl Default for MedianWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// HC-SR04 ultrasonic ranging module.
///
/// The echo line is 5V; it has to reach the Pi through a level shifter.
pub struct HcSr04 {
    trigger: OutputPin,
    echo: InputPin,
    window: MedianWindow,
    max_distance_cm: f64,
    last_ping: Option<Instant>,
}

impl HcSr04 {
    pub fn new(gpio: &Gpio, trigger_pin: u8, echo_pin: u8) -> Result<Self, DeviceError> {
        let trigger = gpio.get(trigger_pin)?.into_output_low();
        let echo = gpio.get(echo_pin)?.into_input();
        Ok(Self {
            trigger,
            echo,
            window: MedianWindow::new(),
            max_distance_cm: MAX_DISTANCE_CM,
            last_ping: None,
        })
    }

    /// One ping. `None` when the echo never came back.
    fn ping(&mut self) -> Option<f64> {
        self.trigger.set_high();
        thread::sleep(TRIGGER_PULSE);
        self.trigger.set_low();
        self.last_ping = Some(Instant::now());

        let sent = Instant::now();
        while self.echo.is_low() {
            if sent.elapsed() > ECHO_TIMEOUT {
                return None;
            }
        }

        let rise = Instant::now();
        while self.echo.is_high() {
            if rise.elapsed() > ECHO_TIMEOUT {
                return None;
            }
        }

        Some(echo_to_cm(rise.elapsed()))
    }

    fn ping_due(&self) -> bool {
        self.last_ping.is_none_or(|at| at.elapsed() >= PING_INTERVAL)
    }
}

impl DistanceSensor for HcSr04 {
    fn measure_distance_cm(&mut self) -> f64 {
        if self.ping_due() {
            if is_stale(self.last_ping, Instant::now()) {
                self.window.clear();
            }
            match self.ping() {
                Some(cm) => self.window.push(cm.min(self.max_distance_cm)),
                None => warn!(pin = self.echo.pin(), "no echo received"),
            }
        }
        self.window.median().unwrap_or(self.max_distance_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_width_to_distance() {
        // 1ms round trip at 343 m/s is 17.15cm one way
        let cm = echo_to_cm(Duration::from_millis(1));
        assert!((cm - 17.15).abs() < 1e-9);
        assert_eq!(echo_to_cm(Duration::ZERO), 0.0);
    }

    #[test]
    fn readings_go_stale_after_a_window_of_missed_pings() {
        let now = Instant::now();
        let later = now + STALE_AFTER;

        assert!(!is_stale(None, now));
        assert!(!is_stale(Some(now), now + PING_INTERVAL));
        assert!(!is_stale(Some(now), later - Duration::from_millis(1)));
        assert!(is_stale(Some(now), later));
        assert!(is_stale(Some(now), later + Duration::from_secs(5)));
    }

    #[test]
    fn cleared_window_follows_fresh_readings_at_once() {
        // last press ended right at a wall
        let mut w = MedianWindow::new();
        for _ in 0..QUEUE_LEN {
            w.push(2.0);
        }

        w.clear();
        assert!(w.is_empty());
        w.push(50.0);
        assert_eq!(w.median(), Some(50.0));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn empty_window_has_no_median() {
        let w = MedianWindow::new();
        assert!(w.is_empty());
        assert_eq!(w.median(), None);
    }

    #[test]
    fn median_ignores_a_single_stray_echo() {
        let mut w = MedianWindow::new();
        for cm in [20.0, 21.0, 95.0, 19.0, 20.5] {
            w.push(cm);
        }
        assert_eq!(w.median(), Some(20.5));
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let mut w = MedianWindow::new();
        for cm in [10.0, 30.0, 20.0, 40.0] {
            w.push(cm);
        }
        assert_eq!(w.median(), Some(25.0));
    }

    #[test]
    fn window_keeps_only_the_latest_readings() {
        let mut w = MedianWindow::new();
        for _ in 0..QUEUE_LEN {
            w.push(80.0);
        }
        for _ in 0..QUEUE_LEN / 2 + 1 {
            w.push(5.0);
        }
        assert_eq!(w.len(), QUEUE_LEN);
        assert_eq!(w.median(), Some(5.0));
    }
}
