use std::time::Duration;

/// Distance used when no measurement was requested this cycle.
pub const DISTANCE_INFINITY: f64 = f64::INFINITY;

/// What the buzzer should be doing for the current distance sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertState {
    Silent,
    /// Beeping at the given frequency with a 50% duty cycle.
    Pulsing(f64),
    Continuous,
}

impl AlertState {
    /// On time (and equally the off time) of one beep, `1 / (2f)`.
    pub fn half_cycle(&self) -> Option<Duration> {
        match *self {
            AlertState::Pulsing(frequency_hz) => Some(Duration::from_secs_f64(0.5 / frequency_hz)),
            _ => None,
        }
    }
}

/// Maps a distance onto an alert.
///
/// Below `min_cm` the tone is continuous, above `max_cm` the buzzer is
/// silent. In between the frequency falls linearly from `max_hz` at
/// `min_cm` to `min_hz` at `max_cm`. NaN is not a distance and maps to
/// `Silent`.
pub fn compute_alert(distance_cm: f64, min_cm: f64, max_cm: f64, min_hz: f64, max_hz: f64) -> AlertState {
    if distance_cm.is_nan() {
        return AlertState::Silent;
    }
    if distance_cm < min_cm {
        return AlertState::Continuous;
    }
    if distance_cm > max_cm {
        return AlertState::Silent;
    }

    let percent = (distance_cm - min_cm) / (max_cm - min_cm);
    let frequency_hz = min_hz + (1.0 - percent) * (max_hz - min_hz);
    AlertState::Pulsing(frequency_hz.clamp(min_hz, max_hz))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(d: f64) -> AlertState {
        compute_alert(d, 3.0, 30.0, 1.0, 8.0)
    }

    #[test]
    fn too_close_is_continuous() {
        assert_eq!(alert(1.0), AlertState::Continuous);
        assert_eq!(alert(0.0), AlertState::Continuous);
    }

    #[test]
    fn too_far_is_silent() {
        assert_eq!(alert(50.0), AlertState::Silent);
        assert_eq!(alert(DISTANCE_INFINITY), AlertState::Silent);
    }

    #[test]
    fn nan_is_silent() {
        assert_eq!(alert(f64::NAN), AlertState::Silent);
    }

    #[test]
    fn range_bounds_hit_frequency_bounds() {
        assert_eq!(alert(3.0), AlertState::Pulsing(8.0));
        assert_eq!(alert(30.0), AlertState::Pulsing(1.0));
    }

    #[test]
    fn midpoint_is_halfway_frequency() {
        assert_eq!(alert(16.5), AlertState::Pulsing(4.5));
    }

    #[test]
    fn half_cycle_is_half_the_period() {
        assert_eq!(AlertState::Pulsing(8.0).half_cycle(), Some(Duration::from_millis(62) + Duration::from_micros(500)));
        assert_eq!(AlertState::Pulsing(1.0).half_cycle(), Some(Duration::from_millis(500)));

        let mid = AlertState::Pulsing(4.5).half_cycle().unwrap().as_secs_f64();
        assert!((mid - 1.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn steady_states_have_no_half_cycle() {
        assert_eq!(AlertState::Silent.half_cycle(), None);
        assert_eq!(AlertState::Continuous.half_cycle(), None);
    }
}
