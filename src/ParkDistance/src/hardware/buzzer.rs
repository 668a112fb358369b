use std::time::Duration;

use rppal::gpio::{Gpio, Level, OutputPin};

use crate::devices::{AudibleOutput, DeviceError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    On,
    Off,
    Pulse { on_time: Duration, off_time: Duration },
}

/// What has to happen on the pin to get from one command to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Skip,
    Level(Level),
    /// Stop the PWM thread first, then drive the level.
    ClearThenLevel(Level),
    Pwm { period: Duration, pulse_width: Duration },
}

fn transition(current: Command, next: Command) -> Action {
    if current == next {
        return Action::Skip;
    }
    match next {
        Command::Pulse { on_time, off_time } => Action::Pwm {
            period: on_time + off_time,
            pulse_width: on_time,
        },
        Command::On | Command::Off => {
            let level = if next == Command::On { Level::High } else { Level::Low };
            if matches!(current, Command::Pulse { .. }) {
                Action::ClearThenLevel(level)
            } else {
                Action::Level(level)
            }
        }
    }
}

/// Active buzzer (or LED) on an output pin.
///
/// Beeping runs on rppal's software PWM thread. A command equal to the one
/// already running is ignored so the beep keeps its phase.
pub struct Buzzer {
    pin: OutputPin,
    current: Command,
}

impl Buzzer {
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, DeviceError> {
        let mut pin = gpio.get(pin)?.into_output_low();
        pin.set_reset_on_drop(true);
        Ok(Self { pin, current: Command::Off })
    }

    fn command(&mut self, next: Command) -> Result<(), DeviceError> {
        match transition(self.current, next) {
            Action::Skip => return Ok(()),
            Action::Level(level) => self.pin.write(level),
            Action::ClearThenLevel(level) => {
                self.pin.clear_pwm()?;
                self.pin.write(level);
            }
            Action::Pwm { period, pulse_width } => self.pin.set_pwm(period, pulse_width)?,
        }
        self.current = next;
        Ok(())
    }
}

impl AudibleOutput for Buzzer {
    fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.command(Command::On)
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        self.command(Command::Off)
    }

    fn pulse(&mut self, on_time: Duration, off_time: Duration) -> Result<(), DeviceError> {
        self.command(Command::Pulse { on_time, off_time })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beep(ms: u64) -> Command {
        let half = Duration::from_millis(ms);
        Command::Pulse { on_time: half, off_time: half }
    }

    #[test]
    fn same_beep_again_keeps_its_phase() {
        assert_eq!(transition(beep(100), beep(100)), Action::Skip);
    }

    #[test]
    fn repeated_levels_are_skipped() {
        assert_eq!(transition(Command::On, Command::On), Action::Skip);
        assert_eq!(transition(Command::Off, Command::Off), Action::Skip);
    }

    #[test]
    fn new_beep_rate_reprograms_pwm() {
        assert_eq!(
            transition(beep(100), beep(250)),
            Action::Pwm {
                period: Duration::from_millis(500),
                pulse_width: Duration::from_millis(250),
            }
        );
    }

    #[test]
    fn starting_to_beep_from_a_level_uses_pwm() {
        let expected = Action::Pwm {
            period: Duration::from_millis(1000),
            pulse_width: Duration::from_millis(500),
        };
        assert_eq!(transition(Command::Off, beep(500)), expected);
        assert_eq!(transition(Command::On, beep(500)), expected);
    }

    #[test]
    fn leaving_a_beep_stops_pwm_first() {
        assert_eq!(transition(beep(100), Command::On), Action::ClearThenLevel(Level::High));
        assert_eq!(transition(beep(100), Command::Off), Action::ClearThenLevel(Level::Low));
    }

    #[test]
    fn switching_between_levels_just_drives_the_pin() {
        assert_eq!(transition(Command::Off, Command::On), Action::Level(Level::High));
        assert_eq!(transition(Command::On, Command::Off), Action::Level(Level::Low));
    }
}
