//! Devices on the Raspberry Pi GPIO header, driven through `rppal`.
//!
//! All pin numbers are BCM numbers.

mod button;
mod buzzer;
mod hcsr04;

pub use button::Button;
pub use buzzer::Buzzer;
pub use hcsr04::HcSr04;
