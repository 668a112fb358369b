use rppal::gpio::{Gpio, Level, OutputPin};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;
use tracing::{Level as LogLevel, info};
use tracing_subscriber::FmtSubscriber;

// BCM GPIO 0 to 25, every pin on the 40-pin header
const PIN_COUNT: u8 = 26;
const TOGGLE_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let mut pins = initialize_gpio()?;
    info!(count = pins.len(), "pins configured as outputs");

    let running = setup_signal_handler()?;

    println!("Press Ctrl+C to quit!");

    let mut level = Level::High;
    while running.load(Ordering::SeqCst) {
        match level {
            Level::High => println!("Switching all pins ON!"),
            Level::Low => println!("Switching all pins off."),
        }
        for pin in pins.iter_mut() {
            pin.write(level);
        }
        level = !level;
        sleep(TOGGLE_INTERVAL);
    }

    // Cleanup
    for pin in pins.iter_mut() {
        pin.set_low();
    }
    Ok(())
}

fn initialize_gpio() -> Result<Vec<OutputPin>, Box<dyn Error>> {
    let gpio = Gpio::new()?;
    let mut pins = Vec::with_capacity(PIN_COUNT as usize);
    for pin_num in 0..PIN_COUNT {
        pins.push(gpio.get(pin_num)?.into_output_low());
    }
    Ok(pins)
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(LogLevel::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn setup_signal_handler() -> Result<Arc<AtomicBool>, Box<dyn Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;
    Ok(running)
}
