use rppal::gpio::{Gpio, Level, Trigger};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{Level as LogLevel, debug};
use tracing_subscriber::FmtSubscriber;

const BTN_PIN: u8 = 2;
const LED_PIN: u8 = 17;
const BOUNCE_TIME: Duration = Duration::from_millis(100);
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let gpio = Gpio::new()?;
    let mut led_pin = gpio.get(LED_PIN)?.into_output_low();
    // pressing pulls the pin to ground, the pull-up keeps it high otherwise
    let mut btn_pin = gpio.get(BTN_PIN)?.into_input_pullup();
    btn_pin.set_interrupt(Trigger::Both, Some(BOUNCE_TIME))?;

    let running = setup_signal_handler()?;

    println!("Press Ctrl+C to quit");

    while running.load(Ordering::SeqCst) {
        if let Some(event) = btn_pin.poll_interrupt(true, Some(POLL_TIMEOUT))? {
            let pressed = event.trigger == Trigger::FallingEdge;
            debug!(?event, pressed, "button edge");
            // LED shows whether the button is held
            led_pin.write(if pressed { Level::High } else { Level::Low });
        }
    }

    btn_pin.clear_interrupt()?;
    led_pin.set_low();
    Ok(())
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
