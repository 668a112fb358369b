use rppal::gpio::{Gpio, InputPin, Trigger};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

const BTN_ON_PIN: u8 = 2;
const BTN_OFF_PIN: u8 = 3;
const LED_PIN: u8 = 17;
const BOUNCE_TIME: Duration = Duration::from_millis(100);
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let gpio = Gpio::new()?;
    let mut led_pin = gpio.get(LED_PIN)?.into_output_low();
    let mut btn_on = setup_button(&gpio, BTN_ON_PIN)?;
    let mut btn_off = setup_button(&gpio, BTN_OFF_PIN)?;

    let running = setup_signal_handler()?;

    println!("Press Ctrl+C to quit");

    // without a press the LED keeps its last state
    while running.load(Ordering::SeqCst) {
        if let Some((pin, event)) = gpio.poll_interrupts(&[&btn_on, &btn_off], true, Some(POLL_TIMEOUT))? {
            debug!(pin = pin.pin(), ?event, "button pressed");
            match pin.pin() {
                BTN_ON_PIN => led_pin.set_high(),
                BTN_OFF_PIN => led_pin.set_low(),
                _ => {}
            }
        }
    }

    btn_on.clear_interrupt()?;
    btn_off.clear_interrupt()?;
    led_pin.set_low();
    Ok(())
}

fn setup_button(gpio: &Gpio, pin: u8) -> Result<InputPin, Box<dyn Error>> {
    let mut btn = gpio.get(pin)?.into_input_pullup();
    btn.set_interrupt(Trigger::FallingEdge, Some(BOUNCE_TIME))?;
    Ok(btn)
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
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
