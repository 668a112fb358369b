use park_distance::config::{DISTANCE_MAX_CM, DISTANCE_MIN_CM, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ};
use park_distance::hardware::{Button, Buzzer, HcSr04};
use park_distance::{AlertConfig, ProximityAlertController};
use rppal::gpio::Gpio;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

const BTN_PIN: u8 = 26;
const TRIGGER_PIN: u8 = 27;
const ECHO_PIN: u8 = 22;
const BUZZER_PIN: u8 = 21;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let config = AlertConfig::new(DISTANCE_MIN_CM, DISTANCE_MAX_CM, FREQUENCY_MIN_HZ, FREQUENCY_MAX_HZ)?;

    let gpio = Gpio::new()?;
    let button = Button::new(&gpio, BTN_PIN)?;
    let sensor = HcSr04::new(&gpio, TRIGGER_PIN, ECHO_PIN)?;
    let buzzer = Buzzer::new(&gpio, BUZZER_PIN)?;
    info!(button = button.pin(), TRIGGER_PIN, ECHO_PIN, BUZZER_PIN, ?config, "devices ready");

    let running = setup_signal_handler()?;

    println!("Press Ctrl+C to quit");

    let mut controller = ProximityAlertController::new(config, button, sensor, buzzer);
    controller.run(&running)?;

    println!("Ending program");
    Ok(())
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
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
