//! Boot a ThermoGuard node on the host
//!
//! Trains the model, prints the calibration report, then drives the control
//! core through a button press and a couple of timer ticks with recording
//! devices standing in for the board. Everything the node would have sent
//! over its UART is echoed at the end.
//!
//! Run with: `RUST_LOG=debug cargo run -p thermoguard-ml --example startup_demo`

use thermoguard_core::mock::MockPeripherals;
use thermoguard_core::report::print_predictions;
use thermoguard_core::{Controller, Event, System, SystemConfig};
use thermoguard_ml::{Regressor, DEFAULT_LEARNING_RATE, TRAIN_INPUT, TRAIN_TARGET};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut model = Regressor::from_seed(&TRAIN_INPUT, &TRAIN_TARGET, 0x7e57)?;
    let epochs = model.train_to_convergence(DEFAULT_LEARNING_RATE)?;
    log::info!("model ready after {epochs} epochs");

    let mut report = String::new();
    print_predictions(&mut report, &model, &TRAIN_INPUT)?;
    print!("{report}");

    let config = SystemConfig::default();
    let mut peripherals = MockPeripherals::new(&config);
    let probe = peripherals.clone();
    // About 0.74 V on the sensor pin, roughly 24 °C
    probe.adc.set_raw(config.sensor_pin, 151);

    let system = System::new(peripherals.devices(), &model, config)?;
    let controller = Controller::new(system);

    probe.button.set_level(true);
    controller.dispatch(Event::ButtonEdge);
    for _ in 0..4 {
        controller.dispatch(Event::ToggleElapsed);
    }
    controller.dispatch(Event::DebounceElapsed);
    controller.dispatch(Event::PredictElapsed);
    controller.service_watchdog();

    println!("serial output:");
    for line in probe.serial.lines() {
        println!("  {line}");
    }
    println!(
        "LED writes: {}, watchdog kicks: {}, EEPROM flag: {}",
        probe.led.writes().len(),
        probe.watchdog.kicks(),
        probe.eeprom.get(config.led_state_address)
    );

    Ok(())
}
