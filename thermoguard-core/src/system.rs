//! Interrupt-Driven Control State Machine
//!
//! ## Overview
//!
//! [`System`] ties the board's peripherals to a trained [`Predictor`]. It owns
//! no hardware: every device is borrowed for the lifetime `'a` and the board
//! keeps ownership. Work happens in four event handlers, each meant to be
//! called from the matching interrupt:
//!
//! ```text
//! button edge ──► handle_button_interrupt ──► (debounce gate) ──► confirmed press
//!                                                                   ├─ toggle blink + persist flag
//!                                                                   ├─ ADC → predict → serial
//!                                                                   └─ restart predict timer
//! debounce timer ──► handle_debounce_timer_interrupt ──► re-arm button
//! predict timer  ──► handle_predict_timer_interrupt  ──► ADC → predict → serial
//! toggle timer   ──► handle_toggle_timer_interrupt   ──► invert LED
//! ```
//!
//! The supervisory loop ([`System::run`]) does nothing but kick the watchdog.
//!
//! ## Debounce
//!
//! ```text
//!            edge: mask port, start debounce timer, act if pressed
//!   ┌───────┐ ───────────────────────────────────────────► ┌────────────┐
//!   │ Armed │                                              │ Debouncing │
//!   └───────┘ ◄─────────────────────────────────────────── └────────────┘
//!            debounce expiry: stop timer, unmask port
//! ```
//!
//! The press is acted on immediately; the debounce interval only delays
//! re-arming. Masking the port is the sole exclusion mechanism between
//! button interrupts, and an edge that still arrives while `Debouncing` is
//! ignored.
//!
//! ## Persisted state
//!
//! One byte in non-volatile memory records whether the LED blink is enabled.
//! It is written on every confirmed press and read once in [`System::new`]; a
//! set flag restarts the blink without waiting for a press.
//!
//! ## Invariants
//!
//! - blink enabled ⇔ toggle timer running
//! - `Debouncing` ⇔ port interrupts masked and debounce timer running

use core::fmt::Write;

use crate::config::SystemConfig;
use crate::constants::{LED_STATE_DISABLED, LED_STATE_ENABLED};
use crate::errors::ConfigResult;
use crate::numeric::round_half_away;
use crate::traits::{
    AnalogInput, Board, DigitalOutput, InterruptInput, NonVolatileStore, PeriodicTimer,
    Predictor, SerialOutput, Watchdog,
};

/// Asynchronous events the control core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Edge on the button pin
    ButtonEdge,
    /// Debounce timer expired
    DebounceElapsed,
    /// Scheduled prediction is due
    PredictElapsed,
    /// LED blink half-period elapsed
    ToggleElapsed,
}

/// Button gating state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Button interrupts enabled, no debounce timer running
    Armed,
    /// Button interrupts masked until the debounce timer expires
    Debouncing,
}

/// Borrowed peripherals of one board
pub struct Devices<'a, B: Board> {
    /// Blinking status LED
    pub led: &'a mut B::Led,
    /// Push button with edge interrupt
    pub button: &'a mut B::Button,
    /// Masks the button while it settles
    pub debounce_timer: &'a mut B::Timer,
    /// Inverts the LED each period while blinking
    pub toggle_timer: &'a mut B::Timer,
    /// Schedules temperature readings
    pub predict_timer: &'a mut B::Timer,
    /// Resets the board unless kicked in time
    pub watchdog: &'a mut B::Watchdog,
    /// Holds the LED blink flag across power cycles
    pub eeprom: &'a mut B::Store,
    /// Converter the temperature sensor is wired to
    pub adc: &'a mut B::Adc,
    /// Operator console
    pub serial: &'a mut B::Serial,
}

/// Control state machine
///
/// Dropping a `System` performs the orderly shutdown: LED low, button
/// interrupt disabled, all timers stopped, watchdog disabled.
pub struct System<'a, B: Board, P: Predictor> {
    devices: Devices<'a, B>,
    predictor: &'a P,
    config: SystemConfig,
    debounce: DebounceState,
    blink_enabled: bool,
}

impl<'a, B: Board, P: Predictor> System<'a, B, P> {
    /// Bring the system up
    ///
    /// Enables the button interrupt, serial transmission, the watchdog and
    /// the ADC, starts the predict timer, then restores the persisted LED
    /// state. From here on the watchdog must be serviced.
    pub fn new(devices: Devices<'a, B>, predictor: &'a P, config: SystemConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut system = Self {
            devices,
            predictor,
            config,
            debounce: DebounceState::Armed,
            blink_enabled: false,
        };

        system.devices.button.enable_interrupt(true);
        system.devices.serial.set_enabled(true);
        system.devices.watchdog.set_enabled(true);
        system.devices.predict_timer.start();
        system.devices.adc.set_enabled(true);

        system.restore_led_state();

        info!(
            "system up: sensor pin {}, blink {}",
            system.config.sensor_pin,
            system.blink_enabled
        );
        Ok(system)
    }

    /// Route an event to its handler
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::ButtonEdge => self.handle_button_interrupt(),
            Event::DebounceElapsed => self.handle_debounce_timer_interrupt(),
            Event::PredictElapsed => self.handle_predict_timer_interrupt(),
            Event::ToggleElapsed => self.handle_toggle_timer_interrupt(),
        }
    }

    /// Button edge: gate further edges and act on a press
    pub fn handle_button_interrupt(&mut self) {
        if self.debounce == DebounceState::Debouncing {
            trace!("button edge ignored while debouncing");
            return;
        }

        self.devices.button.enable_interrupt_on_port(false);
        self.devices.debounce_timer.start();
        self.debounce = DebounceState::Debouncing;
        debug!("debouncing");

        if self.config.is_pressed(self.devices.button.read()) {
            self.handle_button_pressed();
        }
    }

    /// Debounce timer expiry: re-arm the button
    pub fn handle_debounce_timer_interrupt(&mut self) {
        self.devices.debounce_timer.stop();
        self.devices.button.enable_interrupt_on_port(true);
        self.debounce = DebounceState::Armed;
        debug!("button re-armed");
    }

    /// Scheduled prediction
    ///
    /// The predict timer is periodic and rearms itself.
    pub fn handle_predict_timer_interrupt(&mut self) {
        self.report_temperature();
    }

    /// Toggle timer expiry: invert the LED while blinking
    pub fn handle_toggle_timer_interrupt(&mut self) {
        if self.blink_enabled {
            self.devices.led.toggle();
        }
    }

    /// Kick the watchdog once
    pub fn service_watchdog(&mut self) {
        self.devices.watchdog.reset();
    }

    /// Supervisory loop. Never returns.
    pub fn run(&mut self) -> ! {
        let _ = writeln!(self.devices.serial, "Running the system!");
        info!("entering supervisory loop");

        loop {
            self.service_watchdog();
        }
    }

    /// Turn operator output on or off; text written while off is lost
    pub fn enable_serial_transmission(&mut self, enable: bool) {
        self.devices.serial.set_enabled(enable);
    }

    /// Current button gating state
    pub fn debounce_state(&self) -> DebounceState {
        self.debounce
    }

    /// Whether the LED is blinking (and the toggle timer running)
    pub fn is_blink_enabled(&self) -> bool {
        self.blink_enabled
    }

    /// Validated configuration the system was built with
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Model used for every temperature reading
    pub fn predictor(&self) -> &P {
        self.predictor
    }

    /// Read the sensor, predict, print the rounded result
    ///
    /// Returns the value that was printed.
    pub fn report_temperature(&mut self) -> i32 {
        let voltage = self.devices.adc.input_voltage(self.config.sensor_pin);
        let prediction = self.predictor.predict(voltage);
        let temperature = round_half_away(prediction);

        debug!("sensor {} V -> {}", voltage, prediction);
        let _ = writeln!(self.devices.serial, "The temperature is: {}", temperature);
        temperature
    }

    fn handle_button_pressed(&mut self) {
        info!("button pressed");
        let _ = writeln!(self.devices.serial, "Button pressed!");

        self.set_blink_enabled(!self.blink_enabled);
        self.persist_led_state();

        self.report_temperature();
        // A manual reading starts a fresh period so the next scheduled one
        // does not follow right behind it.
        self.devices.predict_timer.restart();
    }

    fn set_blink_enabled(&mut self, enabled: bool) {
        self.blink_enabled = enabled;
        if enabled {
            self.devices.toggle_timer.start();
        } else {
            self.devices.toggle_timer.stop();
            self.devices.led.write(false);
        }
        info!("LED blink {}", if enabled { "on" } else { "off" });
    }

    fn persist_led_state(&mut self) {
        let value = if self.blink_enabled {
            LED_STATE_ENABLED
        } else {
            LED_STATE_DISABLED
        };
        self.devices.eeprom.write(self.config.led_state_address, value);
    }

    fn restore_led_state(&mut self) {
        let stored = self.devices.eeprom.read(self.config.led_state_address);
        if stored != LED_STATE_DISABLED {
            debug!("restoring LED blink from flag {}", stored);
            self.set_blink_enabled(true);
        }
    }
}

impl<'a, B: Board, P: Predictor> Drop for System<'a, B, P> {
    fn drop(&mut self) {
        self.devices.led.write(false);
        self.devices.button.enable_interrupt(false);
        self.devices.debounce_timer.stop();
        self.devices.toggle_timer.stop();
        self.devices.predict_timer.stop();
        self.devices.watchdog.set_enabled(false);
        info!("system shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FixedPredictor, MockPeripherals};

    fn setup() -> (MockPeripherals, FixedPredictor, SystemConfig) {
        let config = SystemConfig::default();
        (MockPeripherals::new(&config), FixedPredictor::new(100.0, -50.0), config)
    }

    #[test]
    fn construction_enables_devices() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();

        let system = System::new(peripherals.devices(), &model, config).unwrap();

        assert!(probe.button.interrupt_enabled());
        assert!(probe.serial.enabled());
        assert!(probe.watchdog.enabled());
        assert!(probe.predict_timer.running());
        assert!(probe.adc.enabled());
        assert!(!probe.debounce_timer.running());
        assert!(!probe.toggle_timer.running());
        assert_eq!(system.debounce_state(), DebounceState::Armed);
        assert!(!system.is_blink_enabled());
    }

    #[test]
    fn invalid_config_rejected() {
        let (mut peripherals, model, _) = setup();
        let config = SystemConfig::default().with_debounce_period_ms(0);
        assert!(System::new(peripherals.devices(), &model, config).is_err());
    }

    #[test]
    fn press_acts_immediately_and_gates_rearm() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.button.set_level(true);
        probe.adc.set_raw(0, 1023);
        system.handle(Event::ButtonEdge);

        assert_eq!(system.debounce_state(), DebounceState::Debouncing);
        assert!(!probe.button.port_interrupt_enabled());
        assert!(probe.debounce_timer.running());
        // Acted before the debounce timer fired
        assert!(system.is_blink_enabled());
        assert!(probe.serial.output().contains("Button pressed!"));

        system.handle(Event::DebounceElapsed);
        assert_eq!(system.debounce_state(), DebounceState::Armed);
        assert!(probe.button.port_interrupt_enabled());
        assert!(!probe.debounce_timer.running());
    }

    #[test]
    fn edge_without_press_only_debounces() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.button.set_level(false);
        system.handle(Event::ButtonEdge);

        assert_eq!(system.debounce_state(), DebounceState::Debouncing);
        assert!(!system.is_blink_enabled());
        assert_eq!(probe.eeprom.writes(), 0);
        assert!(probe.serial.output().is_empty());
    }

    #[test]
    fn edges_while_debouncing_are_ignored() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.button.set_level(true);
        system.handle(Event::ButtonEdge);
        assert!(!probe.button.can_interrupt());
        system.handle(Event::ButtonEdge);
        system.handle(Event::ButtonEdge);

        assert!(system.is_blink_enabled());
        assert_eq!(probe.eeprom.writes(), 1);
        assert_eq!(probe.button.port_disables(), 1);
        assert_eq!(probe.debounce_timer.starts(), 1);

        system.handle(Event::DebounceElapsed);
        assert!(probe.button.can_interrupt());
        assert_eq!(probe.debounce_timer.stops(), 1);
    }

    #[test]
    fn active_low_button() {
        let (mut peripherals, model, _) = setup();
        let probe = peripherals.clone();
        let config = SystemConfig::default().with_button_active_low(true);
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.button.set_level(false);
        system.handle(Event::ButtonEdge);
        assert!(system.is_blink_enabled());
    }

    #[test]
    fn press_reports_temperature_and_restarts_predict_timer() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        // 0 V -> bias only
        probe.adc.set_raw(0, 0);
        probe.button.set_level(true);
        system.handle(Event::ButtonEdge);

        assert!(probe.serial.lines().contains(&"The temperature is: -50".to_string()));
        assert_eq!(probe.predict_timer.restarts(), 1);
    }

    #[test]
    fn predict_timer_reads_configured_pin() {
        let (mut peripherals, model, _) = setup();
        let probe = peripherals.clone();
        let config = SystemConfig::default().with_sensor_pin(3);
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.adc.set_raw(0, 0);
        probe.adc.set_raw(3, 1023);
        system.handle(Event::PredictElapsed);

        // 5 V * 100 - 50
        assert_eq!(probe.serial.lines(), vec!["The temperature is: 450".to_string()]);
        assert_eq!(probe.adc.reads(), 1);
        assert_eq!(probe.predict_timer.restarts(), 0);
    }

    #[test]
    fn second_press_disables_blink_and_drives_led_low() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        probe.button.set_level(true);
        system.handle(Event::ButtonEdge);
        system.handle(Event::ToggleElapsed);
        assert!(probe.led.level());
        system.handle(Event::DebounceElapsed);

        system.handle(Event::ButtonEdge);
        assert!(!system.is_blink_enabled());
        assert!(!probe.toggle_timer.running());
        assert_eq!(probe.toggle_timer.starts(), 1);
        assert_eq!(probe.toggle_timer.stops(), 1);
        assert!(!probe.led.level());
        assert_eq!(probe.eeprom.get(config.led_state_address), LED_STATE_DISABLED);
    }

    #[test]
    fn toggle_timer_only_blinks_when_enabled() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        system.handle(Event::ToggleElapsed);
        assert!(probe.led.writes().is_empty());

        probe.button.set_level(true);
        system.handle(Event::ButtonEdge);
        system.handle(Event::ToggleElapsed);
        system.handle(Event::ToggleElapsed);
        assert_eq!(probe.led.writes(), vec![true, false]);
    }

    #[test]
    fn persisted_flag_resumes_blink_at_startup() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        probe.eeprom.set(config.led_state_address, LED_STATE_ENABLED);

        let system = System::new(peripherals.devices(), &model, config).unwrap();

        assert!(system.is_blink_enabled());
        assert!(probe.toggle_timer.running());
        assert_eq!(probe.eeprom.writes(), 0);
    }

    #[test]
    fn drop_shuts_everything_down() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        probe.eeprom.set(config.led_state_address, LED_STATE_ENABLED);

        {
            let mut system = System::new(peripherals.devices(), &model, config).unwrap();
            system.handle(Event::ToggleElapsed);
            assert!(probe.led.level());
        }

        assert!(!probe.led.level());
        assert!(!probe.button.interrupt_enabled());
        assert!(!probe.debounce_timer.running());
        assert!(!probe.toggle_timer.running());
        assert!(!probe.predict_timer.running());
        assert!(!probe.watchdog.enabled());
    }

    #[test]
    fn service_watchdog_kicks_once() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        for _ in 0..5 {
            system.service_watchdog();
        }
        assert_eq!(probe.watchdog.kicks(), 5);
    }

    fn arb_event() -> impl proptest::strategy::Strategy<Value = Event> {
        use proptest::prelude::*;
        prop_oneof![
            Just(Event::ButtonEdge),
            Just(Event::DebounceElapsed),
            Just(Event::PredictElapsed),
            Just(Event::ToggleElapsed),
        ]
    }

    proptest::proptest! {
        /// Presses are counted only when the button was armed, and the
        /// gating state always matches the port mask and debounce timer.
        #[test]
        fn debounce_gates_every_sequence(
            events in proptest::collection::vec((arb_event(), proptest::bool::ANY), 0..64)
        ) {
            let (mut peripherals, model, config) = setup();
            let probe = peripherals.clone();
            let mut system = System::new(peripherals.devices(), &model, config).unwrap();

            let mut expected_presses = 0usize;
            let mut armed = true;
            for (event, level) in events {
                probe.button.set_level(level);
                if event == Event::ButtonEdge && armed && level {
                    expected_presses += 1;
                }
                match event {
                    Event::ButtonEdge => armed = false,
                    Event::DebounceElapsed => armed = true,
                    _ => {}
                }

                system.handle(event);

                let debouncing = system.debounce_state() == DebounceState::Debouncing;
                proptest::prop_assert_eq!(debouncing, !armed);
                proptest::prop_assert_eq!(probe.button.port_interrupt_enabled(), armed);
                proptest::prop_assert_eq!(probe.debounce_timer.running(), debouncing);
                proptest::prop_assert_eq!(probe.toggle_timer.running(), system.is_blink_enabled());
            }

            proptest::prop_assert_eq!(probe.eeprom.writes(), expected_presses);
            proptest::prop_assert_eq!(system.is_blink_enabled(), expected_presses % 2 == 1);
        }
    }

    #[test]
    fn serial_can_be_silenced() {
        let (mut peripherals, model, config) = setup();
        let probe = peripherals.clone();
        let mut system = System::new(peripherals.devices(), &model, config).unwrap();

        system.enable_serial_transmission(false);
        system.handle(Event::PredictElapsed);
        assert!(probe.serial.output().is_empty());

        system.enable_serial_transmission(true);
        system.handle(Event::PredictElapsed);
        assert_eq!(probe.serial.lines().len(), 1);

        probe.serial.clear();
        system.handle(Event::PredictElapsed);
        assert_eq!(probe.serial.lines().len(), 1);
    }
}
