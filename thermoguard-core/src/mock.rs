//! Recording test doubles for every device capability
//!
//! Each double is a cheap handle around shared state: cloning it gives a
//! second view of the same device. A test keeps one clone for inspection
//! while the [`System`](crate::system::System) holds `&mut` to the other.
//!
//! ```
//! use thermoguard_core::mock::MockPeripherals;
//! use thermoguard_core::config::SystemConfig;
//!
//! let mut peripherals = MockPeripherals::new(&SystemConfig::default());
//! let probe = peripherals.clone();
//!
//! peripherals.button.set_level(true);
//! assert!(probe.button.level());
//! ```
//!
//! [`MockEeprom`] memory outlives any one `System`, which is how the tests
//! simulate a power cycle: drop the system, build a new one over the same
//! EEPROM handle.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::SystemConfig;
use crate::constants::{ADC_MAX_RAW, ADC_SUPPLY_VOLTAGE};
use crate::system::Devices;
use crate::traits::{
    AnalogInput, Board, DigitalOutput, InterruptInput, NonVolatileStore, PeriodicTimer,
    SerialOutput, Watchdog,
};

// ===== DIGITAL OUTPUT =====

#[derive(Debug, Default)]
struct LedState {
    level: bool,
    writes: Vec<bool>,
}

/// LED double recording every level written
#[derive(Debug, Clone, Default)]
pub struct MockLed(Rc<RefCell<LedState>>);

impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    /// Every level written so far, oldest first
    pub fn writes(&self) -> Vec<bool> {
        self.0.borrow().writes.clone()
    }
}

impl DigitalOutput for MockLed {
    fn write(&mut self, high: bool) {
        let mut state = self.0.borrow_mut();
        state.level = high;
        state.writes.push(high);
    }

    fn read(&self) -> bool {
        self.level()
    }
}

// ===== INTERRUPT INPUT =====

#[derive(Debug)]
struct ButtonState {
    level: bool,
    interrupt_enabled: bool,
    port_enabled: bool,
    port_disables: usize,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            level: false,
            interrupt_enabled: false,
            // Port-level interrupts are unmasked out of reset
            port_enabled: true,
            port_disables: 0,
        }
    }
}

/// Button double with a settable electrical level
#[derive(Debug, Clone, Default)]
pub struct MockButton(Rc<RefCell<ButtonState>>);

impl MockButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive the simulated electrical level
    pub fn set_level(&self, level: bool) {
        self.0.borrow_mut().level = level;
    }

    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    pub fn interrupt_enabled(&self) -> bool {
        self.0.borrow().interrupt_enabled
    }

    pub fn port_interrupt_enabled(&self) -> bool {
        self.0.borrow().port_enabled
    }

    /// Whether an edge right now would reach the controller
    pub fn can_interrupt(&self) -> bool {
        let state = self.0.borrow();
        state.interrupt_enabled && state.port_enabled
    }

    /// How many times port interrupts were masked
    pub fn port_disables(&self) -> usize {
        self.0.borrow().port_disables
    }
}

impl InterruptInput for MockButton {
    fn read(&self) -> bool {
        self.level()
    }

    fn enable_interrupt(&mut self, enable: bool) {
        self.0.borrow_mut().interrupt_enabled = enable;
    }

    fn enable_interrupt_on_port(&mut self, enable: bool) {
        let mut state = self.0.borrow_mut();
        if !enable {
            state.port_disables += 1;
        }
        state.port_enabled = enable;
    }
}

// ===== PERIODIC TIMER =====

#[derive(Debug, Default)]
struct TimerState {
    period_ms: u32,
    running: bool,
    starts: usize,
    stops: usize,
    restarts: usize,
}

/// Timer double counting start/stop/restart calls
#[derive(Debug, Clone, Default)]
pub struct MockTimer(Rc<RefCell<TimerState>>);

impl MockTimer {
    pub fn new(period_ms: u32) -> Self {
        Self(Rc::new(RefCell::new(TimerState {
            period_ms,
            ..TimerState::default()
        })))
    }

    pub fn running(&self) -> bool {
        self.0.borrow().running
    }

    /// Period the board configured this timer with
    pub fn period_ms(&self) -> u32 {
        self.0.borrow().period_ms
    }

    pub fn starts(&self) -> usize {
        self.0.borrow().starts
    }

    pub fn stops(&self) -> usize {
        self.0.borrow().stops
    }

    pub fn restarts(&self) -> usize {
        self.0.borrow().restarts
    }
}

impl PeriodicTimer for MockTimer {
    fn start(&mut self) {
        let mut state = self.0.borrow_mut();
        state.running = true;
        state.starts += 1;
    }

    fn stop(&mut self) {
        let mut state = self.0.borrow_mut();
        state.running = false;
        state.stops += 1;
    }

    fn restart(&mut self) {
        let mut state = self.0.borrow_mut();
        state.running = true;
        state.restarts += 1;
    }
}

// ===== WATCHDOG =====

#[derive(Debug, Default)]
struct WatchdogState {
    enabled: bool,
    kicks: usize,
}

/// Watchdog double counting resets
#[derive(Debug, Clone, Default)]
pub struct MockWatchdog(Rc<RefCell<WatchdogState>>);

impl MockWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    pub fn kicks(&self) -> usize {
        self.0.borrow().kicks
    }
}

impl Watchdog for MockWatchdog {
    fn set_enabled(&mut self, enable: bool) {
        self.0.borrow_mut().enabled = enable;
    }

    fn reset(&mut self) {
        self.0.borrow_mut().kicks += 1;
    }
}

// ===== NON-VOLATILE STORE =====

#[derive(Debug)]
struct EepromState {
    cells: Vec<u8>,
    writes: usize,
}

/// EEPROM double whose contents survive a simulated restart
///
/// Reads outside the configured size return 0xFF (erased), writes outside
/// it are dropped.
#[derive(Debug, Clone)]
pub struct MockEeprom(Rc<RefCell<EepromState>>);

impl MockEeprom {
    /// Zero-filled memory of `size` bytes
    pub fn new(size: usize) -> Self {
        Self(Rc::new(RefCell::new(EepromState {
            cells: vec![0; size],
            writes: 0,
        })))
    }

    pub fn get(&self, address: u16) -> u8 {
        self.read(address)
    }

    /// Poke a cell directly, without counting it as a firmware write
    pub fn set(&self, address: u16, value: u8) {
        if let Some(cell) = self.0.borrow_mut().cells.get_mut(usize::from(address)) {
            *cell = value;
        }
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl NonVolatileStore for MockEeprom {
    fn read(&self, address: u16) -> u8 {
        self.0
            .borrow()
            .cells
            .get(usize::from(address))
            .copied()
            .unwrap_or(0xFF)
    }

    fn write(&mut self, address: u16, value: u8) {
        let mut state = self.0.borrow_mut();
        state.writes += 1;
        if let Some(cell) = state.cells.get_mut(usize::from(address)) {
            *cell = value;
        }
    }
}

// ===== ANALOG INPUT =====

#[derive(Debug, Default)]
struct AdcState {
    enabled: bool,
    raw: BTreeMap<u8, u16>,
    reads: usize,
}

/// 10-bit, 5 V converter double with per-pin raw readings
#[derive(Debug, Clone, Default)]
pub struct MockAdc(Rc<RefCell<AdcState>>);

impl MockAdc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw conversion result returned for `pin`
    pub fn set_raw(&self, pin: u8, raw: u16) {
        self.0.borrow_mut().raw.insert(pin, raw);
    }

    pub fn enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }
}

impl AnalogInput for MockAdc {
    fn set_enabled(&mut self, enable: bool) {
        self.0.borrow_mut().enabled = enable;
    }

    fn read_raw(&mut self, pin: u8) -> u16 {
        let mut state = self.0.borrow_mut();
        state.reads += 1;
        state.raw.get(&pin).copied().unwrap_or(0)
    }

    fn max_raw(&self) -> u16 {
        ADC_MAX_RAW
    }

    fn supply_voltage(&self) -> f64 {
        ADC_SUPPLY_VOLTAGE
    }
}

// ===== SERIAL OUTPUT =====

#[derive(Debug, Default)]
struct SerialState {
    enabled: bool,
    output: String,
}

/// Serial double capturing transmitted text
///
/// Text written while transmission is disabled is discarded, like bytes sent
/// to a UART whose transmitter is off.
#[derive(Debug, Clone, Default)]
pub struct MockSerial(Rc<RefCell<SerialState>>);

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    /// Everything transmitted so far
    pub fn output(&self) -> String {
        self.0.borrow().output.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().output.lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().output.clear();
    }
}

impl core::fmt::Write for MockSerial {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut state = self.0.borrow_mut();
        if state.enabled {
            state.output.push_str(s);
        }
        Ok(())
    }
}

impl SerialOutput for MockSerial {
    fn set_enabled(&mut self, enable: bool) {
        self.0.borrow_mut().enabled = enable;
    }
}

// ===== BOARD =====

/// Board made entirely of recording doubles
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBoard;

impl Board for MockBoard {
    type Led = MockLed;
    type Button = MockButton;
    type Timer = MockTimer;
    type Watchdog = MockWatchdog;
    type Store = MockEeprom;
    type Adc = MockAdc;
    type Serial = MockSerial;
}

/// One of every device a [`System`](crate::system::System) needs
///
/// Cloning yields a probe sharing state with the original.
#[derive(Debug, Clone)]
pub struct MockPeripherals {
    pub led: MockLed,
    pub button: MockButton,
    pub debounce_timer: MockTimer,
    pub toggle_timer: MockTimer,
    pub predict_timer: MockTimer,
    pub watchdog: MockWatchdog,
    pub eeprom: MockEeprom,
    pub adc: MockAdc,
    pub serial: MockSerial,
}

impl MockPeripherals {
    /// Fresh devices with timer periods taken from `config`
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_eeprom(config, MockEeprom::default())
    }

    /// Fresh devices over existing EEPROM contents (a power cycle)
    pub fn with_eeprom(config: &SystemConfig, eeprom: MockEeprom) -> Self {
        Self {
            led: MockLed::new(),
            button: MockButton::new(),
            debounce_timer: MockTimer::new(config.debounce_period_ms),
            toggle_timer: MockTimer::new(config.toggle_period_ms),
            predict_timer: MockTimer::new(config.predict_period_ms),
            watchdog: MockWatchdog::new(),
            eeprom,
            adc: MockAdc::new(),
            serial: MockSerial::new(),
        }
    }

    /// Borrow everything as the device set a `System` is built from
    pub fn devices(&mut self) -> Devices<'_, MockBoard> {
        Devices {
            led: &mut self.led,
            button: &mut self.button,
            debounce_timer: &mut self.debounce_timer,
            toggle_timer: &mut self.toggle_timer,
            predict_timer: &mut self.predict_timer,
            watchdog: &mut self.watchdog,
            eeprom: &mut self.eeprom,
            adc: &mut self.adc,
            serial: &mut self.serial,
        }
    }
}

/// Predictor double with fixed parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPredictor {
    pub weight: f64,
    pub bias: f64,
}

impl FixedPredictor {
    pub fn new(weight: f64, bias: f64) -> Self {
        Self { weight, bias }
    }
}

impl crate::traits::Predictor for FixedPredictor {
    fn predict(&self, input: f64) -> f64 {
        self.weight * input + self.bias
    }

    fn epochs_used(&self) -> u32 {
        0
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}
