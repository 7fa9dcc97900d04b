//! System configuration
//!
//! Compile-time defaults come from [`constants`](crate::constants); a board
//! overrides what differs through the `with_*` builders:
//!
//! ```
//! use thermoguard_core::config::SystemConfig;
//!
//! let config = SystemConfig::default()
//!     .with_sensor_pin(2)
//!     .with_button_active_low(true)
//!     .with_debounce_period_ms(50);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! Timer periods are consumed by the board when it constructs its timers;
//! the control core only validates them.

use crate::constants::{
    DEBOUNCE_PERIOD_MS, DEFAULT_SENSOR_PIN, LED_STATE_ADDRESS, PREDICT_PERIOD_MS,
    TOGGLE_PERIOD_MS,
};
use crate::errors::{ConfigError, ConfigResult};

/// Wiring and timing parameters of one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemConfig {
    /// ADC channel the temperature sensor is wired to
    pub sensor_pin: u8,

    /// Button reads low when pressed (switch to ground with pull-up)
    pub button_active_low: bool,

    /// EEPROM address of the persisted LED flag
    pub led_state_address: u16,

    pub debounce_period_ms: u32,
    pub toggle_period_ms: u32,
    pub predict_period_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sensor_pin: DEFAULT_SENSOR_PIN,
            button_active_low: false,
            led_state_address: LED_STATE_ADDRESS,
            debounce_period_ms: DEBOUNCE_PERIOD_MS,
            toggle_period_ms: TOGGLE_PERIOD_MS,
            predict_period_ms: PREDICT_PERIOD_MS,
        }
    }
}

impl SystemConfig {
    pub fn with_sensor_pin(mut self, pin: u8) -> Self {
        self.sensor_pin = pin;
        self
    }

    pub fn with_button_active_low(mut self, active_low: bool) -> Self {
        self.button_active_low = active_low;
        self
    }

    pub fn with_led_state_address(mut self, address: u16) -> Self {
        self.led_state_address = address;
        self
    }

    pub fn with_debounce_period_ms(mut self, period: u32) -> Self {
        self.debounce_period_ms = period;
        self
    }

    pub fn with_toggle_period_ms(mut self, period: u32) -> Self {
        self.toggle_period_ms = period;
        self
    }

    pub fn with_predict_period_ms(mut self, period: u32) -> Self {
        self.predict_period_ms = period;
        self
    }

    /// Check that every timer period is non-zero
    pub fn validate(&self) -> ConfigResult<()> {
        let periods = [
            ("debounce", self.debounce_period_ms),
            ("toggle", self.toggle_period_ms),
            ("predict", self.predict_period_ms),
        ];

        match periods.iter().find(|(_, period)| *period == 0) {
            Some((timer, _)) => Err(ConfigError::ZeroPeriod { timer: *timer }),
            None => Ok(()),
        }
    }

    /// Whether a raw button level means "pressed" under this wiring
    pub fn is_pressed(&self, level: bool) -> bool {
        level != self.button_active_low
    }
}
