//! Constants for ThermoGuard Core
//!
//! Centralized compile-time defaults. The firmware has no runtime
//! configuration surface, so these values are what a board gets unless it
//! overrides them through [`SystemConfig`](crate::config::SystemConfig).
//!
//! ## Organization
//!
//! - **Time**: Timer periods for debounce, LED blink and periodic prediction
//! - **Storage**: Layout of the persisted state in non-volatile memory
//! - **Sensors**: ADC scaling and the default sensor channel

/// Timer periods and time unit conversions.
pub mod time;

/// Non-volatile memory layout.
pub mod storage;

/// ADC characteristics and sensor wiring defaults.
pub mod sensors;

// Re-export commonly used constants for convenience
pub use time::{DEBOUNCE_PERIOD_MS, PREDICT_PERIOD_MS, TOGGLE_PERIOD_MS};
pub use storage::{LED_STATE_ADDRESS, LED_STATE_DISABLED, LED_STATE_ENABLED};
pub use sensors::{ADC_MAX_RAW, ADC_SUPPLY_VOLTAGE, DEFAULT_SENSOR_PIN};
