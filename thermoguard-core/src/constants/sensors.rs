//! Sensor and ADC Constants
//!
//! Defaults match a 10-bit successive-approximation ADC referenced to a 5 V
//! supply, the common case on 8-bit AVR boards.

/// Full-scale raw reading of a 10-bit converter.
pub const ADC_MAX_RAW: u16 = 1023;

/// ADC reference voltage (volts).
pub const ADC_SUPPLY_VOLTAGE: f64 = 5.0;

/// Analog channel the temperature sensor is wired to.
pub const DEFAULT_SENSOR_PIN: u8 = 0;
