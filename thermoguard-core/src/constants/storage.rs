//! Non-Volatile Storage Layout
//!
//! Exactly one byte is persisted: whether the LED blink was enabled when the
//! device last changed it. Any non-zero value reads back as enabled, so a
//! factory-fresh EEPROM (cells erased to 0xFF) starts blinking on first boot.
//! The firmware itself only ever writes the two values below.

/// EEPROM address of the LED-enabled flag.
pub const LED_STATE_ADDRESS: u16 = 0;

/// Value written when blink is enabled.
pub const LED_STATE_ENABLED: u8 = 1;

/// Value written when blink is disabled.
pub const LED_STATE_DISABLED: u8 = 0;
