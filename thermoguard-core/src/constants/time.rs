//! Time-Related Constants
//!
//! Periods of the three hardware timers the control core drives, plus the
//! unit conversions the predict period is derived from.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u32 = MS_PER_SECOND * SECONDS_PER_MINUTE;

// ===== TIMER PERIODS =====

/// Button settling interval (milliseconds).
///
/// Port interrupts stay masked for this long after an accepted edge. Cheap
/// tactile switches bounce for 5-20 ms; 300 ms also swallows an impatient
/// double press.
pub const DEBOUNCE_PERIOD_MS: u32 = 300;

/// LED blink half-period (milliseconds).
///
/// Each expiry inverts the LED, giving a 5 Hz blink while enabled.
pub const TOGGLE_PERIOD_MS: u32 = 100;

/// Interval between scheduled temperature predictions (milliseconds).
///
/// A manual reading via the button restarts this interval.
pub const PREDICT_PERIOD_MS: u32 = MS_PER_MINUTE;
