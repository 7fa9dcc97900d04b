//! Error Types for the Control Core
//!
//! The control path itself cannot fail: every capability call is infallible
//! by contract and the only fault-recovery mechanism is the hardware watchdog.
//! What can be rejected up front is a configuration that would make the
//! state machine misbehave, for example a zero debounce period that would
//! re-arm the button on the very next tick.
//!
//! Errors are `Copy` and carry only `&'static str` so they can be returned
//! from interrupt context without allocation.

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Rejected system configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A timer was configured with a zero period
    #[error("Timer '{timer}' has a zero period")]
    ZeroPeriod {
        /// Which timer ("debounce", "toggle" or "predict")
        timer: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroPeriod { timer } => defmt::write!(fmt, "Timer '{}' has a zero period", timer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_message_names_timer() {
        let err = ConfigError::ZeroPeriod { timer: "debounce" };
        assert_eq!(err.to_string(), "Timer 'debounce' has a zero period");
    }
}
