//! Control core for ThermoGuard
//!
//! Runs a single-board temperature node: a debounced button toggles a
//! blinking LED whose state survives power cycles, a timer periodically
//! turns an ADC reading into a temperature through a trained model, and a
//! hardware watchdog restarts the device if the firmware ever stalls.
//!
//! Key constraints:
//! - No heap allocation, no `unsafe`
//! - Every peripheral reached through a capability trait, so the same logic
//!   runs on the target and against recording doubles on the host
//! - Interrupt handlers run to completion; button re-entry is excluded by
//!   masking the port while debouncing, not by a lock
//!
//! ```no_run
//! # #[cfg(feature = "mock")]
//! # fn main() {
//! use thermoguard_core::{Controller, Event, System, SystemConfig};
//! use thermoguard_core::mock::{FixedPredictor, MockPeripherals};
//!
//! // Recording doubles (feature `mock`); a real board passes its own devices
//! let config = SystemConfig::default();
//! let mut peripherals = MockPeripherals::new(&config);
//! let model = FixedPredictor::new(100.0, -50.0);
//!
//! let system = System::new(peripherals.devices(), &model, config).unwrap();
//! let controller = Controller::new(system);
//!
//! // Wired to the button's edge interrupt by the board
//! let on_edge = controller.callback(Event::ButtonEdge);
//! on_edge();
//!
//! controller.run();
//! # }
//! # #[cfg(not(feature = "mock"))]
//! # fn main() {}
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod numeric;
pub mod report;
pub mod system;
pub mod traits;

#[cfg(feature = "embedded-hal")]
pub mod hal;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Public API
pub use config::SystemConfig;
pub use controller::Controller;
pub use errors::{ConfigError, ConfigResult};
pub use numeric::round_half_away;
pub use system::{DebounceState, Devices, Event, System};
pub use traits::{Board, Predictor};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
