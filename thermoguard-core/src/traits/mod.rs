//! Core Traits and Abstractions for ThermoGuard
//!
//! ## Module Organization
//!
//! - [`hal`] - Device capability interfaces (GPIO, timers, watchdog, EEPROM,
//!   ADC, serial) and the [`Board`] bundle
//! - [`predictor`] - Model capability consumed by the control core
//!
//! ## Design Philosophy
//!
//! Every collaborator of the control state machine is a trait, so the same
//! logic runs on the target and against recording doubles on the host.
//! Dispatch is static: a board names its concrete peripheral types once
//! through [`Board`] and the compiler monomorphizes the rest.

pub mod hal;
pub mod predictor;

pub use hal::{
    AnalogInput, Board, DigitalOutput, InterruptInput, NonVolatileStore, PeriodicTimer,
    SerialOutput, Watchdog,
};
pub use predictor::Predictor;
