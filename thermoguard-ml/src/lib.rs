//! On-device model training for ThermoGuard
//!
//! ## Overview
//!
//! The node does not ship a fixed calibration. At startup it fits a
//! single-feature linear model `temperature = weight * voltage + bias` to a
//! small calibration set and hands the trained model to the control core
//! as its [`Predictor`](thermoguard_core::Predictor).
//!
//! ## Why Plain SGD?
//!
//! A closed-form least squares fit would be shorter, but shuffled SGD:
//!
//! 1. **Needs no matrix math**: two scalar updates per sample
//! 2. **Keeps constant memory**: two fixed buffers sized at compile time
//! 3. **Stays online**: new samples can be trained in without a refit
//!
//! ## Training Flow
//!
//! ```text
//! LinearRegressor::new(input, target, rng)    // random weight/bias in [0, 1)
//!     │
//!     ▼
//! train_to_convergence(rate)                  // epochs until every sample
//!     │                                       // is within 1e-6 of target
//!     ▼
//! System::new(devices, &model, config)        // model borrowed immutably
//! ```
//!
//! ## Example
//!
//! ```
//! use thermoguard_core::Predictor;
//! use thermoguard_ml::{Regressor, DEFAULT_LEARNING_RATE, TRAIN_INPUT, TRAIN_TARGET};
//!
//! let mut model = Regressor::from_seed(&TRAIN_INPUT, &TRAIN_TARGET, 1).unwrap();
//! let epochs = model.train_to_convergence(DEFAULT_LEARNING_RATE).unwrap();
//!
//! assert!(epochs > 0);
//! assert!(model.predict(0.75) > 24.99 && model.predict(0.75) < 25.01);
//! ```
//!
//! ## Memory Model
//!
//! ```text
//! LinearRegressor<_, _, 64>:
//!   last_predictions  64 × 8 bytes = 512 B
//!   order             64 × 8 bytes = 512 B   (usize on 64-bit hosts)
//!   weight, bias, rng, slices        ~64 B
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dataset;
pub mod error;
pub mod linreg;

pub use config::{TrainingConfig, DEFAULT_LEARNING_RATE, DEFAULT_TOLERANCE};
pub use dataset::{TRAIN_INPUT, TRAIN_TARGET};
pub use error::{DatasetError, TrainingError, TrainingResult};
pub use linreg::{LinearRegressor, Regressor, DEFAULT_CAPACITY};
