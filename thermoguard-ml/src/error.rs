//! Error types for training
//!
//! Training failures are detected synchronously and before any parameter is
//! touched, so a caller that gets an error still holds a usable (if
//! untrained) model. The one exception is [`TrainingError::NotConverged`],
//! which by definition is reported after the epochs have run.

use thiserror_no_std::Error;

/// Result type for training operations
pub type TrainingResult<T> = Result<T, TrainingError>;

/// Training could not be started or did not finish
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TrainingError {
    /// Learning rate is zero, negative, or not finite
    #[error("Invalid learning rate {rate}: must be positive and finite")]
    InvalidLearningRate {
        /// The rejected rate
        rate: f64,
    },

    /// Convergence tolerance is negative or NaN
    #[error("Invalid tolerance {tolerance}: must be non-negative")]
    InvalidTolerance {
        /// The rejected tolerance
        tolerance: f64,
    },

    /// Fixed-epoch training asked for zero epochs
    #[error("Epoch count must be at least 1")]
    InvalidEpochCount,

    /// Epoch bound reached before every sample was within tolerance
    #[error("Not converged after {epochs} epochs")]
    NotConverged {
        /// Epochs run by the failed call
        epochs: u32,
    },
}

/// Training set rejected at construction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetError {
    /// Input or target sequence is empty
    #[error("Training set is empty")]
    Empty,

    /// More samples than the model's fixed buffers hold
    #[error("Training set of {len} samples exceeds capacity {capacity}")]
    TooLarge {
        /// Usable sample count (shorter of the two sequences)
        len: usize,
        /// Compile-time buffer capacity
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for TrainingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidLearningRate { rate } => defmt::write!(fmt, "Invalid learning rate {}", rate),
            Self::InvalidTolerance { tolerance } => defmt::write!(fmt, "Invalid tolerance {}", tolerance),
            Self::InvalidEpochCount => defmt::write!(fmt, "Epoch count must be at least 1"),
            Self::NotConverged { epochs } => defmt::write!(fmt, "Not converged after {} epochs", epochs),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DatasetError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Empty => defmt::write!(fmt, "Training set is empty"),
            Self::TooLarge { len, capacity } => {
                defmt::write!(fmt, "Training set of {} samples exceeds capacity {}", len, capacity)
            }
        }
    }
}
