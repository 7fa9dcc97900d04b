//! Training configuration

/// Learning rate used for the default calibration dataset
pub const DEFAULT_LEARNING_RATE: f64 = 0.225;

/// Convergence tolerance: largest accepted `|prediction - target|` per sample
///
/// Absolute, in target units. 1e-6 is far below what a 10-bit ADC can
/// resolve, so a converged model is exact for display purposes.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// How a training run stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// SGD step size, must be positive
    pub learning_rate: f64,
    /// Per-sample convergence tolerance
    pub tolerance: f64,
    /// Give up after this many epochs; `None` trains until converged
    pub max_epochs: Option<u32>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            tolerance: DEFAULT_TOLERANCE,
            max_epochs: None,
        }
    }
}

impl TrainingConfig {
    /// Unbounded run to the default tolerance at `learning_rate`
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Bound the run; training that has not converged by then fails
    pub fn with_max_epochs(mut self, max_epochs: u32) -> Self {
        self.max_epochs = Some(max_epochs);
        self
    }
}
