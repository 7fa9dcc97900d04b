//! Online linear regression
//!
//! Fits `y = weight * x + bias` to a small borrowed training set with
//! stochastic gradient descent, then serves point predictions.
//!
//! ## Epoch
//!
//! ```text
//! shuffle sample indices (fresh uniform permutation)
//! for i in shuffled order:
//!     e      = target[i] - predict(input[i])
//!     bias   += e * rate
//!     weight += e * rate * input[i]
//!     last[i] = predict(input[i])        // with the updated parameters
//! epochs_used += 1
//! converged  = all |last[i] - target[i]| <= tolerance
//! ```
//!
//! Updates are applied sample by sample, so later samples in an epoch see
//! the parameters moved by earlier ones. This is plain SGD, not batch
//! gradient descent.
//!
//! ## Termination
//!
//! [`LinearRegressor::train_to_convergence`] has no epoch bound: data that
//! cannot be fitted to the tolerance (noisy, non-linear, or a rate large
//! enough to diverge) keeps it running forever. Use
//! [`LinearRegressor::train`] with [`TrainingConfig::with_max_epochs`] when
//! startup time must be bounded.
//!
//! ## Memory
//!
//! Per-sample state lives in two `heapless::Vec`s of capacity `N`, so the
//! model never allocates. The training data itself is borrowed.

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use thermoguard_core::Predictor;

use crate::config::TrainingConfig;
use crate::error::{DatasetError, TrainingError, TrainingResult};

/// Default per-model sample capacity
pub const DEFAULT_CAPACITY: usize = 64;

/// Regressor with the default RNG and capacity
pub type Regressor<'a> = LinearRegressor<'a, SmallRng, DEFAULT_CAPACITY>;

/// Single-feature linear model trained by shuffled SGD
pub struct LinearRegressor<'a, R = SmallRng, const N: usize = DEFAULT_CAPACITY> {
    input: &'a [f64],
    target: &'a [f64],
    weight: f64,
    bias: f64,
    epochs_used: u32,
    /// Prediction for each sample after its most recent update
    last_predictions: Vec<f64, N>,
    /// Visiting order of the current epoch
    order: Vec<usize, N>,
    rng: R,
}

impl<'a> LinearRegressor<'a, SmallRng, DEFAULT_CAPACITY> {
    /// Build with a seeded `SmallRng`
    ///
    /// ```
    /// use thermoguard_ml::{Regressor, TRAIN_INPUT, TRAIN_TARGET};
    ///
    /// let model = Regressor::from_seed(&TRAIN_INPUT, &TRAIN_TARGET, 7).unwrap();
    /// assert_eq!(model.sample_count(), 11);
    /// ```
    pub fn from_seed(input: &'a [f64], target: &'a [f64], seed: u64) -> Result<Self, DatasetError> {
        Self::new(input, target, SmallRng::seed_from_u64(seed))
    }
}

impl<'a, R: RngCore, const N: usize> LinearRegressor<'a, R, N> {
    /// Bind a model to its training set
    ///
    /// Uses the first `min(input.len(), target.len())` samples; trailing
    /// elements of the longer sequence are ignored. Weight and bias start
    /// uniformly random in `[0, 1)`.
    pub fn new(input: &'a [f64], target: &'a [f64], mut rng: R) -> Result<Self, DatasetError> {
        let len = input.len().min(target.len());
        if len == 0 {
            return Err(DatasetError::Empty);
        }
        if len > N {
            return Err(DatasetError::TooLarge { len, capacity: N });
        }

        let too_large = DatasetError::TooLarge { len, capacity: N };
        let mut last_predictions = Vec::new();
        last_predictions.resize(len, 0.0).map_err(|_| too_large)?;
        let mut order = Vec::new();
        for i in 0..len {
            order.push(i).map_err(|_| too_large)?;
        }

        let bias: f64 = rng.gen();
        let weight: f64 = rng.gen();
        info!("initial weight {}, bias {}", weight, bias);

        Ok(Self {
            input: &input[..len],
            target: &target[..len],
            weight,
            bias,
            epochs_used: 0,
            last_predictions,
            order,
            rng,
        })
    }

    /// Train until every sample is within the default tolerance
    ///
    /// Blocks until converged, with no upper bound. Returns the number of
    /// epochs this call ran. Fails without touching any state when
    /// `learning_rate` is not positive.
    pub fn train_to_convergence(&mut self, learning_rate: f64) -> TrainingResult<u32> {
        self.train(&TrainingConfig::new(learning_rate))
    }

    /// Train until converged or until `config.max_epochs` is reached
    pub fn train(&mut self, config: &TrainingConfig) -> TrainingResult<u32> {
        check_learning_rate(config.learning_rate)?;
        if config.tolerance.is_nan() || config.tolerance < 0.0 {
            return Err(TrainingError::InvalidTolerance {
                tolerance: config.tolerance,
            });
        }

        info!(
            "training {} samples at rate {}, tolerance {}",
            self.sample_count(),
            config.learning_rate,
            config.tolerance
        );

        let mut epochs = 0u32;
        loop {
            if config.max_epochs.is_some_and(|max| epochs >= max) {
                warn!("no convergence after {} epochs", epochs);
                return Err(TrainingError::NotConverged { epochs });
            }

            self.run_epoch(config.learning_rate);
            epochs += 1;

            if self.is_converged(config.tolerance) {
                info!(
                    "converged after {} epochs: weight {}, bias {}",
                    epochs,
                    self.weight,
                    self.bias
                );
                return Ok(epochs);
            }
        }
    }

    /// Run exactly `epoch_count` epochs, converged or not
    pub fn train_epochs(&mut self, epoch_count: u32, learning_rate: f64) -> TrainingResult<()> {
        if epoch_count == 0 {
            return Err(TrainingError::InvalidEpochCount);
        }
        check_learning_rate(learning_rate)?;

        for _ in 0..epoch_count {
            self.run_epoch(learning_rate);
        }
        debug!("ran {} epochs: weight {}, bias {}", epoch_count, self.weight, self.bias);
        Ok(())
    }

    /// Whether every sample's latest prediction is within `tolerance`
    ///
    /// Always `false` before the first epoch: `last_predictions` only means
    /// something once each sample has been visited.
    pub fn is_converged(&self, tolerance: f64) -> bool {
        self.epochs_used > 0
            && self
                .last_predictions
                .iter()
                .zip(self.target)
                .all(|(prediction, target)| libm::fabs(prediction - target) <= tolerance)
    }

    pub fn sample_count(&self) -> usize {
        self.order.len()
    }

    pub fn last_predictions(&self) -> &[f64] {
        &self.last_predictions
    }

    /// Visiting order used by the most recent epoch
    pub fn shuffle_order(&self) -> &[usize] {
        &self.order
    }

    pub fn input(&self) -> &'a [f64] {
        self.input
    }

    pub fn target(&self) -> &'a [f64] {
        self.target
    }

    fn run_epoch(&mut self, learning_rate: f64) {
        self.order.shuffle(&mut self.rng);

        for &i in self.order.iter() {
            let x = self.input[i];
            let error = self.target[i] - evaluate(self.weight, self.bias, x);
            self.bias += error * learning_rate;
            self.weight += error * learning_rate * x;
            self.last_predictions[i] = evaluate(self.weight, self.bias, x);
        }

        self.epochs_used = self.epochs_used.saturating_add(1);
        trace!("epoch {}: weight {}, bias {}", self.epochs_used, self.weight, self.bias);
    }
}

impl<'a, R, const N: usize> Predictor for LinearRegressor<'a, R, N> {
    fn predict(&self, input: f64) -> f64 {
        evaluate(self.weight, self.bias, input)
    }

    fn epochs_used(&self) -> u32 {
        self.epochs_used
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

#[inline]
fn evaluate(weight: f64, bias: f64, x: f64) -> f64 {
    weight * x + bias
}

fn check_learning_rate(rate: f64) -> TrainingResult<()> {
    if !rate.is_finite() || rate <= 0.0 {
        warn!("rejected learning rate {}", rate);
        return Err(TrainingError::InvalidLearningRate { rate });
    }
    Ok(())
}
