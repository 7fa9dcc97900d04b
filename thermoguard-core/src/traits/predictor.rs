//! Predictor capability
//!
//! The control core only needs to ask a trained model for a point estimate.
//! It does not care how the model was trained, so the regressor is reached
//! through this trait and the core stays free of any ML dependency.

/// Single-feature predictive model.
///
/// Implementations must keep `predict` pure: repeated calls with the same
/// input and unchanged parameters return the same value and mutate nothing.
pub trait Predictor {
    /// Point estimate for `input`.
    fn predict(&self, input: f64) -> f64;

    /// Number of completed training epochs (0 before training starts).
    fn epochs_used(&self) -> u32;

    /// Current slope parameter.
    fn weight(&self) -> f64;

    /// Current intercept parameter.
    fn bias(&self) -> f64;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, input: f64) -> f64 {
        (**self).predict(input)
    }

    fn epochs_used(&self) -> u32 {
        (**self).epochs_used()
    }

    fn weight(&self) -> f64 {
        (**self).weight()
    }

    fn bias(&self) -> f64 {
        (**self).bias()
    }
}
