//! Prediction report
//!
//! Printed once at startup after training, so an operator watching the
//! serial console can check the fitted model against the calibration inputs
//! before the device starts taking readings.
//!
//! ```text
//! --------------------------------------------------------------------------------
//! Input: 0 mV, predicted output: -50
//! Input: 100 mV, predicted output: -40
//! ...
//! Epochs used: 57
//! --------------------------------------------------------------------------------
//! ```

use core::fmt::{self, Write};

use crate::numeric::round_half_away;
use crate::traits::Predictor;

const BANNER: &str =
    "--------------------------------------------------------------------------------";

/// Print one prediction per input (inputs are volts, shown in millivolts)
pub fn print_predictions<W, P>(out: &mut W, predictor: &P, inputs: &[f64]) -> fmt::Result
where
    W: Write + ?Sized,
    P: Predictor + ?Sized,
{
    if inputs.is_empty() {
        return writeln!(out, "No input data!");
    }

    writeln!(out, "{}", BANNER)?;
    for &input in inputs {
        let prediction = predictor.predict(input);
        writeln!(
            out,
            "Input: {} mV, predicted output: {}",
            round_half_away(input * 1000.0),
            round_half_away(prediction)
        )?;
    }
    writeln!(out, "Epochs used: {}", predictor.epochs_used())?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out)
}
