//! Default calibration dataset
//!
//! Eleven points on the transfer function of a TMP36-style analog sensor:
//! 10 mV per °C with a 500 mV offset, i.e. `T = 100 * V - 50`. The inputs
//! are sensor voltages, the targets temperatures in °C.

/// Sensor voltages (V)
pub const TRAIN_INPUT: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Temperatures (°C) for [`TRAIN_INPUT`]
pub const TRAIN_TARGET: [f64; 11] = [
    -50.0, -40.0, -30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_follow_transfer_function() {
        for (v, t) in TRAIN_INPUT.iter().zip(TRAIN_TARGET.iter()) {
            assert!((100.0 * v - 50.0 - t).abs() < 1e-9);
        }
    }
}
