//! Presentation rounding
//!
//! Model arithmetic stays in `f64` end to end. Values are rounded only at the
//! point where they are printed on the serial stream, and always half away
//! from zero so that `-2.5` and `2.5` are symmetric.

/// Round half away from zero.
///
/// Non-negative values round via `floor(x + 0.5)`, negative values via
/// `ceil(x - 0.5)`. Results outside the `i32` range saturate and NaN maps to
/// zero, following the semantics of an `as` cast.
///
/// ```
/// use thermoguard_core::numeric::round_half_away;
///
/// assert_eq!(round_half_away(2.5), 3);
/// assert_eq!(round_half_away(-4.7), -5);
/// ```
pub fn round_half_away(value: f64) -> i32 {
    let rounded = if value >= 0.0 {
        libm::floor(value + 0.5)
    } else {
        libm::ceil(value - 0.5)
    };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_half_away(2.5), 3);
        assert_eq!(round_half_away(2.3), 2);
        assert_eq!(round_half_away(2.7), 3);
        assert_eq!(round_half_away(-4.7), -5);
        assert_eq!(round_half_away(-4.2), -4);
        assert_eq!(round_half_away(-2.5), -3);
        assert_eq!(round_half_away(0.0), 0);
        assert_eq!(round_half_away(-0.4), 0);
    }

    #[test]
    fn non_finite_values_saturate() {
        assert_eq!(round_half_away(f64::NAN), 0);
        assert_eq!(round_half_away(f64::INFINITY), i32::MAX);
        assert_eq!(round_half_away(f64::NEG_INFINITY), i32::MIN);
    }

    proptest! {
        #[test]
        fn symmetric_around_zero(x in -1.0e6f64..1.0e6) {
            prop_assert_eq!(round_half_away(-x), -round_half_away(x));
        }

        #[test]
        fn within_half_of_input(x in -1.0e6f64..1.0e6) {
            let r = f64::from(round_half_away(x));
            prop_assert!((r - x).abs() <= 0.5 + 1e-9);
        }
    }
}
