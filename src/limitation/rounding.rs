use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `digits` decimal places, midpoints away from zero.
///
/// The rounding runs on the shortest decimal rendering of `value`, so a
/// literal like `1.005` rounds to `1.01` even though the nearest `f64`
/// lies slightly below it.
pub fn round_half_away(value: f64, digits: u32) -> f64 {
    if !value.is_finite() || value.fract() == 0.0 {
        return value;
    }
    match Decimal::from_str(&value.to_string()) {
        Ok(decimal) => decimal
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse::<f64>()
            .unwrap_or(value),
        Err(_) => scaled_round(value, digits),
    }
}

// Fraction too long for Decimal; `f64::round` is half away from zero too.
fn scaled_round(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_move_away_from_zero() {
        assert_eq!(round_half_away(2.5, 0), 3.0);
        assert_eq!(round_half_away(-2.5, 0), -3.0);
        assert_eq!(round_half_away(2.345, 2), 2.35);
        assert_eq!(round_half_away(-2.345, 2), -2.35);
    }

    #[test]
    fn short_values_are_untouched() {
        assert_eq!(round_half_away(1.5, 3), 1.5);
        assert_eq!(round_half_away(42.0, 2), 42.0);
    }

    #[test]
    fn integral_and_huge_values_pass_through() {
        let huge = 1.0e300;
        assert_eq!(round_half_away(huge, 2), huge);
        assert_eq!(round_half_away(-7.0, 4), -7.0);
        assert_eq!(scaled_round(12.345, 1), 12.3);
    }
}
