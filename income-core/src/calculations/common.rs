//! Common utility functions for income calculations.
//!
//! Shared arithmetic used by the calculation engine and by anything that
//! renders its figures: percentage application, NaN-style guards and
//! financial rounding.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use income_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(10.705)), dec!(10.71));
/// assert_eq!(round_half_up(dec!(-3.205)), dec!(-3.21)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage expressed on a 0–100 scale.
///
/// Returns `None` when the product does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use income_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(50), dec!(21.4)), Some(dec!(10.70)));
/// ```
pub fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Option<Decimal> {
    amount
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Expresses `part` as a percentage of `whole`, or zero when `whole` is not positive.
///
/// Returns `None` when the percentage does not fit in a [`Decimal`].
pub fn share_of(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    if whole > Decimal::ZERO {
        part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        Some(Decimal::ZERO)
    }
}

/// Adds up `values`, or `None` as soon as the running total overflows.
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}

/// Treats a missing input as zero.
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(26.804));

        assert_eq!(result, dec!(26.80));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(26.805));

        assert_eq!(result, dec!(26.81));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-3.205));

        assert_eq!(result, dec!(-3.21));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0.00));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_applies_fractional_rate() {
        let result = percent_of(dec!(50), dec!(21.4));

        assert_eq!(result, Some(dec!(10.7)));
    }

    #[test]
    fn percent_of_full_share_is_identity() {
        let result = percent_of(dec!(1234.56), dec!(100));

        assert_eq!(result, Some(dec!(1234.56)));
    }

    #[test]
    fn percent_of_zero_rate_is_zero() {
        let result = percent_of(dec!(1234.56), dec!(0));

        assert_eq!(result, Some(Decimal::ZERO));
    }

    // =========================================================================
    // share_of tests
    // =========================================================================

    #[test]
    fn share_of_computes_percentage() {
        let result = share_of(dec!(26.8), dec!(100));

        assert_eq!(result, Some(dec!(26.8)));
    }

    #[test]
    fn share_of_zero_whole_is_zero() {
        let result = share_of(dec!(-30), dec!(0));

        assert_eq!(result, Some(Decimal::ZERO));
    }

    #[test]
    fn share_of_negative_part_stays_negative() {
        let result = share_of(dec!(-3.2), dec!(100));

        assert_eq!(result, Some(dec!(-3.2)));
    }

    #[test]
    fn share_of_out_of_range_is_none() {
        let result = share_of(dec!(-1000000000000000000000000000), dec!(1));

        assert_eq!(result, None);
    }

    #[test]
    fn percent_of_out_of_range_is_none() {
        let result = percent_of(Decimal::MAX, dec!(50));

        assert_eq!(result, None);
    }

    // =========================================================================
    // checked_sum tests
    // =========================================================================

    #[test]
    fn checked_sum_adds_values() {
        let result = checked_sum([dec!(45), dec!(60.50), dec!(-5)]);

        assert_eq!(result, Some(dec!(100.50)));
    }

    #[test]
    fn checked_sum_of_nothing_is_zero() {
        assert_eq!(checked_sum([]), Some(Decimal::ZERO));
    }

    #[test]
    fn checked_sum_overflow_is_none() {
        let result = checked_sum([Decimal::MAX, dec!(1)]);

        assert_eq!(result, None);
    }

    #[test]
    fn or_zero_maps_none() {
        assert_eq!(or_zero(None), Decimal::ZERO);
        assert_eq!(or_zero(Some(dec!(4.5))), dec!(4.5));
    }
}
