//! Property-based tests for currency rounding and arithmetic.
//!
//! - Lattice: refined values always land on multiples of 0.11
//! - Round trip: scrap -> currency -> scrap is lossless for normalized values
//! - Inverse: subtracting what was added restores the original value

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::Calculator;
use super::error::ErrorKind;
use super::units;
use super::value::Currency;

/// Strategy to generate refined amounts with up to 4 decimal places (-10,000 to 10,000).
fn any_refined() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate refined amounts already on the 0.11 lattice.
fn lattice_refined() -> impl Strategy<Value = Decimal> {
    (0i64..10_000, 0i64..9, any::<bool>()).prop_map(|(whole, steps, negative)| {
        let magnitude = Decimal::from(whole) + units::ELEVENTH * Decimal::from(steps);
        if negative { -magnitude } else { magnitude }
    })
}

/// Strategy to generate exchange rates (1.00 to 200.00 refined per key).
fn positive_exchange() -> impl Strategy<Value = Decimal> {
    (100i64..20_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate whole scrap totals, positive or negative.
fn scrap_total() -> impl Strategy<Value = Decimal> {
    (-5_000_000i64..5_000_000i64).prop_map(Decimal::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Lattice
    // =========================================================================

    /// *For any* amount, the snapped fraction SHALL be a whole number of
    /// elevenths between 0 and 8.
    #[test]
    fn prop_round_to_nearest_eleventh_lands_on_lattice(value in any_refined()) {
        let rounded = units::round_to_nearest_eleventh(value);
        let steps = rounded.abs().fract() / units::ELEVENTH;

        prop_assert_eq!(steps, steps.trunc(), "{} is not a multiple of 0.11", rounded);
        prop_assert!(steps < Decimal::from(9), "{} carries past 0.88", rounded);
    }

    /// *For any* amount, rounding SHALL be symmetric around zero.
    #[test]
    fn prop_round_to_nearest_eleventh_is_sign_symmetric(value in any_refined()) {
        prop_assert_eq!(
            units::round_to_nearest_eleventh(-value),
            -units::round_to_nearest_eleventh(value)
        );
    }

    /// *For any* lattice value, snapping again SHALL leave it unchanged.
    #[test]
    fn prop_lattice_values_are_fixed_points(refined in lattice_refined()) {
        prop_assert_eq!(units::round_to_nearest_eleventh(refined), refined);
    }

    /// *For any* lattice value, the scrap count SHALL be exact.
    #[test]
    fn prop_to_base_units_is_exact_on_lattice(refined in lattice_refined()) {
        let scrap = units::to_base_units(refined).unwrap();
        prop_assert_eq!(scrap, scrap.trunc());
        prop_assert_eq!(units::convert_units(scrap, units::SCRAP_PER_REFINED), refined);
    }

    // =========================================================================
    // Round trip
    // =========================================================================

    /// *For any* normalized currency and positive rate, lowering to scrap and
    /// lifting back SHALL return the same value.
    #[test]
    fn prop_scrap_round_trip(scrap in scrap_total(), exchange in positive_exchange()) {
        let currency = Currency::from_scrap(scrap, exchange).unwrap();
        let lowered = currency.to_scrap(exchange).unwrap();

        prop_assert_eq!(lowered, scrap);
        prop_assert_eq!(Currency::from_scrap(lowered, exchange).unwrap(), currency);
    }

    /// *For any* normalized currency, keys and refined SHALL never carry
    /// opposite signs.
    #[test]
    fn prop_factories_keep_signs_consistent(scrap in scrap_total(), exchange in positive_exchange()) {
        let currency = Currency::from_scrap(scrap, exchange).unwrap();
        let keys = Decimal::from(currency.keys());

        prop_assert!(
            keys.is_zero() || currency.refined().is_zero() || keys.is_sign_negative() == currency.refined().is_sign_negative(),
            "mixed signs in {}",
            currency
        );
    }

    // =========================================================================
    // Calculator
    // =========================================================================

    /// *For any* two normalized values, subtracting what was added SHALL
    /// restore the original.
    #[test]
    fn prop_add_then_subtract_is_identity(
        first in scrap_total(),
        second in scrap_total(),
        exchange in positive_exchange(),
    ) {
        let calc = Calculator::new(exchange).unwrap();
        let a = Currency::from_scrap(first, exchange).unwrap();
        let b = Currency::from_scrap(second, exchange).unwrap();

        let added = calc.add(&a, &b).unwrap();
        prop_assert_eq!(calc.subtract(&added, &b).unwrap(), a);
    }

    /// *For any* normalized value, multiplying by one SHALL return it unchanged.
    #[test]
    fn prop_multiply_by_one_is_identity(scrap in scrap_total(), exchange in positive_exchange()) {
        let calc = Calculator::new(exchange).unwrap();
        let currency = Currency::from_scrap(scrap, exchange).unwrap();

        prop_assert_eq!(calc.multiply(&currency, Decimal::ONE).unwrap(), currency);
    }

    /// *For any* value, a zero factor or divisor SHALL be a range error.
    #[test]
    fn prop_zero_scalar_is_range_error(scrap in scrap_total(), exchange in positive_exchange()) {
        let calc = Calculator::new(exchange).unwrap();
        let currency = Currency::from_scrap(scrap, exchange).unwrap();

        prop_assert_eq!(calc.multiply(&currency, Decimal::ZERO).unwrap_err().kind(), ErrorKind::Range);
        prop_assert_eq!(calc.divide(&currency, Decimal::ZERO).unwrap_err().kind(), ErrorKind::Range);
    }
}
