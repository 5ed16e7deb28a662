//! Rounding and unit conversion primitives.
//!
//! Refined metal only exists in ninths, written as multiples of 0.11 with a
//! carry at 0.99. Everything here snaps values back onto that lattice so that
//! repeated 0.11 steps never drift. All rounding is sign-symmetric: it works on
//! the magnitude and reapplies the sign of the input.

use keymetal_shared::Denomination;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::error::CurrencyError;

/// One ninth of a refined metal, as it is written.
pub const ELEVENTH: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

/// Scrap metal per refined metal.
pub const SCRAP_PER_REFINED: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Scrap metal per reclaimed metal.
pub const SCRAP_PER_RECLAIMED: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Decimal places used when reporting key totals.
pub const KEY_PRECISION: u32 = 2;

/// Decimal places kept for fractional keys during conversion.
pub const FRACTIONAL_KEY_PRECISION: u32 = 4;

const NINE: Decimal = Decimal::from_parts(9, 0, 0, false, 0);
const TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

fn with_sign_of(value: Decimal, magnitude: Decimal) -> Decimal {
    if value.is_sign_negative() {
        (-magnitude).normalize()
    } else {
        magnitude.normalize()
    }
}

/// Rounds to `precision` decimal places, half away from zero.
#[must_use]
pub fn round_float(value: Decimal, precision: u32) -> Decimal {
    value
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Snaps a refined amount to the nearest multiple of 0.11.
///
/// Nine elevenths carry into the next whole refined, so the fractional part
/// of the result is always one of 0, 0.11, ..., 0.88.
#[must_use]
pub fn round_to_nearest_eleventh(value: Decimal) -> Decimal {
    let magnitude = value.abs();
    let whole = magnitude.trunc();
    let steps = ((magnitude - whole) / ELEVENTH)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let snapped = if steps == NINE {
        whole + Decimal::ONE
    } else {
        whole + ELEVENTH * steps
    };

    with_sign_of(value, snapped)
}

/// Converts an amount of some fine unit into refined metal.
///
/// `units_per_refined` is 9 for scrap, 3 for reclaimed and 1 for refined.
/// The quotient is rounded to two places before snapping so that values such
/// as 8.888... land on 8.88 rather than being rounded twice.
#[must_use]
pub fn convert_units(amount: Decimal, units_per_refined: Decimal) -> Decimal {
    round_to_nearest_eleventh(round_float(amount / units_per_refined, 2))
}

/// Rounds to the nearest half and drops any remaining fraction.
#[must_use]
pub fn round_to_half_step(value: Decimal) -> Decimal {
    let magnitude = value.abs();
    let halves = (magnitude.fract() * TWO).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    with_sign_of(value, magnitude.trunc() + (halves / TWO).trunc())
}

/// Converts refined metal into a whole number of scrap.
///
/// Nine times a lattice value is always within 0.08 of an integer, so this
/// recovers the exact scrap count.
///
/// # Errors
///
/// Returns an overflow error if the scrap count does not fit in a `Decimal`.
pub fn to_base_units(refined: Decimal) -> Result<Decimal, CurrencyError> {
    let scrap = refined
        .checked_mul(SCRAP_PER_REFINED)
        .ok_or_else(|| CurrencyError::overflow("to_base_units"))?;

    Ok(round_to_half_step(round_float(scrap, 2)))
}

/// Floor for non-negative values, ceiling for negative ones.
#[must_use]
pub fn round_by_sign(value: Decimal) -> Decimal {
    value.trunc().normalize()
}

/// Whole keys contained in `amount`, given the price of one key in the same
/// unit. A zero price yields zero keys.
pub fn exchange_to_keys(amount: Decimal, exchange_in_unit: Decimal) -> Result<Decimal, CurrencyError> {
    if exchange_in_unit.is_zero() {
        return Ok(Decimal::ZERO);
    }

    amount
        .checked_div(exchange_in_unit)
        .map(round_by_sign)
        .ok_or_else(|| CurrencyError::overflow("exchange_to_keys"))
}

/// Returns true when a fractional key remainder cannot be priced because the
/// exchange rate is not strictly positive.
#[must_use]
pub fn requires_exchange(remainder: Decimal, exchange: Decimal) -> bool {
    !remainder.is_zero() && exchange <= Decimal::ZERO
}

/// The price of one key expressed in `unit`.
///
/// Scrap prices are whole, reclaimed prices carry two decimals, refined
/// prices sit on the 0.11 lattice. A key is always worth one key.
pub fn key_price(exchange: Decimal, unit: Denomination) -> Result<Decimal, CurrencyError> {
    match unit {
        Denomination::Scrap => to_base_units(exchange),
        Denomination::Reclaimed => Ok(round_float(to_base_units(exchange)? / SCRAP_PER_RECLAIMED, 2)),
        Denomination::Refined => Ok(round_to_nearest_eleventh(exchange)),
        Denomination::Keys => Ok(Decimal::ONE),
    }
}
