//! The currency value type.
//!
//! A [`Currency`] pairs a whole number of keys with an amount of refined
//! metal. The `from_*` factories derive both fields from one signed total, so
//! values built that way never mix signs and carry as much of the metal into
//! keys as the exchange rate allows.
//!
//! Conversions that have to price keys in metal (or metal in keys) take the
//! exchange rate as an argument and fail with
//! [`CurrencyError::MissingExchangeRate`] when it is zero.

use std::fmt;

use keymetal_shared::Denomination;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{ensure_exchange, CurrencyError, RangeViolation};
use super::format::{join_with_space, pluralize};
use super::units;

/// An amount of in-game currency: whole keys plus refined metal.
///
/// `refined` is always a multiple of 0.11. It is not bounded by the exchange
/// rate; values built with [`Currency::new`] keep whatever split they were
/// given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CurrencyJson", into = "CurrencyJson")]
pub struct Currency {
    keys: i64,
    refined: Decimal,
}

/// Plain snapshot of a [`Currency`] as it appears in JSON.
///
/// Missing fields default to zero when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyJson {
    /// Whole keys.
    #[serde(default)]
    pub keys: i64,
    /// Refined metal, written as a JSON number.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub refined: Decimal,
}

impl From<CurrencyJson> for Currency {
    fn from(json: CurrencyJson) -> Self {
        Self::new(json.keys, json.refined)
    }
}

impl From<Currency> for CurrencyJson {
    fn from(currency: Currency) -> Self {
        Self {
            keys: currency.keys,
            refined: currency.refined,
        }
    }
}

fn key_count(keys: Decimal) -> Result<i64, CurrencyError> {
    keys.to_i64()
        .ok_or_else(|| RangeViolation::KeyOverflow(keys).into())
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, CurrencyError> {
    total
        .checked_add(amount)
        .ok_or_else(|| CurrencyError::overflow("add"))
}

impl Currency {
    /// Creates a new currency value. `refined` is snapped to the 0.11 lattice.
    #[must_use]
    pub fn new(keys: i64, refined: Decimal) -> Self {
        Self {
            keys,
            refined: units::round_to_nearest_eleventh(refined),
        }
    }

    /// Zero keys and zero refined.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            keys: 0,
            refined: Decimal::ZERO,
        }
    }

    /// Whole keys.
    #[must_use]
    pub const fn keys(&self) -> i64 {
        self.keys
    }

    /// Refined metal on top of the keys.
    #[must_use]
    pub const fn refined(&self) -> Decimal {
        self.refined
    }

    /// Returns true if both keys and refined are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.keys == 0 && self.refined.is_zero()
    }

    // ------------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------------

    /// Builds a currency value from a total amount of scrap metal.
    pub fn from_scrap(scrap: Decimal, exchange: Decimal) -> Result<Self, CurrencyError> {
        Self::from_amount(scrap, Denomination::Scrap, exchange)
    }

    /// Builds a currency value from a total amount of reclaimed metal.
    pub fn from_reclaimed(reclaimed: Decimal, exchange: Decimal) -> Result<Self, CurrencyError> {
        Self::from_amount(reclaimed, Denomination::Reclaimed, exchange)
    }

    /// Builds a currency value from a total amount of refined metal.
    pub fn from_refined(refined: Decimal, exchange: Decimal) -> Result<Self, CurrencyError> {
        Self::from_amount(refined, Denomination::Refined, exchange)
    }

    /// Builds a currency value from a possibly fractional number of keys.
    ///
    /// The whole part becomes `keys`; the fraction (kept to four places) is
    /// priced into refined, which needs a positive exchange rate.
    pub fn from_keys(value: Decimal, exchange: Decimal) -> Result<Self, CurrencyError> {
        ensure_exchange(exchange)?;

        let keys = units::round_by_sign(value);
        let remainder = units::round_float(value - keys, units::FRACTIONAL_KEY_PRECISION);

        if units::requires_exchange(remainder, exchange) {
            return Err(CurrencyError::missing_exchange("from_keys"));
        }

        let scrap = units::round_float(remainder * units::key_price(exchange, Denomination::Scrap)?, 0);
        let refined = units::convert_units(scrap, units::SCRAP_PER_REFINED);

        Ok(Self::new(key_count(keys)?, refined))
    }

    /// Builds a currency value from a total in any denomination.
    pub fn from_amount(
        amount: Decimal,
        unit: Denomination,
        exchange: Decimal,
    ) -> Result<Self, CurrencyError> {
        let Some(per_refined) = unit.units_per_refined() else {
            return Self::from_keys(amount, exchange);
        };

        ensure_exchange(exchange)?;

        let exchange_in_unit = units::key_price(exchange, unit)?;
        let keys = units::exchange_to_keys(amount, exchange_in_unit)?;
        let metal = keys
            .checked_mul(exchange_in_unit)
            .and_then(|priced| amount.checked_sub(priced))
            .ok_or_else(|| CurrencyError::overflow("from_amount"))?;
        let refined = units::convert_units(metal, per_refined);

        Ok(Self::new(key_count(keys)?, refined))
    }

    // ------------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------------

    /// Total value in scrap metal. Always a whole number.
    pub fn to_scrap(&self, exchange: Decimal) -> Result<Decimal, CurrencyError> {
        self.scrap_total(exchange, "to_scrap")
    }

    /// Total value in reclaimed metal, to two decimal places.
    pub fn to_reclaimed(&self, exchange: Decimal) -> Result<Decimal, CurrencyError> {
        let scrap = self.scrap_total(exchange, "to_reclaimed")?;
        Ok(units::round_float(scrap / units::SCRAP_PER_RECLAIMED, 2))
    }

    /// Total value in refined metal, on the 0.11 lattice.
    pub fn to_refined(&self, exchange: Decimal) -> Result<Decimal, CurrencyError> {
        let scrap = self.scrap_total(exchange, "to_refined")?;
        Ok(units::convert_units(scrap, units::SCRAP_PER_REFINED))
    }

    /// Total value in keys, to two decimal places.
    pub fn to_keys(&self, exchange: Decimal) -> Result<Decimal, CurrencyError> {
        self.keys_total(exchange, units::KEY_PRECISION, "to_keys")
    }

    /// Total value in the given denomination.
    pub fn to(&self, unit: Denomination, exchange: Decimal) -> Result<Decimal, CurrencyError> {
        match unit {
            Denomination::Scrap => self.to_scrap(exchange),
            Denomination::Reclaimed => self.to_reclaimed(exchange),
            Denomination::Refined => self.to_refined(exchange),
            Denomination::Keys => self.to_keys(exchange),
        }
    }

    fn scrap_total(&self, exchange: Decimal, operation: &'static str) -> Result<Decimal, CurrencyError> {
        ensure_exchange(exchange)?;

        if self.keys != 0 && exchange <= Decimal::ZERO {
            return Err(CurrencyError::missing_exchange(operation));
        }

        let key_price = units::key_price(exchange, Denomination::Scrap)?;
        let metal = units::to_base_units(self.refined)?;

        Decimal::from(self.keys)
            .checked_mul(key_price)
            .and_then(|keys| keys.checked_add(metal))
            .ok_or_else(|| CurrencyError::overflow(operation))
    }

    fn keys_total(
        &self,
        exchange: Decimal,
        precision: u32,
        operation: &'static str,
    ) -> Result<Decimal, CurrencyError> {
        ensure_exchange(exchange)?;

        if self.refined.is_zero() {
            return Ok(Decimal::from(self.keys));
        }
        if exchange <= Decimal::ZERO {
            return Err(CurrencyError::missing_exchange(operation));
        }

        self.refined
            .checked_div(exchange)
            .and_then(|keys| Decimal::from(self.keys).checked_add(units::round_float(keys, precision)))
            .ok_or_else(|| CurrencyError::overflow(operation))
    }

    // ------------------------------------------------------------------------
    // In-place updates
    // ------------------------------------------------------------------------

    /// Adds `amount` of `unit` to this value and re-normalizes it in place.
    ///
    /// The replacement is computed before anything is written, so on error
    /// the value is left as it was.
    pub fn add(
        &mut self,
        amount: Decimal,
        unit: Denomination,
        exchange: Decimal,
    ) -> Result<&mut Self, CurrencyError> {
        let updated = match unit {
            Denomination::Keys => {
                let total = self.keys_total(exchange, units::FRACTIONAL_KEY_PRECISION, "add_keys")?;
                Self::from_keys(checked_sum(total, amount)?, exchange)?
            }
            metal => Self::from_amount(checked_sum(self.to(metal, exchange)?, amount)?, metal, exchange)?,
        };

        *self = updated;
        Ok(self)
    }

    /// Subtracts `amount` of `unit` from this value in place.
    pub fn subtract(
        &mut self,
        amount: Decimal,
        unit: Denomination,
        exchange: Decimal,
    ) -> Result<&mut Self, CurrencyError> {
        self.add(-amount, unit, exchange)
    }

    /// Adds scrap metal in place.
    pub fn add_scrap(&mut self, scrap: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.add(scrap, Denomination::Scrap, exchange)
    }

    /// Subtracts scrap metal in place.
    pub fn subtract_scrap(&mut self, scrap: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.subtract(scrap, Denomination::Scrap, exchange)
    }

    /// Adds reclaimed metal in place.
    pub fn add_reclaimed(&mut self, reclaimed: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.add(reclaimed, Denomination::Reclaimed, exchange)
    }

    /// Subtracts reclaimed metal in place.
    pub fn subtract_reclaimed(&mut self, reclaimed: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.subtract(reclaimed, Denomination::Reclaimed, exchange)
    }

    /// Adds refined metal in place.
    pub fn add_refined(&mut self, refined: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.add(refined, Denomination::Refined, exchange)
    }

    /// Subtracts refined metal in place.
    pub fn subtract_refined(&mut self, refined: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.subtract(refined, Denomination::Refined, exchange)
    }

    /// Adds keys in place.
    pub fn add_keys(&mut self, keys: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.add(keys, Denomination::Keys, exchange)
    }

    /// Subtracts keys in place.
    pub fn subtract_keys(&mut self, keys: Decimal, exchange: Decimal) -> Result<&mut Self, CurrencyError> {
        self.subtract(keys, Denomination::Keys, exchange)
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Returns a plain `{keys, refined}` snapshot.
    #[must_use]
    pub fn json(&self) -> CurrencyJson {
        (*self).into()
    }

    /// Encodes the snapshot as a JSON string.
    pub fn stringify(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes a JSON snapshot, snapping `refined` to the 0.11 lattice.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0 keys, 0 ref");
        }

        let keys = join_with_space(self.keys, &pluralize("key", self.keys));
        let refined = join_with_space(self.refined.normalize(), "ref");

        write!(f, "{keys}, {refined}")
    }
}
