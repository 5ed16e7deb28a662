//! Currency arithmetic at a fixed exchange rate.
//!
//! Every operation lowers its operands to scrap, works there, and lifts the
//! result back into a normalized [`Currency`].

use keymetal_shared::CalculatorConfig;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::{ensure_exchange, CurrencyError, RangeViolation};
use super::value::Currency;

/// Adds, subtracts, scales and sums currency values at one exchange rate.
///
/// A zero rate is valid; any operation that then has to price keys fails with
/// [`CurrencyError::MissingExchangeRate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calculator {
    exchange: Decimal,
}

impl Calculator {
    /// Creates a calculator for the given refined-per-key rate.
    ///
    /// # Errors
    ///
    /// Returns a range error if `exchange` is negative.
    pub fn new(exchange: Decimal) -> Result<Self, CurrencyError> {
        let exchange = ensure_exchange(exchange)
            .inspect_err(|err| warn!(error = %err, "Rejected calculator exchange rate"))?;

        Ok(Self { exchange })
    }

    /// Creates a calculator from configuration.
    pub fn from_config(config: &CalculatorConfig) -> Result<Self, CurrencyError> {
        Self::new(config.exchange)
    }

    /// The configured exchange rate.
    #[must_use]
    pub const fn exchange(&self) -> Decimal {
        self.exchange
    }

    /// Adds two currency values.
    pub fn add(&self, first: &Currency, second: &Currency) -> Result<Currency, CurrencyError> {
        let scrap = first
            .to_scrap(self.exchange)?
            .checked_add(second.to_scrap(self.exchange)?)
            .ok_or_else(|| CurrencyError::overflow("add"))?;
        let result = Currency::from_scrap(scrap, self.exchange)?;

        debug!(exchange = %self.exchange, %first, %second, %result, "add");
        Ok(result)
    }

    /// Subtracts `subtrahend` from `minuend`. The result may be negative.
    pub fn subtract(&self, minuend: &Currency, subtrahend: &Currency) -> Result<Currency, CurrencyError> {
        let scrap = minuend
            .to_scrap(self.exchange)?
            .checked_sub(subtrahend.to_scrap(self.exchange)?)
            .ok_or_else(|| CurrencyError::overflow("subtract"))?;
        let result = Currency::from_scrap(scrap, self.exchange)?;

        debug!(exchange = %self.exchange, %minuend, %subtrahend, %result, "subtract");
        Ok(result)
    }

    /// Multiplies a currency value by a non-zero factor.
    ///
    /// # Errors
    ///
    /// Returns a range error if `factor` is zero or the product overflows.
    pub fn multiply(&self, currency: &Currency, factor: Decimal) -> Result<Currency, CurrencyError> {
        if factor.is_zero() {
            return Err(RangeViolation::ZeroMultiplier.into());
        }

        let scrap = currency
            .to_scrap(self.exchange)?
            .checked_mul(factor)
            .ok_or_else(|| CurrencyError::overflow("multiply"))?;
        let result = Currency::from_scrap(scrap, self.exchange)?;

        debug!(exchange = %self.exchange, %currency, %factor, %result, "multiply");
        Ok(result)
    }

    /// Divides a currency value by a non-zero divisor.
    ///
    /// # Errors
    ///
    /// Returns a range error if `divisor` is zero or the quotient overflows.
    pub fn divide(&self, currency: &Currency, divisor: Decimal) -> Result<Currency, CurrencyError> {
        if divisor.is_zero() {
            return Err(RangeViolation::ZeroDivisor.into());
        }

        let scrap = currency
            .to_scrap(self.exchange)?
            .checked_div(divisor)
            .ok_or_else(|| CurrencyError::overflow("divide"))?;
        let result = Currency::from_scrap(scrap, self.exchange)?;

        debug!(exchange = %self.exchange, %currency, %divisor, %result, "divide");
        Ok(result)
    }

    /// Sums any number of currency values.
    ///
    /// Operands are lowered at the configured rate but the total is lifted
    /// back at a rate of zero, so the result holds everything as refined
    /// metal. Convert it with [`Currency::to_keys`] to read it in keys.
    pub fn sum<'a, I>(&self, currencies: I) -> Result<Currency, CurrencyError>
    where
        I: IntoIterator<Item = &'a Currency>,
    {
        let mut count = 0usize;
        let scrap = currencies
            .into_iter()
            .try_fold(Decimal::ZERO, |total, currency| -> Result<Decimal, CurrencyError> {
                count += 1;
                total
                    .checked_add(currency.to_scrap(self.exchange)?)
                    .ok_or_else(|| CurrencyError::overflow("sum"))
            })?;

        let result = Currency::from_scrap(scrap, Decimal::ZERO)?;

        debug!(exchange = %self.exchange, count, %scrap, %result, "sum");
        Ok(result)
    }
}
