//! Currency error types.
//!
//! Two kinds of failure exist and callers are expected to tell them apart:
//! a value outside its legal range (negative exchange rate, zero scalar,
//! overflow) and a conversion that needs an exchange rate nobody supplied.

use keymetal_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during currency conversion and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Keys and metal had to be combined but the exchange rate is not
    /// strictly positive.
    #[error("An exchange rate greater than zero is required for {operation}")]
    MissingExchangeRate {
        /// The conversion that needed the rate.
        operation: &'static str,
    },

    /// A configuration value or argument is outside its legal domain.
    #[error(transparent)]
    OutOfRange(#[from] RangeViolation),
}

/// Arguments rejected for being outside their legal domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeViolation {
    /// Exchange rates cannot be negative.
    #[error("The exchange rate cannot be negative, got {0}")]
    NegativeExchangeRate(Decimal),

    /// Multiplying by zero is rejected.
    #[error("The multiplier cannot be zero")]
    ZeroMultiplier,

    /// Dividing by zero is rejected.
    #[error("The divisor cannot be zero")]
    ZeroDivisor,

    /// The key count does not fit in an `i64`.
    #[error("The key count {0} is too large")]
    KeyOverflow(Decimal),

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
}

/// Coarse classification of a [`CurrencyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required exchange rate was zero or absent.
    MissingExchange,
    /// An argument was outside its legal range.
    Range,
}

impl CurrencyError {
    /// Shorthand for a missing-rate error.
    #[must_use]
    pub const fn missing_exchange(operation: &'static str) -> Self {
        Self::MissingExchangeRate { operation }
    }

    /// Shorthand for an overflow error.
    #[must_use]
    pub const fn overflow(operation: &'static str) -> Self {
        Self::OutOfRange(RangeViolation::Overflow(operation))
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingExchangeRate { .. } => ErrorKind::MissingExchange,
            Self::OutOfRange(_) => ErrorKind::Range,
        }
    }

    /// Returns the error code for reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingExchangeRate { .. } => "MISSING_EXCHANGE_RATE",
            Self::OutOfRange(RangeViolation::NegativeExchangeRate(_)) => "NEGATIVE_EXCHANGE_RATE",
            Self::OutOfRange(RangeViolation::ZeroMultiplier) => "ZERO_MULTIPLIER",
            Self::OutOfRange(RangeViolation::ZeroDivisor) => "ZERO_DIVISOR",
            Self::OutOfRange(RangeViolation::KeyOverflow(_)) => "KEY_OVERFLOW",
            Self::OutOfRange(RangeViolation::Overflow(_)) => "ARITHMETIC_OVERFLOW",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err.kind() {
            ErrorKind::MissingExchange => Self::Currency(err.to_string()),
            ErrorKind::Range => Self::Validation(err.to_string()),
        }
    }
}

/// Rejects negative exchange rates. Zero is allowed.
pub(crate) fn ensure_exchange(exchange: Decimal) -> Result<Decimal, CurrencyError> {
    if exchange.is_sign_negative() && !exchange.is_zero() {
        return Err(RangeViolation::NegativeExchangeRate(exchange).into());
    }
    Ok(exchange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kinds_are_distinct() {
        assert_eq!(
            CurrencyError::missing_exchange("to_scrap").kind(),
            ErrorKind::MissingExchange
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::ZeroDivisor).kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CurrencyError::missing_exchange("to_keys").error_code(),
            "MISSING_EXCHANGE_RATE"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::NegativeExchangeRate(dec!(-1))).error_code(),
            "NEGATIVE_EXCHANGE_RATE"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::ZeroMultiplier).error_code(),
            "ZERO_MULTIPLIER"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::ZeroDivisor).error_code(),
            "ZERO_DIVISOR"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::KeyOverflow(dec!(100000000000000000000))).error_code(),
            "KEY_OVERFLOW"
        );
        assert_eq!(CurrencyError::overflow("multiply").error_code(), "ARITHMETIC_OVERFLOW");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CurrencyError::missing_exchange("to_scrap").to_string(),
            "An exchange rate greater than zero is required for to_scrap"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::NegativeExchangeRate(dec!(-71.22))).to_string(),
            "The exchange rate cannot be negative, got -71.22"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::ZeroMultiplier).to_string(),
            "The multiplier cannot be zero"
        );
        assert_eq!(
            CurrencyError::from(RangeViolation::ZeroDivisor).to_string(),
            "The divisor cannot be zero"
        );
        assert_eq!(
            CurrencyError::overflow("divide").to_string(),
            "Arithmetic overflow in divide"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = CurrencyError::missing_exchange("to_keys").into();
        assert_eq!(app.error_code(), "CURRENCY_ERROR");

        let app: AppError = CurrencyError::from(RangeViolation::ZeroDivisor).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = CurrencyError::overflow("sum").into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_ensure_exchange() {
        assert_eq!(ensure_exchange(Decimal::ZERO), Ok(Decimal::ZERO));
        assert_eq!(ensure_exchange(dec!(55)), Ok(dec!(55)));
        assert_eq!(
            ensure_exchange(dec!(-0.11)),
            Err(CurrencyError::OutOfRange(RangeViolation::NegativeExchangeRate(dec!(-0.11))))
        );
    }
}
