//! In-game currency: keys and refined metal.
//!
//! This module implements:
//! - Rounding and unit conversion primitives (the 0.11 lattice)
//! - The `Currency` value type with its factories and in-place updates
//! - The `Calculator` for arithmetic at a fixed exchange rate
//! - Error types for missing exchange rates and out-of-range arguments

pub mod calculator;
pub mod error;
pub mod format;
pub mod units;
pub mod value;

#[cfg(test)]
mod props;

pub use calculator::Calculator;
pub use error::{CurrencyError, ErrorKind, RangeViolation};
pub use format::{join_with_space, pluralize};
pub use value::{Currency, CurrencyJson};
