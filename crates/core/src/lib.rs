//! Core currency logic for Keymetal.
//!
//! This crate contains pure arithmetic with ZERO I/O dependencies.
//!
//! # Modules
//!
//! - `currency` - Keys and refined metal, conversions, and the calculator

pub mod currency;

pub use currency::{Calculator, Currency, CurrencyError, ErrorKind};
pub use keymetal_shared::Denomination;
