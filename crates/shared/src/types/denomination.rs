//! The denominations that make up in-game currency.
//!
//! Keys are the coarse unit. The three metals are fixed fractions of one
//! refined metal; keys are priced in refined through a caller-supplied
//! exchange rate and have no fixed ratio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single currency denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Scrap metal, the indivisible base unit.
    Scrap,
    /// Reclaimed metal, worth three scrap.
    Reclaimed,
    /// Refined metal, worth three reclaimed.
    Refined,
    /// Keys, worth `exchange` refined.
    Keys,
}

impl Denomination {
    /// How many of this unit make up one refined metal.
    ///
    /// Returns `None` for keys, which depend on an exchange rate.
    #[must_use]
    pub fn units_per_refined(self) -> Option<Decimal> {
        match self {
            Self::Scrap => Some(Decimal::from(9)),
            Self::Reclaimed => Some(Decimal::from(3)),
            Self::Refined => Some(Decimal::ONE),
            Self::Keys => None,
        }
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scrap => write!(f, "scrap"),
            Self::Reclaimed => write!(f, "reclaimed"),
            Self::Refined => write!(f, "refined"),
            Self::Keys => write!(f, "keys"),
        }
    }
}

impl std::str::FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scrap" => Ok(Self::Scrap),
            "rec" | "reclaimed" => Ok(Self::Reclaimed),
            "ref" | "refined" => Ok(Self::Refined),
            "key" | "keys" => Ok(Self::Keys),
            _ => Err(format!("Unknown denomination: {s}")),
        }
    }
}
