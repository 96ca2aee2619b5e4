//! Balance sentinel handling. `app_income` wallets report an unbounded
//! balance/spendable amount in their configured currency; everything else
//! is a finite [`rust_decimal::Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// A wallet balance or spendable amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Balance {
    Finite(Decimal),
    /// Only ever produced for `app_income` wallets in their main currency.
    Unbounded,
}

impl Balance {
    pub fn zero() -> Self {
        Balance::Finite(Decimal::ZERO)
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Balance::Unbounded)
    }

    /// `self >= other`. Unbounded is greater than any finite amount and
    /// equal to itself.
    pub fn at_least(&self, other: Decimal) -> bool {
        match self {
            Balance::Finite(v) => *v >= other,
            Balance::Unbounded => true,
        }
    }
}

impl Sub<Decimal> for Balance {
    type Output = Balance;

    fn sub(self, rhs: Decimal) -> Balance {
        match self {
            Balance::Finite(v) => Balance::Finite(v - rhs),
            Balance::Unbounded => Balance::Unbounded,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Finite(v) => write!(f, "{v}"),
            Balance::Unbounded => write!(f, "+inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unbounded_dominates_any_finite_requirement() {
        assert!(Balance::Unbounded.at_least(dec!(1_000_000)));
    }

    #[test]
    fn finite_subtraction_is_plain_decimal_subtraction() {
        let b = Balance::Finite(dec!(100)) - dec!(30);
        assert_eq!(b, Balance::Finite(dec!(70)));
    }

    #[test]
    fn unbounded_minus_anything_stays_unbounded() {
        assert_eq!(Balance::Unbounded - dec!(80), Balance::Unbounded);
    }
}
