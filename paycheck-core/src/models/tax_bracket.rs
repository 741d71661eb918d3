use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single marginal tax bracket.
///
/// The `ceiling` is the UPPER bound of the bracket: `rate` applies to income
/// between the previous bracket's ceiling (or zero for the first bracket) and
/// this one. Storing ceilings rather than floors is the convention used by
/// every bracket schedule this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub ceiling: Decimal,
    pub rate: Decimal,
}

/// How income above the last listed bracket ceiling is treated.
///
/// The shipped schedules use [`BracketOverflow::Extend`]; `Clamp` exists for
/// schedules that deliberately cap taxation at their last ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketOverflow {
    /// Income above the last ceiling is not taxed by this table.
    Clamp,
    /// Income above the last ceiling is taxed at the last bracket's rate.
    #[default]
    Extend,
}

/// Errors reported when a bracket table fails validation.
///
/// A malformed table is a configuration error, so it is rejected when the
/// table is built and never mid-calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table contains no brackets.
    #[error("bracket table is empty")]
    Empty,

    /// The first bracket's ceiling must be above zero.
    #[error("first bracket ceiling must be positive, got {0}")]
    NonPositiveCeiling(Decimal),

    /// Bracket ceilings must be strictly increasing.
    #[error("bracket ceiling {ceiling} does not exceed previous ceiling {previous}")]
    CeilingNotIncreasing { ceiling: Decimal, previous: Decimal },

    /// Marginal rates must be fractions in [0, 1).
    #[error("marginal rate must be in [0, 1), got {0}")]
    RateOutOfRange(Decimal),
}

/// An ordered progressive tax schedule.
///
/// Construction validates the table, so a `BracketTable` in hand is always
/// well formed and tax computation over it is infallible.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycheck_core::{BracketOverflow, BracketTable, TaxBracket};
///
/// let table = BracketTable::new(
///     vec![
///         TaxBracket { ceiling: dec!(3000), rate: dec!(0.02) },
///         TaxBracket { ceiling: dec!(17000), rate: dec!(0.0575) },
///     ],
///     BracketOverflow::Extend,
/// )
/// .unwrap();
///
/// assert_eq!(table.brackets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
    overflow: BracketOverflow,
}

impl BracketTable {
    /// Builds a validated bracket table.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the table is empty, its ceilings are
    /// not strictly increasing starting above zero, or any rate falls outside
    /// `[0, 1)`.
    pub fn new(
        brackets: Vec<TaxBracket>,
        overflow: BracketOverflow,
    ) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if first.ceiling <= Decimal::ZERO {
            return Err(BracketTableError::NonPositiveCeiling(first.ceiling));
        }

        let mut previous = Decimal::ZERO;
        for bracket in &brackets {
            if bracket.ceiling <= previous {
                return Err(BracketTableError::CeilingNotIncreasing {
                    ceiling: bracket.ceiling,
                    previous,
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange(bracket.rate));
            }
            previous = bracket.ceiling;
        }

        Ok(Self { brackets, overflow })
    }

    /// The brackets in ascending ceiling order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// How income above the last ceiling is treated.
    pub fn overflow(&self) -> BracketOverflow {
        self.overflow
    }

    /// The last listed ceiling.
    pub fn top_ceiling(&self) -> Decimal {
        // new() rejects empty tables
        self.brackets.last().map(|b| b.ceiling).unwrap_or_default()
    }

    /// The last listed marginal rate.
    pub fn top_rate(&self) -> Decimal {
        self.brackets.last().map(|b| b.rate).unwrap_or_default()
    }
}
