use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BracketTable;

/// How an income tax is computed from taxable income.
///
/// Federal and state tax are each driven by a `TaxPolicy`, so a flat-rate
/// approximation and a full progressive schedule flow through the same
/// engine pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// A single rate applied to the whole taxable amount.
    FlatRate { rate: Decimal },
    /// A progressive marginal bracket schedule.
    Brackets(BracketTable),
}
