//! Marginal bracket tax computation.
//!
//! A [`BracketTable`] stores each bracket's ceiling alongside the rate that
//! applies below it. The walk keeps the previous ceiling as the floor of the
//! current bracket, taxes the slice of income between the two, and stops as
//! soon as the taxable amount is fully covered.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycheck_core::{BracketOverflow, BracketTable, TaxBracket};
//! use paycheck_core::calculations::marginal_tax;
//!
//! let table = BracketTable::new(
//!     vec![
//!         TaxBracket { ceiling: dec!(11925), rate: dec!(0.10) },
//!         TaxBracket { ceiling: dec!(48475), rate: dec!(0.12) },
//!         TaxBracket { ceiling: dec!(103350), rate: dec!(0.22) },
//!     ],
//!     BracketOverflow::Extend,
//! )
//! .unwrap();
//!
//! // 10% of 11,925 + 12% of 23,075
//! assert_eq!(marginal_tax(dec!(35000), &table), dec!(3961.50));
//! ```

use rust_decimal::Decimal;

use crate::models::{BracketOverflow, BracketTable, TaxPolicy};

/// Computes progressive tax owed on `taxable` under the given table.
///
/// Amounts at or below zero owe nothing. Income above the last listed
/// ceiling is handled per the table's [`BracketOverflow`] setting: `Extend`
/// taxes the remainder at the top listed rate, `Clamp` leaves it untaxed.
pub fn marginal_tax(
    taxable: Decimal,
    table: &BracketTable,
) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut previous_limit = Decimal::ZERO;

    for bracket in table.brackets() {
        if taxable <= previous_limit {
            break;
        }
        let taxed_in_bracket = taxable.min(bracket.ceiling) - previous_limit;
        tax += taxed_in_bracket * bracket.rate;
        previous_limit = bracket.ceiling;
    }

    if table.overflow() == BracketOverflow::Extend && taxable > table.top_ceiling() {
        tax += (taxable - table.top_ceiling()) * table.top_rate();
    }

    tax.max(Decimal::ZERO)
}

/// Computes tax owed on `taxable` under a [`TaxPolicy`].
pub fn policy_tax(
    taxable: Decimal,
    policy: &TaxPolicy,
) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match policy {
        TaxPolicy::FlatRate { rate } => taxable * rate,
        TaxPolicy::Brackets(table) => marginal_tax(taxable, table),
    }
}
