use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, PaySchedule};

/// One immutable snapshot of every raw input the engine consumes.
///
/// The engine never reads ambient state: the presentation layer collects its
/// field values into a snapshot and hands it over whole. Contribution,
/// deduction, and budget maps are keyed by display name; only the per-key
/// amounts and their sums matter to the calculation.
///
/// All serde fields default, so a partially written settings file loads with
/// the documented defaults filling the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputSnapshot {
    /// Base salary in dollars per year.
    pub gross_salary: Decimal,

    /// Bonus income in dollars per year.
    pub bonus_income: Decimal,

    /// Employer pension contribution as a user-entered percentage of base
    /// salary (5 means 5%). Divided by 100 exactly once, at ingestion.
    pub pension_percent: Decimal,

    pub filing_status: FilingStatus,

    pub pay_schedule: PaySchedule,

    /// Pre-tax contribution name -> annual dollar amount.
    pub pretax_contributions: BTreeMap<String, Decimal>,

    /// Post-tax contribution name -> annual dollar amount.
    pub posttax_contributions: BTreeMap<String, Decimal>,

    /// Fixed payroll deduction name -> dollar amount withheld per paycheck.
    pub paycheck_deductions: BTreeMap<String, Decimal>,

    /// Budget category name -> dollar amount spent per month.
    pub monthly_budget: BTreeMap<String, Decimal>,
}

impl RawInputSnapshot {
    /// Sum of the annual pre-tax contribution amounts, excluding pension.
    pub fn pretax_total(&self) -> Decimal {
        self.pretax_contributions.values().sum()
    }

    /// Sum of the annual post-tax contribution amounts.
    pub fn posttax_total(&self) -> Decimal {
        self.posttax_contributions.values().sum()
    }

    /// Sum of the per-paycheck deduction amounts (for one paycheck).
    pub fn paycheck_deduction_total(&self) -> Decimal {
        self.paycheck_deductions.values().sum()
    }

    /// Sum of the monthly budget category amounts (for one month).
    pub fn monthly_budget_total(&self) -> Decimal {
        self.monthly_budget.values().sum()
    }
}

fn amounts(entries: &[(&str, i64)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(name, amount)| (name.to_string(), Decimal::from(*amount)))
        .collect()
}

impl Default for RawInputSnapshot {
    fn default() -> Self {
        Self {
            gross_salary: Decimal::from(145_000),
            bonus_income: Decimal::ZERO,
            pension_percent: Decimal::ZERO,
            filing_status: FilingStatus::default(),
            pay_schedule: PaySchedule::default(),
            pretax_contributions: amounts(&[
                ("403(b) Traditional", 20_000),
                ("457(b) Traditional", 20_000),
                ("HSA", 0),
                ("401(a) Employee", 0),
            ]),
            posttax_contributions: amounts(&[
                ("Roth IRA", 6_500),
                ("Brokerage Investments", 5_000),
                ("Crypto Investments", 5_000),
            ]),
            paycheck_deductions: BTreeMap::new(),
            monthly_budget: amounts(&[
                ("Housing", 300),
                ("Groceries", 600),
                ("Restaurants", 400),
                ("Transportation", 300),
                ("Insurance", 300),
                ("Utilities", 175),
                ("Subscriptions", 100),
                ("Lifestyle", 800),
                ("Other Expenses", 100),
            ]),
        }
    }
}
