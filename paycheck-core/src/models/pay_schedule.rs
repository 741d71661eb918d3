use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a paycheck lands, which fixes how many pay periods a year has.
///
/// Per-paycheck deduction totals and the per-paycheck summary view both scale
/// by [`PaySchedule::periods_per_year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaySchedule {
    /// Twice a month: 24 pay periods per year.
    #[default]
    SemiMonthly,
    /// Every two weeks: 26 pay periods per year.
    Biweekly,
}

impl PaySchedule {
    pub fn periods_per_year(&self) -> Decimal {
        match self {
            Self::SemiMonthly => Decimal::from(24),
            Self::Biweekly => Decimal::from(26),
        }
    }
}
