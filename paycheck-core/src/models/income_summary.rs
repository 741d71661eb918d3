use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{PaySchedule, WaterfallStep};

/// Every derived figure the engine reports for one input snapshot.
///
/// All amounts are annual dollars at full precision; use [`monthly`] or
/// [`per_paycheck`] for the scaled views. Negative values are meaningful
/// data (AGI below zero means contributions exceeded income, negative play
/// money means overspend) and are never clamped here.
///
/// [`monthly`]: IncomeSummary::monthly
/// [`per_paycheck`]: IncomeSummary::per_paycheck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub total_income: Decimal,
    pub agi: Decimal,
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub total_tax: Decimal,

    pub after_tax_income: Decimal,
    pub total_pretax_contributions: Decimal,
    pub total_posttax_contributions: Decimal,
    pub total_other_deductions: Decimal,
    pub net_available_cash: Decimal,
    pub total_annual_expenses: Decimal,
    pub final_play_money: Decimal,

    /// Total tax in the counterfactual where pre-tax contributions are zero.
    pub no_contribution_total_tax: Decimal,
    /// Tax avoided by contributing pre-tax: counterfactual minus actual.
    pub tax_savings: Decimal,
}

impl IncomeSummary {
    /// The ordered signed deltas from total income down to play money.
    ///
    /// Pre-tax contributions are deliberately absent: they reduce taxable
    /// income, not after-tax cash, in this pipeline. The sum of every step
    /// equals [`IncomeSummary::final_play_money`] exactly.
    pub fn waterfall_steps(&self) -> Vec<WaterfallStep> {
        vec![
            WaterfallStep::new("Total Income", self.total_income),
            WaterfallStep::new("Federal Tax", -self.federal_tax),
            WaterfallStep::new("State Tax", -self.state_tax),
            WaterfallStep::new("Social Security", -self.social_security_tax),
            WaterfallStep::new("Medicare", -self.medicare_tax),
            WaterfallStep::new(
                "Post-Tax Contributions",
                -self.total_posttax_contributions,
            ),
            WaterfallStep::new("Payroll Deductions", -self.total_other_deductions),
            WaterfallStep::new("Living Expenses", -self.total_annual_expenses),
        ]
    }

    /// Every figure divided by 12, rounded to cents.
    pub fn monthly(&self) -> IncomeSummary {
        self.scaled(Decimal::from(12))
    }

    /// Every figure divided by the schedule's pay periods, rounded to cents.
    pub fn per_paycheck(
        &self,
        schedule: PaySchedule,
    ) -> IncomeSummary {
        self.scaled(schedule.periods_per_year())
    }

    fn scaled(
        &self,
        divisor: Decimal,
    ) -> IncomeSummary {
        let scale = |amount: Decimal| round_half_up(amount / divisor);
        IncomeSummary {
            total_income: scale(self.total_income),
            agi: scale(self.agi),
            taxable_income: scale(self.taxable_income),
            federal_tax: scale(self.federal_tax),
            state_tax: scale(self.state_tax),
            social_security_tax: scale(self.social_security_tax),
            medicare_tax: scale(self.medicare_tax),
            total_tax: scale(self.total_tax),
            after_tax_income: scale(self.after_tax_income),
            total_pretax_contributions: scale(self.total_pretax_contributions),
            total_posttax_contributions: scale(self.total_posttax_contributions),
            total_other_deductions: scale(self.total_other_deductions),
            net_available_cash: scale(self.net_available_cash),
            total_annual_expenses: scale(self.total_annual_expenses),
            final_play_money: scale(self.final_play_money),
            no_contribution_total_tax: scale(self.no_contribution_total_tax),
            tax_savings: scale(self.tax_savings),
        }
    }
}
