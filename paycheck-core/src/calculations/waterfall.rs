//! The income waterfall engine.
//!
//! Takes one [`RawInputSnapshot`] and derives every summary figure, in a
//! fixed order where each stage consumes earlier totals:
//!
//! | Stage | Derivation |
//! |-------|------------|
//! | 1     | Total income = salary + bonus |
//! | 2     | Pre-tax contributions = pension + pre-tax amounts |
//! | 3     | AGI = total income - pre-tax contributions (may go negative) |
//! | 4     | Taxable income = max(AGI - standard deduction, 0) |
//! | 5     | Federal and state tax off taxable income; payroll tax off gross |
//! | 6     | Total tax = federal + state + Social Security + Medicare |
//! | 7     | After-tax income = total income - total tax |
//! | 8     | Post-tax contributions |
//! | 9     | Payroll deductions = per-paycheck amounts × pay periods |
//! | 10    | Net available cash = after-tax - post-tax - payroll deductions |
//! | 11    | Annual expenses = monthly budget × 12 |
//! | 12    | Play money = net available cash - annual expenses |
//!
//! Stages 3–7 also run a second time with pre-tax contributions forced to
//! zero, through the same code path, to report the tax saved by contributing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycheck_core::calculations::IncomeWaterfallEngine;
//! use paycheck_core::{
//!     BracketOverflow, BracketTable, FilingProfile, PayrollTaxConfig,
//!     RawInputSnapshot, TaxBracket, TaxPolicy, TaxYearConfig,
//! };
//!
//! let single = FilingProfile {
//!     federal: TaxPolicy::Brackets(
//!         BracketTable::new(
//!             vec![
//!                 TaxBracket { ceiling: dec!(11925), rate: dec!(0.10) },
//!                 TaxBracket { ceiling: dec!(48475), rate: dec!(0.12) },
//!                 TaxBracket { ceiling: dec!(103350), rate: dec!(0.22) },
//!             ],
//!             BracketOverflow::Extend,
//!         )
//!         .unwrap(),
//!     ),
//!     standard_deduction: dec!(15000),
//! };
//! let config = TaxYearConfig {
//!     tax_year: 2025,
//!     married_filing_jointly: single.clone(),
//!     single,
//!     state: TaxPolicy::FlatRate { rate: dec!(0.0575) },
//!     payroll: PayrollTaxConfig {
//!         wage_base: dec!(168600),
//!         social_security_rate: dec!(0.062),
//!         medicare_rate: dec!(0.0145),
//!     },
//! };
//!
//! let engine = IncomeWaterfallEngine::new(&config);
//! let summary = engine.compute_summary(&RawInputSnapshot::default());
//!
//! assert_eq!(summary.agi, dec!(105000));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::max;
use crate::calculations::policy_tax;
use crate::models::{FilingStatus, IncomeSummary, RawInputSnapshot, TaxYearConfig};

/// Intermediate result of the tax stages (3–7 above) for one pre-tax total.
struct TaxAssessment {
    agi: Decimal,
    taxable_income: Decimal,
    federal_tax: Decimal,
    state_tax: Decimal,
    social_security_tax: Decimal,
    medicare_tax: Decimal,
    total_tax: Decimal,
    after_tax_income: Decimal,
}

/// Derives an [`IncomeSummary`] from a raw input snapshot.
///
/// Holds only a borrow of the year configuration; each call to
/// [`compute_summary`] is a pure function of its snapshot.
///
/// [`compute_summary`]: IncomeWaterfallEngine::compute_summary
#[derive(Debug, Clone)]
pub struct IncomeWaterfallEngine<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> IncomeWaterfallEngine<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline and returns every derived figure.
    pub fn compute_summary(
        &self,
        snapshot: &RawInputSnapshot,
    ) -> IncomeSummary {
        let total_income = snapshot.gross_salary + snapshot.bonus_income;

        // The percentage is divided down exactly once, here.
        let pension = snapshot.gross_salary * snapshot.pension_percent / Decimal::ONE_HUNDRED;
        let total_pretax_contributions = pension + snapshot.pretax_total();

        let assessed = self.assess(total_income, total_pretax_contributions, snapshot.filing_status);
        let no_contributions = self.assess(total_income, Decimal::ZERO, snapshot.filing_status);

        let total_posttax_contributions = snapshot.posttax_total();
        let total_other_deductions =
            snapshot.paycheck_deduction_total() * snapshot.pay_schedule.periods_per_year();
        let net_available_cash =
            assessed.after_tax_income - total_posttax_contributions - total_other_deductions;

        let total_annual_expenses = snapshot.monthly_budget_total() * Decimal::from(12);
        let final_play_money = net_available_cash - total_annual_expenses;

        if final_play_money < Decimal::ZERO {
            warn!(%final_play_money, "budget overspends available cash");
        }
        debug!(
            %total_income,
            agi = %assessed.agi,
            taxable_income = %assessed.taxable_income,
            total_tax = %assessed.total_tax,
            %final_play_money,
            "income waterfall computed",
        );

        IncomeSummary {
            total_income,
            agi: assessed.agi,
            taxable_income: assessed.taxable_income,
            federal_tax: assessed.federal_tax,
            state_tax: assessed.state_tax,
            social_security_tax: assessed.social_security_tax,
            medicare_tax: assessed.medicare_tax,
            total_tax: assessed.total_tax,
            after_tax_income: assessed.after_tax_income,
            total_pretax_contributions,
            total_posttax_contributions,
            total_other_deductions,
            net_available_cash,
            total_annual_expenses,
            final_play_money,
            no_contribution_total_tax: no_contributions.total_tax,
            tax_savings: no_contributions.total_tax - assessed.total_tax,
        }
    }

    /// Stages 3–7: AGI, taxable income, the four taxes, and after-tax income
    /// for one pre-tax contribution total. The counterfactual comparison is
    /// this same function called with a zero pre-tax total.
    fn assess(
        &self,
        total_income: Decimal,
        total_pretax_contributions: Decimal,
        filing_status: FilingStatus,
    ) -> TaxAssessment {
        let profile = self.config.profile(filing_status);

        // AGI may go negative; it is reported as-is, not an error.
        let agi = total_income - total_pretax_contributions;
        if agi < Decimal::ZERO {
            warn!(%agi, "pre-tax contributions exceed total income");
        }
        let taxable_income = max(agi - profile.standard_deduction, Decimal::ZERO);

        // Income taxes come off taxable income; payroll taxes come off gross
        // wages. The two bases are distinct and must stay that way.
        let federal_tax = policy_tax(taxable_income, &profile.federal);
        let state_tax = policy_tax(taxable_income, &self.config.state);
        let social_security_tax = self.config.payroll.social_security_tax(total_income);
        let medicare_tax = self.config.payroll.medicare_tax(total_income);

        let total_tax = federal_tax + state_tax + social_security_tax + medicare_tax;
        let after_tax_income = total_income - total_tax;

        TaxAssessment {
            agi,
            taxable_income,
            federal_tax,
            state_tax,
            social_security_tax,
            medicare_tax,
            total_tax,
            after_tax_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{
        BracketOverflow, BracketTable, FilingProfile, PaySchedule, TaxBracket, TaxPolicy,
    };
    use crate::calculations::PayrollTaxConfig;

    fn table(
        rows: &[(Decimal, Decimal)],
        overflow: BracketOverflow,
    ) -> BracketTable {
        BracketTable::new(
            rows.iter()
                .map(|&(ceiling, rate)| TaxBracket { ceiling, rate })
                .collect(),
            overflow,
        )
        .unwrap()
    }

    fn config_2025() -> TaxYearConfig {
        TaxYearConfig {
            tax_year: 2025,
            single: FilingProfile {
                federal: TaxPolicy::Brackets(table(
                    &[
                        (dec!(11925), dec!(0.10)),
                        (dec!(48475), dec!(0.12)),
                        (dec!(103350), dec!(0.22)),
                        (dec!(197300), dec!(0.24)),
                        (dec!(250525), dec!(0.32)),
                        (dec!(626350), dec!(0.35)),
                    ],
                    BracketOverflow::Extend,
                )),
                standard_deduction: dec!(15000),
            },
            married_filing_jointly: FilingProfile {
                federal: TaxPolicy::Brackets(table(
                    &[
                        (dec!(23850), dec!(0.10)),
                        (dec!(96950), dec!(0.12)),
                        (dec!(206700), dec!(0.22)),
                        (dec!(394600), dec!(0.24)),
                        (dec!(501050), dec!(0.32)),
                        (dec!(751600), dec!(0.35)),
                    ],
                    BracketOverflow::Extend,
                )),
                standard_deduction: dec!(30000),
            },
            state: TaxPolicy::Brackets(table(
                &[
                    (dec!(3000), dec!(0.02)),
                    (dec!(5000), dec!(0.03)),
                    (dec!(17000), dec!(0.0575)),
                ],
                BracketOverflow::Extend,
            )),
            payroll: PayrollTaxConfig {
                wage_base: dec!(168600),
                social_security_rate: dec!(0.062),
                medicare_rate: dec!(0.0145),
            },
        }
    }

    /// Salary 145,125, 403(b) + 457(b) of 20,000 each, nothing else.
    fn snapshot_145125() -> RawInputSnapshot {
        RawInputSnapshot {
            gross_salary: dec!(145125),
            bonus_income: dec!(0),
            pension_percent: dec!(0),
            filing_status: FilingStatus::Single,
            pay_schedule: PaySchedule::SemiMonthly,
            pretax_contributions: BTreeMap::from([
                ("403(b) Traditional".to_string(), dec!(20000)),
                ("457(b) Traditional".to_string(), dec!(20000)),
            ]),
            posttax_contributions: BTreeMap::new(),
            paycheck_deductions: BTreeMap::new(),
            monthly_budget: BTreeMap::new(),
        }
    }

    #[test]
    fn contributions_reduce_agi_and_taxable_income() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        assert_eq!(summary.total_income, dec!(145125));
        assert_eq!(summary.total_pretax_contributions, dec!(40000));
        assert_eq!(summary.agi, dec!(105125));
        assert_eq!(summary.taxable_income, dec!(90125));
    }

    #[test]
    fn federal_tax_accumulates_through_the_22_percent_bracket() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        // 10% of 11,925 + 12% of 36,550 + 22% of 41,650
        assert_eq!(summary.federal_tax, dec!(14741.50));
    }

    #[test]
    fn payroll_taxes_come_off_gross_wages_not_taxable_income() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        // 145,125 is under the wage base, so both are proportional to gross
        // even though taxable income is only 90,125.
        assert_eq!(summary.social_security_tax, dec!(8997.750));
        assert_eq!(summary.medicare_tax, dec!(2104.3125));
    }

    #[test]
    fn total_tax_and_after_tax_income_tie_out() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        assert_eq!(
            summary.total_tax,
            summary.federal_tax
                + summary.state_tax
                + summary.social_security_tax
                + summary.medicare_tax,
        );
        assert_eq!(
            summary.after_tax_income,
            summary.total_income - summary.total_tax,
        );
    }

    #[test]
    fn taxable_income_floors_at_zero() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot.gross_salary = dec!(50000);
        snapshot.pretax_contributions =
            BTreeMap::from([("457(b) Traditional".to_string(), dec!(45000))]);

        let summary = engine.compute_summary(&snapshot);

        assert_eq!(summary.agi, dec!(5000));
        assert_eq!(summary.taxable_income, dec!(0));
        assert_eq!(summary.federal_tax, dec!(0));
        assert_eq!(summary.state_tax, dec!(0));
    }

    #[test]
    fn agi_may_go_negative_and_is_reported_as_is() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot.gross_salary = dec!(30000);

        let summary = engine.compute_summary(&snapshot);

        assert_eq!(summary.agi, dec!(-10000));
        assert_eq!(summary.taxable_income, dec!(0));
    }

    #[test]
    fn fifty_thousand_single_walks_into_the_second_bracket_only() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot.gross_salary = dec!(50000);
        snapshot.pretax_contributions = BTreeMap::new();

        let summary = engine.compute_summary(&snapshot);

        assert_eq!(summary.taxable_income, dec!(35000));
        // 1,192.50 + 12% of 23,075; the 22% band is never entered
        assert_eq!(summary.federal_tax, dec!(3961.50));
    }

    #[test]
    fn married_filing_jointly_uses_its_own_profile() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot.filing_status = FilingStatus::MarriedFilingJointly;

        let summary = engine.compute_summary(&snapshot);

        // 145,125 - 40,000 - 30,000
        assert_eq!(summary.taxable_income, dec!(75125));
        // 10% of 23,850 + 12% of 51,275
        assert_eq!(summary.federal_tax, dec!(8538.00));
    }

    #[test]
    fn pension_percent_is_divided_once_at_ingestion() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot.gross_salary = dec!(100000);
        snapshot.pension_percent = dec!(5);
        snapshot.pretax_contributions = BTreeMap::new();

        let summary = engine.compute_summary(&snapshot);

        assert_eq!(summary.total_pretax_contributions, dec!(5000));
        assert_eq!(summary.agi, dec!(95000));
    }

    #[test]
    fn paycheck_deductions_scale_by_pay_periods() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot
            .paycheck_deductions
            .insert("Parking".to_string(), dec!(25));

        let semi_monthly = engine.compute_summary(&snapshot);
        snapshot.pay_schedule = PaySchedule::Biweekly;
        let biweekly = engine.compute_summary(&snapshot);

        assert_eq!(semi_monthly.total_other_deductions, dec!(600));
        assert_eq!(biweekly.total_other_deductions, dec!(650));
    }

    #[test]
    fn play_money_goes_negative_on_overspend_and_is_not_clamped() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = snapshot_145125();
        snapshot
            .monthly_budget
            .insert("Rent".to_string(), dec!(50000));

        let summary = engine.compute_summary(&snapshot);

        assert!(summary.final_play_money < Decimal::ZERO);
        assert_eq!(
            summary.final_play_money,
            summary.net_available_cash - dec!(600000),
        );
    }

    #[test]
    fn waterfall_steps_sum_exactly_to_play_money() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let mut snapshot = RawInputSnapshot::default();
        snapshot
            .paycheck_deductions
            .insert("Parking".to_string(), dec!(25));

        let summary = engine.compute_summary(&snapshot);
        let running: Decimal = summary.waterfall_steps().iter().map(|s| s.amount).sum();

        assert_eq!(running, summary.final_play_money);
    }

    #[test]
    fn waterfall_starts_at_income_and_only_income_is_positive() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&RawInputSnapshot::default());
        let steps = summary.waterfall_steps();

        assert_eq!(steps[0].label, "Total Income");
        assert_eq!(steps[0].amount, summary.total_income);
        for step in &steps[1..] {
            assert!(step.amount <= Decimal::ZERO, "{} is positive", step.label);
        }
    }

    #[test]
    fn zeroing_contributions_never_lowers_total_tax() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        assert!(summary.no_contribution_total_tax >= summary.total_tax);
        assert_eq!(
            summary.tax_savings,
            summary.no_contribution_total_tax - summary.total_tax,
        );
        assert!(summary.tax_savings > Decimal::ZERO);
    }

    #[test]
    fn identical_snapshots_yield_identical_summaries() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);
        let snapshot = RawInputSnapshot::default();

        assert_eq!(
            engine.compute_summary(&snapshot),
            engine.compute_summary(&snapshot),
        );
    }

    #[test]
    fn monthly_view_divides_by_twelve_and_rounds_to_cents() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());
        let monthly = summary.monthly();

        assert_eq!(monthly.total_income, dec!(12093.75));
        // 2104.3125 / 12 = 175.359375, rounded half-up
        assert_eq!(monthly.medicare_tax, dec!(175.36));
    }

    #[test]
    fn per_paycheck_view_divides_by_schedule_periods() {
        let config = config_2025();
        let engine = IncomeWaterfallEngine::new(&config);

        let summary = engine.compute_summary(&snapshot_145125());

        assert_eq!(
            summary.per_paycheck(PaySchedule::SemiMonthly).total_income,
            dec!(6046.88),
        );
        assert_eq!(
            summary.per_paycheck(PaySchedule::Biweekly).total_income,
            dec!(5581.73),
        );
    }
}
