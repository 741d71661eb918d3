//! Plain-text rendering of the income summary and waterfall.

use paycheck_core::{IncomeSummary, RawInputSnapshot};
use rust_decimal::Decimal;

/// Formats a decimal as currency: dollar sign, comma thousands separators,
/// two decimal places, minus sign ahead of the dollar sign for negatives.
pub fn format_currency(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}

fn line(
    label: &str,
    amount: Decimal,
) {
    println!("  {label:<42}{:>15}", format_currency(amount));
}

/// Prints the summary figures at the chosen cadence.
pub fn print_summary(
    summary: &IncomeSummary,
    cadence_label: &str,
) {
    println!("Income & Taxes Summary ({cadence_label})");
    line("Total Income", summary.total_income);
    line("Total Pre-Tax Contributions", summary.total_pretax_contributions);
    line("Adjusted Gross Income (AGI)", summary.agi);
    line("Taxable Income", summary.taxable_income);
    line("Federal Tax", summary.federal_tax);
    line("State Tax", summary.state_tax);
    line("Social Security Tax", summary.social_security_tax);
    line("Medicare Tax", summary.medicare_tax);
    line("Total Taxes", summary.total_tax);
    line("After-Tax Income", summary.after_tax_income);
    line("Total Post-Tax Contributions", summary.total_posttax_contributions);
    line("Payroll Deductions", summary.total_other_deductions);
    line("Net Available Cash", summary.net_available_cash);
    println!();

    println!("Budget Summary ({cadence_label})");
    line("Fixed Living Expenses", summary.total_annual_expenses);
    line("Remaining Play Money", summary.final_play_money);
    println!();

    println!("Without Pre-Tax Contributions ({cadence_label})");
    line("Total Taxes", summary.no_contribution_total_tax);
    line("Tax Savings From Contributing", summary.tax_savings);
    println!();
}

/// Prints the waterfall with a running total per step.
pub fn print_waterfall(summary: &IncomeSummary) {
    println!("Salary to Play Money Breakdown (annual)");

    let mut running = Decimal::ZERO;
    for step in summary.waterfall_steps() {
        running += step.amount;
        println!(
            "  {:<28}{:>15}{:>15}",
            step.label,
            format_currency(step.amount),
            format_currency(running),
        );
    }
    println!(
        "  {:<28}{:>15}{:>15}",
        "= Play Money",
        "",
        format_currency(summary.final_play_money),
    );
}

/// Prints where the settings came from and the headline inputs.
pub fn print_inputs(snapshot: &RawInputSnapshot) {
    println!(
        "Inputs: salary {}, bonus {}, {} filing, {} pre-tax / {} post-tax contributions,\n\
         {} budget categories",
        format_currency(snapshot.gross_salary),
        format_currency(snapshot.bonus_income),
        snapshot.filing_status.as_str(),
        snapshot.pretax_contributions.len(),
        snapshot.posttax_contributions.len(),
        snapshot.monthly_budget.len(),
    );
    println!();
}
