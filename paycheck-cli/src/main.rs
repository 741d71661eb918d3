use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paycheck_core::calculations::IncomeWaterfallEngine;
use paycheck_core::{BracketOverflow, FilingStatus, RawInputSnapshot, TaxYearConfig};
use paycheck_data::{
    SettingsStore, default_payroll_config, default_standard_deduction, default_tax_year_config,
    tax_year_config_from_csv,
};
use tracing_subscriber::EnvFilter;

mod report;

/// Paycheck, budget, and play-money calculator.
///
/// Reads raw inputs (salary, contributions, payroll deductions, monthly
/// budget) from a JSON settings file, computes progressive federal and state
/// income tax, payroll tax, and the income waterfall down to play money, and
/// prints the results.
#[derive(Parser, Debug)]
#[command(name = "paycheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON settings file holding the raw inputs
    #[arg(short, long, default_value = "paycheck.json")]
    settings: PathBuf,

    /// Write a settings file populated with the default inputs, then exit
    #[arg(long, default_value_t = false)]
    init: bool,

    /// Bracket schedule CSV replacing the built-in 2025 schedules
    /// (columns: schedule, ceiling, rate)
    #[arg(long)]
    schedules: Option<PathBuf>,

    /// Tax year label to report when --schedules is given
    #[arg(long, default_value_t = 2025)]
    tax_year: i32,

    /// Cadence for the summary figures
    #[arg(short, long, value_enum, default_value = "annual")]
    cadence: Cadence,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Cadence {
    Annual,
    Monthly,
    Paycheck,
}

fn load_config(args: &Args) -> Result<TaxYearConfig> {
    match &args.schedules {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open schedules CSV: {}", path.display()))?;
            tax_year_config_from_csv(
                file,
                args.tax_year,
                BracketOverflow::Extend,
                default_standard_deduction(FilingStatus::Single),
                default_standard_deduction(FilingStatus::MarriedFilingJointly),
                default_payroll_config(),
            )
            .with_context(|| format!("failed to load schedules CSV: {}", path.display()))
        }
        None => default_tax_year_config().context("failed to load the built-in schedules"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let store = SettingsStore::new(&args.settings);

    if args.init {
        store
            .save(&RawInputSnapshot::default())
            .with_context(|| format!("failed to write: {}", store.path().display()))?;
        println!("Wrote default settings to: {}", store.path().display());
        return Ok(());
    }

    let config = load_config(&args)?;
    tracing::debug!(tax_year = config.tax_year, "tax configuration loaded");
    let snapshot = store
        .load_or_default()
        .with_context(|| format!("failed to load settings: {}", store.path().display()))?;

    let engine = IncomeWaterfallEngine::new(&config);
    let summary = engine.compute_summary(&snapshot);

    let (cadence_label, view) = match args.cadence {
        Cadence::Annual => ("annual", summary.clone()),
        Cadence::Monthly => ("monthly", summary.monthly()),
        Cadence::Paycheck => (
            "per paycheck",
            summary.per_paycheck(snapshot.pay_schedule),
        ),
    };

    report::print_inputs(&snapshot);
    report::print_summary(&view, cadence_label);
    report::print_waterfall(&summary);

    Ok(())
}
