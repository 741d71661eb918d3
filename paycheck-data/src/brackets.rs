//! Bracket schedule loading.
//!
//! Schedules live in CSV with one row per bracket:
//!
//! - `schedule`: the schedule name (`federal-single`, `federal-mfj`,
//!   `virginia`)
//! - `ceiling`: the bracket's upper income bound
//! - `rate`: the marginal rate as a decimal (e.g. 0.10 for 10%)
//!
//! Rows for a schedule must appear in ascending ceiling order; the table
//! validation in `paycheck-core` rejects anything else. The 2025 schedules
//! ship embedded in the binary, and the same loader reads user-supplied CSV
//! files for other years or states.

use std::collections::BTreeMap;
use std::io::Read;

use paycheck_core::{
    BracketOverflow, BracketTable, BracketTableError, FilingProfile, FilingStatus,
    PayrollTaxConfig, TaxBracket, TaxPolicy, TaxYearConfig,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// The 2025 federal and Virginia schedules shipped with the application.
const SCHEDULES_2025_CSV: &str = include_str!("../data/schedules_2025.csv");

/// Schedule name for the federal Single table.
pub const FEDERAL_SINGLE: &str = "federal-single";
/// Schedule name for the federal Married Filing Jointly table.
pub const FEDERAL_MFJ: &str = "federal-mfj";
/// Schedule name for the Virginia state table.
pub const STATE: &str = "virginia";

/// Errors that can occur when loading bracket schedule data.
#[derive(Debug, Error)]
pub enum BracketCsvError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("schedule '{schedule}' is invalid: {source}")]
    InvalidTable {
        schedule: String,
        source: BracketTableError,
    },

    #[error("schedule '{0}' not found in the CSV data")]
    MissingSchedule(String),

    #[error("payroll constants are invalid: {0}")]
    InvalidPayroll(#[from] paycheck_core::PayrollTaxError),
}

impl From<csv::Error> for BracketCsvError {
    fn from(err: csv::Error) -> Self {
        BracketCsvError::CsvParse(err.to_string())
    }
}

/// A single row from a bracket schedule CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BracketScheduleRecord {
    pub schedule: String,
    pub ceiling: Decimal,
    pub rate: Decimal,
}

/// Loader for bracket schedules from CSV data.
pub struct BracketScheduleLoader;

impl BracketScheduleLoader {
    /// Parses schedule records from a CSV reader, preserving row order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketScheduleRecord>, BracketCsvError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records by schedule name and builds a validated table per group.
    ///
    /// Row order within each schedule is kept, so a CSV listing ceilings out
    /// of order fails table validation rather than being silently reordered.
    pub fn assemble(
        records: &[BracketScheduleRecord],
        overflow: BracketOverflow,
    ) -> Result<BTreeMap<String, BracketTable>, BracketCsvError> {
        let mut grouped: BTreeMap<String, Vec<TaxBracket>> = BTreeMap::new();
        for record in records {
            grouped
                .entry(record.schedule.clone())
                .or_default()
                .push(TaxBracket {
                    ceiling: record.ceiling,
                    rate: record.rate,
                });
        }

        let mut tables = BTreeMap::new();
        for (schedule, brackets) in grouped {
            let count = brackets.len();
            let table = BracketTable::new(brackets, overflow).map_err(|source| {
                BracketCsvError::InvalidTable {
                    schedule: schedule.clone(),
                    source,
                }
            })?;
            debug!(%schedule, brackets = count, "assembled bracket table");
            tables.insert(schedule, table);
        }

        Ok(tables)
    }
}

fn take_table(
    tables: &mut BTreeMap<String, BracketTable>,
    schedule: &str,
) -> Result<BracketTable, BracketCsvError> {
    tables
        .remove(schedule)
        .ok_or_else(|| BracketCsvError::MissingSchedule(schedule.to_string()))
}

/// Builds a [`TaxYearConfig`] from schedule CSV data.
///
/// The CSV must contain the [`FEDERAL_SINGLE`], [`FEDERAL_MFJ`], and
/// [`STATE`] schedules. Standard deductions and payroll constants are not in
/// the CSV; the payroll constants are validated here so a bad configuration
/// fails at load time rather than mid-calculation.
pub fn tax_year_config_from_csv<R: Read>(
    reader: R,
    tax_year: i32,
    overflow: BracketOverflow,
    standard_deduction_single: Decimal,
    standard_deduction_mfj: Decimal,
    payroll: PayrollTaxConfig,
) -> Result<TaxYearConfig, BracketCsvError> {
    payroll.validate()?;
    let records = BracketScheduleLoader::parse(reader)?;
    let mut tables = BracketScheduleLoader::assemble(&records, overflow)?;

    Ok(TaxYearConfig {
        tax_year,
        single: FilingProfile {
            federal: TaxPolicy::Brackets(take_table(&mut tables, FEDERAL_SINGLE)?),
            standard_deduction: standard_deduction_single,
        },
        married_filing_jointly: FilingProfile {
            federal: TaxPolicy::Brackets(take_table(&mut tables, FEDERAL_MFJ)?),
            standard_deduction: standard_deduction_mfj,
        },
        state: TaxPolicy::Brackets(take_table(&mut tables, STATE)?),
        payroll,
    })
}

/// The shipped 2025 standard deduction for a filing status.
pub fn default_standard_deduction(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single => Decimal::from(15_000),
        FilingStatus::MarriedFilingJointly => Decimal::from(30_000),
    }
}

/// The shipped 2024 payroll constants: Social Security 6.2% up to a 168,600
/// wage base, Medicare 1.45% uncapped.
pub fn default_payroll_config() -> PayrollTaxConfig {
    PayrollTaxConfig {
        wage_base: Decimal::from(168_600),
        social_security_rate: Decimal::new(62, 3),   // 0.062
        medicare_rate: Decimal::new(145, 4),         // 0.0145
    }
}

/// The full shipped configuration: embedded 2025 federal and Virginia
/// schedules with `Extend` overflow, 2025 standard deductions, and the
/// default payroll constants.
///
/// # Errors
///
/// Returns [`BracketCsvError`] if the embedded CSV fails to parse or
/// validate, which indicates a packaging defect.
pub fn default_tax_year_config() -> Result<TaxYearConfig, BracketCsvError> {
    tax_year_config_from_csv(
        SCHEDULES_2025_CSV.as_bytes(),
        2025,
        BracketOverflow::Extend,
        default_standard_deduction(FilingStatus::Single),
        default_standard_deduction(FilingStatus::MarriedFilingJointly),
        default_payroll_config(),
    )
}
