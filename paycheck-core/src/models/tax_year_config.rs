use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::PayrollTaxConfig;
use crate::models::{FilingStatus, TaxPolicy};

/// The federal schedule and standard deduction tied to one filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingProfile {
    pub federal: TaxPolicy,
    pub standard_deduction: Decimal,
}

/// Everything year-dependent the engine needs: per-status federal schedules,
/// the state policy, and the payroll tax constants.
///
/// Assembled once at startup (see `paycheck_data::default_tax_year_config`)
/// and borrowed by the engine for every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub single: FilingProfile,
    pub married_filing_jointly: FilingProfile,
    pub state: TaxPolicy,
    pub payroll: PayrollTaxConfig,
}

impl TaxYearConfig {
    /// The profile that applies to the given filing status.
    pub fn profile(
        &self,
        status: FilingStatus,
    ) -> &FilingProfile {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
        }
    }
}
