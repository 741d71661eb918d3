//! Payroll (FICA) tax computation.
//!
//! Payroll taxes are assessed on gross wages, not on AGI or taxable income.
//! Social Security is a flat rate up to an annual wage base; Medicare is a
//! flat uncapped rate. The additional Medicare surtax on high earners is
//! deliberately not modeled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when payroll tax constants fail validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollTaxError {
    /// The Social Security wage base must be positive.
    #[error("social security wage base must be positive, got {0}")]
    InvalidWageBase(Decimal),

    /// The Social Security tax rate must be between 0 and 1.
    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    /// The Medicare tax rate must be between 0 and 1.
    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),
}

/// Year-specific payroll tax constants.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycheck_core::PayrollTaxConfig;
///
/// let payroll = PayrollTaxConfig {
///     wage_base: dec!(168600),
///     social_security_rate: dec!(0.062),
///     medicare_rate: dec!(0.0145),
/// };
/// payroll.validate().unwrap();
///
/// assert_eq!(payroll.social_security_tax(dec!(145125)), dec!(8997.750));
/// assert_eq!(payroll.medicare_tax(dec!(145125)), dec!(2104.3125));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    /// Maximum annual earnings subject to Social Security tax.
    pub wage_base: Decimal,

    /// Employee Social Security rate, typically 6.2%.
    pub social_security_rate: Decimal,

    /// Employee Medicare rate, typically 1.45%.
    pub medicare_rate: Decimal,
}

impl PayrollTaxConfig {
    /// Validates the constants.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollTaxError`] if the wage base is not positive or
    /// either rate falls outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), PayrollTaxError> {
        if self.wage_base <= Decimal::ZERO {
            return Err(PayrollTaxError::InvalidWageBase(self.wage_base));
        }
        if self.social_security_rate < Decimal::ZERO || self.social_security_rate > Decimal::ONE {
            return Err(PayrollTaxError::InvalidSocialSecurityRate(
                self.social_security_rate,
            ));
        }
        if self.medicare_rate < Decimal::ZERO || self.medicare_rate > Decimal::ONE {
            return Err(PayrollTaxError::InvalidMedicareRate(self.medicare_rate));
        }
        Ok(())
    }

    /// Social Security tax on gross wages: flat rate, capped at the wage base.
    pub fn social_security_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        gross_income.min(self.wage_base).max(Decimal::ZERO) * self.social_security_rate
    }

    /// Medicare tax on gross wages: flat rate, no cap.
    pub fn medicare_tax(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        gross_income.max(Decimal::ZERO) * self.medicare_rate
    }
}
