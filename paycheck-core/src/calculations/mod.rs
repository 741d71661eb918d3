//! Calculation stages of the paycheck pipeline.
//!
//! `bracket_tax` and `payroll` are pure leaf functions; `waterfall` drives
//! them from a raw input snapshot and assembles the income summary.

pub mod bracket_tax;
pub mod common;
pub mod payroll;
pub mod waterfall;

pub use bracket_tax::{marginal_tax, policy_tax};
pub use payroll::{PayrollTaxConfig, PayrollTaxError};
pub use waterfall::IncomeWaterfallEngine;
