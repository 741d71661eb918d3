pub mod calculations;
pub mod models;

pub use calculations::{IncomeWaterfallEngine, PayrollTaxConfig, PayrollTaxError};
pub use models::*;
