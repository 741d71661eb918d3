pub mod brackets;
pub mod settings;

pub use brackets::{
    BracketCsvError, BracketScheduleLoader, BracketScheduleRecord, default_payroll_config,
    default_standard_deduction, default_tax_year_config, tax_year_config_from_csv,
};
pub use settings::{SettingsError, SettingsStore};
