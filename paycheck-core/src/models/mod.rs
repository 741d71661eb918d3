mod filing_status;
mod income_summary;
mod pay_schedule;
mod snapshot;
mod tax_bracket;
mod tax_policy;
mod tax_year_config;
mod waterfall_step;

pub use filing_status::FilingStatus;
pub use income_summary::IncomeSummary;
pub use pay_schedule::PaySchedule;
pub use snapshot::RawInputSnapshot;
pub use tax_bracket::{BracketOverflow, BracketTable, BracketTableError, TaxBracket};
pub use tax_policy::TaxPolicy;
pub use tax_year_config::{FilingProfile, TaxYearConfig};
pub use waterfall_step::WaterfallStep;
