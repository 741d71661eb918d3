use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One signed delta in the flow from gross income down to play money.
///
/// Income is positive, everything withheld or spent is negative. The running
/// cumulative sum over a summary's full step sequence lands exactly on its
/// play money figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub amount: Decimal,
}

impl WaterfallStep {
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}
