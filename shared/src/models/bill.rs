//! Bill Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Finalized, payable record derived from an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub order: i64,
    pub total_amount: Decimal,
    #[serde(default)]
    pub paid: bool,
    pub billed_at: DateTime<Utc>,
}

/// Create bill payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillCreate {
    pub order: i64,
    pub total_amount: Decimal,
}
