use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::feeds::services::lenient_decimal;

/// One written-off product line from the daily loss-product feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossProduct {
    pub document_id: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub qty: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_price: Decimal,
}
