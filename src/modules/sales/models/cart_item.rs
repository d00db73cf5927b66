use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::feeds::services::lenient_decimal;

/// One line of a receipt from the daily cart-item feed.
///
/// The numeric columns arrive with locale decimal commas and occasional
/// garbage; both degrade to zero instead of dropping the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub receipt_id: String,
    #[serde(deserialize_with = "lenient_decimal")]
    pub qty: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_price: Decimal,
}
