use serde::{Deserialize, Serialize};

/// One completed sale transaction from the daily receipt feed.
///
/// `shop_id` points into the same city's shop directory; extra feed columns
/// are ignored at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub shop_id: String,
}
