use serde::{Deserialize, Serialize};

/// One write-off document from the daily loss feed.
///
/// `shop_id` must resolve against the same city's shop directory before the
/// document may contribute to totals; `type_id` points into the global
/// write-off type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossDocument {
    pub id: String,
    pub shop_id: String,
    pub type_id: String,
}
