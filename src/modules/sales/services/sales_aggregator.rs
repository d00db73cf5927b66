use std::collections::HashMap;
use tracing::debug;

use crate::modules::feeds::services::DatedTable;
use crate::modules::reports::models::AggregateMeasure;
use crate::modules::sales::models::{CartItem, Receipt};

/// Join cart items to their receipts and sum per shop.
///
/// Receipt counts come from the receipt table itself, so a shop whose
/// receipts have no matching line items still shows `count > 0` with zero
/// revenue and quantity. Cart items whose `receipt_id` matches no receipt
/// are dropped (inner join). Pure function of its input: re-running it on
/// the same tables yields the same map.
pub fn aggregate(
    receipts: &[DatedTable<Receipt>],
    cart_items: &[DatedTable<CartItem>],
) -> HashMap<String, AggregateMeasure> {
    let mut measures: HashMap<String, AggregateMeasure> = HashMap::new();

    // receipt_id -> shop_id, and the per-shop receipt count
    let mut shop_by_receipt: HashMap<&str, &str> = HashMap::new();
    for table in receipts {
        for receipt in &table.rows {
            shop_by_receipt.insert(&receipt.id, &receipt.shop_id);
            measures.entry(receipt.shop_id.clone()).or_default().count += 1;
        }
    }

    let mut orphaned = 0usize;
    for table in cart_items {
        for item in &table.rows {
            match shop_by_receipt.get(item.receipt_id.as_str()) {
                Some(shop_id) => {
                    let measure = measures.entry((*shop_id).to_string()).or_default();
                    measure.quantity += item.qty;
                    measure.amount += item.total_price;
                }
                None => orphaned += 1,
            }
        }
    }

    if orphaned > 0 {
        debug!(orphaned, "cart items without a matching receipt dropped");
    }

    measures
}
