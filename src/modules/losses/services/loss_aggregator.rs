use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::modules::feeds::services::DatedTable;
use crate::modules::losses::models::{LossDocument, LossProduct};
use crate::modules::reports::models::AggregateMeasure;

/// Group-by key for write-off totals: one bucket per shop and write-off
/// type within a single city.
pub type LossKey = (String, String);

/// Outcome of consolidating one city's write-off feeds.
#[derive(Debug, Default)]
pub struct LossAggregation {
    pub measures: HashMap<LossKey, AggregateMeasure>,
    /// Documents excluded because their shop id is unknown in this city
    pub excluded_documents: usize,
}

/// Join product lines to write-off documents and sum per (shop, type).
///
/// Documents whose `shop_id` is not in the city's shop directory are
/// excluded up front; their product lines drop out with them because the
/// join key disappears. Document counts come from the (filtered) document
/// table itself, independent of line-item matches. Product lines whose
/// `document_id` matches no surviving document are dropped (inner join).
pub fn aggregate(
    documents: &[DatedTable<LossDocument>],
    products: &[DatedTable<LossProduct>],
    valid_shop_ids: &HashSet<String>,
) -> LossAggregation {
    let mut aggregation = LossAggregation::default();

    // document id -> (shop_id, type_id) for surviving documents only
    let mut key_by_document: HashMap<&str, (&str, &str)> = HashMap::new();
    for table in documents {
        for document in &table.rows {
            if !valid_shop_ids.contains(&document.shop_id) {
                aggregation.excluded_documents += 1;
                continue;
            }
            key_by_document.insert(&document.id, (&document.shop_id, &document.type_id));
            aggregation
                .measures
                .entry((document.shop_id.clone(), document.type_id.clone()))
                .or_default()
                .count += 1;
        }
    }

    if aggregation.excluded_documents > 0 {
        info!(
            excluded = aggregation.excluded_documents,
            "write-off documents with unknown shop id excluded"
        );
    }

    let mut orphaned = 0usize;
    for table in products {
        for product in &table.rows {
            match key_by_document.get(product.document_id.as_str()) {
                Some((shop_id, type_id)) => {
                    let measure = aggregation
                        .measures
                        .entry(((*shop_id).to_string(), (*type_id).to_string()))
                        .or_default();
                    measure.quantity += product.qty;
                    measure.amount += product.total_price;
                }
                None => orphaned += 1,
            }
        }
    }

    if orphaned > 0 {
        debug!(orphaned, "loss products without a matching document dropped");
    }

    aggregation
}
