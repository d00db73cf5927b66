use std::collections::HashMap;

use crate::config::CityConfig;
use crate::modules::catalog::models::{LossType, Shop};
use crate::modules::losses::services::LossKey;
use crate::modules::reports::models::{AggregateMeasure, PeriodComparison, ReportRow};

/// Builds the final row set for one city by crossing the reference tables
/// against the aggregation result. Every reference entity appears exactly
/// once; keys absent from the aggregation map default to zero measures, so
/// data availability never changes the row count.

/// Sales rows: one per shop.
pub fn assemble_sales(
    city: &CityConfig,
    shops: &[Shop],
    measures: &HashMap<String, AggregateMeasure>,
) -> Vec<ReportRow> {
    shops
        .iter()
        .map(|shop| ReportRow {
            city: city.name.clone(),
            shop_id: shop.id.clone(),
            shop_name: shop.name.clone(),
            loss_type_id: None,
            loss_type_name: None,
            current: measures.get(&shop.id).copied().unwrap_or_default(),
            comparison: None,
        })
        .collect()
}

/// Loss rows: the full shop × write-off-type cross product.
///
/// A shop whose documents were all excluded upstream still gets its rows;
/// exclusion affects measures, never row presence.
pub fn assemble_losses(
    city: &CityConfig,
    shops: &[Shop],
    loss_types: &[LossType],
    measures: &HashMap<LossKey, AggregateMeasure>,
) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(shops.len() * loss_types.len());
    for shop in shops {
        for loss_type in loss_types {
            let key = (shop.id.clone(), loss_type.id.clone());
            rows.push(ReportRow {
                city: city.name.clone(),
                shop_id: shop.id.clone(),
                shop_name: shop.name.clone(),
                loss_type_id: Some(loss_type.id.clone()),
                loss_type_name: Some(loss_type.name.clone()),
                current: measures.get(&key).copied().unwrap_or_default(),
                comparison: None,
            });
        }
    }
    rows
}

/// Comparison rows: both periods looked up against the same shop table and
/// zipped per shop. `current` carries the later period; the earlier one and
/// the deltas ride in `comparison`.
pub fn assemble_sales_comparison(
    city: &CityConfig,
    shops: &[Shop],
    base: &HashMap<String, AggregateMeasure>,
    current: &HashMap<String, AggregateMeasure>,
) -> Vec<ReportRow> {
    shops
        .iter()
        .map(|shop| {
            let previous = base.get(&shop.id).copied().unwrap_or_default();
            let current = current.get(&shop.id).copied().unwrap_or_default();
            ReportRow {
                city: city.name.clone(),
                shop_id: shop.id.clone(),
                shop_name: shop.name.clone(),
                loss_type_id: None,
                loss_type_name: None,
                current,
                comparison: Some(PeriodComparison::between(previous, &current)),
            }
        })
        .collect()
}
