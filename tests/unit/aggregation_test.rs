// Property tests for the join & aggregation engine.
//
// The engine is a pure function of its input tables: running it twice must
// give identical maps, row order must not matter, and totals must be
// conserved — every matched line item lands in exactly one bucket.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use storefeed::modules::feeds::services::DatedTable;
use storefeed::modules::losses::models::{LossDocument, LossProduct};
use storefeed::modules::losses::services::loss_aggregator;
use storefeed::modules::sales::models::{CartItem, Receipt};
use storefeed::modules::sales::services::sales_aggregator;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

/// Receipts R0..Rn spread over shops S0..S3, and items that reference
/// receipt ids R0..R(n+3) — indexes past the receipt table are orphans.
fn sales_input() -> impl Strategy<Value = (Vec<Receipt>, Vec<CartItem>)> {
    let receipts = prop::collection::vec(0u8..4, 0..20).prop_map(|shops| {
        shops
            .iter()
            .enumerate()
            .map(|(index, shop)| Receipt {
                id: format!("R{index}"),
                shop_id: format!("S{shop}"),
            })
            .collect::<Vec<_>>()
    });
    let items = prop::collection::vec((0u8..23, 0u16..100, 0u32..10_000), 0..40).prop_map(
        |raw| {
            raw.iter()
                .map(|(receipt, qty, cents)| CartItem {
                    receipt_id: format!("R{receipt}"),
                    qty: Decimal::from(*qty),
                    total_price: Decimal::new(i64::from(*cents), 2),
                })
                .collect::<Vec<_>>()
        },
    );
    (receipts, items)
}

proptest! {
    #[test]
    fn test_aggregation_is_idempotent((receipts, items) in sales_input()) {
        let receipts = vec![DatedTable::new(day(), receipts)];
        let items = vec![DatedTable::new(day(), items)];

        let first = sales_aggregator::aggregate(&receipts, &items);
        let second = sales_aggregator::aggregate(&receipts, &items);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_aggregation_is_order_independent((receipts, items) in sales_input()) {
        let forward = sales_aggregator::aggregate(
            &[DatedTable::new(day(), receipts.clone())],
            &[DatedTable::new(day(), items.clone())],
        );

        let mut reversed_receipts = receipts;
        reversed_receipts.reverse();
        let mut reversed_items = items;
        reversed_items.reverse();
        let backward = sales_aggregator::aggregate(
            &[DatedTable::new(day(), reversed_receipts)],
            &[DatedTable::new(day(), reversed_items)],
        );

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_totals_are_conserved((receipts, items) in sales_input()) {
        let known_receipts: HashSet<&str> =
            receipts.iter().map(|receipt| receipt.id.as_str()).collect();
        let matched_amount: Decimal = items
            .iter()
            .filter(|item| known_receipts.contains(item.receipt_id.as_str()))
            .map(|item| item.total_price)
            .sum();
        let receipt_count = receipts.len() as i64;

        let measures = sales_aggregator::aggregate(
            &[DatedTable::new(day(), receipts)],
            &[DatedTable::new(day(), items)],
        );

        let total_amount: Decimal = measures.values().map(|m| m.amount).sum();
        let total_count: i64 = measures.values().map(|m| m.count).sum();

        prop_assert_eq!(total_amount, matched_amount);
        prop_assert_eq!(total_count, receipt_count);
    }

    #[test]
    fn test_measures_never_go_negative((receipts, items) in sales_input()) {
        let measures = sales_aggregator::aggregate(
            &[DatedTable::new(day(), receipts)],
            &[DatedTable::new(day(), items)],
        );

        for measure in measures.values() {
            prop_assert!(measure.count >= 0);
            prop_assert!(measure.amount >= Decimal::ZERO);
            prop_assert!(measure.quantity >= Decimal::ZERO);
        }
    }
}

#[test]
fn test_loss_aggregation_is_idempotent() {
    let documents = vec![DatedTable::new(
        day(),
        vec![
            LossDocument {
                id: "D1".to_string(),
                shop_id: "S1".to_string(),
                type_id: "T1".to_string(),
            },
            LossDocument {
                id: "D2".to_string(),
                shop_id: "GHOST".to_string(),
                type_id: "T1".to_string(),
            },
        ],
    )];
    let products = vec![DatedTable::new(
        day(),
        vec![LossProduct {
            document_id: "D1".to_string(),
            qty: Decimal::ONE,
            total_price: Decimal::new(999, 2),
        }],
    )];
    let valid: HashSet<String> = ["S1".to_string()].into();

    let first = loss_aggregator::aggregate(&documents, &products, &valid);
    let second = loss_aggregator::aggregate(&documents, &products, &valid);
    assert_eq!(first.measures, second.measures);
    assert_eq!(first.excluded_documents, 1);
    assert_eq!(second.excluded_documents, 1);
}
