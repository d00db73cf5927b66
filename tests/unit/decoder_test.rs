// Feed decoding: pipe delimiter, header row, locale decimal fix-up.
//
// The upstream export writes decimals with a comma separator and sometimes
// emits garbage in numeric cells; a broken cell must degrade to zero while
// the row survives, and only a structurally broken payload may fail a file.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefeed::core::AppError;
use storefeed::modules::feeds::services::{decode_records, parse_decimal_lenient};
use storefeed::modules::losses::models::LossProduct;
use storefeed::modules::sales::models::{CartItem, Receipt};

#[test]
fn test_receipt_feed_decodes_with_extra_columns_ignored() {
    let content = "id|shop_id|cashier\nR1|S1|anna\nR2|S2|boris\n";
    let receipts: Vec<Receipt> = decode_records(content).unwrap();
    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[0].id, "R1");
    assert_eq!(receipts[1].shop_id, "S2");
}

#[test]
fn test_decimal_comma_round_trip() {
    let content = "receipt_id|qty|total_price\nR1|12,5|1,99\n";
    let items: Vec<CartItem> = decode_records(content).unwrap();
    assert_eq!(items[0].qty, dec!(12.5));
    assert_eq!(items[0].total_price, dec!(1.99));
}

#[test]
fn test_malformed_numeric_cell_becomes_zero_not_an_error() {
    let content = "receipt_id|qty|total_price\nR1|abc|40.00\nR2|2|n/a\n";
    let items: Vec<CartItem> = decode_records(content).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].qty, Decimal::ZERO);
    assert_eq!(items[0].total_price, dec!(40.00));
    assert_eq!(items[1].qty, dec!(2));
    assert_eq!(items[1].total_price, Decimal::ZERO);
}

#[test]
fn test_loss_product_feed_uses_the_same_normalization() {
    let content = "document_id|qty|total_price\nD1|0,5|7,25\n";
    let products: Vec<LossProduct> = decode_records(content).unwrap();
    assert_eq!(products[0].qty, dec!(0.5));
    assert_eq!(products[0].total_price, dec!(7.25));
}

#[test]
fn test_fields_are_trimmed() {
    let content = "id|shop_id\n  R1 | S1  \n";
    let receipts: Vec<Receipt> = decode_records(content).unwrap();
    assert_eq!(receipts[0].id, "R1");
    assert_eq!(receipts[0].shop_id, "S1");
}

#[test]
fn test_structurally_corrupt_payload_is_a_decode_error() {
    let content = "id|shop_id\nR1\n";
    let result: Result<Vec<Receipt>, AppError> = decode_records(content);
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[test]
fn test_missing_expected_column_is_a_decode_error() {
    let content = "id|store\nR1|S1\n";
    let result: Result<Vec<Receipt>, AppError> = decode_records(content);
    assert!(matches!(result, Err(AppError::Decode(_))));
}

proptest! {
    // Whatever the cell contains, normalization never panics and never
    // produces a value that fails to round-trip through Decimal.
    #[test]
    fn test_lenient_parse_total(raw in "\\PC*") {
        let _ = parse_decimal_lenient(&raw);
    }

    // A well-formed number with a decimal comma always parses to the same
    // value as its dot-separated spelling.
    #[test]
    fn test_comma_and_dot_spellings_agree(int_part in 0u32..1_000_000u32, frac_part in 0u32..100u32) {
        let comma = format!("{int_part},{frac_part:02}");
        let dot = format!("{int_part}.{frac_part:02}");
        prop_assert_eq!(
            parse_decimal_lenient(&comma),
            parse_decimal_lenient(&dot)
        );
    }
}
