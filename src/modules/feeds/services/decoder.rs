use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::core::{AppError, Result};

/// One decoded feed table together with the calendar day it was sourced
/// from. Reference tables (shops, loss types) are not date-scoped and are
/// handled as plain `Vec`s.
#[derive(Debug, Clone)]
pub struct DatedTable<T> {
    pub date: NaiveDate,
    pub rows: Vec<T>,
}

impl<T> DatedTable<T> {
    pub fn new(date: NaiveDate, rows: Vec<T>) -> Self {
        Self { date, rows }
    }
}

/// Decode a pipe-delimited payload with a header row into typed records.
///
/// Every text field is trimmed of surrounding whitespace. Structural
/// problems (missing columns, broken quoting) fail the whole file with a
/// decode error; the caller treats that file as unavailable.
pub fn decode_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record.map_err(|err| AppError::decode(err.to_string()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Normalize a numeric feed cell: the upstream export writes decimals with
/// a comma separator, and occasionally emits garbage. A cell that does not
/// parse after the comma fix-up degrades to zero instead of failing the row.
pub fn parse_decimal_lenient(raw: &str) -> Decimal {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Serde adapter for `qty` / `total_price` columns using
/// [`parse_decimal_lenient`].
pub fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_decimal_lenient(&raw))
}
