use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use crate::modules::reports::models::{
    AggregateMeasure, GroupDim, GroupRollup, LeaderboardEntry, ReportKind, ReportRow, SummaryStats,
};

/// Leaderboard depth shown in every summary.
const TOP_SHOPS: usize = 5;

/// Order the assembled rows and derive the presentation summary.
///
/// Pure transform: no measure is recomputed here beyond sums, means and the
/// ordering the report kind asks for.
pub fn finalize(
    kind: ReportKind,
    rows: Vec<ReportRow>,
    group_by: &[GroupDim],
) -> (Vec<ReportRow>, SummaryStats) {
    let rows = match kind {
        ReportKind::DetailedLosses => drop_zero_rows(rows),
        _ => rows,
    };

    let mut rows = rows;
    sort_rows(kind, &mut rows);

    let summary = summarize(&rows, group_by);
    (rows, summary)
}

/// Detailed write-off output hides rows with no activity at all — unless
/// that would hide every row, in which case the unfiltered set is kept so
/// an idle period still renders as explicit zeros.
fn drop_zero_rows(rows: Vec<ReportRow>) -> Vec<ReportRow> {
    let filtered: Vec<ReportRow> = rows.iter().filter(|row| row.has_activity()).cloned().collect();
    if filtered.is_empty() {
        rows
    } else {
        filtered
    }
}

fn sort_rows(kind: ReportKind, rows: &mut [ReportRow]) {
    match kind {
        ReportKind::Sales | ReportKind::Losses => rows.sort_by(|a, b| {
            a.city
                .cmp(&b.city)
                .then_with(|| b.current.amount.cmp(&a.current.amount))
                .then_with(|| b.current.count.cmp(&a.current.count))
                .then_with(|| a.shop_name.cmp(&b.shop_name))
        }),
        ReportKind::Comparison => rows.sort_by(|a, b| {
            let delta = |row: &ReportRow| {
                row.comparison
                    .map(|comparison| comparison.change.amount)
                    .unwrap_or_default()
            };
            a.city
                .cmp(&b.city)
                .then_with(|| delta(b).cmp(&delta(a)))
                .then_with(|| a.shop_name.cmp(&b.shop_name))
        }),
        ReportKind::DetailedLosses => rows.sort_by(|a, b| {
            a.city
                .cmp(&b.city)
                .then_with(|| a.shop_name.cmp(&b.shop_name))
                .then_with(|| b.current.amount.cmp(&a.current.amount))
                .then_with(|| a.loss_type_name.cmp(&b.loss_type_name))
        }),
    }
}

fn summarize(rows: &[ReportRow], group_by: &[GroupDim]) -> SummaryStats {
    let mut totals = AggregateMeasure::default();
    for row in rows {
        totals.absorb(&row.current);
    }

    let distinct_shops: HashSet<(&str, &str)> = rows
        .iter()
        .map(|row| (row.city.as_str(), row.shop_id.as_str()))
        .collect();
    let average_count_per_shop = if distinct_shops.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(totals.count) / Decimal::from(distinct_shops.len() as i64)).round_dp(1)
    };

    let has_types = rows.iter().any(|row| row.loss_type_name.is_some());

    SummaryStats {
        row_count: rows.len(),
        totals,
        average_count_per_shop,
        top_shops: top_shops(rows),
        city_rollups: rollup_by(rows, |row| Some(row.city.clone())),
        type_rollups: if has_types {
            rollup_by(rows, |row| row.loss_type_name.clone())
        } else {
            Vec::new()
        },
        group_rollups: group_rollups(rows, group_by),
    }
}

/// Per-shop totals ranked by amount, then document count.
fn top_shops(rows: &[ReportRow]) -> Vec<LeaderboardEntry> {
    let mut per_shop: BTreeMap<(String, String), AggregateMeasure> = BTreeMap::new();
    for row in rows {
        per_shop
            .entry((row.city.clone(), row.shop_name.clone()))
            .or_default()
            .absorb(&row.current);
    }

    let mut entries: Vec<LeaderboardEntry> = per_shop
        .into_iter()
        .map(|((city, shop_name), measure)| LeaderboardEntry {
            city,
            shop_name,
            measure,
        })
        .collect();

    entries.sort_by_key(|entry| Reverse((entry.measure.amount, entry.measure.count)));
    entries.truncate(TOP_SHOPS);
    entries
}

fn rollup_by<F>(rows: &[ReportRow], key_fn: F) -> Vec<GroupRollup>
where
    F: Fn(&ReportRow) -> Option<String>,
{
    let mut buckets: BTreeMap<String, AggregateMeasure> = BTreeMap::new();
    for row in rows {
        if let Some(key) = key_fn(row) {
            buckets.entry(key).or_default().absorb(&row.current);
        }
    }
    buckets
        .into_iter()
        .map(|(key, measure)| GroupRollup { key, measure })
        .collect()
}

/// Roll up by the requested dimensions. `Date` does not survive period
/// aggregation and is skipped; duplicate dimensions collapse.
fn group_rollups(rows: &[ReportRow], group_by: &[GroupDim]) -> Vec<GroupRollup> {
    let mut dims: Vec<GroupDim> = Vec::new();
    for dim in group_by {
        if *dim != GroupDim::Date && !dims.contains(dim) {
            dims.push(*dim);
        }
    }
    if dims.is_empty() {
        return Vec::new();
    }

    rollup_by(rows, |row| {
        let parts: Vec<String> = dims
            .iter()
            .map(|dim| match dim {
                GroupDim::City => Some(row.city.clone()),
                GroupDim::Shop => Some(row.shop_name.clone()),
                GroupDim::Type => row.loss_type_name.clone(),
                GroupDim::Date => None,
            })
            .collect::<Option<Vec<String>>>()?;
        Some(parts.join(" / "))
    })
}
