use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::measure::{AggregateMeasure, PeriodComparison};

/// One externally visible report line.
///
/// Created once during assembly — one per reference entity (shop, or shop ×
/// write-off type) — and immutable afterwards. Shops with no activity
/// appear with zero measures rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub city: String,
    pub shop_id: String,
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_type_name: Option<String>,
    pub current: AggregateMeasure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<PeriodComparison>,
}

impl ReportRow {
    /// True when the row carries any non-zero measure in either period.
    pub fn has_activity(&self) -> bool {
        !self.current.is_zero()
            || self
                .comparison
                .as_ref()
                .is_some_and(|comparison| !comparison.previous.is_zero())
    }
}

/// One entry of the top-N shop leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub city: String,
    pub shop_name: String,
    pub measure: AggregateMeasure,
}

/// Summed measures for one roll-up bucket (a city, a write-off type, or a
/// requested group-by combination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRollup {
    pub key: String,
    pub measure: AggregateMeasure,
}

/// Presentation-level statistics accompanying the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub row_count: usize,
    pub totals: AggregateMeasure,
    /// Mean document/receipt count per shop across the report
    pub average_count_per_shop: Decimal,
    pub top_shops: Vec<LeaderboardEntry>,
    pub city_rollups: Vec<GroupRollup>,
    /// Present for loss reports only
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_rollups: Vec<GroupRollup>,
    /// Roll-ups for the dimensions the caller asked to group by
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub group_rollups: Vec<GroupRollup>,
}

/// Everything `generate_report` hands back to the front end.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub rows: Vec<ReportRow>,
    pub summary: SummaryStats,
    /// Written artifact, when the request asked for an export
    pub artifact: Option<PathBuf>,
}
