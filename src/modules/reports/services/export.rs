use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::Result;
use crate::modules::reports::models::{PeriodComparison, ReportKind, ReportRow};

/// Persist the finished row set as a pipe-delimited artifact in the
/// reports directory. One header row, then one line per report row; the
/// column set follows the report kind. Returns the written path.
pub fn write_report(
    kind: ReportKind,
    rows: &[ReportRow],
    reports_dir: &Path,
    period_label: &str,
) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = reports_dir.join(format!(
        "report_{}_{}_{}.csv",
        kind.as_str(),
        period_label,
        timestamp
    ));

    let mut writer = csv::WriterBuilder::new().delimiter(b'|').from_path(&path)?;

    writer.write_record(header(kind))?;
    for row in rows {
        writer.write_record(record(kind, row))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "report artifact written");
    Ok(path)
}

fn header(kind: ReportKind) -> &'static [&'static str] {
    match kind {
        ReportKind::Sales => &["city", "shop_id", "shop_name", "receipts", "revenue", "quantity"],
        ReportKind::Losses | ReportKind::DetailedLosses => &[
            "city",
            "shop_id",
            "shop_name",
            "loss_type_id",
            "loss_type_name",
            "documents",
            "amount",
            "quantity",
        ],
        ReportKind::Comparison => &[
            "city",
            "shop_id",
            "shop_name",
            "base_receipts",
            "base_revenue",
            "base_quantity",
            "receipts",
            "revenue",
            "quantity",
            "change_receipts",
            "change_revenue",
            "change_quantity",
            "change_receipts_pct",
            "change_revenue_pct",
            "change_quantity_pct",
        ],
    }
}

fn record(kind: ReportKind, row: &ReportRow) -> Vec<String> {
    match kind {
        ReportKind::Sales => vec![
            row.city.clone(),
            row.shop_id.clone(),
            row.shop_name.clone(),
            row.current.count.to_string(),
            row.current.amount.round_dp(2).to_string(),
            row.current.quantity.round_dp(1).to_string(),
        ],
        ReportKind::Losses | ReportKind::DetailedLosses => vec![
            row.city.clone(),
            row.shop_id.clone(),
            row.shop_name.clone(),
            row.loss_type_id.clone().unwrap_or_default(),
            row.loss_type_name.clone().unwrap_or_default(),
            row.current.count.to_string(),
            row.current.amount.round_dp(2).to_string(),
            row.current.quantity.round_dp(1).to_string(),
        ],
        ReportKind::Comparison => {
            let comparison = row
                .comparison
                .unwrap_or_else(|| PeriodComparison::between(Default::default(), &row.current));
            vec![
                row.city.clone(),
                row.shop_id.clone(),
                row.shop_name.clone(),
                comparison.previous.count.to_string(),
                comparison.previous.amount.round_dp(2).to_string(),
                comparison.previous.quantity.round_dp(1).to_string(),
                row.current.count.to_string(),
                row.current.amount.round_dp(2).to_string(),
                row.current.quantity.round_dp(1).to_string(),
                comparison.change.count.to_string(),
                comparison.change.amount.round_dp(2).to_string(),
                comparison.change.quantity.round_dp(1).to_string(),
                comparison.change.count_pct.round_dp(1).to_string(),
                comparison.change.amount_pct.round_dp(1).to_string(),
                comparison.change.quantity_pct.round_dp(1).to_string(),
            ]
        }
    }
}
