use actix_web::{error::ResponseError, web, HttpResponse};
use tracing::error;

use crate::config::Config;
use crate::core::Result;
use crate::modules::feeds::services::FeedFetcher;
use crate::modules::reports::models::{
    AggregateMeasure, GroupRollup, LeaderboardEntry, MeasureChange, ReportOutput, ReportRequest,
    ReportRow, SummaryStats,
};
use crate::modules::reports::services::ReportService;

/// Measure values with decimals rendered as strings for JSON precision
#[derive(Debug, serde::Serialize)]
pub struct MeasureResponse {
    pub count: i64,
    pub amount: String,
    pub quantity: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ChangeResponse {
    pub count: i64,
    pub count_pct: String,
    pub amount: String,
    pub amount_pct: String,
    pub quantity: String,
    pub quantity_pct: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ReportRowResponse {
    pub city: String,
    pub shop_id: String,
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_type_name: Option<String>,
    pub current: MeasureResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<MeasureResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeResponse>,
}

#[derive(Debug, serde::Serialize)]
pub struct LeaderboardResponse {
    pub city: String,
    pub shop_name: String,
    pub measure: MeasureResponse,
}

#[derive(Debug, serde::Serialize)]
pub struct RollupResponse {
    pub key: String,
    pub measure: MeasureResponse,
}

#[derive(Debug, serde::Serialize)]
pub struct SummaryResponse {
    pub row_count: usize,
    pub totals: MeasureResponse,
    pub average_count_per_shop: String,
    pub top_shops: Vec<LeaderboardResponse>,
    pub city_rollups: Vec<RollupResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_rollups: Vec<RollupResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_rollups: Vec<RollupResponse>,
}

#[derive(Debug, serde::Serialize)]
pub struct ReportResponse {
    pub rows: Vec<ReportRowResponse>,
    pub summary: SummaryResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl From<AggregateMeasure> for MeasureResponse {
    fn from(measure: AggregateMeasure) -> Self {
        Self {
            count: measure.count,
            amount: measure.amount.to_string(),
            quantity: measure.quantity.to_string(),
        }
    }
}

impl From<MeasureChange> for ChangeResponse {
    fn from(change: MeasureChange) -> Self {
        Self {
            count: change.count,
            count_pct: change.count_pct.round_dp(1).to_string(),
            amount: change.amount.to_string(),
            amount_pct: change.amount_pct.round_dp(1).to_string(),
            quantity: change.quantity.to_string(),
            quantity_pct: change.quantity_pct.round_dp(1).to_string(),
        }
    }
}

impl From<ReportRow> for ReportRowResponse {
    fn from(row: ReportRow) -> Self {
        Self {
            city: row.city,
            shop_id: row.shop_id,
            shop_name: row.shop_name,
            loss_type_id: row.loss_type_id,
            loss_type_name: row.loss_type_name,
            current: MeasureResponse::from(row.current),
            previous: row
                .comparison
                .map(|comparison| MeasureResponse::from(comparison.previous)),
            change: row
                .comparison
                .map(|comparison| ChangeResponse::from(comparison.change)),
        }
    }
}

impl From<LeaderboardEntry> for LeaderboardResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            city: entry.city,
            shop_name: entry.shop_name,
            measure: MeasureResponse::from(entry.measure),
        }
    }
}

impl From<GroupRollup> for RollupResponse {
    fn from(rollup: GroupRollup) -> Self {
        Self {
            key: rollup.key,
            measure: MeasureResponse::from(rollup.measure),
        }
    }
}

impl From<SummaryStats> for SummaryResponse {
    fn from(summary: SummaryStats) -> Self {
        Self {
            row_count: summary.row_count,
            totals: MeasureResponse::from(summary.totals),
            average_count_per_shop: summary.average_count_per_shop.to_string(),
            top_shops: summary
                .top_shops
                .into_iter()
                .map(LeaderboardResponse::from)
                .collect(),
            city_rollups: summary
                .city_rollups
                .into_iter()
                .map(RollupResponse::from)
                .collect(),
            type_rollups: summary
                .type_rollups
                .into_iter()
                .map(RollupResponse::from)
                .collect(),
            group_rollups: summary
                .group_rollups
                .into_iter()
                .map(RollupResponse::from)
                .collect(),
        }
    }
}

impl From<ReportOutput> for ReportResponse {
    fn from(output: ReportOutput) -> Self {
        Self {
            rows: output.rows.into_iter().map(ReportRowResponse::from).collect(),
            summary: SummaryResponse::from(output.summary),
            artifact: output
                .artifact
                .map(|path| path.display().to_string()),
        }
    }
}

/// POST /reports/generate
///
/// Runs the consolidation pipeline for the requested report kind, period
/// and city selection, and returns the ordered rows plus summary.
pub async fn generate_report(
    fetcher: web::Data<FeedFetcher>,
    config: web::Data<Config>,
    request: web::Json<ReportRequest>,
) -> HttpResponse {
    match handle_generate_report(fetcher, config, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            error!("Report generation failed: {}", err);
            err.error_response()
        }
    }
}

async fn handle_generate_report(
    fetcher: web::Data<FeedFetcher>,
    config: web::Data<Config>,
    request: ReportRequest,
) -> Result<ReportResponse> {
    let service = ReportService::new(fetcher.into_inner(), config.into_inner());
    let output = service.generate(request).await?;
    Ok(ReportResponse::from(output))
}

/// Configure routes for the reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/generate", web::post().to(generate_report)));
}
