use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{CityConfig, Config};
use crate::core::{AppError, DateRange, Result};
use crate::modules::catalog::models::LossType;
use crate::modules::catalog::repositories::CatalogRepository;
use crate::modules::feeds::services::FeedFetcher;
use crate::modules::losses::repositories::LossRepository;
use crate::modules::losses::services::loss_aggregator;
use crate::modules::reports::models::{
    AggregateMeasure, ReportKind, ReportOutput, ReportRequest, ReportRow,
};
use crate::modules::reports::services::{assembler, export, formatter};
use crate::modules::sales::repositories::SalesRepository;
use crate::modules::sales::services::sales_aggregator;

/// The single entry point of the consolidation pipeline.
///
/// Every report variant runs the same stages — load reference data, load
/// the dated feeds per city, aggregate, assemble the zero-filled row set,
/// format — and differs only in which feeds are read and how rows are
/// assembled. Each call is a fresh, stateless computation; nothing is kept
/// between requests except the on-disk download cache.
pub struct ReportService {
    fetcher: Arc<FeedFetcher>,
    config: Arc<Config>,
}

impl ReportService {
    pub fn new(fetcher: Arc<FeedFetcher>, config: Arc<Config>) -> Self {
        Self { fetcher, config }
    }

    /// Generate the requested report.
    ///
    /// Per-file and per-city data problems degrade to zero-valued rows; the
    /// run only fails on an unreachable server, an unusable request, or a
    /// missing global reference table.
    pub async fn generate(&self, request: ReportRequest) -> Result<ReportOutput> {
        let plan = request.into_plan()?;

        let cities = self.config.select_cities(&plan.cities);
        if cities.is_empty() {
            return Err(AppError::validation(
                "City selector matches no configured city",
            ));
        }

        info!(
            kind = plan.kind.as_str(),
            period = %plan.period_label,
            cities = cities.len(),
            "report generation started"
        );

        if plan.clear_cache {
            self.fetcher.clear_cache().await?;
        }

        let catalog = CatalogRepository::new(&self.fetcher, &self.config.remote);

        // The write-off type table is global: without it the loss cross
        // product cannot be built and the whole run aborts.
        let loss_types = if plan.kind.needs_loss_types() {
            match catalog.load_loss_types().await? {
                Some(types) => Some(types),
                None => {
                    return Err(AppError::missing_reference(
                        "write-off type reference is unavailable",
                    ))
                }
            }
        } else {
            None
        };

        let mut rows: Vec<ReportRow> = Vec::new();
        for city in &cities {
            // A city without a shop directory has nothing to anchor its
            // rows to; it is skipped, not zero-filled.
            let Some(shops) = catalog.load_shops(city).await? else {
                warn!(city = %city.name, "shop directory unavailable, city skipped");
                continue;
            };

            let city_rows = match plan.kind {
                ReportKind::Sales => {
                    let measures = self.load_sales_measures(city, plan.period).await?;
                    assembler::assemble_sales(city, &shops, &measures)
                }
                ReportKind::Comparison => {
                    let base_period = plan.base_period.ok_or_else(|| {
                        AppError::internal("comparison plan lost its base period")
                    })?;
                    let base = self.load_sales_measures(city, base_period).await?;
                    let current = self.load_sales_measures(city, plan.period).await?;
                    assembler::assemble_sales_comparison(city, &shops, &base, &current)
                }
                ReportKind::Losses | ReportKind::DetailedLosses => {
                    let loss_types: &[LossType] = loss_types
                        .as_deref()
                        .ok_or_else(|| AppError::internal("loss plan lost its type table"))?;
                    let valid_shop_ids: HashSet<String> =
                        shops.iter().map(|shop| shop.id.clone()).collect();
                    let measures = self
                        .load_loss_measures(city, plan.period, &valid_shop_ids)
                        .await?;
                    assembler::assemble_losses(city, &shops, loss_types, &measures)
                }
            };
            rows.extend(city_rows);
        }

        let (rows, summary) = formatter::finalize(plan.kind, rows, &plan.group_by);

        let artifact = if plan.export {
            Some(export::write_report(
                plan.kind,
                &rows,
                &self.config.storage.reports_dir(),
                &plan.period_label,
            )?)
        } else {
            None
        };

        info!(
            kind = plan.kind.as_str(),
            rows = rows.len(),
            "report generation finished"
        );

        Ok(ReportOutput {
            rows,
            summary,
            artifact,
        })
    }

    async fn load_sales_measures(
        &self,
        city: &CityConfig,
        period: DateRange,
    ) -> Result<HashMap<String, AggregateMeasure>> {
        let sales = SalesRepository::new(&self.fetcher, &self.config.remote);
        let receipts = sales.load_receipts(city, period).await?;
        let cart_items = sales.load_cart_items(city, period).await?;
        Ok(sales_aggregator::aggregate(&receipts, &cart_items))
    }

    async fn load_loss_measures(
        &self,
        city: &CityConfig,
        period: DateRange,
        valid_shop_ids: &HashSet<String>,
    ) -> Result<HashMap<(String, String), AggregateMeasure>> {
        let losses = LossRepository::new(&self.fetcher, &self.config.remote);
        let documents = losses.load_documents(city, period).await?;
        let products = losses.load_products(city, period).await?;
        Ok(loss_aggregator::aggregate(&documents, &products, valid_shop_ids).measures)
    }
}
