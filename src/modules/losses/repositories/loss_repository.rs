use tracing::debug;

use crate::config::{CityConfig, RemoteConfig};
use crate::core::{DateRange, Result};
use crate::modules::feeds::services::{load_optional_table, DatedTable, FeedFetcher};
use crate::modules::losses::models::{LossDocument, LossProduct};

/// Loads the date-scoped write-off feeds (documents and product lines) for
/// one city over a reporting period. Missing days are skipped, never fatal.
pub struct LossRepository<'a> {
    fetcher: &'a FeedFetcher,
    remote: &'a RemoteConfig,
}

impl<'a> LossRepository<'a> {
    pub fn new(fetcher: &'a FeedFetcher, remote: &'a RemoteConfig) -> Self {
        Self { fetcher, remote }
    }

    pub async fn load_documents(
        &self,
        city: &CityConfig,
        range: DateRange,
    ) -> Result<Vec<DatedTable<LossDocument>>> {
        let mut tables = Vec::new();
        for date in range {
            let remote_path = self.remote.loss_path(&city.code, date);
            let cache_name = format!("loss_{}_{}.csv", city.code, date.format("%Y-%m-%d"));

            if let Some(rows) =
                load_optional_table::<LossDocument>(self.fetcher, &remote_path, &cache_name).await?
            {
                debug!(city = %city.code, %date, documents = rows.len(), "loss feed loaded");
                tables.push(DatedTable::new(date, rows));
            }
        }
        Ok(tables)
    }

    pub async fn load_products(
        &self,
        city: &CityConfig,
        range: DateRange,
    ) -> Result<Vec<DatedTable<LossProduct>>> {
        let mut tables = Vec::new();
        for date in range {
            let remote_path = self.remote.loss_product_path(&city.code, date);
            let cache_name = format!("lossproduct_{}_{}.csv", city.code, date.format("%Y-%m-%d"));

            if let Some(rows) =
                load_optional_table::<LossProduct>(self.fetcher, &remote_path, &cache_name).await?
            {
                debug!(city = %city.code, %date, products = rows.len(), "loss-product feed loaded");
                tables.push(DatedTable::new(date, rows));
            }
        }
        Ok(tables)
    }
}
