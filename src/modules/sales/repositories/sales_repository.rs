use tracing::debug;

use crate::config::{CityConfig, RemoteConfig};
use crate::core::{DateRange, Result};
use crate::modules::feeds::services::{load_optional_table, DatedTable, FeedFetcher};
use crate::modules::sales::models::{CartItem, Receipt};

/// Loads the date-scoped sales feeds (receipts and cart items) for one
/// city over a reporting period.
///
/// Each missing or broken day contributes nothing; a city with no available
/// days still yields an empty list so downstream zero-fill can run.
pub struct SalesRepository<'a> {
    fetcher: &'a FeedFetcher,
    remote: &'a RemoteConfig,
}

impl<'a> SalesRepository<'a> {
    pub fn new(fetcher: &'a FeedFetcher, remote: &'a RemoteConfig) -> Self {
        Self { fetcher, remote }
    }

    pub async fn load_receipts(
        &self,
        city: &CityConfig,
        range: DateRange,
    ) -> Result<Vec<DatedTable<Receipt>>> {
        let mut tables = Vec::new();
        for date in range {
            let remote_path = self.remote.receipt_path(&city.code, date);
            let cache_name = format!("receipt_{}_{}.csv", city.code, date.format("%Y-%m-%d"));

            if let Some(rows) =
                load_optional_table::<Receipt>(self.fetcher, &remote_path, &cache_name).await?
            {
                debug!(city = %city.code, %date, receipts = rows.len(), "receipt feed loaded");
                tables.push(DatedTable::new(date, rows));
            }
        }
        Ok(tables)
    }

    pub async fn load_cart_items(
        &self,
        city: &CityConfig,
        range: DateRange,
    ) -> Result<Vec<DatedTable<CartItem>>> {
        let mut tables = Vec::new();
        for date in range {
            let remote_path = self.remote.cart_item_path(&city.code, date);
            let cache_name = format!("cartitem_{}_{}.csv", city.code, date.format("%Y-%m-%d"));

            if let Some(rows) =
                load_optional_table::<CartItem>(self.fetcher, &remote_path, &cache_name).await?
            {
                debug!(city = %city.code, %date, items = rows.len(), "cart-item feed loaded");
                tables.push(DatedTable::new(date, rows));
            }
        }
        Ok(tables)
    }
}
