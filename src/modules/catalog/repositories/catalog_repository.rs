use tracing::info;

use crate::config::{CityConfig, RemoteConfig};
use crate::core::Result;
use crate::modules::catalog::models::{LossType, Shop};
use crate::modules::feeds::services::{load_optional_table, FeedFetcher};

/// Loads the reference tables that anchor every report row: the per-city
/// shop directory and the global write-off type table.
pub struct CatalogRepository<'a> {
    fetcher: &'a FeedFetcher,
    remote: &'a RemoteConfig,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(fetcher: &'a FeedFetcher, remote: &'a RemoteConfig) -> Self {
        Self { fetcher, remote }
    }

    /// Shop directory for one city. `None` when the file is unavailable;
    /// the caller decides whether that skips the city.
    pub async fn load_shops(&self, city: &CityConfig) -> Result<Option<Vec<Shop>>> {
        let remote_path = self.remote.shop_path(&city.code);
        let cache_name = format!("shop_{}.csv", city.code);

        let shops: Option<Vec<Shop>> =
            load_optional_table(self.fetcher, &remote_path, &cache_name).await?;

        if let Some(shops) = &shops {
            info!(city = %city.name, shops = shops.len(), "shop directory loaded");
        }
        Ok(shops)
    }

    /// Global write-off type table. `None` when unavailable; loss reports
    /// cannot proceed without it.
    pub async fn load_loss_types(&self) -> Result<Option<Vec<LossType>>> {
        let remote_path = self.remote.loss_type_path();

        let types: Option<Vec<LossType>> =
            load_optional_table(self.fetcher, &remote_path, "losstype.csv").await?;

        if let Some(types) = &types {
            info!(types = types.len(), "write-off type reference loaded");
        }
        Ok(types)
    }
}
