use crate::core::{AppError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;

/// Remote file server configuration and feed path templates.
///
/// Every feed file the loader can ask for is derived from these templates;
/// nothing else in the pipeline knows how remote paths are spelled.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the file server, e.g. "http://feeds.example.net:2122"
    pub base_url: String,
    /// Root directory of the feed tree on the server
    pub root: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub fn from_env() -> Result<Self> {
        Ok(RemoteConfig {
            base_url: env::var("REMOTE_BASE_URL")
                .map_err(|_| AppError::Configuration("REMOTE_BASE_URL not set".to_string()))?,
            root: env::var("REMOTE_ROOT").unwrap_or_else(|_| "/www".to_string()),
            timeout_secs: env::var("REMOTE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid REMOTE_TIMEOUT_SECS".to_string()))?,
        })
    }

    /// Shop directory for one city: `<root>/shop_<city>.csv`
    pub fn shop_path(&self, city_code: &str) -> String {
        format!("{}/shop_{}.csv", self.root, city_code)
    }

    /// Global write-off type reference: `<root>/losstype.csv`
    pub fn loss_type_path(&self) -> String {
        format!("{}/losstype.csv", self.root)
    }

    /// Receipts for one city and day
    pub fn receipt_path(&self, city_code: &str, date: NaiveDate) -> String {
        format!(
            "{}/receipt/receipt_{}_{}.csv",
            self.root,
            city_code,
            date.format("%Y-%m-%d")
        )
    }

    /// Sale line items for one city and day
    pub fn cart_item_path(&self, city_code: &str, date: NaiveDate) -> String {
        format!(
            "{}/cartitem/cartitem_{}_{}.csv",
            self.root,
            city_code,
            date.format("%Y-%m-%d")
        )
    }

    /// Write-off documents for one city and day
    pub fn loss_path(&self, city_code: &str, date: NaiveDate) -> String {
        format!(
            "{}/loss/loss_{}_{}.csv",
            self.root,
            city_code,
            date.format("%Y-%m-%d")
        )
    }

    /// Write-off line items for one city and day
    pub fn loss_product_path(&self, city_code: &str, date: NaiveDate) -> String {
        format!(
            "{}/lossproduct/lossproduct_{}_{}.csv",
            self.root,
            city_code,
            date.format("%Y-%m-%d")
        )
    }
}
