use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::Result;
use crate::modules::feeds::services::decoder::decode_records;
use crate::modules::feeds::services::fetcher::FeedFetcher;

/// Fetch and decode one feed file, absorbing per-file failures.
///
/// A file that is missing, fails to transfer, or fails to decode is logged
/// and reported as `None` — it contributes nothing and the run continues.
/// Connection-level errors still propagate and abort the run.
pub async fn load_optional_table<T: DeserializeOwned>(
    fetcher: &FeedFetcher,
    remote_path: &str,
    cache_name: &str,
) -> Result<Option<Vec<T>>> {
    let content = match fetcher.fetch_text(remote_path, cache_name).await {
        Ok(Some(content)) => content,
        Ok(None) => {
            warn!(path = remote_path, "feed file not found, skipping");
            return Ok(None);
        }
        Err(err) if err.is_per_file() => {
            warn!(path = remote_path, error = %err, "feed file unavailable, skipping");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    match decode_records(&content) {
        Ok(rows) => Ok(Some(rows)),
        Err(err) => {
            warn!(path = remote_path, error = %err, "feed file undecodable, skipping");
            Ok(None)
        }
    }
}
