use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::RemoteConfig;
use crate::core::{AppError, Result};
use crate::modules::feeds::models::FetchOutcome;

/// Read access to the remote file server.
///
/// `Ok(None)` is the remote's "no such file" answer. Failures to reach the
/// server at all surface as `AppError::Connection`; failures while moving
/// one file surface as `AppError::Transfer`.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn retrieve(&self, remote_path: &str) -> Result<Option<Vec<u8>>>;
}

/// Remote source over a plain HTTP file server.
pub struct HttpRemoteSource {
    client: Client,
    base_url: String,
}

impl HttpRemoteSource {
    pub fn new(remote: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(remote.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: remote.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn retrieve(&self, remote_path: &str) -> Result<Option<Vec<u8>>> {
        let url = format!("{}{}", self.base_url, remote_path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::transfer(format!(
                "{} responded with {}",
                url,
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(classify_transport_error)?;
        Ok(Some(body.to_vec()))
    }
}

/// A connect failure means the server is unreachable and the whole run must
/// stop; anything later in the exchange only loses the one file.
fn classify_transport_error(err: reqwest::Error) -> AppError {
    if err.is_connect() {
        AppError::connection(err.to_string())
    } else {
        AppError::transfer(err.to_string())
    }
}

/// Cache/fetch orchestrator: checks the on-disk cache before asking the
/// remote, and never re-fetches a file that is already cached.
pub struct FeedFetcher {
    source: Box<dyn RemoteSource>,
    cache_dir: PathBuf,
}

impl FeedFetcher {
    pub fn new(source: Box<dyn RemoteSource>, cache_dir: impl AsRef<Path>) -> Self {
        Self {
            source,
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    pub fn cache_path(&self, cache_name: &str) -> PathBuf {
        self.cache_dir.join(cache_name)
    }

    /// Ensure `remote_path` is present in the cache under `cache_name`.
    pub async fn fetch(&self, remote_path: &str, cache_name: &str) -> Result<FetchOutcome> {
        let local_path = self.cache_path(cache_name);

        if local_path.exists() {
            debug!(file = cache_name, "cache hit");
            return Ok(FetchOutcome::Cached);
        }

        match self.source.retrieve(remote_path).await? {
            Some(content) => {
                if let Some(parent) = local_path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&local_path, &content).await?;
                debug!(file = cache_name, bytes = content.len(), "downloaded");
                Ok(FetchOutcome::Downloaded)
            }
            None => {
                debug!(path = remote_path, "remote file not found");
                Ok(FetchOutcome::NotFound)
            }
        }
    }

    /// Fetch and read the file as text; `Ok(None)` when the remote has no
    /// such file.
    pub async fn fetch_text(&self, remote_path: &str, cache_name: &str) -> Result<Option<String>> {
        let outcome = self.fetch(remote_path, cache_name).await?;
        if !outcome.is_available() {
            return Ok(None);
        }
        let bytes = tokio::fs::read(self.cache_path(cache_name)).await?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Drop every cached file. The next fetch of each path re-downloads.
    pub async fn clear_cache(&self) -> Result<()> {
        if self.cache_dir.exists() {
            tokio::fs::remove_dir_all(&self.cache_dir).await?;
        }
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        info!("download cache cleared");
        Ok(())
    }
}
