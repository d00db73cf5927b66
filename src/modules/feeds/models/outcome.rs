use serde::Serialize;

/// Result of asking the cache/fetch orchestrator for one remote file.
///
/// Transfer failures travel on the error channel; an outcome is only
/// produced when the request itself resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchOutcome {
    /// The file was already in the local cache; the remote was not contacted
    Cached,
    /// The file was transferred from the remote and written to the cache
    Downloaded,
    /// The remote reported that no such file exists
    NotFound,
}

impl FetchOutcome {
    /// True when a local cache file is available after this outcome.
    pub fn is_available(&self) -> bool {
        !matches!(self, FetchOutcome::NotFound)
    }
}
