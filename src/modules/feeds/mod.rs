pub mod models;
pub mod services;

pub use models::FetchOutcome;
pub use services::{FeedFetcher, HttpRemoteSource, RemoteSource};
