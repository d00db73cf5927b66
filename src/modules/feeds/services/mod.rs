pub mod decoder;
pub mod fetcher;
pub mod loader;

pub use decoder::{decode_records, lenient_decimal, parse_decimal_lenient, DatedTable};
pub use fetcher::{FeedFetcher, HttpRemoteSource, RemoteSource};
pub use loader::load_optional_table;
