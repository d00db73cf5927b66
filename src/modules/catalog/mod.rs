pub mod models;
pub mod repositories;

pub use models::{LossType, Shop};
pub use repositories::CatalogRepository;
