pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CartItem, Receipt};
pub use repositories::SalesRepository;
