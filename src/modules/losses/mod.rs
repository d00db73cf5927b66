pub mod models;
pub mod repositories;
pub mod services;

pub use models::{LossDocument, LossProduct};
pub use repositories::LossRepository;
