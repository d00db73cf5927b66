pub mod loss_type;
pub mod shop;

pub use loss_type::LossType;
pub use shop::Shop;
