pub mod cart_item;
pub mod receipt;

pub use cart_item::CartItem;
pub use receipt::Receipt;
