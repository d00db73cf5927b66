pub mod loss_document;
pub mod loss_product;

pub use loss_document::LossDocument;
pub use loss_product::LossProduct;
