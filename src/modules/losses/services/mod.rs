pub mod loss_aggregator;

pub use loss_aggregator::{LossAggregation, LossKey};
