pub mod sales_aggregator;
