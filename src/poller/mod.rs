pub mod aggregator;
pub mod discovery;
pub mod fetcher;
pub mod scheduler;
