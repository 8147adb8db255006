pub mod bids;
pub mod config;
pub mod server;

pub use bids::{Aggregator, Winner};
pub use config::Config;
