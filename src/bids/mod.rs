mod aggregator;
mod bid;
mod leaderboard;
mod sender;
mod source;

pub use aggregator::Aggregator;
pub use bid::{top_two, Bid};
pub use leaderboard::{Leaderboard, SourceResult, Winner};
pub use sender::{
    factory_fn, sender_fn, HttpSender, Reply, ReqwestSender, ReqwestSenderFactory, SenderFactory,
};
pub use source::{fetch_bids, FetchError};
