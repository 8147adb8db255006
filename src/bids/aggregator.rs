use std::{sync::Arc, time::Instant};

use futures::future::join_all;
use log::{debug, error, warn};
use tokio::sync::mpsc;

use super::bid::top_two;
use super::leaderboard::{Leaderboard, SourceResult, Winner};
use super::sender::{HttpSender, SenderFactory};
use super::source::fetch_bids;

const RESULT_QUEUE_CAPACITY: usize = 64;

/// Runs second-price auctions over remote bid sources.
///
/// Every source gets its own task and its own sender. A failing source only
/// loses its own bids. There is no deadline besides the senders' timeouts, so
/// a sender without one can hold an auction open indefinitely.
#[derive(Clone)]
pub struct Aggregator {
    factory: Arc<dyn SenderFactory>,
}

impl Aggregator {
    pub fn new(factory: Arc<dyn SenderFactory>) -> Aggregator {
        Aggregator { factory }
    }

    pub async fn winner(&self, sources: &[String]) -> Winner {
        let started = Instant::now();
        debug!("Auction over {} sources started", sources.len());
        let (tx, mut rx) = mpsc::channel(RESULT_QUEUE_CAPACITY);

        let tasks: Vec<_> = sources
            .iter()
            .map(|source| {
                let sender = self.factory.sender();
                tokio::spawn(collect_top_two(sender, source.clone(), tx.clone()))
            })
            .collect();

        // The queue closes once every task is joined and the last sender is gone.
        let supervisor = tokio::spawn(async move {
            for joined in join_all(tasks).await {
                if let Err(e) = joined {
                    error!("Bid source task failed: {}", e);
                }
            }
            drop(tx);
        });

        let mut board = Leaderboard::new();
        while let Some(result) = rx.recv().await {
            board.add(result);
        }
        if let Err(e) = supervisor.await {
            error!("Bid supervisor failed: {}", e);
        }

        let winner = board.winner();
        debug!(
            "Auction over {} sources finished in {:?}: {:?}",
            sources.len(),
            started.elapsed(),
            winner
        );
        winner
    }
}

async fn collect_top_two(sender: Box<dyn HttpSender>, source: String, tx: mpsc::Sender<SourceResult>) {
    let bids = match fetch_bids(sender.as_ref(), &source).await {
        Ok(bids) => bids,
        Err(e) => {
            warn!("Error on get bids for source ({:?}): {}", source, e);
            return;
        }
    };
    for bid in top_two(bids) {
        if tx.send(SourceResult::new(bid.price, source.clone())).await.is_err() {
            return;
        }
    }
}
