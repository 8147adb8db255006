use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(default)]
    pub price: i64,
}

impl Bid {
    pub fn new(price: i64) -> Bid {
        Bid { price }
    }
}

/// Picks the two highest bids, highest first.
///
/// A bid equal to the current holder does not displace it.
pub fn top_two(bids: impl IntoIterator<Item = Bid>) -> Vec<Bid> {
    let mut first: Option<Bid> = None;
    let mut second: Option<Bid> = None;
    for bid in bids {
        match (first, second) {
            (None, _) => first = Some(bid),
            (Some(f), _) if bid.price > f.price => {
                second = first;
                first = Some(bid);
            }
            (_, None) => second = Some(bid),
            (_, Some(s)) if bid.price > s.price => second = Some(bid),
            _ => {}
        }
    }
    first.into_iter().chain(second).collect()
}
