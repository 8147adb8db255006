use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
    pub price: i64,
    pub source: String,
}

impl SourceResult {
    pub fn new(price: i64, source: impl Into<String>) -> SourceResult {
        SourceResult {
            price,
            source: source.into(),
        }
    }
}

/// Winning source and the price it pays: the second highest bid overall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub price: i64,
    pub source: String,
}

/// Running first and second place across all sources.
///
/// Holds `first.price >= second.price` whenever both are set.
#[derive(Debug, Default)]
pub struct Leaderboard {
    first: Option<SourceResult>,
    second: Option<SourceResult>,
}

impl Leaderboard {
    pub fn new() -> Leaderboard {
        Leaderboard::default()
    }

    /// An equal price never displaces a holder, so when sources tie on the
    /// top price the first to arrive keeps the win.
    pub fn add(&mut self, result: SourceResult) {
        let first = self.first.as_ref().map(|r| r.price);
        let second = self.second.as_ref().map(|r| r.price);
        match (first, second) {
            (None, _) => self.first = Some(result),
            (Some(f), _) if result.price > f => self.second = self.first.replace(result),
            (_, Some(s)) if result.price <= s => {}
            _ => self.second = Some(result),
        }
    }

    pub fn winner(self) -> Winner {
        Winner {
            source: self.first.map(|r| r.source).unwrap_or_default(),
            price: self.second.map(|r| r.price).unwrap_or_default(),
        }
    }
}

impl Extend<SourceResult> for Leaderboard {
    fn extend<T: IntoIterator<Item = SourceResult>>(&mut self, iter: T) {
        iter.into_iter().for_each(|r| self.add(r));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<SourceResult> {
        vec![
            SourceResult::new(5, "fibo"),
            SourceResult::new(3, "fibo"),
            SourceResult::new(8, "fibo"),
            SourceResult::new(3, "primes"),
            SourceResult::new(5, "primes"),
            SourceResult::new(7, "primes"),
        ]
    }

    #[test]
    fn second_price_from_other_source() {
        let mut board = Leaderboard::new();
        board.extend(results());
        assert_eq!(
            board.winner(),
            Winner {
                price: 7,
                source: "fibo".to_owned()
            }
        );
    }

    #[test]
    fn any_arrival_order() {
        let expected = Winner {
            price: 7,
            source: "fibo".to_owned(),
        };
        let mut input = results();
        for shift in 0..input.len() {
            input.rotate_left(1);
            let mut board = Leaderboard::new();
            board.extend(input.iter().cloned());
            assert_eq!(board.winner(), expected, "rotation {shift}");

            let mut board = Leaderboard::new();
            board.extend(input.iter().rev().cloned());
            assert_eq!(board.winner(), expected, "reversed rotation {shift}");
        }
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(Leaderboard::new().winner(), Winner::default());

        let mut board = Leaderboard::new();
        board.add(SourceResult::new(9, "solo"));
        assert_eq!(
            board.winner(),
            Winner {
                price: 0,
                source: "solo".to_owned()
            }
        );
    }

    #[test]
    fn equal_price_keeps_holder() {
        let mut board = Leaderboard::new();
        board.add(SourceResult::new(9, "early"));
        board.add(SourceResult::new(9, "late"));
        board.add(SourceResult::new(9, "later"));
        assert_eq!(
            board.winner(),
            Winner {
                price: 9,
                source: "early".to_owned()
            }
        );
    }

    #[test]
    fn serializes_as_price_and_source() {
        let winner = Winner {
            price: 7,
            source: "/primes".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&winner).unwrap(),
            r#"{"price":7,"source":"/primes"}"#
        );
    }
}
