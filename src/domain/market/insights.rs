//! Top gainers and losers over a coin snapshot.

use crate::domain::coin::{Coin, CoinSnapshot};

/// How many coins each movers list holds.
pub const TOP_MOVERS: usize = 5;

/// Gainers and losers computed from the same snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketMovers<'a> {
    pub gainers: Vec<&'a Coin>,
    pub losers: Vec<&'a Coin>,
}

/// The five coins with the highest 24h change, missing change read as 0.
/// Ties keep snapshot order.
pub fn top_gainers(snapshot: &CoinSnapshot) -> Vec<&Coin> {
    let mut coins: Vec<&Coin> = snapshot.iter().collect();
    coins.sort_by(|a, b| b.change_24h_or_zero().cmp(&a.change_24h_or_zero()));
    coins.truncate(TOP_MOVERS);
    coins
}

/// The five coins with the lowest 24h change, missing change read as 0.
/// Ties keep snapshot order.
pub fn top_losers(snapshot: &CoinSnapshot) -> Vec<&Coin> {
    let mut coins: Vec<&Coin> = snapshot.iter().collect();
    coins.sort_by(|a, b| a.change_24h_or_zero().cmp(&b.change_24h_or_zero()));
    coins.truncate(TOP_MOVERS);
    coins
}

pub fn market_movers(snapshot: &CoinSnapshot) -> MarketMovers<'_> {
    MarketMovers {
        gainers: top_gainers(snapshot),
        losers: top_losers(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_support::coin;

    fn ids(coins: &[&Coin]) -> Vec<String> {
        coins.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_gainers_and_losers_top_five() {
        let snapshot = CoinSnapshot::new(
            (0..12)
                .map(|i| {
                    let change = (i as i32 - 6).to_string();
                    coin(&format!("c{i}"), "1", Some(change.as_str()))
                })
                .collect(),
        );
        let movers = market_movers(&snapshot);
        assert_eq!(ids(&movers.gainers), vec!["c11", "c10", "c9", "c8", "c7"]);
        assert_eq!(ids(&movers.losers), vec!["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_missing_change_counts_as_zero() {
        let snapshot = CoinSnapshot::new(vec![
            coin("down", "1", Some("-1")),
            coin("none", "1", None),
            coin("up", "1", Some("1")),
        ]);
        assert_eq!(ids(&top_gainers(&snapshot)), vec!["up", "none", "down"]);
        assert_eq!(ids(&top_losers(&snapshot)), vec!["down", "none", "up"]);
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let snapshot = CoinSnapshot::new(vec![
            coin("a", "1", Some("2")),
            coin("b", "1", None),
            coin("c", "1", Some("2")),
            coin("d", "1", Some("0")),
        ]);
        assert_eq!(ids(&top_gainers(&snapshot)), vec!["a", "c", "b", "d"]);
        assert_eq!(ids(&top_losers(&snapshot)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_small_snapshot() {
        let snapshot = CoinSnapshot::new(vec![coin("only", "1", Some("3"))]);
        assert_eq!(top_gainers(&snapshot).len(), 1);
        assert_eq!(top_losers(&snapshot).len(), 1);
        assert!(top_gainers(&CoinSnapshot::default()).is_empty());
    }
}
