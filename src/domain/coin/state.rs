//! Coin table view state: app-owned search text and sort order.

use super::{Coin, CoinSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Coin table ordering. Every variant sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    MarketCap,
    Price,
    #[serde(rename = "24h")]
    Change24h,
}

impl SortBy {
    fn key(&self, coin: &Coin) -> Decimal {
        match self {
            SortBy::MarketCap => coin.market_cap,
            SortBy::Price => coin.current_price,
            SortBy::Change24h => coin.change_24h_or_zero(),
        }
    }

    fn compare(&self, a: &Coin, b: &Coin) -> Ordering {
        self.key(b).cmp(&self.key(a))
    }
}

/// One rendered row of the coin table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinRow<'a> {
    /// Market-cap rank, or the 1-based row position when the rank is missing.
    pub rank: u32,
    pub coin: &'a Coin,
}

/// Search and sort settings for the coin table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinTable {
    pub query: String,
    pub sort_by: SortBy,
}

impl CoinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Case-insensitive substring match on name or symbol.
    pub fn matches(&self, coin: &Coin) -> bool {
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || coin.name.to_lowercase().contains(&needle)
            || coin.symbol.to_lowercase().contains(&needle)
    }

    /// Filter and sort the snapshot. Equal keys keep snapshot order.
    pub fn rows<'a>(&self, snapshot: &'a CoinSnapshot) -> Vec<CoinRow<'a>> {
        let mut coins: Vec<&Coin> = snapshot.iter().filter(|c| self.matches(c)).collect();
        coins.sort_by(|a, b| self.sort_by.compare(a, b));
        coins
            .into_iter()
            .enumerate()
            .map(|(idx, coin)| CoinRow {
                rank: coin.market_cap_rank.unwrap_or(idx as u32 + 1),
                coin,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_support::coin;
    use std::str::FromStr;

    fn snapshot() -> CoinSnapshot {
        let mut btc = coin("bitcoin", "67000", Some("1.0"));
        btc.symbol = "btc".into();
        btc.market_cap = Decimal::from(1_300_000_000_000i64);
        btc.market_cap_rank = Some(1);
        let mut eth = coin("ethereum", "3500", Some("4.0"));
        eth.symbol = "eth".into();
        eth.market_cap = Decimal::from(420_000_000_000i64);
        eth.market_cap_rank = Some(2);
        let mut doge = coin("dogecoin", "0.15", None);
        doge.symbol = "doge".into();
        CoinSnapshot::new(vec![doge, eth, btc])
    }

    fn ids(rows: &[CoinRow<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.coin.id.to_string()).collect()
    }

    #[test]
    fn test_default_sort_market_cap_desc() {
        let snap = snapshot();
        let rows = CoinTable::new().rows(&snap);
        assert_eq!(ids(&rows), vec!["bitcoin", "ethereum", "dogecoin"]);
        assert_eq!(rows[0].rank, 1);
        // Missing rank falls back to position.
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_sort_by_change_missing_is_zero() {
        let mut snap_coins = snapshot().coins().to_vec();
        snap_coins.push(coin("loser", "1", Some("-3")));
        let snap = CoinSnapshot::new(snap_coins);
        let rows = CoinTable::new().with_sort(SortBy::Change24h).rows(&snap);
        assert_eq!(ids(&rows), vec!["ethereum", "bitcoin", "dogecoin", "loser"]);
    }

    #[test]
    fn test_sort_by_price() {
        let snap = snapshot();
        let rows = CoinTable::new().with_sort(SortBy::Price).rows(&snap);
        assert_eq!(rows[0].coin.current_price, Decimal::from(67000));
        assert_eq!(
            rows[2].coin.current_price,
            Decimal::from_str("0.15").unwrap()
        );
    }

    #[test]
    fn test_search_name_or_symbol_case_insensitive() {
        let snap = snapshot();
        let rows = CoinTable::new().with_query("ETH").rows(&snap);
        assert_eq!(ids(&rows), vec!["ethereum"]);

        let rows = CoinTable::new().with_query("coin").rows(&snap);
        assert_eq!(ids(&rows), vec!["bitcoin", "dogecoin"]);

        let rows = CoinTable::new().with_query("zzz").rows(&snap);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_sort_by_serde() {
        let s: SortBy = serde_json::from_str("\"24h\"").unwrap();
        assert_eq!(s, SortBy::Change24h);
        let s: SortBy = serde_json::from_str("\"market_cap\"").unwrap();
        assert_eq!(s, SortBy::MarketCap);
    }
}
