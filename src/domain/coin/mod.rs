//! Coin domain: coin-list records, single-coin detail, the shared snapshot.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::CoinId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use state::SortBy;

// ─── Coin ────────────────────────────────────────────────────────────────────

/// A decoded coin-list record.
///
/// Missing numeric fields from the upstream default to zero (prices, market
/// cap) or stay `None` (percentage changes, rank). The sparkline is empty
/// when not provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Decimal,
    pub change_1h: Option<Decimal>,
    pub change_24h: Option<Decimal>,
    pub change_7d: Option<Decimal>,
    pub sparkline: Vec<Decimal>,
}

impl Coin {
    /// 24h change with a missing value read as zero, the ordering key for
    /// movers and the coin table.
    pub fn change_24h_or_zero(&self) -> Decimal {
        self.change_24h.unwrap_or(Decimal::ZERO)
    }

    /// Upper-cased ticker for display.
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }
}

// ─── CoinDetail ──────────────────────────────────────────────────────────────

/// Single-coin detail shown next to a price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: CoinId,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    pub total_volume: Decimal,
    pub circulating_supply: Option<Decimal>,
}

// ─── CoinSnapshot ────────────────────────────────────────────────────────────

/// The most recently fetched coin list.
///
/// Immutable once built; a refresh replaces the whole snapshot. Clones share
/// the underlying list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinSnapshot {
    coins: Arc<Vec<Coin>>,
}

impl CoinSnapshot {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self {
            coins: Arc::new(coins),
        }
    }

    /// Decode a coin-list response, skipping (and logging) invalid records.
    pub fn from_responses(responses: Vec<wire::CoinMarketResponse>) -> Self {
        let mut coins = Vec::with_capacity(responses.len());
        for resp in responses {
            match Coin::try_from(resp) {
                Ok(coin) => coins.push(coin),
                Err(e) => tracing::warn!(error = %e, "Skipping invalid coin record"),
            }
        }
        Self::new(coins)
    }

    /// Resolve a coin by identifier.
    pub fn find(&self, id: &CoinId) -> Option<&Coin> {
        self.coins.iter().find(|c| &c.id == id)
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.coins.iter()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl<'a> IntoIterator for &'a CoinSnapshot {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingId,
    MissingMarketData(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Coin record has no identifier"),
            ValidationError::MissingMarketData(id) => {
                write!(f, "Coin {} has no market data", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}


#[cfg(test)]
mod tests {
    use super::test_support::coin;
    use super::*;

    #[test]
    fn test_snapshot_find() {
        let snapshot = CoinSnapshot::new(vec![
            coin("bitcoin", "67000", Some("1.5")),
            coin("ethereum", "3500", None),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.find(&CoinId::from("ethereum")).map(|c| c.name.as_str()),
            Some("Ethereum")
        );
        assert!(snapshot.find(&CoinId::from("dogecoin")).is_none());
    }

    #[test]
    fn test_snapshot_from_responses_skips_invalid() {
        let json = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 1.0},
            {"id": "", "symbol": "???", "name": "Broken"},
            {"id": "solana", "symbol": "sol", "name": "Solana"}
        ]"#;
        let responses: Vec<wire::CoinMarketResponse> = serde_json::from_str(json).unwrap();
        let snapshot = CoinSnapshot::from_responses(responses);
        let ids: Vec<&str> = snapshot.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "solana"]);
    }

    #[test]
    fn test_snapshot_clone_shares_list() {
        let a = CoinSnapshot::new(vec![coin("bitcoin", "1", None)]);
        let b = a.clone();
        assert!(std::ptr::eq(a.coins(), b.coins()));
    }

    #[test]
    fn test_change_24h_or_zero() {
        assert_eq!(coin("x", "1", None).change_24h_or_zero(), Decimal::ZERO);
        assert_eq!(
            coin("x", "1", Some("-2.5")).change_24h_or_zero(),
            Decimal::new(-25, 1)
        );
    }
}
