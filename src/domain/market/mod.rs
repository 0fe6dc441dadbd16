//! Market domain: global aggregates, trending coins, top movers.

#[cfg(feature = "http")]
pub mod client;
pub mod insights;
pub mod wire;

use crate::shared::{decimal_from_f64, CoinId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use insights::{market_movers, top_gainers, top_losers, MarketMovers, TOP_MOVERS};

// ─── GlobalStats ─────────────────────────────────────────────────────────────

/// Market-wide aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Total market capitalization keyed by currency code.
    pub total_market_cap: HashMap<String, Decimal>,
    /// Total 24h volume keyed by currency code.
    pub total_volume: HashMap<String, Decimal>,
    /// Share of total market cap keyed by coin symbol (`"btc"`, `"eth"`, ...).
    pub market_cap_percentage: HashMap<String, Decimal>,
    pub market_cap_change_24h: Option<Decimal>,
    pub active_cryptocurrencies: u64,
}

impl GlobalStats {
    pub fn market_cap(&self, vs_currency: &str) -> Decimal {
        self.total_market_cap
            .get(vs_currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn volume(&self, vs_currency: &str) -> Decimal {
        self.total_volume
            .get(vs_currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn dominance(&self, symbol: &str) -> Option<Decimal> {
        self.market_cap_percentage
            .get(&symbol.to_lowercase())
            .copied()
    }

    pub fn btc_dominance(&self) -> Option<Decimal> {
        self.dominance("btc")
    }
}

fn decimal_map(values: HashMap<String, Option<f64>>) -> HashMap<String, Decimal> {
    values
        .into_iter()
        .filter_map(|(k, v)| v.and_then(decimal_from_f64).map(|d| (k, d)))
        .collect()
}

impl From<wire::GlobalResponse> for GlobalStats {
    fn from(resp: wire::GlobalResponse) -> Self {
        let data = resp.data;
        Self {
            total_market_cap: decimal_map(data.total_market_cap),
            total_volume: decimal_map(data.total_volume),
            market_cap_percentage: decimal_map(data.market_cap_percentage),
            market_cap_change_24h: data
                .market_cap_change_percentage_24h_usd
                .and_then(decimal_from_f64),
            active_cryptocurrencies: data.active_cryptocurrencies.unwrap_or(0),
        }
    }
}

// ─── Trending ────────────────────────────────────────────────────────────────

/// A trending coin. `rank` is its 1-based position in the upstream list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub rank: u32,
    pub id: CoinId,
    pub name: String,
    pub symbol: String,
    pub thumb: String,
}

/// Decode a trending response, assigning ranks by position.
pub fn trending_from_response(resp: wire::TrendingResponse) -> Vec<TrendingEntry> {
    resp.coins
        .into_iter()
        .enumerate()
        .map(|(idx, c)| TrendingEntry {
            rank: idx as u32 + 1,
            id: CoinId::new(c.item.id),
            name: c.item.name,
            symbol: c.item.symbol,
            thumb: c.item.thumb.unwrap_or_default(),
        })
        .collect()
}

/// Global stats and trending list, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketOverview {
    pub global: GlobalStats,
    pub trending: Vec<TrendingEntry>,
}
