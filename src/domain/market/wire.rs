//! Wire types for `GET /global` and `GET /search/trending`.

use crate::domain::coin::wire::CurrencyValues;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResponse {
    pub data: GlobalDataResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalDataResponse {
    #[serde(default)]
    pub active_cryptocurrencies: Option<u64>,
    #[serde(default)]
    pub markets: Option<u64>,
    #[serde(default)]
    pub total_market_cap: CurrencyValues,
    #[serde(default)]
    pub total_volume: CurrencyValues,
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoinResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoinResponse {
    pub item: TrendingItemResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingItemResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}
