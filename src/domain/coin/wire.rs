//! Wire types for the coin endpoints.
//!
//! Every field the upstream may omit or send as `null` is optional here;
//! defaults are applied once during conversion.

use serde::{Deserialize, Serialize};

/// One row of `GET /coins/markets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarketResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<SparklineResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparklineResponse {
    #[serde(default)]
    pub price: Vec<Option<f64>>,
}

/// `GET /coins/{id}` (only the fields the detail view reads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetailResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<CoinImageResponse>,
    #[serde(default)]
    pub market_data: Option<CoinMarketDataResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinImageResponse {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinMarketDataResponse {
    #[serde(default)]
    pub current_price: CurrencyValues,
    #[serde(default)]
    pub market_cap: CurrencyValues,
    #[serde(default)]
    pub total_volume: CurrencyValues,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
}

/// A per-currency map such as `{"usd": 67000.0, "eur": 61000.0}`.
pub type CurrencyValues = std::collections::HashMap<String, Option<f64>>;
