//! Wire types for `GET /coins/{id}/market_chart`.

use serde::{Deserialize, Serialize};

/// Each series is a list of `[timestamp_ms, value]` pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, Option<f64>)>,
}
