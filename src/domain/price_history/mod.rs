//! Price history domain: per-coin series over a lookback window, chart stats.

#[cfg(feature = "http")]
pub mod client;
pub mod stats;
pub mod wire;

use crate::domain::coin::CoinDetail;
use crate::shared::serde_util::timestamp_ms;
use crate::shared::{decimal_from_f64, LookbackWindow};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use stats::ChartStats;

/// A single (timestamp, price) sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(with = "timestamp_ms")]
    pub time: DateTime<Utc>,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(time: DateTime<Utc>, price: Decimal) -> Self {
        Self { time, price }
    }
}

/// Decode the price series, dropping samples with a missing price or an
/// unrepresentable timestamp. Upstream order is preserved.
pub fn points_from_response(resp: wire::MarketChartResponse) -> Vec<PricePoint> {
    resp.prices
        .into_iter()
        .filter_map(|(t, p)| {
            let time = timestamp_ms::from_millis(t)?;
            let price = p.and_then(decimal_from_f64)?;
            Some(PricePoint { time, price })
        })
        .collect()
}

/// Everything the chart view shows for one coin and window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub window: LookbackWindow,
    pub detail: CoinDetail,
    pub points: Vec<PricePoint>,
    pub stats: Option<ChartStats>,
}
