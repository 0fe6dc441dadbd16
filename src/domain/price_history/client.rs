//! Price history sub-client: per-coin series and the chart view. Not cached.

use crate::client::TrackerClient;
use crate::domain::price_history::{self, ChartStats, ChartView, PricePoint};
use crate::error::TrackerError;
use crate::shared::{CoinId, LookbackWindow};

/// Sub-client for historical price operations.
pub struct PriceHistoryClient<'a> {
    pub(crate) client: &'a TrackerClient,
}

impl<'a> PriceHistoryClient<'a> {
    /// Price samples for the trailing `window`.
    pub async fn get(
        &self,
        id: &CoinId,
        window: LookbackWindow,
    ) -> Result<Vec<PricePoint>, TrackerError> {
        let resp = self
            .client
            .http
            .get_market_chart(id.as_str(), self.client.vs_currency.as_str(), window.days())
            .await?;
        Ok(price_history::points_from_response(resp))
    }

    /// Coin detail and price series fetched concurrently, plus summary stats.
    pub async fn chart(
        &self,
        id: &CoinId,
        window: LookbackWindow,
    ) -> Result<ChartView, TrackerError> {
        let (detail, points) = futures_util::future::try_join(
            self.client.coins().detail(id),
            self.get(id, window),
        )
        .await?;
        let stats = ChartStats::compute(&points);
        Ok(ChartView {
            window,
            detail,
            points,
            stats,
        })
    }
}
