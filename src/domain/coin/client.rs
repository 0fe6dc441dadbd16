//! Coins sub-client: cached coin list, uncached detail.

use crate::cache::CacheKey;
use crate::client::TrackerClient;
use crate::domain::coin::{self, CoinDetail, CoinSnapshot};
use crate::error::TrackerError;
use crate::shared::CoinId;

/// Sub-client for coin operations.
pub struct Coins<'a> {
    pub(crate) client: &'a TrackerClient,
}

impl<'a> Coins<'a> {
    /// Top coins by market cap with 1h/24h/7d change and sparkline. Uses TTL cache.
    pub async fn list(&self) -> Result<CoinSnapshot, TrackerError> {
        let http = &self.client.http;
        let vs_currency = self.client.vs_currency.as_str();
        let per_page = self.client.per_page;

        self.client
            .coin_cache
            .get_or_fetch(CacheKey::Coins, || async move {
                let resp = http.get_coin_markets(vs_currency, per_page).await?;
                Ok::<_, TrackerError>(CoinSnapshot::from_responses(resp))
            })
            .await
    }

    /// Single-coin detail. Not cached.
    pub async fn detail(&self, id: &CoinId) -> Result<CoinDetail, TrackerError> {
        let resp = self.client.http.get_coin_detail(id.as_str()).await?;
        CoinDetail::try_from((resp, self.client.vs_currency.as_str()))
            .map_err(|e: coin::ValidationError| TrackerError::Validation(e.to_string()))
    }

    /// Drop the cached coin list.
    pub async fn invalidate(&self) {
        self.client.coin_cache.invalidate(&CacheKey::Coins).await;
    }
}
