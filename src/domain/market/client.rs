//! Market sub-client: cached global stats and trending list.

use crate::cache::CacheKey;
use crate::client::TrackerClient;
use crate::domain::market::{self, GlobalStats, MarketOverview, TrendingEntry};
use crate::error::TrackerError;

/// Sub-client for market-wide data.
pub struct Market<'a> {
    pub(crate) client: &'a TrackerClient,
}

impl<'a> Market<'a> {
    /// Global market aggregates. Uses TTL cache.
    pub async fn global(&self) -> Result<GlobalStats, TrackerError> {
        let http = &self.client.http;
        self.client
            .global_cache
            .get_or_fetch(CacheKey::Global, || async move {
                Ok::<_, TrackerError>(GlobalStats::from(http.get_global().await?))
            })
            .await
    }

    /// Trending coins. Uses TTL cache.
    pub async fn trending(&self) -> Result<Vec<TrendingEntry>, TrackerError> {
        let http = &self.client.http;
        self.client
            .trending_cache
            .get_or_fetch(CacheKey::Trending, || async move {
                Ok::<_, TrackerError>(market::trending_from_response(http.get_trending().await?))
            })
            .await
    }

    /// Global stats and trending, requested concurrently. Fails if either fails.
    pub async fn overview(&self) -> Result<MarketOverview, TrackerError> {
        let (global, trending) =
            futures_util::future::try_join(self.global(), self.trending()).await?;
        Ok(MarketOverview { global, trending })
    }

    /// Drop the cached global and trending entries.
    pub async fn invalidate(&self) {
        self.client.global_cache.invalidate(&CacheKey::Global).await;
        self.client
            .trending_cache
            .invalidate(&CacheKey::Trending)
            .await;
    }
}
