//! High-level client: `TrackerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared caches, and accessor methods.

use crate::cache::{CacheConfig, CacheKey, TtlCache};
use crate::config::TrackerConfig;
use crate::domain::coin::client::Coins;
use crate::domain::coin::CoinSnapshot;
use crate::domain::market::client::Market;
use crate::domain::market::{GlobalStats, TrendingEntry};
use crate::domain::price_history::client::PriceHistoryClient;
use crate::error::TrackerError;
use crate::http::MarketDataHttp;
use crate::network::{DEFAULT_API_URL, DEFAULT_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_VS_CURRENCY};
use crate::refresh::MarketSource;
use crate::shared::{Clock, SystemClock};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::market::client::Market as MarketClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// The primary entry point for market data.
///
/// Provides nested sub-client accessors: `client.coins()`, `client.market()`,
/// `client.price_history()`. Clones share the HTTP pool and every cache.
pub struct TrackerClient {
    pub(crate) http: MarketDataHttp,
    pub(crate) vs_currency: String,
    pub(crate) per_page: u32,
    /// Coin list: `CacheKey::Coins` → snapshot
    pub(crate) coin_cache: TtlCache<CacheKey, CoinSnapshot>,
    /// Global stats: `CacheKey::Global` → stats
    pub(crate) global_cache: TtlCache<CacheKey, GlobalStats>,
    /// Trending: `CacheKey::Trending` → entries
    pub(crate) trending_cache: TtlCache<CacheKey, Vec<TrendingEntry>>,
}

impl TrackerClient {
    pub fn builder() -> TrackerClientBuilder {
        TrackerClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Drop one cached resource, or every cached resource when `key` is `None`.
    pub async fn invalidate_cache(&self, key: Option<CacheKey>) {
        match key {
            Some(CacheKey::Coins) => self.coin_cache.invalidate(&CacheKey::Coins).await,
            Some(CacheKey::Global) => self.global_cache.invalidate(&CacheKey::Global).await,
            Some(CacheKey::Trending) => {
                self.trending_cache.invalidate(&CacheKey::Trending).await
            }
            None => self.clear_all_caches().await,
        }
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.coin_cache.clear().await;
        self.global_cache.clear().await;
        self.trending_cache.clear().await;
    }
}

impl Clone for TrackerClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            vs_currency: self.vs_currency.clone(),
            per_page: self.per_page,
            coin_cache: self.coin_cache.clone(),
            global_cache: self.global_cache.clone(),
            trending_cache: self.trending_cache.clone(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MarketSource for TrackerClient {
    async fn coins(&self) -> Result<CoinSnapshot, TrackerError> {
        TrackerClient::coins(self).list().await
    }

    async fn global(&self) -> Result<GlobalStats, TrackerError> {
        self.market().global().await
    }

    async fn trending(&self) -> Result<Vec<TrendingEntry>, TrackerError> {
        self.market().trending().await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TrackerClientBuilder {
    base_url: String,
    api_key: Option<String>,
    vs_currency: String,
    per_page: u32,
    request_timeout: Duration,
    cache_config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl Default for TrackerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            per_page: DEFAULT_PER_PAGE,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            cache_config: CacheConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl TrackerClientBuilder {
    /// Start from a loaded [`TrackerConfig`] (refresh settings are not used here).
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            api_key: config.api.api_key.clone(),
            vs_currency: config.api.vs_currency.clone(),
            per_page: config.api.per_page,
            request_timeout: config.api.request_timeout(),
            cache_config: config.cache.clone(),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Demo API key sent with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.to_lowercase();
        self
    }

    /// Number of coins in the tracked list.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_config.ttl_ms = ttl.as_millis() as u64;
        self
    }

    /// Clock used for cache expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<TrackerClient, TrackerError> {
        if self.per_page == 0 {
            return Err(TrackerError::Validation("per_page must be positive".into()));
        }
        let http = MarketDataHttp::with_options(&self.base_url, self.api_key, self.request_timeout)?;

        Ok(TrackerClient {
            http,
            vs_currency: self.vs_currency,
            per_page: self.per_page,
            coin_cache: TtlCache::with_clock(self.cache_config.clone(), self.clock.clone()),
            global_cache: TtlCache::with_clock(self.cache_config.clone(), self.clock.clone()),
            trending_cache: TtlCache::with_clock(self.cache_config.clone(), self.clock.clone()),
        })
    }
}
