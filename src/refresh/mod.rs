//! Refresh scheduler: periodic re-fetch of the coin list and market data.
//!
//! Two independent timers drive the refresh: one for the coin list and one
//! for global stats plus trending. Each tick fetches through a
//! [`MarketSource`] and replaces the matching part of the shared
//! [`MarketFeed`] wholesale. A failed tick leaves the previous value in place.
//!
//! Stopping a scheduler flips its [`Liveness`] flag. Fetches already in
//! flight are not aborted; their results are dropped when they arrive.
//!
//! Compile-time dispatch:
//! - `native`: tokio tasks and intervals, events as a `Stream`
//! - `wasm`: `spawn_local` and `gloo_timers` intervals, events via callback

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

use crate::domain::coin::CoinSnapshot;
use crate::domain::market::{GlobalStats, MarketOverview, TrendingEntry};
use crate::error::TrackerError;
use crate::shared::MaybeSendSync;

use async_lock::RwLock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default coin-list refresh period.
pub const DEFAULT_COINS_INTERVAL_MS: u64 = 30_000;
/// Default global + trending refresh period.
pub const DEFAULT_MARKET_INTERVAL_MS: u64 = 60_000;

// ─── Source ──────────────────────────────────────────────────────────────────

/// Anything that can produce the three polled resources.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MarketSource: MaybeSendSync {
    async fn coins(&self) -> Result<CoinSnapshot, TrackerError>;
    async fn global(&self) -> Result<GlobalStats, TrackerError>;
    async fn trending(&self) -> Result<Vec<TrendingEntry>, TrackerError>;
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub coins_interval_ms: u64,
    pub market_interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            coins_interval_ms: DEFAULT_COINS_INTERVAL_MS,
            market_interval_ms: DEFAULT_MARKET_INTERVAL_MS,
        }
    }
}

impl RefreshConfig {
    pub fn coins_interval(&self) -> Duration {
        Duration::from_millis(self.coins_interval_ms)
    }

    pub fn market_interval(&self) -> Duration {
        Duration::from_millis(self.market_interval_ms)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.coins_interval_ms == 0 || self.market_interval_ms == 0 {
            return Err(TrackerError::Validation(
                "refresh intervals must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ─── Feed ────────────────────────────────────────────────────────────────────

/// Latest successfully fetched market data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketFeed {
    pub coins: CoinSnapshot,
    pub global: Option<GlobalStats>,
    pub trending: Vec<TrendingEntry>,
    pub coins_updated_at: Option<DateTime<Utc>>,
    pub market_updated_at: Option<DateTime<Utc>>,
}

impl MarketFeed {
    /// Whether both timers have applied at least one result.
    pub fn is_complete(&self) -> bool {
        self.coins_updated_at.is_some() && self.market_updated_at.is_some()
    }
}

/// Shared handle to a [`MarketFeed`]. Clones see the same feed.
#[derive(Debug, Clone, Default)]
pub struct SharedFeed {
    inner: Arc<RwLock<MarketFeed>>,
}

impl SharedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current feed.
    pub async fn snapshot(&self) -> MarketFeed {
        self.inner.read().await.clone()
    }

    /// The current coin snapshot (cheap; shares the list).
    pub async fn coins(&self) -> CoinSnapshot {
        self.inner.read().await.coins.clone()
    }
}

// ─── Liveness ────────────────────────────────────────────────────────────────

/// Flag shared between a scheduler and its in-flight fetches.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Which timer a refresh belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Coins,
    Market,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Coins => f.write_str("coins"),
            Resource::Market => f.write_str("market"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshEvent {
    /// A new coin snapshot replaced the previous one.
    CoinsUpdated { count: usize },
    /// Global stats and trending were replaced.
    MarketUpdated { trending: usize },
    /// A tick failed; the feed still holds the previous value.
    Failed { resource: Resource, error: String },
}

// ─── Ticks ───────────────────────────────────────────────────────────────────

/// One coin-list tick. Returns `None` when the result arrived after stop.
pub async fn refresh_coins<S>(
    source: &S,
    feed: &SharedFeed,
    liveness: &Liveness,
) -> Option<RefreshEvent>
where
    S: MarketSource + ?Sized,
{
    let result = source.coins().await;
    if !liveness.is_alive() {
        tracing::debug!("Dropping coin refresh result after stop");
        return None;
    }

    match result {
        Ok(snapshot) => {
            let mut state = feed.inner.write().await;
            if !liveness.is_alive() {
                return None;
            }
            let count = snapshot.len();
            state.coins = snapshot;
            state.coins_updated_at = Some(Utc::now());
            tracing::debug!(count, "Coin snapshot replaced");
            Some(RefreshEvent::CoinsUpdated { count })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Coin refresh failed; keeping previous snapshot");
            Some(RefreshEvent::Failed {
                resource: Resource::Coins,
                error: e.to_string(),
            })
        }
    }
}

/// One global + trending tick. Both requests run concurrently and either
/// failing fails the tick.
pub async fn refresh_market<S>(
    source: &S,
    feed: &SharedFeed,
    liveness: &Liveness,
) -> Option<RefreshEvent>
where
    S: MarketSource + ?Sized,
{
    let result = futures_util::future::try_join(source.global(), source.trending())
        .await
        .map(|(global, trending)| MarketOverview { global, trending });
    if !liveness.is_alive() {
        tracing::debug!("Dropping market refresh result after stop");
        return None;
    }

    match result {
        Ok(overview) => {
            let mut state = feed.inner.write().await;
            if !liveness.is_alive() {
                return None;
            }
            let trending = overview.trending.len();
            state.global = Some(overview.global);
            state.trending = overview.trending;
            state.market_updated_at = Some(Utc::now());
            tracing::debug!(trending, "Market data replaced");
            Some(RefreshEvent::MarketUpdated { trending })
        }
        Err(e) => {
            tracing::warn!(error = %e, "Market refresh failed; keeping previous data");
            Some(RefreshEvent::Failed {
                resource: Resource::Market,
                error: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_support::coin;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedSource {
        coins: Mutex<Vec<Result<CoinSnapshot, TrackerError>>>,
        fail_trending: bool,
    }

    #[async_trait]
    impl MarketSource for ScriptedSource {
        async fn coins(&self) -> Result<CoinSnapshot, TrackerError> {
            self.coins
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(TrackerError::Other("exhausted".into())))
        }

        async fn global(&self) -> Result<GlobalStats, TrackerError> {
            Ok(GlobalStats::default())
        }

        async fn trending(&self) -> Result<Vec<TrendingEntry>, TrackerError> {
            if self.fail_trending {
                Err(TrackerError::Other("trending down".into()))
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_failed_tick_keeps_previous_snapshot() {
        let source = ScriptedSource {
            // popped from the back
            coins: Mutex::new(vec![
                Err(TrackerError::Other("boom".into())),
                Ok(CoinSnapshot::new(vec![coin("bitcoin", "1", None)])),
            ]),
            ..Default::default()
        };
        let feed = SharedFeed::new();
        let live = Liveness::default();

        let first = refresh_coins(&source, &feed, &live).await;
        assert_eq!(first, Some(RefreshEvent::CoinsUpdated { count: 1 }));

        let second = refresh_coins(&source, &feed, &live).await;
        assert!(matches!(
            second,
            Some(RefreshEvent::Failed { resource: Resource::Coins, .. })
        ));
        assert_eq!(feed.coins().await.len(), 1);
    }

    #[tokio::test]
    async fn test_result_dropped_after_kill() {
        let source = ScriptedSource {
            coins: Mutex::new(vec![Ok(CoinSnapshot::new(vec![coin("bitcoin", "1", None)]))]),
            ..Default::default()
        };
        let feed = SharedFeed::new();
        let live = Liveness::default();
        live.kill();

        assert_eq!(refresh_coins(&source, &feed, &live).await, None);
        assert!(feed.coins().await.is_empty());
        assert!(feed.snapshot().await.coins_updated_at.is_none());
    }

    #[tokio::test]
    async fn test_market_tick_fails_if_either_fails() {
        let source = ScriptedSource {
            fail_trending: true,
            ..Default::default()
        };
        let feed = SharedFeed::new();
        let live = Liveness::default();

        let event = refresh_market(&source, &feed, &live).await;
        assert!(matches!(
            event,
            Some(RefreshEvent::Failed { resource: Resource::Market, .. })
        ));
        assert!(feed.snapshot().await.global.is_none());
    }

    #[tokio::test]
    async fn test_market_tick_applies_both() {
        let source = ScriptedSource::default();
        let feed = SharedFeed::new();
        let live = Liveness::default();

        let event = refresh_market(&source, &feed, &live).await;
        assert_eq!(event, Some(RefreshEvent::MarketUpdated { trending: 0 }));
        let state = feed.snapshot().await;
        assert!(state.global.is_some());
        assert!(state.market_updated_at.is_some());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_refresh_config_validate() {
        assert!(RefreshConfig::default().validate().is_ok());
        let bad = RefreshConfig {
            coins_interval_ms: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
