//! # cointrack
//!
//! Market-data refresh and derived-metrics engine for a crypto tracker
//! dashboard, supporting both native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared newtypes, domain models and the pure derived metrics
//!    (top movers, portfolio valuation, alert evaluation, chart stats)
//! 2. **Cache**: `TtlCache` with injectable TTL, size bound and clock
//! 3. **HTTP API**: `MarketDataHttp`, one method per upstream endpoint
//! 4. **High-Level Client**: `TrackerClient` with nested sub-clients and caching
//! 5. **Refresh**: Compile-time dispatch: tokio timers (native) / `gloo_timers` (WASM)
//! 6. **Local State**: Persisted holdings and alerts, and the session that owns them
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cointrack::prelude::*;
//!
//! let client = TrackerClient::builder().vs_currency("usd").build()?;
//!
//! let coins = client.coins().list().await?;
//! let movers = market_movers(&coins);
//!
//! let mut session = TrackerSession::load(FileStore::open("./state")?);
//! for trigger in session.on_snapshot(&coins) {
//!     println!("{}", trigger.message());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, clock and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL and request constants.
pub mod network;

/// Serde configuration document.
pub mod config;

// ── Layer 2: Cache ───────────────────────────────────────────────────────────

/// Typed TTL cache.
pub mod cache;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the market data API.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `TrackerClient`: the primary entry point for market data.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Refresh ─────────────────────────────────────────────────────────

/// Periodic refresh of the coin list and market data.
pub mod refresh;

// ── Layer 6: Local State ─────────────────────────────────────────────────────

/// Key-value persistence for holdings and alerts.
pub mod storage;

/// `TrackerSession`: owns user state and applies alert transitions.
pub mod session;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Clock, CoinId, LookbackWindow, ManualClock, SystemClock};

    // Domain types: coin, market
    pub use crate::domain::coin::state::{CoinRow, CoinTable};
    pub use crate::domain::coin::{Coin, CoinDetail, CoinSnapshot, SortBy};
    pub use crate::domain::market::{
        market_movers, top_gainers, top_losers, GlobalStats, MarketMovers, MarketOverview,
        TrendingEntry,
    };

    // Domain types: price history
    pub use crate::domain::price_history::{ChartStats, ChartView, PricePoint};

    // Domain types: portfolio, alerts, notifications
    pub use crate::domain::alert::{
        evaluate_alerts, Alert, AlertBook, AlertDirection, AlertId, AlertStatus, AlertTrigger,
        NewAlert,
    };
    pub use crate::domain::notification::{Notification, NotificationId, NotificationQueue};
    pub use crate::domain::portfolio::{
        holding_rows, value_portfolio, Holding, HoldingId, HoldingRow, NewHolding, Portfolio,
        PortfolioSummary, PortfolioTotals,
    };

    // Errors
    pub use crate::error::{HttpError, StorageError, TrackerError};

    // Network + config
    pub use crate::config::TrackerConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY};

    // Cache
    pub use crate::cache::{CacheConfig, CacheKey, TtlCache};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        CoinsClient, MarketClient, PriceHistorySubClient, TrackerClient, TrackerClientBuilder,
    };

    // Refresh
    pub use crate::refresh::{
        MarketFeed, MarketSource, RefreshConfig, RefreshEvent, Resource, SharedFeed,
    };
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::refresh::native::RefreshScheduler;
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub use crate::refresh::wasm::RefreshScheduler;

    // Local state
    pub use crate::session::TrackerSession;
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::storage::FileStore;
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub use crate::storage::LocalStorage;
    pub use crate::storage::{KeyValueStore, LocalState, MemoryStore, Persisted};
}
