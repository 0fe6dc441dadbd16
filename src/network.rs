//! Network constants for the upstream market-data API.

/// Default REST API base URL (CoinGecko v3 compatible).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default quote currency for prices and market caps.
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Number of coins requested for the tracked coin list.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Fixed client-level request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Header carrying an optional demo API key.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";
