//! HTTP client layer: `MarketDataHttp`, one method per upstream endpoint.
//!
//! There is no retry policy: a failed request surfaces immediately and the
//! refresh scheduler tries again on its next tick.

pub mod client;

pub use client::MarketDataHttp;
