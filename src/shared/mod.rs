//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the upstream API and the persisted state use, so they can be
//! used directly in wire types without conversion overhead.

pub mod clock;
pub mod fmt;
pub mod serde_util;

pub use clock::{Clock, ManualClock, SystemClock};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Converts an upstream float to `Decimal`, `None` for NaN/infinite values.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(|d| d.normalize())
}

/// Next identifier for a user-created record: the creation time in ms, bumped
/// past `last` so two records created in the same millisecond stay distinct.
pub fn next_timestamp_id(now_ms: i64, last: Option<i64>) -> i64 {
    match last {
        Some(last) if last >= now_ms => last + 1,
        _ => now_ms,
    }
}

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for upstream coin identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

// ─── LookbackWindow ──────────────────────────────────────────────────────────

/// Number of trailing days requested for a price chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookbackWindow {
    #[serde(rename = "1")]
    Day1,
    #[default]
    #[serde(rename = "7")]
    Day7,
    #[serde(rename = "30")]
    Day30,
    #[serde(rename = "90")]
    Day90,
}

impl LookbackWindow {
    pub const ALL: [LookbackWindow; 4] = [Self::Day1, Self::Day7, Self::Day30, Self::Day90];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Day7 => "7",
            Self::Day30 => "30",
            Self::Day90 => "90",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Day7 => 7,
            Self::Day30 => 30,
            Self::Day90 => 90,
        }
    }

    /// Button label, e.g. `"7D"`.
    pub fn label(&self) -> String {
        format!("{}D", self.days())
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.days() == days)
    }
}

impl std::fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Send bounds ─────────────────────────────────────────────────────────────

/// `Send + Sync` on native targets, nothing on WASM (single-threaded, JS futures
/// are `!Send`).
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSendSync for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(0.1), Some(Decimal::new(1, 1)));
        assert_eq!(decimal_from_f64(67000.0), Some(Decimal::from(67000)));
        assert_eq!(decimal_from_f64(f64::NAN), None);
        assert_eq!(decimal_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_next_timestamp_id() {
        assert_eq!(next_timestamp_id(1_000, None), 1_000);
        assert_eq!(next_timestamp_id(1_000, Some(999)), 1_000);
        assert_eq!(next_timestamp_id(1_000, Some(1_000)), 1_001);
        assert_eq!(next_timestamp_id(1_000, Some(1_005)), 1_006);
    }

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_coin_id_is_empty() {
        assert!(CoinId::from("  ").is_empty());
        assert!(!CoinId::from("eth").is_empty());
    }

    #[test]
    fn test_lookback_window_serde() {
        let w: LookbackWindow = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(w, LookbackWindow::Day30);
        assert_eq!(w.days(), 30);
        assert_eq!(w.label(), "30D");
        assert_eq!(LookbackWindow::default(), LookbackWindow::Day7);
    }

    #[test]
    fn test_lookback_window_from_days() {
        assert_eq!(LookbackWindow::from_days(90), Some(LookbackWindow::Day90));
        assert_eq!(LookbackWindow::from_days(14), None);
    }
}
