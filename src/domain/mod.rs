//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains (where it applies):
//! - `mod.rs`: Decoded domain types with defaults applied
//! - `wire.rs`: Raw serde structs matching upstream responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: App-owned state containers with update methods
//! - `client.rs`: Sub-client with HTTP methods and caching
//!
//! The derived metrics (`market::insights`, `portfolio::valuation`,
//! `alert::evaluate`, `price_history::stats`) are pure functions over a
//! [`coin::CoinSnapshot`] and never touch the network.

pub mod alert;
pub mod coin;
pub mod market;
pub mod notification;
pub mod portfolio;
pub mod price_history;
