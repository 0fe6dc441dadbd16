//! Alert domain: one-shot price thresholds.
//!
//! An alert is `waiting` until the price crosses its target, then
//! `triggered` until the user resets it. Evaluation only reports
//! transitions; the alert owner applies them.

pub mod evaluate;
pub mod state;

use crate::shared::CoinId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use evaluate::{evaluate_alerts, AlertTrigger};
pub use state::AlertBook;

// ─── AlertId ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub i64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── AlertDirection ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    #[default]
    Above,
    Below,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }

    /// `above` fires at or over the target, `below` at or under it.
    pub fn is_crossed(&self, price: Decimal, target: Decimal) -> bool {
        match self {
            AlertDirection::Above => price >= target,
            AlertDirection::Below => price <= target,
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── AlertStatus ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Waiting,
    Triggered,
}

// ─── Alert ───────────────────────────────────────────────────────────────────

/// A persisted price alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub coin_id: CoinId,
    #[serde(rename = "type")]
    pub direction: AlertDirection,
    #[serde(rename = "price")]
    pub target: Decimal,
    #[serde(default)]
    pub status: AlertStatus,
}

impl Alert {
    pub fn is_triggered(&self) -> bool {
        self.status == AlertStatus::Triggered
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.coin_id, self.target)
    }
}

/// User input for a new alert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub coin_id: CoinId,
    pub direction: AlertDirection,
    pub target: Decimal,
}

impl NewAlert {
    pub fn new(coin_id: impl Into<CoinId>, direction: AlertDirection, target: Decimal) -> Self {
        Self {
            coin_id: coin_id.into(),
            direction,
            target,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.coin_id, self.target)
    }
}

fn check_fields(coin_id: &CoinId, target: Decimal) -> Result<(), ValidationError> {
    if coin_id.is_empty() {
        return Err(ValidationError::MissingCoin);
    }
    if target.is_sign_negative() && !target.is_zero() {
        return Err(ValidationError::NegativeTarget(target));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingCoin,
    NegativeTarget(Decimal),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCoin => write!(f, "Alert has no coin"),
            ValidationError::NegativeTarget(v) => write!(f, "Alert target is negative: {}", v),
        }
    }
}

impl std::error::Error for ValidationError {}
