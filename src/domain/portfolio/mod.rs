//! Portfolio domain: user holdings and their valuation against a snapshot.

pub mod state;
pub mod valuation;

use crate::shared::CoinId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::Portfolio;
pub use valuation::{holding_rows, summarize, value_portfolio, HoldingRow, PortfolioSummary, PortfolioTotals};

// ─── HoldingId ───────────────────────────────────────────────────────────────

/// Synthetic holding identifier (creation time in Unix ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldingId(pub i64);

impl fmt::Display for HoldingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Holding ─────────────────────────────────────────────────────────────────

/// A user-entered position in one coin. Never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: HoldingId,
    pub coin_id: CoinId,
    pub amount: Decimal,
    pub buy_price: Decimal,
    /// Acquisition date as shown to the user (`M/D/YYYY`).
    #[serde(default)]
    pub date_bought: String,
}

impl Holding {
    /// `amount * buy_price`, `None` when the product overflows.
    pub fn invested(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.buy_price)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.coin_id, self.amount, self.buy_price)
    }
}

/// User input for a new holding.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHolding {
    pub coin_id: CoinId,
    pub amount: Decimal,
    pub buy_price: Decimal,
}

impl NewHolding {
    pub fn new(coin_id: impl Into<CoinId>, amount: Decimal, buy_price: Decimal) -> Self {
        Self {
            coin_id: coin_id.into(),
            amount,
            buy_price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.coin_id, self.amount, self.buy_price)
    }
}

fn check_fields(coin_id: &CoinId, amount: Decimal, buy_price: Decimal) -> Result<(), ValidationError> {
    if coin_id.is_empty() {
        return Err(ValidationError::MissingCoin);
    }
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount(amount));
    }
    if buy_price.is_sign_negative() && !buy_price.is_zero() {
        return Err(ValidationError::NegativeBuyPrice(buy_price));
    }
    Ok(())
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingCoin,
    NegativeAmount(Decimal),
    NegativeBuyPrice(Decimal),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCoin => write!(f, "Holding has no coin"),
            ValidationError::NegativeAmount(v) => write!(f, "Holding amount is negative: {}", v),
            ValidationError::NegativeBuyPrice(v) => {
                write!(f, "Holding buy price is negative: {}", v)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
