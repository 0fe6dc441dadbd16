//! Holding list: app-owned, mutated only by add and remove.

use super::{Holding, HoldingId, NewHolding, ValidationError};
use crate::shared::{next_timestamp_id, Clock};

/// The user's holdings in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Validate and append a holding stamped with the current time.
    pub fn add(&mut self, new: NewHolding, clock: &dyn Clock) -> Result<&Holding, ValidationError> {
        new.validate()?;
        let last = self.holdings.iter().map(|h| h.id.0).max();
        let holding = Holding {
            id: HoldingId(next_timestamp_id(clock.now_ms(), last)),
            coin_id: new.coin_id,
            amount: new.amount,
            buy_price: new.buy_price,
            date_bought: clock.now().format("%-m/%-d/%Y").to_string(),
        };
        self.holdings.push(holding);
        Ok(&self.holdings[self.holdings.len() - 1])
    }

    pub fn remove(&mut self, id: HoldingId) -> Option<Holding> {
        let idx = self.holdings.iter().position(|h| h.id == id)?;
        Some(self.holdings.remove(idx))
    }

    pub fn get(&self, id: HoldingId) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
