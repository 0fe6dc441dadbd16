//! Tracker session: the owner of user state.
//!
//! Holds the holdings and alerts restored from storage, persists every
//! mutation, applies alert transitions produced by evaluation, and queues
//! one notification per transition. A failed save is logged; the in-memory
//! change stands and the next save writes the full collection again.

use crate::domain::alert::{evaluate_alerts, Alert, AlertBook, AlertId, AlertTrigger, NewAlert};
use crate::domain::coin::CoinSnapshot;
use crate::domain::notification::{Notification, NotificationId, NotificationQueue};
use crate::domain::portfolio::{self, Holding, HoldingId, NewHolding, Portfolio, PortfolioSummary};
use crate::error::TrackerError;
use crate::shared::{Clock, SystemClock};
use crate::storage::{KeyValueStore, LocalState};

use std::sync::Arc;

pub struct TrackerSession<S: KeyValueStore> {
    state: LocalState<S>,
    portfolio: Portfolio,
    alerts: AlertBook,
    notifications: NotificationQueue,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> TrackerSession<S> {
    /// Restore state from `store` using the system clock.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, Arc::new(SystemClock))
    }

    pub fn load_with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        let state = LocalState::new(store);
        let persisted = state.load();
        tracing::debug!(
            holdings = persisted.holdings.len(),
            alerts = persisted.alerts.len(),
            "Restored local state"
        );
        Self {
            state,
            portfolio: Portfolio::new(persisted.holdings),
            alerts: AlertBook::new(persisted.alerts),
            notifications: NotificationQueue::default(),
            clock,
        }
    }

    // ── Holdings ─────────────────────────────────────────────────────────

    pub fn holdings(&self) -> &[Holding] {
        self.portfolio.holdings()
    }

    pub fn add_holding(&mut self, new: NewHolding) -> Result<Holding, TrackerError> {
        let holding = self
            .portfolio
            .add(new, self.clock.as_ref())
            .map_err(|e| TrackerError::Validation(e.to_string()))?
            .clone();
        self.persist_holdings();
        Ok(holding)
    }

    pub fn remove_holding(&mut self, id: HoldingId) -> Option<Holding> {
        let removed = self.portfolio.remove(id)?;
        self.persist_holdings();
        Some(removed)
    }

    /// Totals and per-holding rows against `snapshot`.
    pub fn portfolio<'a>(&'a self, snapshot: &'a CoinSnapshot) -> PortfolioSummary<'a> {
        portfolio::summarize(self.portfolio.holdings(), snapshot)
    }

    // ── Alerts ───────────────────────────────────────────────────────────

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.alerts()
    }

    pub fn add_alert(&mut self, new: NewAlert) -> Result<Alert, TrackerError> {
        let alert = self
            .alerts
            .add(new, self.clock.as_ref())
            .map_err(|e| TrackerError::Validation(e.to_string()))?
            .clone();
        self.persist_alerts();
        Ok(alert)
    }

    pub fn remove_alert(&mut self, id: AlertId) -> Option<Alert> {
        let removed = self.alerts.remove(id)?;
        self.persist_alerts();
        Some(removed)
    }

    /// Re-arm a triggered alert. Returns whether it was triggered.
    pub fn reset_alert(&mut self, id: AlertId) -> bool {
        let changed = self.alerts.reset(id);
        if changed {
            self.persist_alerts();
        }
        changed
    }

    /// Evaluate alerts against a fresh snapshot, apply the transitions and
    /// queue a notification for each. Returns the applied transitions.
    pub fn on_snapshot(&mut self, snapshot: &CoinSnapshot) -> Vec<AlertTrigger> {
        let triggers = evaluate_alerts(self.alerts.alerts(), snapshot);
        if triggers.is_empty() {
            return triggers;
        }

        let applied = self.alerts.apply(triggers);
        let now = self.clock.now_ms();
        for trigger in &applied {
            let message = trigger.message();
            tracing::info!(alert = %trigger.alert_id, %message, "Price alert triggered");
            self.notifications.push(message, now);
        }
        self.persist_alerts();
        applied
    }

    // ── Notifications ────────────────────────────────────────────────────

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Drop notifications past their display time.
    pub fn expire_notifications(&mut self) -> Vec<NotificationId> {
        self.notifications.expire(self.clock.now_ms())
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Unix ms at which the next notification expires, for scheduling a
    /// call to [`expire_notifications`](Self::expire_notifications).
    pub fn next_notification_expiry(&self) -> Option<i64> {
        self.notifications.next_expiry()
    }

    // ── Persistence ──────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        self.state.store()
    }

    fn persist_holdings(&mut self) {
        if let Err(e) = self.state.save_holdings(self.portfolio.holdings()) {
            tracing::warn!(error = %e, "Failed to persist holdings");
        }
    }

    fn persist_alerts(&mut self) {
        if let Err(e) = self.state.save_alerts(self.alerts.alerts()) {
            tracing::warn!(error = %e, "Failed to persist alerts");
        }
    }
}
