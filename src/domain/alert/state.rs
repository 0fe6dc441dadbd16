//! Alert list: app-owned, applies evaluation results.

use super::{Alert, AlertId, AlertStatus, AlertTrigger, NewAlert, ValidationError};
use crate::shared::{next_timestamp_id, Clock};

/// The user's alerts in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBook {
    alerts: Vec<Alert>,
}

impl AlertBook {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    /// Validate and append a waiting alert.
    pub fn add(&mut self, new: NewAlert, clock: &dyn Clock) -> Result<&Alert, ValidationError> {
        new.validate()?;
        let last = self.alerts.iter().map(|a| a.id.0).max();
        self.alerts.push(Alert {
            id: AlertId(next_timestamp_id(clock.now_ms(), last)),
            coin_id: new.coin_id,
            direction: new.direction,
            target: new.target,
            status: AlertStatus::Waiting,
        });
        Ok(&self.alerts[self.alerts.len() - 1])
    }

    pub fn remove(&mut self, id: AlertId) -> Option<Alert> {
        let idx = self.alerts.iter().position(|a| a.id == id)?;
        Some(self.alerts.remove(idx))
    }

    /// Re-arm a triggered alert. Returns whether anything changed.
    pub fn reset(&mut self, id: AlertId) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) if alert.status == AlertStatus::Triggered => {
                alert.status = AlertStatus::Waiting;
                true
            }
            _ => false,
        }
    }

    /// Mark the alerts named by `triggers` as triggered. Returns the
    /// transitions that actually applied (alerts still present and waiting).
    pub fn apply(&mut self, triggers: Vec<AlertTrigger>) -> Vec<AlertTrigger> {
        triggers
            .into_iter()
            .filter(|trigger| {
                match self
                    .alerts
                    .iter_mut()
                    .find(|a| a.id == trigger.alert_id && a.status == AlertStatus::Waiting)
                {
                    Some(alert) => {
                        alert.status = AlertStatus::Triggered;
                        true
                    }
                    None => false,
                }
            })
            .collect()
    }

    pub fn get(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
