//! Alert evaluation against a coin snapshot.

use super::{Alert, AlertDirection, AlertId, AlertStatus};
use crate::domain::coin::CoinSnapshot;
use crate::shared::fmt::fixed;
use crate::shared::CoinId;
use rust_decimal::Decimal;

/// A `waiting → triggered` transition found by [`evaluate_alerts`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlertTrigger {
    pub alert_id: AlertId,
    pub coin_id: CoinId,
    pub coin_name: String,
    pub direction: AlertDirection,
    pub target: Decimal,
    pub price: Decimal,
}

impl AlertTrigger {
    /// e.g. `"Bitcoin is now above $100 (Current: $105.00)"`.
    pub fn message(&self) -> String {
        format!(
            "{} is now {} ${} (Current: ${})",
            self.coin_name,
            self.direction,
            self.target.normalize(),
            fixed(&self.price, 2)
        )
    }
}

/// Every waiting alert whose coin is in the snapshot and whose threshold is
/// crossed. Triggered alerts and alerts on unknown coins yield nothing.
pub fn evaluate_alerts(alerts: &[Alert], snapshot: &CoinSnapshot) -> Vec<AlertTrigger> {
    alerts
        .iter()
        .filter(|alert| alert.status == AlertStatus::Waiting)
        .filter_map(|alert| {
            let coin = snapshot.find(&alert.coin_id)?;
            if !alert.direction.is_crossed(coin.current_price, alert.target) {
                return None;
            }
            Some(AlertTrigger {
                alert_id: alert.id,
                coin_id: alert.coin_id.clone(),
                coin_name: coin.name.clone(),
                direction: alert.direction,
                target: alert.target,
                price: coin.current_price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_support::coin;

    fn alert(id: i64, coin_id: &str, direction: AlertDirection, target: i64) -> Alert {
        Alert {
            id: AlertId(id),
            coin_id: CoinId::from(coin_id),
            direction,
            target: Decimal::from(target),
            status: AlertStatus::Waiting,
        }
    }

    #[test]
    fn test_above_and_below() {
        let alerts = vec![
            alert(1, "bitcoin", AlertDirection::Above, 100),
            alert(2, "bitcoin", AlertDirection::Below, 100),
            alert(3, "bitcoin", AlertDirection::Below, 90),
        ];
        let snapshot = CoinSnapshot::new(vec![coin("bitcoin", "95", None)]);
        let fired: Vec<AlertId> = evaluate_alerts(&alerts, &snapshot)
            .into_iter()
            .map(|t| t.alert_id)
            .collect();
        assert_eq!(fired, vec![AlertId(2)]);
    }

    #[test]
    fn test_unresolved_coin_skipped() {
        let alerts = vec![alert(1, "ghost", AlertDirection::Above, 0)];
        let snapshot = CoinSnapshot::new(vec![coin("bitcoin", "95", None)]);
        assert!(evaluate_alerts(&alerts, &snapshot).is_empty());
    }

    #[test]
    fn test_triggered_alert_does_not_fire() {
        let mut a = alert(1, "bitcoin", AlertDirection::Above, 100);
        a.status = AlertStatus::Triggered;
        let snapshot = CoinSnapshot::new(vec![coin("bitcoin", "150", None)]);
        assert!(evaluate_alerts(&[a], &snapshot).is_empty());
    }

    #[test]
    fn test_trigger_message() {
        let alerts = vec![alert(1, "bitcoin", AlertDirection::Above, 100)];
        let snapshot = CoinSnapshot::new(vec![coin("bitcoin", "105", None)]);
        let triggers = evaluate_alerts(&alerts, &snapshot);
        assert_eq!(triggers.len(), 1);
        assert_eq!(
            triggers[0].message(),
            "Bitcoin is now above $100 (Current: $105.00)"
        );
    }
}
