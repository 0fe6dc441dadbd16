//! Stored alert shape, accepting both the `status` tag and the older
//! boolean `notified` flag.

use crate::domain::alert::{Alert, AlertDirection, AlertId, AlertStatus};
use crate::shared::CoinId;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoredAlert {
    pub id: AlertId,
    pub coin_id: CoinId,
    #[serde(rename = "type")]
    pub direction: AlertDirection,
    pub price: Decimal,
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub notified: Option<bool>,
}

impl From<StoredAlert> for Alert {
    fn from(stored: StoredAlert) -> Self {
        let status = match (stored.status, stored.notified) {
            (Some(status), _) => status,
            (None, Some(true)) => AlertStatus::Triggered,
            (None, _) => AlertStatus::Waiting,
        };
        Alert {
            id: stored.id,
            coin_id: stored.coin_id,
            direction: stored.direction,
            target: stored.price,
            status,
        }
    }
}
