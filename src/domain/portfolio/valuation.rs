//! Portfolio valuation against the latest coin snapshot.
//!
//! A holding whose coin is not in the snapshot is excluded from both totals
//! and rows. It is never an error and the holding itself is kept. The same
//! goes for a holding whose figures overflow `Decimal`; totals that overflow
//! saturate at `Decimal::MAX`.

use super::Holding;
use crate::domain::coin::{Coin, CoinSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate figures across every resolvable holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub invested: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    /// `gain / invested * 100`, 0 when nothing is invested or it overflows.
    pub gain_percent: Decimal,
}

impl PortfolioTotals {
    pub fn is_gain(&self) -> bool {
        !self.gain.is_sign_negative() || self.gain.is_zero()
    }
}

/// One holding joined with its coin.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRow<'a> {
    pub holding: &'a Holding,
    pub coin: &'a Coin,
    pub invested: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    /// `None` when nothing was invested or the ratio overflows (shown as "N/A").
    pub roi: Option<Decimal>,
}

/// Totals plus rows, the full portfolio view.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary<'a> {
    pub totals: PortfolioTotals,
    pub rows: Vec<HoldingRow<'a>>,
}

fn percent_of(gain: Decimal, invested: Decimal) -> Option<Decimal> {
    if invested > Decimal::ZERO {
        gain.checked_div(invested)?.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        None
    }
}

fn row<'a>(holding: &'a Holding, coin: &'a Coin) -> Option<HoldingRow<'a>> {
    let invested = holding.invested()?;
    let current_value = holding.amount.checked_mul(coin.current_price)?;
    let gain = current_value.checked_sub(invested)?;
    Some(HoldingRow {
        holding,
        coin,
        invested,
        current_value,
        gain,
        roi: percent_of(gain, invested),
    })
}

/// Per-holding rows in holding order, unresolved holdings skipped.
pub fn holding_rows<'a>(holdings: &'a [Holding], snapshot: &'a CoinSnapshot) -> Vec<HoldingRow<'a>> {
    holdings
        .iter()
        .filter_map(|holding| {
            let coin = snapshot.find(&holding.coin_id)?;
            let row = row(holding, coin);
            if row.is_none() {
                tracing::warn!(id = %holding.id, coin = %holding.coin_id, "Holding value overflows, skipping");
            }
            row
        })
        .collect()
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

fn totals_of(rows: &[HoldingRow<'_>]) -> PortfolioTotals {
    let invested = saturating_sum(rows.iter().map(|r| r.invested));
    let current_value = saturating_sum(rows.iter().map(|r| r.current_value));
    let gain = current_value.saturating_sub(invested);
    PortfolioTotals {
        invested,
        current_value,
        gain,
        gain_percent: percent_of(gain, invested).unwrap_or(Decimal::ZERO),
    }
}

/// Totals over resolvable holdings.
pub fn value_portfolio(holdings: &[Holding], snapshot: &CoinSnapshot) -> PortfolioTotals {
    totals_of(&holding_rows(holdings, snapshot))
}

pub fn summarize<'a>(holdings: &'a [Holding], snapshot: &'a CoinSnapshot) -> PortfolioSummary<'a> {
    let rows = holding_rows(holdings, snapshot);
    PortfolioSummary {
        totals: totals_of(&rows),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::test_support::coin;
    use crate::domain::portfolio::HoldingId;
    use crate::shared::CoinId;

    fn holding_dec(id: i64, coin_id: &str, amount: &str, buy_price: &str) -> Holding {
        Holding {
            id: HoldingId(id),
            coin_id: CoinId::from(coin_id),
            amount: amount.parse().unwrap(),
            buy_price: buy_price.parse().unwrap(),
            date_bought: String::new(),
        }
    }

    fn holding(id: i64, coin_id: &str, amount: i64, buy_price: i64) -> Holding {
        Holding {
            id: HoldingId(id),
            coin_id: CoinId::from(coin_id),
            amount: Decimal::from(amount),
            buy_price: Decimal::from(buy_price),
            date_bought: String::new(),
        }
    }

    #[test]
    fn test_unresolved_holding_excluded() {
        let holdings = vec![holding(1, "btc", 2, 100)];
        let snapshot = CoinSnapshot::new(vec![coin("eth", "3000", None)]);
        assert_eq!(
            value_portfolio(&holdings, &snapshot),
            PortfolioTotals {
                invested: Decimal::ZERO,
                current_value: Decimal::ZERO,
                gain: Decimal::ZERO,
                gain_percent: Decimal::ZERO,
            }
        );
        assert!(holding_rows(&holdings, &snapshot).is_empty());
    }

    #[test]
    fn test_totals_over_resolvable_only() {
        let holdings = vec![
            holding(1, "btc", 2, 100),
            holding(2, "gone", 10, 10),
            holding(3, "eth", 1, 50),
        ];
        let snapshot = CoinSnapshot::new(vec![coin("btc", "150", None), coin("eth", "25", None)]);
        let totals = value_portfolio(&holdings, &snapshot);
        assert_eq!(totals.invested, Decimal::from(250));
        assert_eq!(totals.current_value, Decimal::from(325));
        assert_eq!(totals.gain, Decimal::from(75));
        assert_eq!(totals.gain_percent, Decimal::from(30));
        assert!(totals.is_gain());
    }

    #[test]
    fn test_rows_roi_and_zero_invested() {
        let holdings = vec![holding(1, "btc", 2, 100), holding(2, "airdrop", 5, 0)];
        let snapshot = CoinSnapshot::new(vec![coin("btc", "50", None), coin("airdrop", "2", None)]);
        let rows = holding_rows(&holdings, &snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gain, Decimal::from(-100));
        assert_eq!(rows[0].roi, Some(Decimal::from(-50)));
        assert_eq!(rows[1].invested, Decimal::ZERO);
        assert_eq!(rows[1].current_value, Decimal::from(10));
        assert_eq!(rows[1].roi, None);
    }

    #[test]
    fn test_gain_percent_zero_when_nothing_invested() {
        let holdings = vec![holding(1, "airdrop", 5, 0)];
        let snapshot = CoinSnapshot::new(vec![coin("airdrop", "2", None)]);
        let summary = summarize(&holdings, &snapshot);
        assert_eq!(summary.totals.gain, Decimal::from(10));
        assert_eq!(summary.totals.gain_percent, Decimal::ZERO);
        assert_eq!(summary.rows.len(), 1);
    }

    #[test]
    fn test_tiny_cost_basis_does_not_panic() {
        let holdings = vec![holding_dec(1, "btc", "1", "0.000000000000000000000000001")];
        let snapshot = CoinSnapshot::new(vec![coin("btc", "100", None)]);

        let rows = holding_rows(&holdings, &snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].roi, None);

        let totals = value_portfolio(&holdings, &snapshot);
        assert_eq!(totals.current_value, Decimal::from(100));
        assert_eq!(totals.gain_percent, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_holding_is_skipped() {
        let holdings = vec![
            holding_dec(1, "btc", "100000000000000000000", "100000000000"),
            holding(2, "eth", 1, 50),
        ];
        let snapshot = CoinSnapshot::new(vec![coin("btc", "1", None), coin("eth", "100", None)]);

        let summary = summarize(&holdings, &snapshot);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].holding.id, HoldingId(2));
        assert_eq!(summary.totals.invested, Decimal::from(50));
        assert_eq!(summary.totals.gain_percent, Decimal::from(100));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = "50000000000000000000000000000";
        let holdings = vec![holding_dec(1, "a", "1", huge), holding_dec(2, "b", "1", huge)];
        let snapshot = CoinSnapshot::new(vec![coin("a", "1", None), coin("b", "1", None)]);

        let totals = value_portfolio(&holdings, &snapshot);
        assert_eq!(totals.invested, Decimal::MAX);
        assert_eq!(totals.current_value, Decimal::from(2));
        assert!(!totals.is_gain());
    }
}
