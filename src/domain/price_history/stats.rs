//! Summary statistics over a price series.

use super::PricePoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Min, max, mean and first-to-last change of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStats {
    pub min: Decimal,
    pub max: Decimal,
    pub average: Decimal,
    /// `last - first`.
    pub change: Decimal,
    /// `(last - first) / first * 100`, or 0 when the first sample is 0.
    pub change_percent: Decimal,
}

impl ChartStats {
    /// `None` for an empty series. A change percentage that overflows reads
    /// as 0.
    pub fn compute(points: &[PricePoint]) -> Option<Self> {
        let first = points.first()?.price;
        let last = points.last()?.price;

        let mut min = first;
        let mut max = first;
        for p in points {
            min = min.min(p.price);
            max = max.max(p.price);
        }

        let change = last.saturating_sub(first);
        let change_percent = change
            .checked_div(first)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);

        Some(Self {
            min,
            max,
            average: mean(points),
            change,
            change_percent,
        })
    }

    pub fn is_up(&self) -> bool {
        !self.change.is_sign_negative()
    }
}

/// Mean price. Falls back to summing `price / n` when the plain sum
/// overflows.
fn mean(points: &[PricePoint]) -> Decimal {
    let count = Decimal::from(points.len().max(1));
    let sum = points
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.price));
    match sum.and_then(|sum| sum.checked_div(count)) {
        Some(average) => average,
        None => points.iter().fold(Decimal::ZERO, |acc, p| {
            acc.saturating_add(p.price.checked_div(count).unwrap_or(Decimal::ZERO))
        }),
    }
}
