use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summed activity for one aggregation bucket.
///
/// `count` is the number of parent documents (receipts or write-off
/// documents), `amount` the summed line-item value, `quantity` the summed
/// line-item quantity. Starts at zero and is only ever incremented, so all
/// fields stay non-negative for well-formed feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMeasure {
    pub count: i64,
    pub amount: Decimal,
    pub quantity: Decimal,
}

impl AggregateMeasure {
    pub fn is_zero(&self) -> bool {
        self.count == 0 && self.amount.is_zero() && self.quantity.is_zero()
    }

    /// Fold another bucket into this one (used by roll-ups and totals).
    pub fn absorb(&mut self, other: &AggregateMeasure) {
        self.count += other.count;
        self.amount += other.amount;
        self.quantity += other.quantity;
    }
}

/// Relative change of one period against the one before it, with the
/// percent of each measure taken against the earlier period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureChange {
    pub count: i64,
    pub count_pct: Decimal,
    pub amount: Decimal,
    pub amount_pct: Decimal,
    pub quantity: Decimal,
    pub quantity_pct: Decimal,
}

impl MeasureChange {
    /// Change from `previous` to `current`.
    pub fn between(previous: &AggregateMeasure, current: &AggregateMeasure) -> Self {
        let count = current.count - previous.count;
        let amount = current.amount - previous.amount;
        let quantity = current.quantity - previous.quantity;

        Self {
            count,
            count_pct: percent_change(Decimal::from(previous.count), Decimal::from(count)),
            amount,
            amount_pct: percent_change(previous.amount, amount),
            quantity,
            quantity_pct: percent_change(previous.quantity, quantity),
        }
    }
}

/// Previous-period measures plus the computed deltas, attached to a report
/// row when two periods are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub previous: AggregateMeasure,
    pub change: MeasureChange,
}

impl PeriodComparison {
    pub fn between(previous: AggregateMeasure, current: &AggregateMeasure) -> Self {
        Self {
            change: MeasureChange::between(&previous, current),
            previous,
        }
    }
}

/// Percent change of `delta` against a base value. A zero base yields zero
/// percent, not an error or infinity.
pub fn percent_change(base: Decimal, delta: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        delta / base * Decimal::ONE_HUNDRED
    }
}
