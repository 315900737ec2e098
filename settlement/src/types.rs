//! Core types for settlement engine

use ledger_core::{BetId, BetKind, BetResult, ChannelRole};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived figures for one bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Bet ID
    pub bet_id: BetId,

    /// Role the GGR was computed for
    pub role: ChannelRole,

    /// Single odds or product of legs
    pub effective_odds: Decimal,

    /// Gross gaming revenue, full precision
    pub ggr: Decimal,

    /// Currency tag of the bet
    pub currency: String,

    /// Outcome the GGR was derived from
    pub result: BetResult,
}

/// One row of the bet table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRow {
    /// Bet ID
    pub bet_id: BetId,

    /// Event name
    pub match_name: String,

    /// Wagered amount
    pub stake: Decimal,

    /// Single odds or product of legs
    pub effective_odds: Decimal,

    /// Market
    pub bet_type: String,

    /// Selection
    pub pick: String,

    /// Outcome
    pub result: BetResult,

    /// Localized outcome label
    pub result_label: String,

    /// Currency tag
    pub currency: String,

    /// Single or multi
    pub kind: BetKind,

    /// Gross gaming revenue, full precision
    pub ggr: Decimal,
}

/// Aggregates over a set of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    /// GGR summed per currency (no conversion)
    pub ggr_by_currency: BTreeMap<String, Decimal>,

    /// Bets still open
    pub open: usize,

    /// Bets in a terminal state
    pub settled: usize,
}

impl DayTotals {
    /// Add one row
    pub fn add(&mut self, row: &BetRow) {
        let total = self
            .ggr_by_currency
            .entry(row.currency.clone())
            .or_insert(Decimal::ZERO);
        match total.checked_add(row.ggr) {
            Some(sum) => *total = sum,
            None => tracing::warn!(
                bet_id = %row.bet_id,
                currency = %row.currency,
                "GGR total overflow, row skipped"
            ),
        }

        if row.result.is_open() {
            self.open += 1;
        } else if row.result.is_terminal() {
            self.settled += 1;
        }
    }

    /// Total for one currency, zero if absent
    pub fn ggr(&self, currency: &str) -> Decimal {
        self.ggr_by_currency
            .get(currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, currency: &str, ggr: Decimal, result: BetResult) -> BetRow {
        BetRow {
            bet_id: BetId::new(id),
            match_name: String::new(),
            stake: Decimal::new(100, 0),
            effective_odds: Decimal::new(2, 0),
            bet_type: String::new(),
            pick: String::new(),
            result,
            result_label: String::new(),
            currency: currency.to_string(),
            kind: BetKind::Single,
            ggr,
        }
    }

    #[test]
    fn test_totals_per_currency() {
        let mut totals = DayTotals::default();
        totals.add(&row(1, "USD", Decimal::new(150, 0), BetResult::Won));
        totals.add(&row(2, "USD", Decimal::new(-100, 0), BetResult::Lost));
        totals.add(&row(3, "EUR", Decimal::new(-25, 0), BetResult::VoidLoss));
        totals.add(&row(4, "EUR", Decimal::ZERO, BetResult::Open));
        totals.add(&row(5, "EUR", Decimal::ZERO, BetResult::Unrecognized(8)));

        assert_eq!(totals.ggr("USD"), Decimal::new(50, 0));
        assert_eq!(totals.ggr("EUR"), Decimal::new(-25, 0));
        assert_eq!(totals.ggr("GBP"), Decimal::ZERO);
        assert_eq!(totals.open, 1);
        assert_eq!(totals.settled, 3);
    }

    #[test]
    fn test_totals_overflow_keeps_previous_sum() {
        let mut totals = DayTotals::default();
        totals.add(&row(1, "USD", Decimal::MAX, BetResult::Won));
        totals.add(&row(2, "USD", Decimal::MAX, BetResult::Won));

        assert_eq!(totals.ggr("USD"), Decimal::MAX);
        assert_eq!(totals.settled, 2);
    }
}
