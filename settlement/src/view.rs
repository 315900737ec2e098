//! Channel/day ledger views
//!
//! The bet table shows one channel on one calendar day. Each row carries the
//! derived figures, recomputed from the stored bet every time the view is
//! built; nothing derived is written back to the book.

use crate::{
    engine::SettlementEngine,
    labels::result_label,
    types::{BetRow, DayTotals},
    Result,
};
use chrono::NaiveDate;
use ledger_core::{BetBook, Channel, ChannelId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Bets of one channel on one day, with derived figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    /// Channel ID
    pub channel_id: ChannelId,

    /// Channel record, if it exists
    pub channel: Option<Channel>,

    /// Calendar day (UTC)
    pub day: NaiveDate,

    /// Rows in bet ID order
    pub rows: Vec<BetRow>,
}

impl DayView {
    /// Build the view from the current book contents
    pub fn build(
        engine: &SettlementEngine,
        book: &BetBook,
        channel_id: ChannelId,
        day: NaiveDate,
    ) -> Result<Self> {
        let channels = book.channels();
        let locale = engine.config().locale;

        let rows = book
            .bets_for(channel_id, day)
            .into_iter()
            .map(|bet| -> Result<BetRow> {
                let settlement = engine.settle(&bet, &channels)?;
                Ok(BetRow {
                    bet_id: bet.id,
                    result_label: result_label(bet.result, locale).to_string(),
                    match_name: bet.match_name,
                    stake: bet.stake,
                    effective_odds: settlement.effective_odds,
                    bet_type: bet.bet_type,
                    pick: bet.pick,
                    result: bet.result,
                    currency: bet.currency,
                    kind: bet.kind,
                    ggr: settlement.ggr,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            channel_id = %channel_id,
            %day,
            rows = rows.len(),
            "Day view built"
        );

        Ok(Self {
            channel_id,
            channel: channels.into_iter().find(|c| c.id == channel_id),
            day,
            rows,
        })
    }

    /// GGR per currency and open/settled counts
    pub fn totals(&self) -> DayTotals {
        let mut totals = DayTotals::default();
        for row in &self.rows {
            totals.add(row);
        }
        totals
    }
}

/// Amount rounded to cents with the currency appended, e.g. `"150.00 USD"`
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    format!("{} {}", rounded, currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, labels::Locale, Error};
    use ledger_core::{
        types::noon_utc, BetId, BetResult, ChannelRole, MultiEntry, NewBet, NewChannel, Snapshot,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn seeded_book() -> (BetBook, ChannelId) {
        let book = BetBook::new(ledger_core::Config::default()).unwrap();
        let shop = book.add_channel(NewChannel::new("Shop", ChannelRole::Bettor));
        let date = noon_utc(day());

        book.create_bet(
            NewBet::single(shop.id, date, Decimal::new(100, 0), Decimal::new(25, 1), "USD")
                .with_match("Rapid - Austria")
                .with_result(BetResult::Won),
        )
        .unwrap();
        book.create_bet(
            NewBet::multi(
                shop.id,
                date,
                Decimal::new(50, 0),
                vec![
                    MultiEntry::new("A - B", Decimal::new(15, 1), date),
                    MultiEntry::new("C - D", Decimal::new(2, 0), date),
                ],
                "EUR",
            )
            .with_result(BetResult::Lost),
        )
        .unwrap();
        book.create_bet(
            NewBet::single(shop.id, date, Decimal::new(10, 0), Decimal::new(3, 0), "USD")
                .with_result(BetResult::Open),
        )
        .unwrap();

        (book, shop.id)
    }

    #[test]
    fn test_build_rows() {
        let (book, shop) = seeded_book();
        let view = DayView::build(&SettlementEngine::default(), &book, shop, day()).unwrap();

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.channel.as_ref().map(|c| c.name.as_str()), Some("Shop"));

        let won = &view.rows[0];
        assert_eq!(won.match_name, "Rapid - Austria");
        assert_eq!(won.result_label, "Gewonnen");
        assert_eq!(won.ggr, Decimal::new(-150, 0));

        let multi = &view.rows[1];
        assert_eq!(multi.effective_odds, Decimal::new(3, 0));
        assert_eq!(multi.ggr, Decimal::new(50, 0));
    }

    #[test]
    fn test_totals() {
        let (book, shop) = seeded_book();
        let view = DayView::build(&SettlementEngine::default(), &book, shop, day()).unwrap();
        let totals = view.totals();

        assert_eq!(totals.ggr("USD"), Decimal::new(-150, 0));
        assert_eq!(totals.ggr("EUR"), Decimal::new(50, 0));
        assert_eq!(totals.open, 1);
        assert_eq!(totals.settled, 2);
    }

    #[test]
    fn test_edit_is_reflected_on_next_build() {
        let (book, shop) = seeded_book();
        let engine = SettlementEngine::new(Config {
            locale: Locale::En,
            ..Config::default()
        });

        let open_id = DayView::build(&engine, &book, shop, day()).unwrap().rows[2].bet_id;
        book.update_bet(open_id, ledger_core::patch::BetField::parse("result", "1").unwrap())
            .unwrap();

        let row = DayView::build(&engine, &book, shop, day()).unwrap().rows[2].clone();
        assert_eq!(row.result_label, "Won");
        assert_eq!(row.ggr, Decimal::new(-20, 0));
    }

    #[test]
    fn test_unknown_channel() {
        // Orphaned bets can only arrive through an imported snapshot.
        let orphan = NewBet::single(ChannelId::new(9), noon_utc(day()), Decimal::new(100, 0), Decimal::TWO, "USD")
            .with_result(BetResult::Won)
            .into_bet(BetId::new(1));
        let snapshot = Snapshot {
            bets: vec![orphan],
            ..Snapshot::default()
        };
        let book = BetBook::from_snapshot(ledger_core::Config::default(), snapshot).unwrap();

        let lenient = DayView::build(&SettlementEngine::default(), &book, ChannelId::new(9), day()).unwrap();
        assert!(lenient.channel.is_none());
        assert_eq!(lenient.rows[0].ggr, Decimal::new(100, 0));

        let strict = SettlementEngine::new(Config {
            strict_channels: true,
            ..Config::default()
        });
        assert!(matches!(
            DayView::build(&strict, &book, ChannelId::new(9), day()),
            Err(Error::ChannelNotFound(_))
        ));
    }

    #[test]
    fn test_empty_day() {
        let (book, shop) = seeded_book();
        let other_day = day().succ_opt().unwrap();
        let view = DayView::build(&SettlementEngine::default(), &book, shop, other_day).unwrap();
        assert!(view.rows.is_empty());
        assert!(view.totals().ggr_by_currency.is_empty());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(150, 0), "USD"), "150.00 USD");
        assert_eq!(format_money(Decimal::new(-12345, 3), "EUR"), "-12.35 EUR");
        assert_eq!(format_money(Decimal::new(12344, 3), "EUR"), "12.34 EUR");
        assert_eq!(format_money(Decimal::new(-1, 3), "USD"), "0.00 USD");
    }
}
