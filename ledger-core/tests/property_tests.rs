//! Property-based tests for bet book invariants
//!
//! These tests use proptest to verify:
//! - Identity: bet IDs are unique and never change on edit
//! - Single-field edits: a patch touches exactly one field
//! - Fail-soft loading: any result code survives a snapshot
//! - Channel/day filter: every bet lands in exactly one view

use chrono::{Duration, NaiveDate};
use ledger_core::{
    patch::BetField,
    types::noon_utc,
    BetBook, BetResult, ChannelId, ChannelRole, Config, NewBet, NewChannel, Snapshot,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating stakes (cents, non-negative)
fn stake_strategy() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000_00u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Strategy for generating decimal odds
fn odds_strategy() -> impl Strategy<Value = Decimal> {
    (100u64..10_000u64).prop_map(|hundredths| Decimal::new(hundredths as i64, 2))
}

/// Strategy for generating patches
fn patch_strategy() -> impl Strategy<Value = BetField> {
    prop_oneof![
        stake_strategy().prop_map(BetField::Stake),
        odds_strategy().prop_map(BetField::Odds),
        any::<i32>().prop_map(|code| BetField::Result(BetResult::from(code))),
        "[A-Z][a-z]{2,8} - [A-Z][a-z]{2,8}".prop_map(BetField::Match),
        "[A-Z]{3}".prop_map(BetField::Currency),
    ]
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn book_with_channels(count: usize) -> (BetBook, Vec<ChannelId>) {
    let book = BetBook::new(Config::default()).unwrap();
    let ids = (0..count)
        .map(|i| {
            book.add_channel(NewChannel::new(format!("Channel {i}"), ChannelRole::Provider))
                .id
        })
        .collect();
    (book, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: IDs are unique and strictly increasing
    #[test]
    fn prop_ids_unique(stakes in prop::collection::vec(stake_strategy(), 1..40)) {
        let (book, channels) = book_with_channels(1);

        let mut last = 0u64;
        for stake in stakes {
            let bet = book
                .create_bet(NewBet::single(channels[0], noon_utc(base_day()), stake, Decimal::new(2, 0), "USD"))
                .unwrap();
            prop_assert!(bet.id.value() > last);
            last = bet.id.value();
        }
    }

    /// Property: a patch changes exactly its own field
    #[test]
    fn prop_patch_touches_one_field(patch in patch_strategy(), stake in stake_strategy(), odds in odds_strategy()) {
        let (book, channels) = book_with_channels(1);
        let before = book
            .create_bet(NewBet::single(channels[0], noon_utc(base_day()), stake, odds, "EUR"))
            .unwrap();

        let name = patch.name();
        let after = book.update_bet(before.id, patch).unwrap();

        prop_assert_eq!(after.id, before.id);
        prop_assert_eq!(after.date, before.date);
        prop_assert_eq!(after.channel_id, before.channel_id);
        if name != "stake" { prop_assert_eq!(after.stake, before.stake); }
        if name != "odds" { prop_assert_eq!(after.odds, before.odds); }
        if name != "result" { prop_assert_eq!(after.result, before.result); }
        if name != "match" { prop_assert_eq!(&after.match_name, &before.match_name); }
        if name != "currency" { prop_assert_eq!(&after.currency, &before.currency); }
    }

    /// Property: any result code survives a JSON snapshot unchanged
    #[test]
    fn prop_result_code_survives_snapshot(code in any::<i32>()) {
        let (book, channels) = book_with_channels(1);
        let bet = book
            .create_bet(
                NewBet::single(channels[0], noon_utc(base_day()), Decimal::new(10, 0), Decimal::new(2, 0), "USD")
                    .with_result(BetResult::from(code)),
            )
            .unwrap();

        let json = serde_json::to_string(&book.snapshot()).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored.bets.len(), 1);
        prop_assert_eq!(restored.bets[0].id, bet.id);
        prop_assert_eq!(restored.bets[0].result.code(), code);
    }

    /// Property: channel/day views partition the book
    #[test]
    fn prop_day_views_partition(placements in prop::collection::vec((0usize..3, 0i64..5), 0..30)) {
        let (book, channels) = book_with_channels(3);

        for (channel, offset) in &placements {
            let day = base_day() + Duration::days(*offset);
            book.create_bet(NewBet::single(channels[*channel], noon_utc(day), Decimal::ONE, Decimal::TWO, "USD"))
                .unwrap();
        }

        let mut seen = 0;
        for channel in &channels {
            for offset in 0..5 {
                let day = base_day() + Duration::days(offset);
                let view = book.bets_for(*channel, day);
                prop_assert!(view.iter().all(|b| b.channel_id == *channel && b.day() == day));
                seen += view.len();
            }
        }
        prop_assert_eq!(seen, placements.len());
    }
}

#[test]
fn test_concurrent_creation_assigns_distinct_ids() {
    use std::sync::Arc;

    let (book, channels) = book_with_channels(1);
    let book = Arc::new(book);
    let channel = channels[0];

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let book = Arc::clone(&book);
            std::thread::spawn(move || {
                (0..25)
                    .map(|_| {
                        book.create_bet(NewBet::single(
                            channel,
                            noon_utc(base_day()),
                            Decimal::ONE,
                            Decimal::TWO,
                            "USD",
                        ))
                        .unwrap()
                        .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 200);
    assert_eq!(book.metrics().bets_created.get(), 200);
}
