//! The bet book
//!
//! Holds channels and bets, hands out IDs, and applies single-field edits.
//! Derived figures (effective odds, GGR) are never stored here; they are
//! recomputed from the current record on every read.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ledger_core::{BetBook, ChannelRole, Config, NewBet, NewChannel};
//! use ledger_core::patch::BetField;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> ledger_core::Result<()> {
//! let book = BetBook::new(Config::default())?;
//! let channel = book.add_channel(NewChannel::new("Shop", ChannelRole::Provider));
//!
//! let bet = book.create_bet(NewBet::single(
//!     channel.id,
//!     Utc::now(),
//!     Decimal::new(100, 0),
//!     Decimal::new(25, 1),
//!     "USD",
//! ))?;
//!
//! book.update_bet(bet.id, BetField::parse("result", "1")?)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    metrics::Metrics,
    patch::BetField,
    storage::Snapshot,
    types::{Bet, BetId, Channel, ChannelId, NewBet, NewChannel},
    Config, Error, Result,
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct BookState {
    channels: BTreeMap<ChannelId, Channel>,
    bets: BTreeMap<BetId, Bet>,
    next_channel_id: u64,
    next_bet_id: u64,
}

impl BookState {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        // Counters never step back behind an id that was already handed out.
        let next_channel_id = snapshot
            .channels
            .iter()
            .map(|c| c.id.value() + 1)
            .max()
            .unwrap_or(1)
            .max(snapshot.next_channel_id);
        let next_bet_id = snapshot
            .bets
            .iter()
            .map(|b| b.id.value() + 1)
            .max()
            .unwrap_or(1)
            .max(snapshot.next_bet_id);

        Self {
            channels: snapshot.channels.into_iter().map(|c| (c.id, c)).collect(),
            bets: snapshot.bets.into_iter().map(|b| (b.id, b)).collect(),
            next_channel_id,
            next_bet_id,
        }
    }

    fn require_channel(&self, id: ChannelId) -> Result<()> {
        if self.channels.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::ChannelNotFound(id))
        }
    }
}

/// In-memory bet book, safe to share between threads
#[derive(Debug)]
pub struct BetBook {
    state: RwLock<BookState>,
    metrics: Metrics,
    config: Config,
}

impl BetBook {
    /// Create an empty book
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            state: RwLock::new(BookState {
                next_channel_id: 1,
                next_bet_id: 1,
                ..Default::default()
            }),
            metrics: Metrics::new()?,
            config,
        })
    }

    /// Create a book pre-filled from a snapshot
    pub fn from_snapshot(config: Config, snapshot: Snapshot) -> Result<Self> {
        let state = BookState::from_snapshot(snapshot);
        let metrics = Metrics::new()?;
        metrics.set_stored(state.bets.len());

        Ok(Self {
            state: RwLock::new(state),
            metrics,
            config,
        })
    }

    /// Open the book described by the config.
    ///
    /// Loads `snapshot_path` when it is set and exists, otherwise starts empty.
    pub fn open(config: Config) -> Result<Self> {
        tracing::info!(
            service = %config.service_name,
            version = %config.service_version,
            snapshot = ?config.snapshot_path,
            "Opening bet book"
        );

        match config.snapshot_path.clone() {
            Some(path) if path.exists() => {
                let snapshot = Snapshot::load(&path)?;
                Self::from_snapshot(config, snapshot)
            }
            _ => Self::new(config),
        }
    }

    /// Write the book to the configured snapshot path
    pub fn persist(&self) -> Result<()> {
        let path = self
            .config
            .snapshot_path
            .as_ref()
            .ok_or_else(|| Error::Config("No snapshot_path configured".to_string()))?;
        self.snapshot().save(path)
    }

    /// Export all channels and bets
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot {
            channels: state.channels.values().cloned().collect(),
            bets: state.bets.values().cloned().collect(),
            next_channel_id: state.next_channel_id,
            next_bet_id: state.next_bet_id,
        }
    }

    /// Metrics collector
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    // Channels

    /// Register a channel
    pub fn add_channel(&self, channel: NewChannel) -> Channel {
        let mut state = self.state.write();
        let id = ChannelId::new(state.next_channel_id);
        state.next_channel_id += 1;

        let channel = channel.into_channel(id);
        state.channels.insert(id, channel.clone());

        tracing::info!(channel_id = %id, role = %channel.role, "Channel added: {}", channel.name);
        channel
    }

    /// All channels in ID order
    pub fn channels(&self) -> Vec<Channel> {
        self.state.read().channels.values().cloned().collect()
    }

    /// Channel by ID
    pub fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.state.read().channels.get(&id).cloned()
    }

    // Bets

    /// Store a new bet and assign its ID.
    ///
    /// The channel must exist. Legs are kept only for multi bets. A blank
    /// currency falls back to the configured default.
    pub fn create_bet(&self, mut new_bet: NewBet) -> Result<Bet> {
        if new_bet.stake < Decimal::ZERO {
            return Err(Error::InvalidBet(format!(
                "stake must not be negative, got {}",
                new_bet.stake
            )));
        }
        if new_bet.odds < Decimal::ZERO {
            return Err(Error::InvalidBet(format!(
                "odds must not be negative, got {}",
                new_bet.odds
            )));
        }
        if let Some(odds) = new_bet
            .multi_entries
            .iter()
            .filter_map(|leg| leg.odds)
            .find(|odds| *odds < Decimal::ZERO)
        {
            return Err(Error::InvalidBet(format!(
                "leg odds must not be negative, got {odds}"
            )));
        }
        if new_bet.currency.trim().is_empty() {
            new_bet.currency = self.config.default_currency.clone();
        }

        let mut state = self.state.write();
        state.require_channel(new_bet.channel_id)?;
        let id = BetId::new(state.next_bet_id);
        state.next_bet_id += 1;

        let bet = new_bet.into_bet(id);
        state.bets.insert(id, bet.clone());
        drop(state);

        self.metrics.record_created();
        tracing::info!(
            bet_id = %id,
            channel_id = %bet.channel_id,
            kind = %bet.kind,
            legs = bet.multi_entries.len(),
            "Bet created"
        );

        Ok(bet)
    }

    /// Bet by ID
    pub fn bet(&self, id: BetId) -> Result<Bet> {
        self.state
            .read()
            .bets
            .get(&id)
            .cloned()
            .ok_or(Error::BetNotFound(id))
    }

    /// All bets in ID order
    pub fn bets(&self) -> Vec<Bet> {
        self.state.read().bets.values().cloned().collect()
    }

    /// Bets of one channel on one calendar day (UTC), in ID order
    pub fn bets_for(&self, channel_id: ChannelId, day: NaiveDate) -> Vec<Bet> {
        self.state
            .read()
            .bets
            .values()
            .filter(|bet| bet.channel_id == channel_id && bet.day() == day)
            .cloned()
            .collect()
    }

    /// Apply one field edit and return the updated bet.
    ///
    /// Moving a bet to another channel requires that channel to exist.
    pub fn update_bet(&self, id: BetId, field: BetField) -> Result<Bet> {
        field.validate()?;
        let name = field.name();

        let mut state = self.state.write();
        if let BetField::ChannelId(channel_id) = &field {
            state.require_channel(*channel_id)?;
        }
        let bet = state.bets.get_mut(&id).ok_or(Error::BetNotFound(id))?;
        field.apply(bet);
        let updated = bet.clone();
        drop(state);

        self.metrics.record_updated();
        tracing::info!(bet_id = %id, field = name, "Bet updated");

        Ok(updated)
    }

    /// Remove a bet together with its legs
    pub fn delete_bet(&self, id: BetId) -> Result<Bet> {
        let removed = self
            .state
            .write()
            .bets
            .remove(&id)
            .ok_or(Error::BetNotFound(id))?;

        self.metrics.record_deleted();
        tracing::info!(
            bet_id = %id,
            legs = removed.multi_entries.len(),
            "Bet deleted"
        );

        Ok(removed)
    }
}
