//! Betbook Ledger Core
//!
//! Bet records ("Wettscheine"), the channels they are placed through, and the
//! book that stores them.
//!
//! # Architecture
//!
//! - **Records**: [`Bet`], [`MultiEntry`], [`Channel`] mirror the stored JSON
//! - **Edits**: one validated [`patch::BetField`] at a time
//! - **Book**: thread-safe in-memory store with JSON snapshots
//!
//! # Invariants
//!
//! - A bet's ID never changes after creation
//! - Legs exist only on multi bets and are removed with their bet
//! - Result codes outside the known six states load without error

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod patch;
pub mod storage;
pub mod ledger;
pub mod error;
pub mod config;
pub mod metrics;

// Re-exports
pub use error::{Error, Result};
pub use types::{
    Bet, BetId, BetKind, BetResult, Channel, ChannelId, ChannelRole, MultiEntry, NewBet,
    NewChannel,
};
pub use ledger::BetBook;
pub use storage::Snapshot;
pub use config::Config;
