//! Settlement Engine
//!
//! Derives effective odds and gross gaming revenue (GGR) for bets in the book.
//!
//! # Architecture
//!
//! 1. **Odds**: single odds, or the product of a multi bet's legs
//! 2. **GGR**: six-state outcome table, provider convention
//! 3. **Role**: the channel decides whether the figure is mirrored
//! 4. **Views**: channel/day tables with per-currency totals
//!
//! The engine is pure: it reads its arguments and nothing else, so it can be
//! called from any number of threads at once.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ledger_core::{BetId, BetResult, ChannelId, ChannelRole, NewBet};
//! use rust_decimal::Decimal;
//! use settlement::{effective_odds, ggr};
//!
//! let bet = NewBet::single(
//!     ChannelId::new(1),
//!     Utc::now(),
//!     Decimal::new(100, 0),
//!     Decimal::new(25, 1),
//!     "USD",
//! )
//! .with_result(BetResult::Won)
//! .into_bet(BetId::new(1));
//!
//! assert_eq!(effective_odds(&bet), Decimal::new(25, 1));
//! assert_eq!(ggr(&bet, ChannelRole::Provider), Decimal::new(150, 0));
//! assert_eq!(ggr(&bet, ChannelRole::Bettor), Decimal::new(-150, 0));
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod engine;
pub mod labels;
pub mod view;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{effective_odds, ggr, resolve_role, SettlementEngine};
pub use labels::{kind_label, result_label, Locale};
pub use view::{format_money, DayView};
