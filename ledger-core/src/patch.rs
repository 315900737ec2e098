//! Single-field bet edits
//!
//! The bet table edits one cell at a time. Each edit is a [`BetField`]:
//! a field name paired with a value of that field's type. Only the fields
//! listed here are editable; `id` and the multi legs are not.
//!
//! # Example
//!
//! ```
//! use ledger_core::patch::BetField;
//!
//! let patch = BetField::parse("stake", "25.50").unwrap();
//! assert_eq!(patch.name(), "stake");
//! assert!(BetField::parse("id", "3").is_err());
//! ```

use crate::{
    error::{Error, Result},
    types::{parse_bet_date, Bet, BetKind, BetResult, ChannelId},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One editable bet field with its new value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum BetField {
    /// Event date
    Date(DateTime<Utc>),
    /// Owning channel
    ChannelId(ChannelId),
    /// Single or multi
    Kind(BetKind),
    /// Event name
    Match(String),
    /// Wagered amount
    Stake(Decimal),
    /// Decimal odds
    Odds(Decimal),
    /// Market
    BetType(String),
    /// Selection
    Pick(String),
    /// Outcome
    Result(BetResult),
    /// Currency tag
    Currency(String),
}

impl BetField {
    /// Build a patch from a wire field name and the raw cell text
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        let field = match name {
            "date" => BetField::Date(
                parse_bet_date(raw).ok_or_else(|| Error::invalid("date", format!("bad date {raw:?}")))?,
            ),
            "channelId" => BetField::ChannelId(ChannelId::new(
                raw.trim()
                    .parse()
                    .map_err(|_| Error::invalid("channelId", format!("not an id: {raw:?}")))?,
            )),
            "kind" => BetField::Kind(
                BetKind::parse(raw.trim())
                    .ok_or_else(|| Error::invalid("kind", format!("unknown kind {raw:?}")))?,
            ),
            "match" => BetField::Match(raw.to_string()),
            "stake" => BetField::Stake(parse_decimal("stake", raw)?),
            "odds" => BetField::Odds(parse_decimal("odds", raw)?),
            "betType" => BetField::BetType(raw.to_string()),
            "pick" => BetField::Pick(raw.to_string()),
            "result" => BetField::Result(BetResult::from(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| Error::invalid("result", format!("not a result code: {raw:?}")))?,
            )),
            "currency" => BetField::Currency(raw.trim().to_string()),
            other => return Err(Error::UnknownField(other.to_string())),
        };

        field.validate()?;
        Ok(field)
    }

    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            BetField::Date(_) => "date",
            BetField::ChannelId(_) => "channelId",
            BetField::Kind(_) => "kind",
            BetField::Match(_) => "match",
            BetField::Stake(_) => "stake",
            BetField::Odds(_) => "odds",
            BetField::BetType(_) => "betType",
            BetField::Pick(_) => "pick",
            BetField::Result(_) => "result",
            BetField::Currency(_) => "currency",
        }
    }

    /// Check the value against the bet data model
    pub fn validate(&self) -> Result<()> {
        match self {
            BetField::Stake(v) | BetField::Odds(v) if *v < Decimal::ZERO => {
                Err(Error::invalid(self.name(), "must not be negative"))
            }
            BetField::Currency(c) if c.trim().is_empty() => {
                Err(Error::invalid("currency", "must not be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Write the value into the bet.
    ///
    /// Switching a bet to [`BetKind::Single`] drops its legs.
    pub fn apply(self, bet: &mut Bet) {
        match self {
            BetField::Date(v) => bet.date = v,
            BetField::ChannelId(v) => bet.channel_id = v,
            BetField::Kind(v) => {
                if v == BetKind::Single {
                    bet.multi_entries.clear();
                }
                bet.kind = v;
            }
            BetField::Match(v) => bet.match_name = v,
            BetField::Stake(v) => bet.stake = v,
            BetField::Odds(v) => bet.odds = v,
            BetField::BetType(v) => bet.bet_type = v,
            BetField::Pick(v) => bet.pick = v,
            BetField::Result(v) => bet.result = v,
            BetField::Currency(v) => bet.currency = v,
        }
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| Error::invalid(field, format!("{raw:?}: {e}")))
}
