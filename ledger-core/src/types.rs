//! Core types for the bet book
//!
//! All types are designed for:
//! - Wire compatibility with the stored bet records (camelCase JSON)
//! - Exact arithmetic (Decimal for stakes and odds)
//! - Total conversions, so malformed records never fail to load

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bet identifier, assigned by the book on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(u64);

impl BetId {
    /// Create new bet ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Create new channel ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the bet a channel sits on.
///
/// GGR is booked from the provider's point of view; a bettor channel sees
/// the mirrored figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChannelRole {
    /// House side
    #[default]
    Provider,
    /// Punter side
    Bettor,
}

impl ChannelRole {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelRole::Provider => "Provider",
            ChannelRole::Bettor => "Bettor",
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution channel a bet is placed through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID
    pub id: ChannelId,

    /// Display label
    pub name: String,

    /// Sign convention for GGR
    #[serde(rename = "type", default)]
    pub role: ChannelRole,

    /// Cashback rate agreed with the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<Decimal>,

    /// Accounting period label (e.g. "weekly")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// First day of a weekly period
    #[serde(rename = "weekStart", default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<u32>,

    /// First day of a monthly period
    #[serde(rename = "monthStart", default, skip_serializing_if = "Option::is_none")]
    pub month_start: Option<u32>,
}

/// Channel data before an ID is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChannel {
    /// Display label
    pub name: String,

    /// Sign convention for GGR
    #[serde(rename = "type", default)]
    pub role: ChannelRole,

    /// Cashback rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<Decimal>,

    /// Accounting period label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// First day of a weekly period
    #[serde(rename = "weekStart", default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<u32>,

    /// First day of a monthly period
    #[serde(rename = "monthStart", default, skip_serializing_if = "Option::is_none")]
    pub month_start: Option<u32>,
}

impl NewChannel {
    /// Channel with just a name and role
    pub fn new(name: impl Into<String>, role: ChannelRole) -> Self {
        Self {
            name: name.into(),
            role,
            cashback: None,
            period: None,
            week_start: None,
            month_start: None,
        }
    }

    pub(crate) fn into_channel(self, id: ChannelId) -> Channel {
        Channel {
            id,
            name: self.name,
            role: self.role,
            cashback: self.cashback,
            period: self.period,
            week_start: self.week_start,
            month_start: self.month_start,
        }
    }
}

/// Single wager or combination of legs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BetKind {
    /// One outcome, one odds value
    #[default]
    Single,
    /// Parlay; odds come from the legs
    Multi,
}

impl BetKind {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            BetKind::Single => "Single",
            BetKind::Multi => "Multi",
        }
    }

    /// Parse from wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Single" => Some(BetKind::Single),
            "Multi" => Some(BetKind::Multi),
            _ => None,
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a bet.
///
/// Stored as a bare integer code. Codes outside `0..=5` are kept verbatim
/// in [`BetResult::Unrecognized`] so a record never fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum BetResult {
    /// Code 0
    #[default]
    Lost,
    /// Code 1
    Won,
    /// Code 2: lost, half the stake returned
    VoidLoss,
    /// Code 3: won, half the stake returned
    VoidWin,
    /// Code 4: no action
    Push,
    /// Code 5: not yet settled
    Open,
    /// Any other code
    Unrecognized(i32),
}

impl BetResult {
    /// Integer code
    pub fn code(&self) -> i32 {
        match self {
            BetResult::Lost => 0,
            BetResult::Won => 1,
            BetResult::VoidLoss => 2,
            BetResult::VoidWin => 3,
            BetResult::Push => 4,
            BetResult::Open => 5,
            BetResult::Unrecognized(code) => *code,
        }
    }

    /// Still pending
    pub fn is_open(&self) -> bool {
        matches!(self, BetResult::Open)
    }

    /// Settled into one of the five final states
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BetResult::Lost
                | BetResult::Won
                | BetResult::VoidLoss
                | BetResult::VoidWin
                | BetResult::Push
        )
    }
}

impl From<i32> for BetResult {
    fn from(code: i32) -> Self {
        match code {
            0 => BetResult::Lost,
            1 => BetResult::Won,
            2 => BetResult::VoidLoss,
            3 => BetResult::VoidWin,
            4 => BetResult::Push,
            5 => BetResult::Open,
            other => BetResult::Unrecognized(other),
        }
    }
}

impl From<BetResult> for i32 {
    fn from(result: BetResult) -> Self {
        result.code()
    }
}

/// One leg of a multi bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEntry {
    /// Event the leg is placed on
    #[serde(rename = "match", default)]
    pub match_name: String,

    /// Market
    #[serde(default)]
    pub bet_type: String,

    /// Selection within the market
    #[serde(default)]
    pub pick: String,

    /// Decimal odds for this leg (None while still being entered)
    #[serde(default)]
    pub odds: Option<Decimal>,

    /// Line for over/under markets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Decimal>,

    /// Kick-off of this leg
    pub date: DateTime<Utc>,

    /// Per-leg outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<BetResult>,
}

impl MultiEntry {
    /// Leg with match name and odds
    pub fn new(match_name: impl Into<String>, odds: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            match_name: match_name.into(),
            bet_type: String::new(),
            pick: String::new(),
            odds: Some(odds),
            goals: None,
            date,
            result: None,
        }
    }
}

/// A bet record ("Wettschein")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    /// Bet ID (never changes)
    pub id: BetId,

    /// When the wagered event takes place
    pub date: DateTime<Utc>,

    /// Channel the bet was placed through
    pub channel_id: ChannelId,

    /// Single or multi
    #[serde(default)]
    pub kind: BetKind,

    /// Event name
    #[serde(rename = "match", default)]
    pub match_name: String,

    /// Wagered amount
    pub stake: Decimal,

    /// Decimal odds (ignored for multi bets)
    #[serde(default)]
    pub odds: Decimal,

    /// Market
    #[serde(default)]
    pub bet_type: String,

    /// Selection within the market
    #[serde(default)]
    pub pick: String,

    /// Outcome
    #[serde(default)]
    pub result: BetResult,

    /// Currency tag, never converted
    pub currency: String,

    /// Legs, only populated for multi bets
    #[serde(default)]
    pub multi_entries: Vec<MultiEntry>,
}

impl Bet {
    /// Calendar day (UTC) the bet belongs to
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Bet data before an ID is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBet {
    /// When the wagered event takes place
    pub date: DateTime<Utc>,

    /// Channel the bet was placed through
    pub channel_id: ChannelId,

    /// Single or multi
    #[serde(default)]
    pub kind: BetKind,

    /// Event name
    #[serde(rename = "match", default)]
    pub match_name: String,

    /// Wagered amount
    pub stake: Decimal,

    /// Decimal odds
    #[serde(default)]
    pub odds: Decimal,

    /// Market
    #[serde(default)]
    pub bet_type: String,

    /// Selection
    #[serde(default)]
    pub pick: String,

    /// Outcome
    #[serde(default)]
    pub result: BetResult,

    /// Currency tag
    pub currency: String,

    /// Legs
    #[serde(default)]
    pub multi_entries: Vec<MultiEntry>,
}

impl NewBet {
    /// Open single bet
    pub fn single(
        channel_id: ChannelId,
        date: DateTime<Utc>,
        stake: Decimal,
        odds: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            channel_id,
            kind: BetKind::Single,
            match_name: String::new(),
            stake,
            odds,
            bet_type: String::new(),
            pick: String::new(),
            result: BetResult::Open,
            currency: currency.into(),
            multi_entries: Vec::new(),
        }
    }

    /// Open multi bet over the given legs
    pub fn multi(
        channel_id: ChannelId,
        date: DateTime<Utc>,
        stake: Decimal,
        entries: Vec<MultiEntry>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            kind: BetKind::Multi,
            odds: Decimal::ZERO,
            multi_entries: entries,
            ..Self::single(channel_id, date, stake, Decimal::ZERO, currency)
        }
    }

    /// Set outcome
    pub fn with_result(mut self, result: BetResult) -> Self {
        self.result = result;
        self
    }

    /// Set event name
    pub fn with_match(mut self, match_name: impl Into<String>) -> Self {
        self.match_name = match_name.into();
        self
    }

    /// Attach an ID. Legs are dropped for single bets.
    pub fn into_bet(self, id: BetId) -> Bet {
        let multi_entries = match self.kind {
            BetKind::Multi => self.multi_entries,
            BetKind::Single => Vec::new(),
        };

        Bet {
            id,
            date: self.date,
            channel_id: self.channel_id,
            kind: self.kind,
            match_name: self.match_name,
            stake: self.stake,
            odds: self.odds,
            bet_type: self.bet_type,
            pick: self.pick,
            result: self.result,
            currency: self.currency,
            multi_entries,
        }
    }
}

/// Parse a bet date: RFC 3339, or a bare `YYYY-MM-DD` pinned to noon UTC
pub fn parse_bet_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(noon_utc(day))
}

/// Noon UTC on the given day
pub fn noon_utc(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(day.and_time(NaiveTime::MIN) + chrono::Duration::hours(12)))
}
