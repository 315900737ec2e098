//! GGR settlement engine
//!
//! Derives effective odds and gross gaming revenue for a bet.
//!
//! # Outcome table
//!
//! GGR from the provider's side, `odds` being the effective odds:
//!
//! ```text
//! code  outcome                     GGR
//! 0     lost                        -stake
//! 1     won                         stake * (odds - 1)
//! 2     lost, half stake returned   -stake / 2
//! 3     won, half stake returned    (stake / 2) * (odds - 1)
//! 4     push                        0
//! 5     open                        0
//! *     unrecognized                0
//! ```
//!
//! A bettor channel sees the negated figure.
//!
//! Every function here is total: missing legs, unknown codes and decimal
//! overflow all come out as zero rather than an error.

use crate::{
    config::Config,
    types::Settlement,
    Error, Result,
};
use ledger_core::{Bet, BetKind, BetResult, Channel, ChannelId, ChannelRole, MultiEntry};
use rust_decimal::Decimal;

/// Odds the bet pays out at.
///
/// Single bets return their own odds. Multi bets return the product of
/// their legs' odds, or zero when there are no legs or any leg has
/// missing or zero odds.
pub fn effective_odds(bet: &Bet) -> Decimal {
    match bet.kind {
        BetKind::Single => bet.odds,
        BetKind::Multi => combined_odds(&bet.multi_entries),
    }
}

fn combined_odds(entries: &[MultiEntry]) -> Decimal {
    if entries.is_empty() {
        return Decimal::ZERO;
    }

    entries
        .iter()
        .try_fold(Decimal::ONE, |product, entry| {
            let odds = entry.odds.filter(|odds| !odds.is_zero())?;
            product.checked_mul(odds)
        })
        .unwrap_or(Decimal::ZERO)
}

/// Gross gaming revenue of a bet for the given channel role
pub fn ggr(bet: &Bet, role: ChannelRole) -> Decimal {
    let provider = provider_ggr(bet.stake, effective_odds(bet), bet.result).unwrap_or_else(|| {
        tracing::warn!(bet_id = %bet.id, "GGR overflow, treated as zero");
        Decimal::ZERO
    });

    match role {
        ChannelRole::Provider => provider,
        ChannelRole::Bettor if provider.is_zero() => Decimal::ZERO,
        ChannelRole::Bettor => -provider,
    }
}

fn provider_ggr(stake: Decimal, odds: Decimal, result: BetResult) -> Option<Decimal> {
    let half_stake = stake / Decimal::TWO;
    match result {
        BetResult::Lost => Some(-stake),
        BetResult::Won => stake.checked_mul(odds.checked_sub(Decimal::ONE)?),
        BetResult::VoidLoss => Some(-half_stake),
        BetResult::VoidWin => half_stake.checked_mul(odds.checked_sub(Decimal::ONE)?),
        BetResult::Push | BetResult::Open | BetResult::Unrecognized(_) => Some(Decimal::ZERO),
    }
}

/// Role of the channel a bet belongs to.
///
/// Falls back to [`ChannelRole::Provider`] when the channel is unknown.
pub fn resolve_role(channels: &[Channel], channel_id: ChannelId) -> ChannelRole {
    match channels.iter().find(|channel| channel.id == channel_id) {
        Some(channel) => channel.role,
        None => {
            tracing::warn!(channel_id = %channel_id, "Unknown channel, using Provider role");
            ChannelRole::Provider
        }
    }
}

/// Settlement engine
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    /// Configuration
    config: Config,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Role for a channel, honoring `strict_channels`
    pub fn role_for(&self, channels: &[Channel], channel_id: ChannelId) -> Result<ChannelRole> {
        if self.config.strict_channels && !channels.iter().any(|c| c.id == channel_id) {
            return Err(Error::ChannelNotFound(channel_id));
        }
        Ok(resolve_role(channels, channel_id))
    }

    /// Compute effective odds and GGR for one bet
    pub fn settle(&self, bet: &Bet, channels: &[Channel]) -> Result<Settlement> {
        let role = self.role_for(channels, bet.channel_id)?;
        let effective_odds = effective_odds(bet);
        let ggr = ggr(bet, role);

        tracing::debug!(
            bet_id = %bet.id,
            role = %role,
            result = bet.result.code(),
            %effective_odds,
            %ggr,
            "Bet settled"
        );

        Ok(Settlement {
            bet_id: bet.id,
            role,
            effective_odds,
            ggr,
            currency: bet.currency.clone(),
            result: bet.result,
        })
    }
}
