//! Snapshot storage
//!
//! The book is held in memory; a [`Snapshot`] is its serialized form, written
//! as one JSON document:
//!
//! ```text
//! { "channels": [ { "id": 1, "name": "...", "type": "Provider" } ],
//!   "bets":     [ { "id": 1, "channelId": 1, ... "multiEntries": [...] } ],
//!   "nextChannelId": 2,
//!   "nextBetId": 2 }
//! ```
//!
//! The counters keep IDs of deleted records from being handed out again.
//! Files without them fall back to the highest stored ID.

use crate::{
    error::Result,
    types::{Bet, Channel},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full contents of a bet book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// All channels
    #[serde(default)]
    pub channels: Vec<Channel>,

    /// All bets, legs nested
    #[serde(default)]
    pub bets: Vec<Bet>,

    /// Next channel ID to assign (0 when unknown)
    #[serde(default)]
    pub next_channel_id: u64,

    /// Next bet ID to assign (0 when unknown)
    #[serde(default)]
    pub next_bet_id: u64,
}

impl Snapshot {
    /// Read snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        tracing::info!(
            "Loaded snapshot from {:?}: {} channels, {} bets",
            path,
            snapshot.channels.len(),
            snapshot.bets.len()
        );

        Ok(snapshot)
    }

    /// Write snapshot to a JSON file, replacing it atomically
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&tmp, path)?;

        tracing::debug!("Saved snapshot to {:?}", path);
        Ok(())
    }
}
