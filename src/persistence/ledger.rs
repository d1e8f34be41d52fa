//! In-memory outcome store.
//!
//! Keeps a win/loss/tie tally per player id and a table of finished games
//! keyed by match id.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::{MatchRecord, OutcomeSink};
use crate::core::{AdapterError, MatchOutcome, SideId};

/// Lifetime tally for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl PlayerRecord {
    #[must_use]
    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Player tallies plus the game table.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    players: FxHashMap<String, PlayerRecord>,
    games: FxHashMap<Uuid, MatchRecord>,
    order: Vec<Uuid>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally for a player, if they have finished any match.
    #[must_use]
    pub fn get_player(&self, player_id: &str) -> Option<PlayerRecord> {
        self.players.get(player_id).copied()
    }

    /// A stored game.
    #[must_use]
    pub fn get_game(&self, match_id: Uuid) -> Option<&MatchRecord> {
        self.games.get(&match_id)
    }

    /// Stored games in the order they were recorded.
    pub fn games(&self) -> impl Iterator<Item = &MatchRecord> {
        self.order.iter().filter_map(|id| self.games.get(id))
    }

    #[must_use]
    pub fn game_count(&self) -> usize {
        self.order.len()
    }

    fn tally(&mut self, player_id: &str, side: SideId, outcome: MatchOutcome) {
        let entry = self.players.entry(player_id.to_string()).or_default();
        match outcome {
            MatchOutcome::Tie => entry.ties += 1,
            MatchOutcome::Winner(winner) if winner == side => entry.wins += 1,
            MatchOutcome::Winner(_) => entry.losses += 1,
        }
    }
}

impl OutcomeSink for Ledger {
    fn record(&mut self, record: &MatchRecord) -> Result<(), AdapterError> {
        if self.games.contains_key(&record.match_id) {
            return Err(AdapterError::Storage(format!(
                "game {} already recorded",
                record.match_id
            )));
        }

        for side in SideId::all() {
            self.tally(record.player(side), side, record.outcome);
        }
        self.games.insert(record.match_id, record.clone());
        self.order.push(record.match_id);
        Ok(())
    }
}

/// A `Ledger` shared between a session and whoever reads the tallies.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger(Arc<Mutex<Ledger>>);

impl SharedLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl OutcomeSink for SharedLedger {
    fn record(&mut self, record: &MatchRecord) -> Result<(), AdapterError> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(record)
    }
}
