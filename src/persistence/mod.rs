//! Persistence boundary: where finished matches go.
//!
//! The session hands every finished match to an `OutcomeSink` exactly once.
//! A failing sink is logged and ignored; it never rolls back or blocks the
//! match itself.

pub mod ledger;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::TemplateId;
use crate::core::{AdapterError, FinishReason, MatchOutcome, MatchState, SideId, SideMap};

pub use ledger::{Ledger, PlayerRecord, SharedLedger};

/// Summary of one finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: Uuid,
    /// Player id seated on each side.
    pub seats: SideMap<String>,
    pub outcome: MatchOutcome,
    pub reason: FinishReason,
    pub final_energy: SideMap<u32>,
    pub kills: SideMap<u32>,
    /// Templates left in each hand when the match ended.
    pub final_hands: SideMap<Vec<TemplateId>>,
    /// Last template each side committed to the battlefield.
    pub last_played: SideMap<Option<TemplateId>>,
    pub ticks: u32,
    pub rounds: u32,
    pub epoch: u64,
}

impl MatchRecord {
    /// Build a record from a finished state. `None` while the match is still going.
    #[must_use]
    pub fn from_state(match_id: Uuid, seats: SideMap<String>, state: &MatchState) -> Option<Self> {
        let result = state.result?;
        Some(Self {
            match_id,
            seats,
            outcome: result.outcome,
            reason: result.reason,
            final_energy: state.sides.map(|_, s| s.energy),
            kills: state.sides.map(|_, s| s.kills),
            final_hands: state.sides.map(|_, s| s.hand.iter().map(|c| c.template).collect()),
            last_played: state.sides.map(|_, s| s.last_played),
            ticks: state.tick,
            rounds: state.round,
            epoch: state.epoch,
        })
    }

    /// Player id of the winner, if not a tie.
    #[must_use]
    pub fn winner_id(&self) -> Option<&str> {
        self.outcome.winner().map(|side| self.seats[side].as_str())
    }

    /// Player id seated on `side`.
    #[must_use]
    pub fn player(&self, side: SideId) -> &str {
        &self.seats[side]
    }
}

/// Receives finished matches.
pub trait OutcomeSink: Send {
    fn record(&mut self, record: &MatchRecord) -> Result<(), AdapterError>;
}
