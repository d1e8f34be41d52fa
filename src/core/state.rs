//! Match state: both sides, turn, status, counters and the combat log.
//!
//! ## Side
//!
//! Per-side state:
//! - Energy pool (the side's life total)
//! - Hand and the single battlefield slot
//! - Kill count
//!
//! ## MatchState
//!
//! The aggregate the engine mutates and everyone else reads. It is
//! serializable so a mirror can receive it verbatim, and cheap to clone
//! (the combat log is an `im` vector) so every observer gets its own
//! snapshot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::MatchConfig;
use super::entity::InstanceId;
use super::log::{CombatLog, LogEvent};
use super::side::{SideId, SideMap};
use crate::cards::{CardInstance, TemplateId};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Hands dealt, not yet started.
    Waiting,
    /// Cards may be played and ticks resolve combat.
    Playing,
    /// Terminal until the match is rebuilt.
    Finished,
}

/// Who won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Single winner.
    Winner(SideId),
    /// Neither side won.
    Tie,
}

impl MatchOutcome {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: SideId) -> bool {
        matches!(self, MatchOutcome::Winner(w) if *w == side)
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        match self {
            MatchOutcome::Winner(side) => Some(*side),
            MatchOutcome::Tie => None,
        }
    }
}

/// Which terminal condition ended the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    /// At least one side reached zero energy.
    EnergyDepleted,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Outcome plus the condition that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub reason: FinishReason,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            FinishReason::EnergyDepleted => "energy depleted",
            FinishReason::TickLimit => "tick limit",
        };
        match self.outcome {
            MatchOutcome::Winner(side) => write!(f, "{} wins ({})", side, reason),
            MatchOutcome::Tie => write!(f, "tie ({})", reason),
        }
    }
}

/// One side of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    /// Remaining energy, `0..=energy_max`.
    pub energy: u32,

    /// Starting energy.
    pub energy_max: u32,

    /// Cards in hand, in draw order.
    pub hand: SmallVec<[CardInstance; 4]>,

    /// The card currently fighting, if any.
    pub battlefield: Option<CardInstance>,

    /// Opposing cards this side has defeated.
    pub kills: u32,

    /// Template most recently committed to the battlefield. Survives the
    /// slot being cleared, so a finished match still names its last cards.
    pub last_played: Option<TemplateId>,
}

impl Side {
    /// Create a side at full energy with the given hand.
    #[must_use]
    pub fn new(energy_max: u32, hand: Vec<CardInstance>) -> Self {
        Self {
            energy: energy_max,
            energy_max,
            hand: SmallVec::from_vec(hand),
            battlefield: None,
            kills: 0,
            last_played: None,
        }
    }

    /// Cards held between hand and battlefield.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + usize::from(self.battlefield.is_some())
    }

    /// Position of an instance in the hand.
    #[must_use]
    pub fn hand_position(&self, id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    /// Templates currently held (hand and battlefield).
    pub fn held_templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.hand
            .iter()
            .chain(self.battlefield.iter())
            .map(|c| c.template)
    }

    /// Is the battlefield slot empty?
    #[must_use]
    pub fn slot_empty(&self) -> bool {
        self.battlefield.is_none()
    }

    /// Reduce energy, clamping at zero. Returns the energy actually lost.
    pub fn lose_energy(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.energy);
        self.energy -= lost;
        lost
    }

    /// Has this side run out of energy?
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.energy == 0
    }
}

/// Full match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Both sides.
    pub sides: SideMap<Side>,

    /// Side that must commit a card next. `None` while both slots are full
    /// (combat in progress) or once the match is finished.
    pub current_turn: Option<SideId>,

    pub status: GameStatus,

    /// Combat ticks resolved so far.
    pub tick: u32,

    /// Engagements started (both slots filled) so far.
    pub round: u32,

    /// Set once `status` is `Finished`.
    pub result: Option<MatchResult>,

    pub combat_log: CombatLog,

    /// Reset generation. Bumped by every `play_again`.
    pub epoch: u64,

    /// Number of mutations applied within this epoch.
    pub revision: u64,
}

impl MatchState {
    /// Create a waiting match with freshly dealt hands.
    #[must_use]
    pub fn new(config: &MatchConfig, mut hands: SideMap<Vec<CardInstance>>, epoch: u64) -> Self {
        Self {
            sides: SideMap::new(|side| Side::new(config.energy_max, std::mem::take(&mut hands[side]))),
            current_turn: None,
            status: GameStatus::Waiting,
            tick: 0,
            round: 0,
            result: None,
            combat_log: CombatLog::new(config.combat_log_capacity),
            epoch,
            revision: 0,
        }
    }

    /// Get a side.
    #[must_use]
    pub fn side(&self, side: SideId) -> &Side {
        &self.sides[side]
    }

    /// Get a side mutably.
    pub fn side_mut(&mut self, side: SideId) -> &mut Side {
        &mut self.sides[side]
    }

    /// Are both battlefield slots occupied?
    #[must_use]
    pub fn both_engaged(&self) -> bool {
        self.sides.iter().all(|(_, s)| s.battlefield.is_some())
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// The winning side, if the match is over and not tied.
    #[must_use]
    pub fn winner(&self) -> Option<SideId> {
        self.result.and_then(|r| r.outcome.winner())
    }

    /// Find which side holds an instance in hand.
    #[must_use]
    pub fn owner_of(&self, id: InstanceId) -> Option<SideId> {
        self.sides
            .iter()
            .find(|(_, s)| s.hand_position(id).is_some())
            .map(|(side, _)| side)
    }

    /// Append an event stamped with the current tick.
    pub fn log(&mut self, event: LogEvent) {
        self.combat_log.push(self.tick, event);
    }
}
