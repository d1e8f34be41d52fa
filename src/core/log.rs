//! Combat log: a bounded, append-only record of match events.
//!
//! The log is for display only. Entries carry logical timestamps (the tick
//! they happened on plus a running sequence number) rather than wall-clock
//! time, so two engines fed the same intents produce identical logs.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::side::{SideId, SideMap};
use super::state::MatchResult;
use crate::cards::TemplateId;

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    /// The match moved to `Playing`.
    MatchStarted { first: SideId },
    /// A card left a hand for the battlefield.
    CardPlayed {
        side: SideId,
        card: InstanceId,
        template: TemplateId,
    },
    /// One simultaneous exchange; `dealt[side]` is the damage that side's card dealt.
    Exchange { dealt: SideMap<u32> },
    /// Energy lost to the damage differential.
    EnergyDrained { side: SideId, amount: u32 },
    /// A card reached zero hp and left the battlefield.
    CardDefeated {
        side: SideId,
        card: InstanceId,
        template: TemplateId,
        energy_loss: u32,
    },
    /// Cards drawn to restore the hand target.
    HandReplenished { side: SideId, drawn: usize },
    /// The match reached a terminal state.
    MatchFinished { result: MatchResult },
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEvent::MatchStarted { first } => write!(f, "Match started, {} plays first", first),
            LogEvent::CardPlayed { side, template, .. } => {
                write!(f, "{} played {}", side, template)
            }
            LogEvent::Exchange { dealt } => write!(
                f,
                "player dealt {}, opponent dealt {}",
                dealt[SideId::Player],
                dealt[SideId::Opponent]
            ),
            LogEvent::EnergyDrained { side, amount } => {
                write!(f, "{} lost {} energy to the exchange", side, amount)
            }
            LogEvent::CardDefeated {
                side,
                template,
                energy_loss,
                ..
            } => write!(f, "{}'s {} was defeated (-{} energy)", side, template, energy_loss),
            LogEvent::HandReplenished { side, drawn } => write!(f, "{} drew {} card(s)", side, drawn),
            LogEvent::MatchFinished { result } => write!(f, "Match finished: {}", result),
        }
    }
}

/// A logged event with its logical timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the full (untrimmed) log, starting at 0.
    pub sequence: u64,
    /// Tick counter when the event happened.
    pub tick: u32,
    pub event: LogEvent,
}

/// Bounded log retaining the newest `capacity` entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vector<LogEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl CombatLog {
    /// Create an empty log.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
            next_sequence: 0,
        }
    }

    /// Append an event, dropping the oldest entries past capacity.
    pub fn push(&mut self, tick: u32, event: LogEvent) {
        self.entries.push_back(LogEntry {
            sequence: self.next_sequence,
            tick,
            event,
        });
        self.next_sequence += 1;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total events ever appended, including trimmed ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.next_sequence
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}
