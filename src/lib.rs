//! # suimon-core
//!
//! Combat and match state machine for the Suimon card battle.
//!
//! Two sides each hold a hand of monster cards. Each side commits one card
//! to its battlefield slot, and committed cards fight on a fixed tick
//! cadence. Defeats and lopsided exchanges drain the owning side's energy;
//! the first side to run dry loses.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: `MatchEngine` is the only thing that mutates a
//!    `MatchState`. Observers get owned snapshots.
//!
//! 2. **Explicit Ticks**: Advancing combat is a method call. Wall-clock
//!    cadence lives in `session`, so every rule is testable without timers.
//!
//! 3. **Configuration Over Constants**: Hand size, energy, damage floor and
//!    the energy-loss model are `MatchConfig` fields.
//!
//! 4. **Deterministic**: One seed drives dealing and policy choices through
//!    separate streams.
//!
//! ## Modules
//!
//! - `core`: Sides, instance IDs, RNG, configuration, errors, state, combat log
//! - `cards`: Card templates, instances and the catalog
//! - `rules`: Combat resolution, dealing and the match engine
//! - `ai`: Opponent policies
//! - `sync`: Snapshot publishing and mirroring
//! - `persistence`: Match records and the outcome ledger
//! - `session`: Clock-driven, async match ownership

pub mod ai;
pub mod cards;
pub mod core;
pub mod persistence;
pub mod rules;
pub mod session;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    AdapterError, CombatLog, ConfigError, DuplicatePolicy, FinishReason, GameRng, GameStatus,
    InstanceId, LogEntry, LogEvent, MatchConfig, MatchOutcome, MatchResult, MatchState,
    PlayRejection, Side, SideId, SideMap,
};

pub use crate::cards::{CardCatalog, CardInstance, CardStats, CardTemplate, TemplateId};

pub use crate::rules::{Clash, MatchEngine, PlayOutcome, TickOutcome};

pub use crate::ai::{CounterPolicy, OpponentPolicy, RandomPolicy, StrongestPolicy};

pub use crate::sync::{ChannelSync, NullSync, Replica, SyncAdapter};

pub use crate::persistence::{Ledger, MatchRecord, OutcomeSink, PlayerRecord, SharedLedger};

pub use crate::session::{MatchSession, SessionBuilder};
