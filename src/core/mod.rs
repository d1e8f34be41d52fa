//! Core match types: sides, instance IDs, RNG, configuration, errors,
//! state and the combat log.
//!
//! Everything the rules operate on is defined here; the rules themselves
//! live in `crate::rules`.

pub mod config;
pub mod entity;
pub mod error;
pub mod log;
pub mod rng;
pub mod side;
pub mod state;

pub use config::{DuplicatePolicy, MatchConfig};
pub use entity::{InstanceId, InstanceIds};
pub use error::{AdapterError, ConfigError, PlayRejection};
pub use log::{CombatLog, LogEntry, LogEvent};
pub use rng::GameRng;
pub use side::{SideId, SideMap};
pub use state::{FinishReason, GameStatus, MatchOutcome, MatchResult, MatchState, Side};
