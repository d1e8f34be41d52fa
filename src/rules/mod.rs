//! Match rules.
//!
//! - `combat`: pure exchange and energy-loss arithmetic
//! - `deal`: opening hands and replenishment
//! - `engine`: the state machine that applies both to a `MatchState`

pub mod combat;
pub mod deal;
pub mod engine;

pub use combat::{damage, resolve, resolve_clash, Clash, Exchange};
pub use engine::{MatchEngine, PlayOutcome, TickOutcome};
