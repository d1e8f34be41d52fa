//! Error types.
//!
//! Three families, matching how far a failure reaches:
//!
//! - `PlayRejection`: an illegal intent. Returned to the caller; the match
//!   state is untouched.
//! - `ConfigError`: fatal at construction. No engine is produced.
//! - `AdapterError`: a sync or persistence collaborator failed. Logged and
//!   dropped by the session; never reaches match state.
//!
//! Defeats, energy depletion and ties are ordinary state, not errors.

use super::entity::InstanceId;
use super::side::SideId;

/// Why a `play_card` intent was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayRejection {
    /// The match is waiting to start or already finished.
    NotPlaying,
    /// It is not this side's turn to commit a card.
    NotYourTurn(SideId),
    /// The side already has a card fighting.
    SlotOccupied(SideId),
    /// The instance is not in this side's hand.
    CardNotInHand(SideId, InstanceId),
    /// The side has no cards to play.
    EmptyHand(SideId),
    /// The opponent policy returned no card.
    PolicyDeclined(SideId),
}

impl std::fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayRejection::NotPlaying => write!(f, "Match is not in progress"),
            PlayRejection::NotYourTurn(side) => write!(f, "It is not {}'s turn", side),
            PlayRejection::SlotOccupied(side) => {
                write!(f, "{} already has a card on the battlefield", side)
            }
            PlayRejection::CardNotInHand(side, id) => {
                write!(f, "{} is not in {}'s hand", id, side)
            }
            PlayRejection::EmptyHand(side) => write!(f, "{} has no cards in hand", side),
            PlayRejection::PolicyDeclined(side) => {
                write!(f, "Opponent policy chose no card for {}", side)
            }
        }
    }
}

impl std::error::Error for PlayRejection {}

/// Invalid match or catalog configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The catalog has no templates.
    EmptyCatalog,
    /// `hand_target_size` is zero.
    ZeroHandSize,
    /// `energy_max` is zero.
    ZeroEnergy,
    /// `tick_interval_ms` is zero.
    ZeroTickInterval,
    /// `drain_percent` is above 100.
    DrainPercentOutOfRange(u32),
    /// `min_damage` is zero and no tick limit is set, so two walls could
    /// trade zero damage forever.
    UnboundedStalemate,
    /// A template has `max_hp == 0`.
    InvalidTemplate(String),
    /// Two templates share an ID.
    DuplicateTemplate(String),
    /// The duplicate policy needs more distinct templates than exist.
    CatalogTooSmall { needed: usize, available: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyCatalog => write!(f, "Card catalog is empty"),
            ConfigError::ZeroHandSize => write!(f, "Hand target size must be positive"),
            ConfigError::ZeroEnergy => write!(f, "Maximum energy must be positive"),
            ConfigError::ZeroTickInterval => write!(f, "Tick interval must be positive"),
            ConfigError::UnboundedStalemate => {
                write!(f, "A zero damage floor requires a tick limit")
            }
            ConfigError::DrainPercentOutOfRange(p) => {
                write!(f, "Drain percent {} is outside 0..=100", p)
            }
            ConfigError::InvalidTemplate(name) => {
                write!(f, "Card template '{}' must have positive max hp", name)
            }
            ConfigError::DuplicateTemplate(id) => write!(f, "Duplicate card template id '{}'", id),
            ConfigError::CatalogTooSmall { needed, available } => write!(
                f,
                "Duplicate policy needs {} distinct templates, catalog has {}",
                needed, available
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reported by a sync or persistence collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdapterError {
    /// Snapshot could not be encoded or decoded.
    Codec(String),
    /// The peer or channel is gone.
    Disconnected,
    /// The backing store refused the write.
    Storage(String),
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::Codec(msg) => write!(f, "Snapshot codec error: {}", msg),
            AdapterError::Disconnected => write!(f, "Peer disconnected"),
            AdapterError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<bincode::Error> for AdapterError {
    fn from(err: bincode::Error) -> Self {
        AdapterError::Codec(err.to_string())
    }
}
