//! Snapshot wire format: the whole `MatchState`, bincode-encoded.

use crate::core::{AdapterError, MatchState};

/// Encode a snapshot into one frame.
pub fn encode(state: &MatchState) -> Result<Vec<u8>, AdapterError> {
    Ok(bincode::serialize(state)?)
}

/// Decode one frame.
pub fn decode(frame: &[u8]) -> Result<MatchState, AdapterError> {
    Ok(bincode::deserialize(frame)?)
}
