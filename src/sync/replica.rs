//! Mirror side of synchronization.
//!
//! A `Replica` never computes anything. It replaces its state wholesale with
//! each snapshot it receives, except snapshots that are not newer than the
//! one it holds: an older epoch, or the same epoch with a revision it has
//! already seen.

use tracing::debug;

use super::codec;
use crate::core::{AdapterError, MatchState};

/// Read-only copy of a remote match.
#[derive(Clone, Debug, Default)]
pub struct Replica {
    state: Option<MatchState>,
    applied: u64,
    ignored: u64,
}

impl Replica {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest accepted state.
    #[must_use]
    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    /// Snapshots accepted so far.
    #[must_use]
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Stale snapshots dropped so far.
    #[must_use]
    pub fn ignored(&self) -> u64 {
        self.ignored
    }

    /// Would `snapshot` replace the current state?
    #[must_use]
    pub fn is_newer(&self, snapshot: &MatchState) -> bool {
        match &self.state {
            None => true,
            Some(held) => (snapshot.epoch, snapshot.revision) > (held.epoch, held.revision),
        }
    }

    /// Replace the held state if `snapshot` is newer. Returns whether it was applied.
    pub fn apply(&mut self, snapshot: MatchState) -> bool {
        if !self.is_newer(&snapshot) {
            debug!(
                epoch = snapshot.epoch,
                revision = snapshot.revision,
                "ignoring stale snapshot"
            );
            self.ignored += 1;
            return false;
        }
        self.state = Some(snapshot);
        self.applied += 1;
        true
    }

    /// Decode a frame and apply it.
    pub fn apply_frame(&mut self, frame: &[u8]) -> Result<bool, AdapterError> {
        let snapshot = codec::decode(frame)?;
        Ok(self.apply(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::{MatchConfig, SideId};
    use crate::rules::MatchEngine;

    fn engine() -> MatchEngine {
        let mut engine = MatchEngine::new(MatchConfig::default(), CardCatalog::suimon()).unwrap();
        engine.start();
        engine
    }

    #[test]
    fn test_applies_newer() {
        let mut engine = engine();
        let mut replica = Replica::new();

        assert!(replica.apply(engine.snapshot()));
        let card = engine.state().side(SideId::Player).hand[0].id;
        engine.play_card(SideId::Player, card).unwrap();
        assert!(replica.apply(engine.snapshot()));

        assert_eq!(replica.state(), Some(engine.state()));
        assert_eq!(replica.applied(), 2);
    }

    #[test]
    fn test_ignores_stale_revision() {
        let mut engine = engine();
        let mut replica = Replica::new();
        let old = engine.snapshot();

        let card = engine.state().side(SideId::Player).hand[0].id;
        engine.play_card(SideId::Player, card).unwrap();
        replica.apply(engine.snapshot());

        assert!(!replica.apply(old));
        assert!(!replica.apply(engine.snapshot()));
        assert_eq!(replica.ignored(), 2);
        assert_eq!(replica.state(), Some(engine.state()));
    }

    #[test]
    fn test_new_epoch_wins() {
        let mut engine = engine();
        let mut replica = Replica::new();

        let card = engine.state().side(SideId::Player).hand[0].id;
        engine.play_card(SideId::Player, card).unwrap();
        replica.apply(engine.snapshot());

        engine.play_again();
        // lower revision, but a newer epoch
        assert!(engine.state().revision < replica.state().unwrap().revision);
        assert!(replica.apply(engine.snapshot()));
        assert_eq!(replica.state().map(|s| s.epoch), Some(1));
    }
}
