//! Card instance identification.
//!
//! Every card that is drawn into a match gets a fresh `InstanceId`, even when
//! two instances share the same template. IDs are never reused within an
//! engine, including across `play_again` resets, so a stale UI intent can
//! never address a card from a later match.

use serde::{Deserialize, Serialize};

/// Unique identifier for a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic allocator for `InstanceId`s.
#[derive(Clone, Debug, Default)]
pub struct InstanceIds {
    next: u32,
}

impl InstanceIds {
    /// Create an allocator starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn alloc(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_monotonic() {
        let mut ids = InstanceIds::new();
        let a = ids.alloc();
        let b = ids.alloc();

        assert_eq!(a, InstanceId(0));
        assert_eq!(b, InstanceId(1));
        assert_eq!(b.raw(), 1);
        assert_eq!(ids.allocated(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", InstanceId(42)), "Instance(42)");
    }

    #[test]
    fn test_serialization() {
        let id = InstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
