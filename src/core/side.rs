//! Side identification and per-side data storage.
//!
//! ## SideId
//!
//! A match always has exactly two sides. Solo play names them
//! `player`/`opponent`; networked play presents the same two values as the
//! seats `player1`/`player2`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `SideId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two competing sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SideId {
    /// The local human (or `player1` in networked play).
    Player,
    /// The AI opponent (or `player2` in networked play).
    Opponent,
}

impl SideId {
    /// Both sides, in index order.
    pub const ALL: [SideId; 2] = [SideId::Player, SideId::Opponent];

    /// Get the 0-based index of this side.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Opponent => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn other(self) -> SideId {
        match self {
            SideId::Player => SideId::Opponent,
            SideId::Opponent => SideId::Player,
        }
    }

    /// Seat name used in networked matches.
    ///
    /// ```
    /// use suimon_core::core::SideId;
    ///
    /// assert_eq!(SideId::Player.seat(), "player1");
    /// assert_eq!(SideId::Opponent.seat(), "player2");
    /// ```
    #[must_use]
    pub const fn seat(self) -> &'static str {
        match self {
            SideId::Player => "player1",
            SideId::Opponent => "player2",
        }
    }

    /// Iterate over both sides.
    pub fn all() -> impl Iterator<Item = SideId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideId::Player => write!(f, "player"),
            SideId::Opponent => write!(f, "opponent"),
        }
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use suimon_core::core::{SideId, SideMap};
///
/// let mut energy: SideMap<u32> = SideMap::with_value(300);
/// energy[SideId::Opponent] -= 50;
///
/// assert_eq!(energy[SideId::Player], 300);
/// assert_eq!(energy[SideId::Opponent], 250);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a SideMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(SideId) -> T) -> Self {
        Self {
            data: [factory(SideId::Player), factory(SideId::Opponent)],
        }
    }

    /// Create a SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: SideId) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: SideId) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (SideId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SideId, &T)> {
        SideId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (SideId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SideId, &mut T)> {
        SideId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Map both entries into a new SideMap.
    pub fn map<U>(&self, mut f: impl FnMut(SideId, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> Index<SideId> for SideMap<T> {
    type Output = T;

    fn index(&self, side: SideId) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<SideId> for SideMap<T> {
    fn index_mut(&mut self, side: SideId) -> &mut Self::Output {
        self.get_mut(side)
    }
}
