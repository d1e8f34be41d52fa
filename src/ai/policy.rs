//! Opponent policies: pick which card a side commits next.
//!
//! Policies only ever see shared borrows of the hand and the opposing card,
//! so they cannot move cards themselves. The engine performs the actual
//! hand-to-battlefield move through the same checks a human play goes
//! through.

use crate::cards::CardInstance;
use crate::core::{GameRng, InstanceId};

/// Chooses one card from a hand.
pub trait OpponentPolicy: Send + Sync {
    /// Pick a card to play, given the opposing battlefield card (if any).
    ///
    /// Must return the ID of a card in `hand`, or `None` for an empty hand.
    fn choose(
        &self,
        hand: &[CardInstance],
        opposing: Option<&CardInstance>,
        rng: &mut GameRng,
    ) -> Option<InstanceId>;
}

/// Counter-play heuristic.
///
/// - Empty opposing field: play a random card.
/// - Otherwise: starting from the first card, prefer any card with higher
///   attack that also beats the opposing card's defense.
#[derive(Clone, Debug, Default)]
pub struct CounterPolicy;

impl OpponentPolicy for CounterPolicy {
    fn choose(
        &self,
        hand: &[CardInstance],
        opposing: Option<&CardInstance>,
        rng: &mut GameRng,
    ) -> Option<InstanceId> {
        let Some(target) = opposing else {
            return rng.choose(hand).map(|c| c.id);
        };

        let first = hand.first()?;
        let best = hand.iter().fold(first, |best, current| {
            if current.attack() > best.attack() && current.attack() > target.defense() {
                current
            } else {
                best
            }
        });
        Some(best.id)
    }
}

/// Always plays the highest-attack card (earliest on ties).
#[derive(Clone, Debug, Default)]
pub struct StrongestPolicy;

impl OpponentPolicy for StrongestPolicy {
    fn choose(
        &self,
        hand: &[CardInstance],
        _opposing: Option<&CardInstance>,
        _rng: &mut GameRng,
    ) -> Option<InstanceId> {
        let first = hand.first()?;
        let best = hand
            .iter()
            .fold(first, |best, c| if c.attack() > best.attack() { c } else { best });
        Some(best.id)
    }
}

/// Uniform random choice.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose(
        &self,
        hand: &[CardInstance],
        _opposing: Option<&CardInstance>,
        rng: &mut GameRng,
    ) -> Option<InstanceId> {
        rng.choose(hand).map(|c| c.id)
    }
}
