//! Combat resolution.
//!
//! Two cards on the battlefield fight simultaneously: each side's damage is
//! computed from the other card's pre-exchange stats, so the order in which
//! the sides are evaluated never matters.
//!
//! ## Energy model
//!
//! Each exchange costs energy in two ways:
//! - **Drain**: the side whose card dealt strictly less damage loses
//!   `drain_percent` of the difference, capped at `drain_cap`.
//! - **Defeat**: a side whose card reaches zero hp loses `defeat_energy_loss`.
//!
//! Everything here is a pure function of its inputs.

use crate::cards::CardInstance;
use crate::core::{MatchConfig, SideId, SideMap};

/// Damage `attacker` deals to `defender`: `max(min_damage, attack - defense)`.
#[must_use]
pub fn damage(attacker: &CardInstance, defender: &CardInstance, min_damage: u32) -> u32 {
    attacker.attack().saturating_sub(defender.defense()).max(min_damage)
}

/// hp lost by each card in one exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub defender_hp_delta: u32,
    pub attacker_hp_delta: u32,
}

/// Resolve one simultaneous exchange between two cards.
///
/// Deltas are the hp actually lost, so they never exceed remaining hp.
#[must_use]
pub fn resolve(attacker: &CardInstance, defender: &CardInstance, min_damage: u32) -> Exchange {
    Exchange {
        defender_hp_delta: damage(attacker, defender, min_damage).min(defender.hp),
        attacker_hp_delta: damage(defender, attacker, min_damage).min(attacker.hp),
    }
}

/// Energy drained from a side that dealt `dealt` while taking `taken`.
#[must_use]
pub fn drain(dealt: u32, taken: u32, config: &MatchConfig) -> u32 {
    if dealt >= taken {
        return 0;
    }
    let proportional = u64::from(taken - dealt) * u64::from(config.drain_percent) / 100;
    proportional.min(u64::from(config.drain_cap)) as u32
}

/// Full result of one tick of combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clash {
    /// Damage each side's card dealt (before clamping to remaining hp).
    pub dealt: SideMap<u32>,
    /// Card hp after the exchange.
    pub hp_after: SideMap<u32>,
    /// Cards at zero hp.
    pub defeated: SideMap<bool>,
    /// Proportional drain per side.
    pub drain: SideMap<u32>,
    /// Per-defeat loss per side.
    pub defeat_loss: SideMap<u32>,
}

impl Clash {
    /// Total energy a side should lose this tick (before clamping).
    #[must_use]
    pub fn energy_loss(&self, side: SideId) -> u32 {
        self.drain[side].saturating_add(self.defeat_loss[side])
    }
}

/// Resolve the two battlefield cards against each other.
#[must_use]
pub fn resolve_clash(cards: SideMap<&CardInstance>, config: &MatchConfig) -> Clash {
    let player = cards[SideId::Player];
    let opponent = cards[SideId::Opponent];
    let exchange = resolve(player, opponent, config.min_damage);

    let dealt = SideMap::new(|side| {
        damage(cards[side], cards[side.other()], config.min_damage)
    });
    let hp_after = SideMap::new(|side| match side {
        SideId::Player => player.hp - exchange.attacker_hp_delta,
        SideId::Opponent => opponent.hp - exchange.defender_hp_delta,
    });
    let defeated = hp_after.map(|_, &hp| hp == 0);

    Clash {
        drain: SideMap::new(|side| drain(dealt[side], dealt[side.other()], config)),
        defeat_loss: defeated.map(|_, &d| if d { config.defeat_energy_loss } else { 0 }),
        dealt,
        hp_after,
        defeated,
    }
}
