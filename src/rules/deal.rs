//! Deal and replenish policy.
//!
//! Each side holds exactly `hand_target_size` cards between its hand and its
//! battlefield slot. Whenever a card leaves a hand or a battlefield,
//! `replenish` tops the side back up from the catalog. Replenishing a side
//! that is already at target draws nothing, so calling it twice is safe.

use rustc_hash::FxHashSet;

use crate::cards::{CardCatalog, CardInstance, TemplateId};
use crate::core::{DuplicatePolicy, GameRng, InstanceIds, MatchConfig, Side, SideId, SideMap};

/// Templates a side may not be dealt right now under `policy`.
#[must_use]
pub fn exclusions(sides: &SideMap<Side>, side: SideId, policy: DuplicatePolicy) -> FxHashSet<TemplateId> {
    match policy {
        DuplicatePolicy::Allow => FxHashSet::default(),
        DuplicatePolicy::UniqueWithinSide => sides[side].held_templates().collect(),
        DuplicatePolicy::UniqueAcrossSides => sides
            .iter()
            .flat_map(|(_, s)| s.held_templates())
            .collect(),
    }
}

/// Deal opening hands for both sides.
#[must_use]
pub fn initial_hands(
    catalog: &CardCatalog,
    config: &MatchConfig,
    rng: &mut GameRng,
    ids: &mut InstanceIds,
) -> SideMap<Vec<CardInstance>> {
    let mut dealt: FxHashSet<TemplateId> = FxHashSet::default();
    SideMap::new(|_| {
        let exclude = match config.duplicates {
            DuplicatePolicy::UniqueAcrossSides => dealt.clone(),
            _ => FxHashSet::default(),
        };
        let hand = catalog.draw_hand(config.hand_target_size, rng, ids, &exclude);
        dealt.extend(hand.iter().map(|c| c.template));
        hand
    })
}

/// Draw cards until the side holds `target` cards. Returns how many were drawn.
///
/// Touches only this side's hand.
pub fn replenish(
    side: &mut Side,
    target: usize,
    catalog: &CardCatalog,
    rng: &mut GameRng,
    ids: &mut InstanceIds,
    exclude: &FxHashSet<TemplateId>,
) -> usize {
    let total = side.card_count();
    if total >= target {
        return 0;
    }

    let drawn = catalog.draw_hand(target - total, rng, ids, exclude);
    let count = drawn.len();
    side.hand.extend(drawn);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CardCatalog, MatchConfig, GameRng, InstanceIds) {
        (CardCatalog::suimon(), MatchConfig::default(), GameRng::new(5), InstanceIds::new())
    }

    #[test]
    fn test_initial_hands_full() {
        let (catalog, config, mut rng, mut ids) = setup();
        let hands = initial_hands(&catalog, &config, &mut rng, &mut ids);

        assert_eq!(hands[SideId::Player].len(), 4);
        assert_eq!(hands[SideId::Opponent].len(), 4);
        assert_eq!(ids.allocated(), 8);
    }

    #[test]
    fn test_initial_hands_unique_across_sides() {
        let (catalog, config, mut rng, mut ids) = setup();
        let config = config.with_duplicates(DuplicatePolicy::UniqueAcrossSides);

        for _ in 0..20 {
            let hands = initial_hands(&catalog, &config, &mut rng, &mut ids);
            let player: FxHashSet<_> = hands[SideId::Player].iter().map(|c| c.template).collect();
            assert!(hands[SideId::Opponent].iter().all(|c| !player.contains(&c.template)));
        }
    }

    #[test]
    fn test_replenish_fills_to_target() {
        let (catalog, config, mut rng, mut ids) = setup();
        let hands = initial_hands(&catalog, &config, &mut rng, &mut ids);
        let mut side = Side::new(300, hands[SideId::Player].clone());

        let played = side.hand.remove(0);
        side.battlefield = Some(played);
        side.hand.remove(0);
        assert_eq!(side.card_count(), 3);

        let drawn = replenish(&mut side, 4, &catalog, &mut rng, &mut ids, &FxHashSet::default());
        assert_eq!(drawn, 1);
        assert_eq!(side.card_count(), 4);
        assert_eq!(side.hand.len(), 3);
    }

    #[test]
    fn test_replenish_is_idempotent() {
        let (catalog, _, mut rng, mut ids) = setup();
        let mut side = Side::new(300, vec![]);

        assert_eq!(replenish(&mut side, 4, &catalog, &mut rng, &mut ids, &FxHashSet::default()), 4);
        let before = side.clone();
        assert_eq!(replenish(&mut side, 4, &catalog, &mut rng, &mut ids, &FxHashSet::default()), 0);
        assert_eq!(side, before);
    }

    #[test]
    fn test_replenish_never_touches_energy() {
        let (catalog, _, mut rng, mut ids) = setup();
        let mut side = Side::new(300, vec![]);
        side.lose_energy(120);

        replenish(&mut side, 4, &catalog, &mut rng, &mut ids, &FxHashSet::default());
        assert_eq!(side.energy, 180);
    }

    #[test]
    fn test_exclusions() {
        let (catalog, config, mut rng, mut ids) = setup();
        let hands = initial_hands(&catalog, &config, &mut rng, &mut ids);
        let sides = SideMap::new(|s| Side::new(300, hands[s].clone()));

        assert!(exclusions(&sides, SideId::Player, DuplicatePolicy::Allow).is_empty());

        let within = exclusions(&sides, SideId::Player, DuplicatePolicy::UniqueWithinSide);
        assert!(sides[SideId::Player].held_templates().all(|t| within.contains(&t)));

        let across = exclusions(&sides, SideId::Player, DuplicatePolicy::UniqueAcrossSides);
        assert!(sides[SideId::Opponent].held_templates().all(|t| across.contains(&t)));
    }
}
