// Property-based tests over random seeds, configurations and card stats
use proptest::prelude::*;

use suimon_core::ai::RandomPolicy;
use suimon_core::cards::{CardCatalog, CardInstance, CardStats, TemplateId};
use suimon_core::core::{InstanceId, MatchConfig, MatchState};
use suimon_core::rules::{combat, MatchEngine};

fn card(attack: u32, defense: u32, hp: u32) -> CardInstance {
    CardInstance::with_stats(InstanceId(0), TemplateId::new(0), CardStats::new(attack, defense, hp))
}

fn check_bounds(state: &MatchState, target: usize) -> Result<(), TestCaseError> {
    for (_, side) in state.sides.iter() {
        prop_assert!(side.energy <= side.energy_max);
        for card in side.hand.iter().chain(side.battlefield.iter()) {
            prop_assert!(card.hp <= card.stats.max_hp);
            prop_assert!(card.hp > 0);
        }
        if state.is_playing() {
            prop_assert_eq!(side.card_count(), target);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn proptest_damage_respects_floor(
        attack in 0u32..300,
        defense in 0u32..300,
        floor in 0u32..10,
    ) {
        let dealt = combat::damage(&card(attack, 0, 1), &card(0, defense, 1), floor);
        prop_assert!(dealt >= floor);
        prop_assert_eq!(dealt, attack.saturating_sub(defense).max(floor));
    }

    #[test]
    fn proptest_resolve_is_pure(
        a in (0u32..200, 0u32..200, 1u32..300),
        b in (0u32..200, 0u32..200, 1u32..300),
    ) {
        let first = card(a.0, a.1, a.2);
        let second = card(b.0, b.1, b.2);

        let once = combat::resolve(&first, &second, 1);
        let twice = combat::resolve(&first, &second, 1);
        prop_assert_eq!(once, twice);
        prop_assert!(once.defender_hp_delta <= second.hp);
        prop_assert!(once.attacker_hp_delta <= first.hp);

        // swapping roles swaps the deltas
        let swapped = combat::resolve(&second, &first, 1);
        prop_assert_eq!(swapped.defender_hp_delta, once.attacker_hp_delta);
        prop_assert_eq!(swapped.attacker_hp_delta, once.defender_hp_delta);
    }

    #[test]
    fn proptest_matches_terminate_within_bounds(
        seed in any::<u64>(),
        energy in 50u32..800,
        hand_size in 1usize..6,
        min_damage in 1u32..5,
    ) {
        let config = MatchConfig::default()
            .with_seed(seed)
            .with_energy(energy)
            .with_hand_size(hand_size)
            .with_min_damage(min_damage);
        let mut engine = MatchEngine::new(config, CardCatalog::suimon()).unwrap();
        engine.start();

        let mut ticks = 0u32;
        while !engine.state().is_finished() {
            while let Some(side) = engine.state().current_turn {
                engine.play_with_policy(side, &RandomPolicy).unwrap();
                check_bounds(engine.state(), hand_size)?;
            }
            engine.tick();
            check_bounds(engine.state(), hand_size)?;

            ticks += 1;
            // every tick costs at least one hp; each card has < 200 hp and each defeat costs 50 energy
            prop_assert!(ticks < 200 * (energy / 50 + 1) * 2);
        }

        let state = engine.state();
        prop_assert!(state.result.is_some());
        prop_assert!(state.sides.iter().all(|(_, s)| s.slot_empty()));
        prop_assert_eq!(state.current_turn, None);
    }

    #[test]
    fn proptest_same_seed_replays_identically(seed in any::<u64>()) {
        let run = || {
            let mut engine = MatchEngine::new(MatchConfig::default().with_seed(seed), CardCatalog::suimon()).unwrap();
            engine.start();
            for _ in 0..30 {
                while let Some(side) = engine.state().current_turn {
                    engine.play_with_policy(side, &RandomPolicy).unwrap();
                }
                engine.tick();
            }
            engine.snapshot()
        };
        prop_assert_eq!(run(), run());
    }
}
