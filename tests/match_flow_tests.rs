//! Match lifecycle tests.
//!
//! These tests walk whole matches through the engine: simultaneous defeats,
//! ties, terminal absorption, rejected plays and resets.

use suimon_core::ai::{CounterPolicy, StrongestPolicy};
use suimon_core::cards::{CardCatalog, CardTemplate, TemplateId};
use suimon_core::core::{
    DuplicatePolicy, FinishReason, GameStatus, LogEvent, MatchConfig, MatchOutcome, PlayRejection,
    SideId,
};
use suimon_core::rules::{MatchEngine, TickOutcome};

/// A catalog of one card that kills its own kind in a single exchange.
fn glass_catalog() -> CardCatalog {
    CardCatalog::new(vec![CardTemplate::new(TemplateId::new(0), "Glass", 100, 0, 10)]).unwrap()
}

fn engage(engine: &mut MatchEngine) {
    while let Some(side) = engine.state().current_turn {
        let card = engine.legal_plays(side)[0];
        engine.play_card(side, card).unwrap();
    }
}

/// Both cards fall on the same tick.
#[test]
fn test_simultaneous_defeat() {
    let mut engine = MatchEngine::new(MatchConfig::default(), glass_catalog()).unwrap();
    engine.start();
    engage(&mut engine);

    let outcome = engine.tick();
    let clash = outcome.clash().unwrap();
    assert!(clash.defeated[SideId::Player] && clash.defeated[SideId::Opponent]);

    let state = engine.state();
    for (_, side) in state.sides.iter() {
        assert_eq!(side.energy, 250);
        assert!(side.slot_empty());
        assert_eq!(side.hand.len(), 4);
        assert_eq!(side.kills, 1);
    }
    assert_eq!(state.current_turn, Some(SideId::Player));
    assert_eq!(state.status, GameStatus::Playing);
}

/// After a double defeat the configured first player always acts.
#[test]
fn test_double_defeat_initiative_is_deterministic() {
    let config = MatchConfig::default().with_first_player(SideId::Opponent);
    for seed in 0..10 {
        let mut engine = MatchEngine::new(config.clone().with_seed(seed), glass_catalog()).unwrap();
        engine.start();
        engage(&mut engine);
        engine.tick();
        assert_eq!(engine.state().current_turn, Some(SideId::Opponent));
    }
}

/// Both sides hit zero energy on the same tick.
#[test]
fn test_mutual_depletion_is_a_tie() {
    let config = MatchConfig::default().with_energy(50);
    let mut engine = MatchEngine::new(config, glass_catalog()).unwrap();
    engine.start();
    engage(&mut engine);

    let result = engine.tick().result().unwrap();
    assert_eq!(result.outcome, MatchOutcome::Tie);
    assert_eq!(result.reason, FinishReason::EnergyDepleted);

    let state = engine.state();
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.winner(), None);
    assert_eq!(state.current_turn, None);
    assert!(state.sides.iter().all(|(_, s)| s.energy == 0 && s.slot_empty()));
    assert!(matches!(
        state.combat_log.last().map(|e| &e.event),
        Some(LogEvent::MatchFinished { .. })
    ));
}

/// A one-sided match ends with the stronger side winning by depletion.
#[test]
fn test_depletion_winner() {
    let catalog = CardCatalog::new(vec![
        CardTemplate::new(TemplateId::new(1), "Titan", 150, 100, 1000),
        CardTemplate::new(TemplateId::new(2), "Glass", 100, 0, 10),
    ])
    .unwrap();
    let config = MatchConfig::default()
        .with_hand_size(1)
        .with_duplicates(DuplicatePolicy::UniqueAcrossSides);
    let mut engine = MatchEngine::new(config, catalog).unwrap();
    engine.start();

    let titan_side = SideId::all()
        .find(|&s| engine.state().side(s).hand[0].template == TemplateId::new(1))
        .unwrap();

    let mut result = None;
    for _ in 0..20 {
        engage(&mut engine);
        if let Some(r) = engine.tick().result() {
            result = Some(r);
            break;
        }
    }

    let result = result.unwrap();
    assert_eq!(result.outcome, MatchOutcome::Winner(titan_side));
    assert_eq!(engine.state().winner(), Some(titan_side));
    assert_eq!(engine.state().side(titan_side.other()).energy, 0);
}

/// Tick limits compare energy, and depletion still wins on the limit tick.
#[test]
fn test_tick_limit_compares_energy() {
    let catalog = CardCatalog::new(vec![
        CardTemplate::new(TemplateId::new(1), "Bruiser", 80, 30, 500),
        CardTemplate::new(TemplateId::new(2), "Wall", 40, 40, 500),
    ])
    .unwrap();
    let config = MatchConfig::default()
        .with_hand_size(1)
        .with_duplicates(DuplicatePolicy::UniqueAcrossSides)
        .with_tick_limit(2);
    let mut engine = MatchEngine::new(config, catalog).unwrap();
    engine.start();
    engage(&mut engine);

    let bruiser_side = SideId::all()
        .find(|&s| engine.state().side(s).battlefield.as_ref().map(|c| c.template) == Some(TemplateId::new(1)))
        .unwrap();

    assert!(engine.tick().result().is_none());
    let result = engine.tick().result().unwrap();
    assert_eq!(result.outcome, MatchOutcome::Winner(bruiser_side));
    assert_eq!(result.reason, FinishReason::TickLimit);
}

/// Plays are rejected outside `Playing` and into occupied slots, with no state change.
#[test]
fn test_rejected_plays_leave_state_unchanged() {
    let mut engine = MatchEngine::new(MatchConfig::default(), CardCatalog::suimon()).unwrap();

    let card = engine.state().side(SideId::Player).hand[0].id;
    let before = engine.snapshot();
    assert_eq!(engine.play_card(SideId::Player, card), Err(PlayRejection::NotPlaying));
    assert_eq!(engine.snapshot(), before);

    engine.start();
    engine.play_card(SideId::Player, card).unwrap();
    let next = engine.state().side(SideId::Player).hand[0].id;
    let before = engine.snapshot();
    assert_eq!(
        engine.play_card(SideId::Player, next),
        Err(PlayRejection::SlotOccupied(SideId::Player))
    );
    assert_eq!(engine.snapshot(), before);

    // opponent trying a player card
    assert_eq!(
        engine.play_card(SideId::Opponent, next),
        Err(PlayRejection::CardNotInHand(SideId::Opponent, next))
    );
    assert_eq!(engine.snapshot(), before);
}

/// A finished match absorbs plays and ticks.
#[test]
fn test_finished_absorbs_everything() {
    let config = MatchConfig::default().with_energy(50);
    let mut engine = MatchEngine::new(config, glass_catalog()).unwrap();
    engine.start();
    engage(&mut engine);
    engine.tick();
    assert!(engine.state().is_finished());

    let before = engine.snapshot();
    let card = before.side(SideId::Player).hand[0].id;
    assert_eq!(engine.play_card(SideId::Player, card), Err(PlayRejection::NotPlaying));
    assert_eq!(engine.tick(), TickOutcome::Idle);
    assert!(engine.legal_plays(SideId::Player).is_empty());
    assert!(!engine.start());
    assert_eq!(engine.snapshot(), before);
}

/// `play_again` deals a fresh match in a new epoch.
#[test]
fn test_play_again_after_finish() {
    let config = MatchConfig::default().with_energy(50);
    let mut engine = MatchEngine::new(config, glass_catalog()).unwrap();
    engine.start();
    engage(&mut engine);
    engine.tick();

    engine.play_again();
    let state = engine.state();
    assert_eq!(state.epoch, 1);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.result, None);
    assert_eq!((state.tick, state.round), (0, 0));
    assert!(state.sides.iter().all(|(_, s)| s.energy == 50 && s.hand.len() == 4 && s.kills == 0));
    assert_eq!(state.current_turn, Some(SideId::Player));
}

/// Policy-driven matches over the real roster always finish.
#[test]
fn test_policy_match_finishes() {
    for seed in 0..20 {
        let config = MatchConfig::default().with_seed(seed);
        let mut engine = MatchEngine::new(config, CardCatalog::suimon()).unwrap();
        engine.start();

        let mut steps = 0;
        while !engine.state().is_finished() {
            while let Some(side) = engine.state().current_turn {
                match side {
                    SideId::Player => engine.play_with_policy(side, &StrongestPolicy).unwrap(),
                    SideId::Opponent => engine.play_with_policy(side, &CounterPolicy).unwrap(),
                };
            }
            engine.tick();
            steps += 1;
            assert!(steps < 10_000, "seed {} did not finish", seed);
        }
        assert!(engine.state().result.is_some());
    }
}

/// Rounds count engagements, not ticks.
#[test]
fn test_round_counting() {
    let mut engine = MatchEngine::new(MatchConfig::default(), glass_catalog()).unwrap();
    engine.start();

    for round in 1..=3 {
        engage(&mut engine);
        assert_eq!(engine.state().round, round);
        engine.tick();
    }
    assert_eq!(engine.state().tick, 3);
}
