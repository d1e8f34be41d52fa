//! The match state machine.
//!
//! `MatchEngine` is the single writer for one match. It owns the state, the
//! catalog and the RNG streams; every mutation goes through one of its
//! methods:
//!
//! - `start`: `Waiting → Playing`
//! - `play_card` / `play_with_policy`: commit a card to an empty slot
//! - `tick`: resolve one exchange while both slots are occupied
//! - `play_again`: rebuild a fresh match with the same configuration
//!
//! ## Turn rules
//!
//! After a play, the other side acts if its slot is empty; otherwise a new
//! engagement begins and nobody acts until a tick frees a slot. After a tick,
//! a single empty slot hands the turn to its side, and two empty slots hand
//! it to `first_player`.
//!
//! ## Determinism
//!
//! Dealing and policy choices draw from separate context streams of one
//! seeded root, so two engines built from the same config and fed the same
//! intents produce identical states.

use std::cmp::Ordering;

use tracing::{debug, info};

use super::combat::{self, Clash};
use super::deal;
use crate::ai::OpponentPolicy;
use crate::cards::{CardCatalog, TemplateId};
use crate::core::{
    ConfigError, FinishReason, GameRng, GameStatus, InstanceId, InstanceIds, LogEvent, MatchConfig,
    MatchOutcome, MatchResult, MatchState, PlayRejection, SideId, SideMap,
};

/// What a successful play did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub side: SideId,
    pub card: InstanceId,
    pub template: TemplateId,
    /// Cards drawn to restore the hand target.
    pub drawn: usize,
    /// Whether this play filled the second slot and started an engagement.
    pub engaged: bool,
    /// Side to act next.
    pub next_turn: Option<SideId>,
}

/// What a call to `tick` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, or a slot is empty. Nothing changed.
    Idle,
    /// One exchange resolved; the match continues.
    Resolved { clash: Clash, drawn: SideMap<usize> },
    /// One exchange resolved and the match ended.
    Finished { clash: Clash, result: MatchResult },
}

impl TickOutcome {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, TickOutcome::Idle)
    }

    /// The final result, if this tick ended the match.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        match self {
            TickOutcome::Finished { result, .. } => Some(*result),
            _ => None,
        }
    }

    /// The exchange resolved by this tick, if any.
    #[must_use]
    pub fn clash(&self) -> Option<&Clash> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Resolved { clash, .. } | TickOutcome::Finished { clash, .. } => Some(clash),
        }
    }
}

/// Owns and advances one match.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    catalog: CardCatalog,
    rng: GameRng,
    deal_rng: GameRng,
    policy_rng: GameRng,
    ids: InstanceIds,
    state: MatchState,
}

impl MatchEngine {
    /// Validate the configuration and deal opening hands.
    ///
    /// The match is left `Waiting`; call `start` to begin.
    pub fn new(config: MatchConfig, catalog: CardCatalog) -> Result<Self, ConfigError> {
        config.validate(catalog.len())?;

        let rng = GameRng::new(config.seed);
        let mut deal_rng = rng.for_context("deal");
        let policy_rng = rng.for_context("policy");
        let mut ids = InstanceIds::new();

        let hands = deal::initial_hands(&catalog, &config, &mut deal_rng, &mut ids);
        let state = MatchState::new(&config, hands, 0);

        Ok(Self {
            config,
            catalog,
            rng,
            deal_rng,
            policy_rng,
            ids,
            state,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Borrow the live state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// An owned copy of the state for observers.
    #[must_use]
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.state.epoch
    }

    /// Move a waiting match to `Playing`. Returns false if it was not waiting.
    pub fn start(&mut self) -> bool {
        if self.state.status != GameStatus::Waiting {
            return false;
        }
        if self.state.sides.iter().any(|(_, s)| s.hand.is_empty()) {
            return false;
        }

        let first = self.config.first_player;
        self.state.status = GameStatus::Playing;
        self.state.current_turn = Some(first);
        self.state.log(LogEvent::MatchStarted { first });
        self.state.revision += 1;

        info!(epoch = self.state.epoch, first = %first, "match started");
        true
    }

    /// Commit `card` from `side`'s hand to its battlefield slot.
    ///
    /// Every precondition is checked before anything changes, so a rejected
    /// play leaves the state exactly as it was.
    pub fn play_card(&mut self, side: SideId, card: InstanceId) -> Result<PlayOutcome, PlayRejection> {
        self.check_can_play(side)?;
        let Some(pos) = self.state.side(side).hand_position(card) else {
            return Err(PlayRejection::CardNotInHand(side, card));
        };

        let played = self.state.side_mut(side).hand.remove(pos);
        let template = played.template;
        let acting = self.state.side_mut(side);
        acting.battlefield = Some(played);
        acting.last_played = Some(template);
        self.state.log(LogEvent::CardPlayed { side, card, template });

        let drawn = self.replenish(side);

        let other = side.other();
        let engaged = !self.state.side(other).slot_empty();
        let next_turn = if engaged {
            self.state.round += 1;
            None
        } else {
            Some(other)
        };
        self.state.current_turn = next_turn;
        self.state.revision += 1;

        debug!(
            side = %side,
            card = %self.catalog.name_of(template),
            engaged,
            round = self.state.round,
            "card played"
        );

        Ok(PlayOutcome {
            side,
            card,
            template,
            drawn,
            engaged,
            next_turn,
        })
    }

    /// Let `policy` pick a card for `side` and play it.
    pub fn play_with_policy(
        &mut self,
        side: SideId,
        policy: &dyn OpponentPolicy,
    ) -> Result<PlayOutcome, PlayRejection> {
        self.check_can_play(side)?;

        let opposing = self.state.sides[side.other()].battlefield.as_ref();
        let hand = &self.state.sides[side].hand;
        let choice = policy
            .choose(hand, opposing, &mut self.policy_rng)
            .ok_or(PlayRejection::PolicyDeclined(side))?;

        self.play_card(side, choice)
    }

    /// Cards `side` may play right now.
    #[must_use]
    pub fn legal_plays(&self, side: SideId) -> Vec<InstanceId> {
        if self.check_can_play(side).is_err() {
            return Vec::new();
        }
        self.state.side(side).hand.iter().map(|c| c.id).collect()
    }

    /// Advance combat by one exchange.
    ///
    /// Idle unless the match is playing and both slots are occupied.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Idle;
        }
        let clash = match (
            &self.state.sides[SideId::Player].battlefield,
            &self.state.sides[SideId::Opponent].battlefield,
        ) {
            (Some(player), Some(opponent)) => combat::resolve_clash(
                SideMap::new(|side| match side {
                    SideId::Player => player,
                    SideId::Opponent => opponent,
                }),
                &self.config,
            ),
            _ => return TickOutcome::Idle,
        };

        self.state.tick += 1;
        self.state.log(LogEvent::Exchange {
            dealt: clash.dealt.clone(),
        });
        debug!(
            tick = self.state.tick,
            player_dealt = clash.dealt[SideId::Player],
            opponent_dealt = clash.dealt[SideId::Opponent],
            "exchange"
        );

        for side in SideId::all() {
            self.apply_clash(side, &clash);
        }

        let drawn = SideMap::new(|side| {
            if clash.defeated[side] {
                self.replenish(side)
            } else {
                0
            }
        });

        if let Some(result) = self.terminal() {
            self.finish(result);
            self.state.revision += 1;
            return TickOutcome::Finished { clash, result };
        }

        self.state.current_turn = self.initiative();
        self.state.revision += 1;
        TickOutcome::Resolved { clash, drawn }
    }

    /// Throw the current match away and deal a fresh one with the same
    /// configuration. The new match starts immediately.
    pub fn play_again(&mut self) {
        self.rng = self.rng.fork();
        self.deal_rng = self.rng.for_context("deal");
        self.policy_rng = self.rng.for_context("policy");

        let epoch = self.state.epoch + 1;
        let hands = deal::initial_hands(&self.catalog, &self.config, &mut self.deal_rng, &mut self.ids);
        self.state = MatchState::new(&self.config, hands, epoch);

        info!(epoch, "match reset");
        self.start();
    }

    fn check_can_play(&self, side: SideId) -> Result<(), PlayRejection> {
        if !self.state.is_playing() {
            return Err(PlayRejection::NotPlaying);
        }
        let acting = self.state.side(side);
        if !acting.slot_empty() {
            return Err(PlayRejection::SlotOccupied(side));
        }
        if self.state.current_turn != Some(side) {
            return Err(PlayRejection::NotYourTurn(side));
        }
        if acting.hand.is_empty() {
            return Err(PlayRejection::EmptyHand(side));
        }
        Ok(())
    }

    fn apply_clash(&mut self, side: SideId, clash: &Clash) {
        let current = self.state.side_mut(side);
        if let Some(card) = current.battlefield.as_mut() {
            card.take_damage(card.hp.saturating_sub(clash.hp_after[side]));
        }

        let drained = current.lose_energy(clash.drain[side]);
        if drained > 0 {
            self.state.log(LogEvent::EnergyDrained { side, amount: drained });
        }

        if !clash.defeated[side] {
            return;
        }
        let current = self.state.side_mut(side);
        let energy_loss = current.lose_energy(clash.defeat_loss[side]);
        let defeated = current.battlefield.take();
        self.state.side_mut(side.other()).kills += 1;

        if let Some(card) = defeated {
            debug!(
                side = %side,
                card = %self.catalog.name_of(card.template),
                energy = self.state.side(side).energy,
                "card defeated"
            );
            self.state.log(LogEvent::CardDefeated {
                side,
                card: card.id,
                template: card.template,
                energy_loss,
            });
        }
    }

    fn replenish(&mut self, side: SideId) -> usize {
        let exclude = deal::exclusions(&self.state.sides, side, self.config.duplicates);
        let drawn = deal::replenish(
            self.state.side_mut(side),
            self.config.hand_target_size,
            &self.catalog,
            &mut self.deal_rng,
            &mut self.ids,
            &exclude,
        );
        if drawn > 0 {
            self.state.log(LogEvent::HandReplenished { side, drawn });
            debug!(side = %side, drawn, "hand replenished");
        }
        drawn
    }

    fn initiative(&self) -> Option<SideId> {
        let empty = self.state.sides.map(|_, s| s.slot_empty());
        match (empty[SideId::Player], empty[SideId::Opponent]) {
            (true, true) => Some(self.config.first_player),
            (true, false) => Some(SideId::Player),
            (false, true) => Some(SideId::Opponent),
            (false, false) => None,
        }
    }

    fn terminal(&self) -> Option<MatchResult> {
        let depleted = self.state.sides.map(|_, s| s.is_depleted());
        let outcome = match (depleted[SideId::Player], depleted[SideId::Opponent]) {
            (true, true) => Some(MatchOutcome::Tie),
            (true, false) => Some(MatchOutcome::Winner(SideId::Opponent)),
            (false, true) => Some(MatchOutcome::Winner(SideId::Player)),
            (false, false) => None,
        };
        if let Some(outcome) = outcome {
            return Some(MatchResult {
                outcome,
                reason: FinishReason::EnergyDepleted,
            });
        }

        let limit = self.config.tick_limit?;
        if self.state.tick < limit {
            return None;
        }
        let player = self.state.side(SideId::Player).energy;
        let opponent = self.state.side(SideId::Opponent).energy;
        let outcome = match player.cmp(&opponent) {
            Ordering::Greater => MatchOutcome::Winner(SideId::Player),
            Ordering::Less => MatchOutcome::Winner(SideId::Opponent),
            Ordering::Equal => MatchOutcome::Tie,
        };
        Some(MatchResult {
            outcome,
            reason: FinishReason::TickLimit,
        })
    }

    fn finish(&mut self, result: MatchResult) {
        for (_, side) in self.state.sides.iter_mut() {
            side.battlefield = None;
        }
        self.state.current_turn = None;
        self.state.status = GameStatus::Finished;
        self.state.result = Some(result);
        self.state.log(LogEvent::MatchFinished { result });

        info!(
            epoch = self.state.epoch,
            tick = self.state.tick,
            player_energy = self.state.side(SideId::Player).energy,
            opponent_energy = self.state.side(SideId::Opponent).energy,
            "match finished: {}",
            result
        );
    }
}
