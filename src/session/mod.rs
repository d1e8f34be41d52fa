//! Running matches against the clock.
//!
//! A `MatchSession` is the authoritative owner of one `MatchEngine`. It
//! serializes card plays and ticks behind one async mutex, drives ticks from
//! a tokio interval, lets policies play for automated sides, and after every
//! change:
//!
//! - pushes a snapshot to `subscribe()` receivers
//! - publishes the snapshot through the `SyncAdapter`
//! - hands a finished match to the `OutcomeSink` (once per match)
//!
//! Adapter failures are logged and dropped. They never affect the match.
//!
//! ## Example
//!
//! ```no_run
//! use suimon_core::{CardCatalog, CounterPolicy, MatchConfig, MatchEngine, MatchSession, SideId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = MatchEngine::new(MatchConfig::default(), CardCatalog::suimon())?;
//! let mut session = MatchSession::builder(engine)
//!     .with_policy(SideId::Opponent, CounterPolicy)
//!     .build();
//!
//! session.start().await;
//! let card = session.snapshot().await.side(SideId::Player).hand[0].id;
//! session.play_card(SideId::Player, card).await?;
//! # Ok(())
//! # }
//! ```

mod driver;

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ai::OpponentPolicy;
use crate::core::{GameStatus, InstanceId, MatchState, PlayRejection, SideId, SideMap};
use crate::persistence::{MatchRecord, OutcomeSink};
use crate::rules::{MatchEngine, PlayOutcome};
use crate::sync::{NullSync, SyncAdapter};

/// Everything the session lock protects.
struct Inner {
    engine: MatchEngine,
    policies: SideMap<Option<Box<dyn OpponentPolicy>>>,
    sync: Box<dyn SyncAdapter>,
    sink: Option<Box<dyn OutcomeSink>>,
    seats: SideMap<String>,
    match_id: Uuid,
    recorded: bool,
    updates: watch::Sender<MatchState>,
}

impl Inner {
    /// Let policies act, then publish and record.
    fn after_change(&mut self) {
        self.auto_play();

        let snapshot = self.engine.snapshot();
        if let Err(err) = self.sync.publish(&snapshot) {
            warn!(%err, epoch = snapshot.epoch, revision = snapshot.revision, "snapshot publish failed");
        }
        if snapshot.is_finished() {
            self.record_outcome(&snapshot);
        }
        self.updates.send_replace(snapshot);
    }

    fn auto_play(&mut self) {
        while let Some(side) = self.engine.state().current_turn {
            let Some(policy) = self.policies[side].as_deref() else {
                return;
            };
            match self.engine.play_with_policy(side, policy) {
                Ok(outcome) => debug!(side = %side, card = %outcome.card, "automated play"),
                Err(rejection) => {
                    warn!(side = %side, %rejection, "automated play rejected");
                    return;
                }
            }
        }
    }

    fn record_outcome(&mut self, state: &MatchState) {
        if self.recorded {
            return;
        }
        let Some(record) = MatchRecord::from_state(self.match_id, self.seats.clone(), state) else {
            return;
        };
        self.recorded = true;

        info!(match_id = %record.match_id, ticks = record.ticks, "recording match outcome");
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.record(&record) {
                warn!(%err, match_id = %record.match_id, "failed to record match outcome");
            }
        }
    }
}

/// Configures a `MatchSession`.
pub struct SessionBuilder {
    engine: MatchEngine,
    policies: SideMap<Option<Box<dyn OpponentPolicy>>>,
    sync: Box<dyn SyncAdapter>,
    sink: Option<Box<dyn OutcomeSink>>,
    seats: SideMap<String>,
}

impl SessionBuilder {
    /// Let `policy` play for `side`.
    #[must_use]
    pub fn with_policy(mut self, side: SideId, policy: impl OpponentPolicy + 'static) -> Self {
        self.policies[side] = Some(Box::new(policy));
        self
    }

    /// Publish snapshots through `sync`.
    #[must_use]
    pub fn with_sync(mut self, sync: impl SyncAdapter + 'static) -> Self {
        self.sync = Box::new(sync);
        self
    }

    /// Record finished matches into `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl OutcomeSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Player id seated on `side`. Defaults to the seat name.
    #[must_use]
    pub fn with_seat(mut self, side: SideId, player_id: impl Into<String>) -> Self {
        self.seats[side] = player_id.into();
        self
    }

    #[must_use]
    pub fn build(self) -> MatchSession {
        let (updates, _) = watch::channel(self.engine.snapshot());
        let inner = Inner {
            engine: self.engine,
            policies: self.policies,
            sync: self.sync,
            sink: self.sink,
            seats: self.seats,
            match_id: Uuid::new_v4(),
            recorded: false,
            updates,
        };
        MatchSession {
            inner: Arc::new(Mutex::new(inner)),
            driver: None,
        }
    }
}

/// Authoritative, clock-driven owner of one match.
pub struct MatchSession {
    inner: Arc<Mutex<Inner>>,
    driver: Option<JoinHandle<()>>,
}

impl MatchSession {
    /// Start configuring a session around `engine`.
    #[must_use]
    pub fn builder(engine: MatchEngine) -> SessionBuilder {
        SessionBuilder {
            engine,
            policies: SideMap::new(|_| None),
            sync: Box::new(NullSync),
            sink: None,
            seats: SideMap::new(|side| side.seat().to_string()),
        }
    }

    /// Receive a snapshot after every change.
    pub async fn subscribe(&self) -> watch::Receiver<MatchState> {
        self.inner.lock().await.updates.subscribe()
    }

    /// Current state.
    pub async fn snapshot(&self) -> MatchState {
        self.inner.lock().await.engine.snapshot()
    }

    /// Id used when this match is recorded.
    pub async fn match_id(&self) -> Uuid {
        self.inner.lock().await.match_id
    }

    /// Is a tick driver currently running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start the match and its tick driver.
    ///
    /// An engine that was started before it was handed to the builder only
    /// gets its driver. Does nothing once the match is finished or while a
    /// driver is already running.
    pub async fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let (epoch, period) = {
            let mut inner = self.inner.lock().await;
            match inner.engine.status() {
                GameStatus::Waiting => {
                    if !inner.engine.start() {
                        return;
                    }
                }
                GameStatus::Playing => {}
                GameStatus::Finished => return,
            }
            inner.after_change();
            (inner.engine.epoch(), inner.engine.config().tick_interval())
        };
        self.spawn_driver(epoch, period);
    }

    /// Play a card for `side`, then let any automated side respond.
    pub async fn play_card(&self, side: SideId, card: InstanceId) -> Result<PlayOutcome, PlayRejection> {
        let mut inner = self.inner.lock().await;
        match inner.engine.play_card(side, card) {
            Ok(outcome) => {
                inner.after_change();
                Ok(outcome)
            }
            Err(rejection) => {
                warn!(side = %side, card = %card, %rejection, "play rejected");
                Err(rejection)
            }
        }
    }

    /// Abandon the current match and start a fresh one.
    ///
    /// The old driver is aborted before the new state is built.
    pub async fn reset(&mut self) {
        self.stop();

        let (epoch, period) = {
            let mut inner = self.inner.lock().await;
            inner.engine.play_again();
            inner.match_id = Uuid::new_v4();
            inner.recorded = false;
            inner.after_change();
            (inner.engine.epoch(), inner.engine.config().tick_interval())
        };
        self.spawn_driver(epoch, period);
    }

    /// Stop the tick driver. The match state is kept as is.
    pub fn stop(&mut self) {
        if let Some(handle) = self.driver.take() {
            handle.abort();
        }
    }

    fn spawn_driver(&mut self, epoch: u64, period: std::time::Duration) {
        self.stop();
        self.driver = Some(driver::spawn(Arc::clone(&self.inner), epoch, period));
    }
}

impl Drop for MatchSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{CounterPolicy, StrongestPolicy};
    use crate::cards::CardCatalog;
    use crate::core::MatchConfig;
    use crate::persistence::SharedLedger;
    use std::time::Duration;

    fn engine() -> MatchEngine {
        MatchEngine::new(MatchConfig::default(), CardCatalog::suimon()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_automated_side_answers() {
        let mut session = MatchSession::builder(engine())
            .with_policy(SideId::Opponent, CounterPolicy)
            .build();
        session.start().await;

        let card = session.snapshot().await.side(SideId::Player).hand[0].id;
        let outcome = session.play_card(SideId::Player, card).await.unwrap();
        assert_eq!(outcome.next_turn, Some(SideId::Opponent));

        let state = session.snapshot().await;
        assert!(state.both_engaged());
        assert_eq!(state.round, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_play_is_returned() {
        let mut session = MatchSession::builder(engine()).build();
        session.start().await;

        let card = session.snapshot().await.side(SideId::Opponent).hand[0].id;
        assert_eq!(
            session.play_card(SideId::Opponent, card).await,
            Err(PlayRejection::NotYourTurn(SideId::Opponent))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_automated_match_runs_to_completion() {
        let ledger = SharedLedger::new();
        let mut session = MatchSession::builder(engine())
            .with_policy(SideId::Player, StrongestPolicy)
            .with_policy(SideId::Opponent, CounterPolicy)
            .with_sink(ledger.clone())
            .build();
        let mut updates = session.subscribe().await;
        session.start().await;

        while !updates.borrow_and_update().is_finished() {
            updates.changed().await.unwrap();
        }

        assert_eq!(session.snapshot().await.status, GameStatus::Finished);
        assert_eq!(ledger.with(|l| l.game_count()), 1);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!session.is_running());
    }
}
