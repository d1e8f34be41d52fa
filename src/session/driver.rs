//! Wall-clock tick driver.
//!
//! One tokio task per running match. It wakes on `tick_interval`, takes the
//! session lock, advances the engine by one tick and runs the session's
//! after-change hook. The task exits on its own once the match finishes, and
//! also as soon as it sees an epoch other than the one it was spawned for.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use super::Inner;
use crate::rules::TickOutcome;

/// Spawn the driver for `epoch`.
pub(super) fn spawn(inner: Arc<Mutex<Inner>>, epoch: u64, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of an interval completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let mut guard = inner.lock().await;
            if guard.engine.epoch() != epoch {
                debug!(epoch, "driver outlived its match, exiting");
                return;
            }

            match guard.engine.tick() {
                TickOutcome::Idle => {
                    if guard.engine.state().is_finished() {
                        return;
                    }
                    trace!(epoch, "idle tick");
                }
                TickOutcome::Resolved { .. } => guard.after_change(),
                TickOutcome::Finished { .. } => {
                    guard.after_change();
                    return;
                }
            }
        }
    })
}
