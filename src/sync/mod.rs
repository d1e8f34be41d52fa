//! State synchronization between an authoritative session and its mirrors.
//!
//! The authority publishes a full snapshot after every change through a
//! `SyncAdapter`. Mirrors feed the frames to a `Replica`. There is no
//! diffing and no merge: the newest snapshot simply replaces the old one.

pub mod codec;
pub mod replica;

use tokio::sync::mpsc;

use crate::core::{AdapterError, MatchState};

pub use replica::Replica;

/// Outbound half of synchronization.
pub trait SyncAdapter: Send {
    /// Send a snapshot to whoever is mirroring this match.
    fn publish(&mut self, snapshot: &MatchState) -> Result<(), AdapterError>;
}

/// Publishes bincode frames over an unbounded tokio channel.
#[derive(Clone, Debug)]
pub struct ChannelSync {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ChannelSync {
    /// Create an adapter and the receiving end for a mirror.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SyncAdapter for ChannelSync {
    fn publish(&mut self, snapshot: &MatchState) -> Result<(), AdapterError> {
        let frame = codec::encode(snapshot)?;
        self.tx.send(frame).map_err(|_| AdapterError::Disconnected)
    }
}

/// Publishes nowhere. Used for solo matches.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSync;

impl SyncAdapter for NullSync {
    fn publish(&mut self, _snapshot: &MatchState) -> Result<(), AdapterError> {
        Ok(())
    }
}
