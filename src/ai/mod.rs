//! Rule-based opponents.
//!
//! A policy is consulted whenever an automated side must commit a card.
//! It returns a choice; the engine validates and applies it.

pub mod policy;

pub use policy::{CounterPolicy, OpponentPolicy, RandomPolicy, StrongestPolicy};
