//! Headless AI-vs-AI runner.
//!
//! Plays `SUIMON_MATCHES` matches between the counter policy (player) and the
//! strongest-card policy (opponent), records each into a ledger, and logs
//! the tallies.
//!
//! Environment:
//! - `SUIMON_MATCHES` (default 100)
//! - `SUIMON_SEED` (default 42; match `i` uses `seed + i`)
//! - `SUIMON_ENERGY`, `SUIMON_HAND_SIZE`, `SUIMON_MIN_DAMAGE`, `SUIMON_TICK_LIMIT`
//! - `RUST_LOG` for log filtering (default `info`)

use std::str::FromStr;

use anyhow::{bail, Context};
use tracing::{debug, info};
use uuid::Uuid;

use suimon_core::{
    CardCatalog, CounterPolicy, Ledger, MatchConfig, MatchEngine, MatchRecord, OpponentPolicy,
    OutcomeSink, SideId, SideMap, StrongestPolicy,
};

/// Ticks after which a match is considered stuck.
const MAX_TICKS: u32 = 100_000;

fn env_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

fn config_from_env() -> anyhow::Result<MatchConfig> {
    let mut config = MatchConfig::default();
    if let Some(seed) = env_var("SUIMON_SEED")? {
        config = config.with_seed(seed);
    }
    if let Some(energy) = env_var("SUIMON_ENERGY")? {
        config = config.with_energy(energy);
    }
    if let Some(size) = env_var("SUIMON_HAND_SIZE")? {
        config = config.with_hand_size(size);
    }
    if let Some(floor) = env_var("SUIMON_MIN_DAMAGE")? {
        config = config.with_min_damage(floor);
    }
    if let Some(limit) = env_var("SUIMON_TICK_LIMIT")? {
        config = config.with_tick_limit(limit);
    }
    Ok(config)
}

fn play_out(engine: &mut MatchEngine, policies: &SideMap<Box<dyn OpponentPolicy>>) -> anyhow::Result<()> {
    engine.start();
    loop {
        while let Some(side) = engine.state().current_turn {
            engine.play_with_policy(side, policies[side].as_ref())?;
        }
        if engine.tick().result().is_some() {
            return Ok(());
        }
        if engine.state().tick >= MAX_TICKS {
            bail!("match made no progress after {} ticks", MAX_TICKS);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let matches: u64 = env_var("SUIMON_MATCHES")?.unwrap_or(100);
    let config = config_from_env()?;
    let catalog = CardCatalog::suimon();

    let policies: SideMap<Box<dyn OpponentPolicy>> = SideMap::new(|side| match side {
        SideId::Player => Box::new(CounterPolicy) as Box<dyn OpponentPolicy>,
        SideId::Opponent => Box::new(StrongestPolicy),
    });
    let seats = SideMap::new(|side| match side {
        SideId::Player => "counter".to_string(),
        SideId::Opponent => "strongest".to_string(),
    });

    info!(matches, seed = config.seed, energy = config.energy_max, "starting simulation");

    let mut ledger = Ledger::new();
    for i in 0..matches {
        let match_config = config.clone().with_seed(config.seed.wrapping_add(i));
        let mut engine = MatchEngine::new(match_config, catalog.clone())?;
        play_out(&mut engine, &policies)?;

        let record = MatchRecord::from_state(Uuid::new_v4(), seats.clone(), engine.state())
            .context("match ended without a result")?;
        debug!(
            game = i,
            ticks = record.ticks,
            rounds = record.rounds,
            winner = record.winner_id().unwrap_or("tie"),
            "match finished"
        );
        ledger.record(&record)?;
    }

    for side in SideId::all() {
        let name = &seats[side];
        if let Some(tally) = ledger.get_player(name) {
            info!(
                player = %name,
                wins = tally.wins,
                losses = tally.losses,
                ties = tally.ties,
                "final tally"
            );
        }
    }

    let total_ticks: u64 = ledger.games().map(|g| u64::from(g.ticks)).sum();
    let avg_ticks = total_ticks as f64 / ledger.game_count().max(1) as f64;
    info!(games = ledger.game_count(), avg_ticks, "simulation complete");
    Ok(())
}
