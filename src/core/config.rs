//! Match configuration.
//!
//! Every rule constant the engine uses lives here: hand size, energy pool,
//! damage floor, the energy-loss model, the optional tick limit, the tick
//! cadence and initiative. `validate` runs before any engine is built.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;
use super::side::SideId;

/// Whether a card template may appear more than once at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Any template may be dealt at any time.
    #[default]
    Allow,
    /// A side never holds two instances of one template.
    UniqueWithinSide,
    /// No template is held by both sides at once.
    UniqueAcrossSides,
}

impl DuplicatePolicy {
    /// Distinct templates the catalog must contain for a given hand size.
    #[must_use]
    pub fn templates_needed(self, hand_target_size: usize) -> usize {
        match self {
            DuplicatePolicy::Allow => 1,
            DuplicatePolicy::UniqueWithinSide => hand_target_size,
            DuplicatePolicy::UniqueAcrossSides => hand_target_size * 2,
        }
    }
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Cards each side holds between hand and battlefield.
    pub hand_target_size: usize,

    /// Starting (and maximum) energy per side.
    pub energy_max: u32,

    /// Damage floor per exchange. Values >= 1 guarantee every tick progresses;
    /// zero is only accepted together with a tick limit.
    pub min_damage: u32,

    /// Energy a side loses when its card is defeated.
    pub defeat_energy_loss: u32,

    /// Percent of the damage differential drained from the weaker side each tick.
    pub drain_percent: u32,

    /// Upper bound on the per-tick drain.
    pub drain_cap: u32,

    /// Finish the match after this many combat ticks. `None` for no limit.
    pub tick_limit: Option<u32>,

    /// Wall-clock cadence of the tick driver, in milliseconds.
    pub tick_interval_ms: u64,

    /// Combat log entries retained for display.
    pub combat_log_capacity: usize,

    /// Side that acts first, and again whenever both slots empty together.
    pub first_player: SideId,

    /// Template repetition policy for deals.
    pub duplicates: DuplicatePolicy,

    /// Root seed for dealing and opponent randomness.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            hand_target_size: 4,
            energy_max: 300,
            min_damage: 1,
            defeat_energy_loss: 50,
            drain_percent: 10,
            drain_cap: 20,
            tick_limit: None,
            tick_interval_ms: 1000,
            combat_log_capacity: 50,
            first_player: SideId::Player,
            duplicates: DuplicatePolicy::Allow,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Defaults for a two-peer networked match (larger energy pool).
    #[must_use]
    pub fn networked() -> Self {
        Self {
            energy_max: 700,
            ..Self::default()
        }
    }

    /// Set the hand target size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_target_size = size;
        self
    }

    /// Set the energy pool.
    #[must_use]
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy_max = energy;
        self
    }

    /// Set the damage floor.
    #[must_use]
    pub fn with_min_damage(mut self, floor: u32) -> Self {
        self.min_damage = floor;
        self
    }

    /// Set the per-defeat energy loss.
    #[must_use]
    pub fn with_defeat_loss(mut self, loss: u32) -> Self {
        self.defeat_energy_loss = loss;
        self
    }

    /// Set the proportional drain (percent of differential, capped per tick).
    #[must_use]
    pub fn with_drain(mut self, percent: u32, cap: u32) -> Self {
        self.drain_percent = percent;
        self.drain_cap = cap;
        self
    }

    /// Disable the proportional drain, leaving only per-defeat loss.
    #[must_use]
    pub fn without_drain(self) -> Self {
        self.with_drain(0, 0)
    }

    /// Set a tick limit.
    #[must_use]
    pub fn with_tick_limit(mut self, limit: u32) -> Self {
        self.tick_limit = Some(limit);
        self
    }

    /// Set the tick cadence.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the first player.
    #[must_use]
    pub fn with_first_player(mut self, side: SideId) -> Self {
        self.first_player = side;
        self
    }

    /// Set the duplicate policy.
    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set how many combat log entries are retained.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.combat_log_capacity = capacity;
        self
    }

    /// Tick cadence as a `Duration`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check the configuration against a catalog of `catalog_len` templates.
    pub fn validate(&self, catalog_len: usize) -> Result<(), ConfigError> {
        if catalog_len == 0 {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.hand_target_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        if self.energy_max == 0 {
            return Err(ConfigError::ZeroEnergy);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.drain_percent > 100 {
            return Err(ConfigError::DrainPercentOutOfRange(self.drain_percent));
        }
        if self.min_damage == 0 && self.tick_limit.is_none() {
            return Err(ConfigError::UnboundedStalemate);
        }
        let needed = self.duplicates.templates_needed(self.hand_target_size);
        if catalog_len < needed {
            return Err(ConfigError::CatalogTooSmall {
                needed,
                available: catalog_len,
            });
        }
        Ok(())
    }
}
