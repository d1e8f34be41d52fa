//! Card instances - runtime card state.
//!
//! A `CardInstance` is one drawn copy of a template. It carries the
//! template's stats alongside its own mutable `hp`, so combat can be computed
//! from two instances alone and a mirrored snapshot renders without a
//! catalog lookup.

use serde::{Deserialize, Serialize};

use super::definition::{CardStats, CardTemplate, TemplateId};
use crate::core::entity::InstanceId;

/// A card in a hand or battlefield slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this instance.
    pub id: InstanceId,

    /// Template this instance was drawn from.
    pub template: TemplateId,

    /// Copy of the template stats.
    pub stats: CardStats,

    /// Remaining hp, `0..=stats.max_hp`.
    pub hp: u32,
}

impl CardInstance {
    /// Draw a fresh instance of a template at full hp.
    #[must_use]
    pub fn from_template(id: InstanceId, template: &CardTemplate) -> Self {
        Self {
            id,
            template: template.id,
            stats: template.stats,
            hp: template.stats.max_hp,
        }
    }

    /// Build an instance directly from stats (for tests and tools).
    #[must_use]
    pub fn with_stats(id: InstanceId, template: TemplateId, stats: CardStats) -> Self {
        Self {
            id,
            template,
            stats,
            hp: stats.max_hp,
        }
    }

    #[must_use]
    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    #[must_use]
    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    /// Reduce hp, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}
