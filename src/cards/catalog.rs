//! Card catalog: the fixed set of templates hands are dealt from.
//!
//! The catalog keeps templates in insertion order (so seeded deals are
//! reproducible) with an `FxHashMap` index for lookup by `TemplateId`.

use rustc_hash::{FxHashMap, FxHashSet};

use super::definition::{CardTemplate, TemplateId};
use super::instance::CardInstance;
use crate::core::entity::InstanceIds;
use crate::core::error::ConfigError;
use crate::core::rng::GameRng;

/// The built-in Suimon roster: (name, attack, defense, max hp).
const SUIMON_ROSTER: [(&str, u32, u32, u32); 25] = [
    ("Sui", 50, 30, 100),
    ("Grum", 60, 40, 90),
    ("Stomp", 70, 50, 80),
    ("Blaze", 80, 30, 70),
    ("Brocco", 40, 70, 110),
    ("Yeti", 65, 65, 100),
    ("Nubb", 45, 45, 120),
    ("Nom", 55, 35, 90),
    ("Cyclo", 75, 45, 85),
    ("Glint", 70, 40, 80),
    ("Fluff", 35, 75, 100),
    ("Captain Boo", 85, 55, 95),
    ("Momo", 50, 50, 100),
    ("Slippy", 45, 65, 95),
    ("Whirl", 60, 60, 90),
    ("Twispy", 55, 55, 100),
    ("Pico", 40, 40, 130),
    ("Tuga", 30, 80, 120),
    ("Kai", 65, 45, 90),
    ("Ruk", 75, 35, 85),
    ("Pyro", 80, 40, 75),
    ("Grow", 45, 70, 105),
    ("Luna", 70, 50, 95),
    ("Floar", 55, 60, 100),
    ("Ecron", 90, 30, 70),
];

/// Immutable set of card templates.
///
/// ## Example
///
/// ```
/// use suimon_core::cards::CardCatalog;
/// use suimon_core::core::{GameRng, InstanceIds};
/// use rustc_hash::FxHashSet;
///
/// let catalog = CardCatalog::suimon();
/// let mut rng = GameRng::new(42);
/// let mut ids = InstanceIds::new();
///
/// let hand = catalog.draw_hand(4, &mut rng, &mut ids, &FxHashSet::default());
/// assert_eq!(hand.len(), 4);
/// assert!(hand.iter().all(|c| c.hp == c.stats.max_hp));
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    templates: Vec<CardTemplate>,
    index: FxHashMap<TemplateId, usize>,
}

impl CardCatalog {
    /// Build a catalog, rejecting empty lists, repeated IDs and zero-hp templates.
    pub fn new(templates: Vec<CardTemplate>) -> Result<Self, ConfigError> {
        if templates.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut index = FxHashMap::default();
        for (pos, template) in templates.iter().enumerate() {
            if template.stats.max_hp == 0 {
                return Err(ConfigError::InvalidTemplate(template.name.clone()));
            }
            if index.insert(template.id, pos).is_some() {
                return Err(ConfigError::DuplicateTemplate(template.id.to_string()));
            }
        }

        Ok(Self { templates, index })
    }

    /// The 25 Suimon monsters.
    #[must_use]
    pub fn suimon() -> Self {
        let templates = SUIMON_ROSTER
            .iter()
            .enumerate()
            .map(|(i, &(name, attack, defense, hp))| {
                let image = format!("monsters/{}.png", name.to_lowercase().replace(' ', ""));
                CardTemplate::new(TemplateId::new(i as u32), name, attack, defense, hp).with_image(image)
            })
            .collect::<Vec<_>>();

        let index = templates
            .iter()
            .enumerate()
            .map(|(pos, t)| (t.id, pos))
            .collect();

        Self { templates, index }
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&CardTemplate> {
        self.index.get(&id).map(|&pos| &self.templates[pos])
    }

    /// Display name for a template, or `"?"` if unknown.
    #[must_use]
    pub fn name_of(&self, id: TemplateId) -> &str {
        self.get(id).map_or("?", |t| t.name.as_str())
    }

    /// Check if a template ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty (never true for a constructed catalog).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.iter()
    }

    /// Draw `n` fresh instances, sampled uniformly without replacement from
    /// the templates not in `exclude`.
    ///
    /// If fewer than `n` candidates exist the pool is sampled again for the
    /// remainder, so the result always has `n` cards. If every template is
    /// excluded the exclusion is ignored.
    pub fn draw_hand(
        &self,
        n: usize,
        rng: &mut GameRng,
        ids: &mut InstanceIds,
        exclude: &FxHashSet<TemplateId>,
    ) -> Vec<CardInstance> {
        let mut candidates: Vec<usize> = (0..self.templates.len())
            .filter(|&pos| !exclude.contains(&self.templates[pos].id))
            .collect();
        if candidates.is_empty() {
            candidates = (0..self.templates.len()).collect();
        }

        let mut hand = Vec::with_capacity(n);
        while hand.len() < n {
            let take = (n - hand.len()).min(candidates.len());
            for pick in rng.sample_indices(candidates.len(), take) {
                let template = &self.templates[candidates[pick]];
                hand.push(CardInstance::from_template(ids.alloc(), template));
            }
        }
        hand
    }
}
