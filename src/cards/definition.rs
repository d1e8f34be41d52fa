//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a monster: its name,
//! attack, defense and maximum hp. Per-match state (current hp, which slot a
//! card sits in) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template.
///
/// This identifies the monster ("Sui", "Grum"), not a drawn card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Combat stats shared by templates and instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStats {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
}

impl CardStats {
    #[must_use]
    pub const fn new(attack: u32, defense: u32, max_hp: u32) -> Self {
        Self {
            attack,
            defense,
            max_hp,
        }
    }
}

/// Immutable catalog entry.
///
/// ## Example
///
/// ```
/// use suimon_core::cards::{CardTemplate, TemplateId};
///
/// let sui = CardTemplate::new(TemplateId::new(0), "Sui", 50, 30, 100)
///     .with_image("monsters/sui.png");
///
/// assert_eq!(sui.stats.attack, 50);
/// assert_eq!(sui.image, "monsters/sui.png");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier.
    pub id: TemplateId,

    /// Display name.
    pub name: String,

    /// Attack, defense and maximum hp.
    pub stats: CardStats,

    /// Image reference. Opaque to the engine.
    #[serde(default)]
    pub image: String,
}

impl CardTemplate {
    /// Create a template without an image.
    pub fn new(id: TemplateId, name: impl Into<String>, attack: u32, defense: u32, max_hp: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stats: CardStats::new(attack, defense, max_hp),
            image: String::new(),
        }
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
