//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `TemplateId`: Identifier for a monster template
//! - `CardTemplate`: Immutable name and stats
//! - `CardInstance`: A drawn card with its own hp
//! - `CardCatalog`: Template lookup and hand dealing

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{CardStats, CardTemplate, TemplateId};
pub use instance::CardInstance;
