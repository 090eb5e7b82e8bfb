//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for printed card definitions
//! - `CardType`: Creature, Spell, Trap or Equipment
//! - `CardDefinition`: Printed stats, level, archetype and ability text
//! - `CardInstance`: A physical copy in a match (ref, definition, owner)
//! - `CardRegistry`: Definition lookup plus the parsed-ability cache

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{Archetype, CardDefinition, CardId, CardType};
pub use instance::CardInstance;
pub use registry::CardRegistry;
