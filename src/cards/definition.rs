//! Card definitions - printed card data.
//!
//! `CardDefinition` holds what is printed on a card: name, type, stats,
//! level, archetype and ability text. Runtime state (stance, modifiers,
//! location) lives on `BoardCard` and the zones, never here.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// Identifies the printed card ("Inferno Drake"), not a physical copy
/// in a match. Physical copies are `CardRef`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Def({})", self.0)
    }
}

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Creature,
    Spell,
    Trap,
    Equipment,
}

impl CardType {
    /// Creatures go to monster zones; everything else to the spell/trap zone.
    #[must_use]
    pub const fn is_monster(self) -> bool {
        matches!(self, CardType::Creature)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Creature => "creature",
            CardType::Spell => "spell",
            CardType::Trap => "trap",
            CardType::Equipment => "equipment",
        }
    }
}

/// Elemental archetype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Fire,
    Water,
    Earth,
    Wind,
    #[default]
    Neutral,
}

impl Archetype {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Archetype::Fire => "fire",
            Archetype::Water => "water",
            Archetype::Earth => "earth",
            Archetype::Wind => "wind",
            Archetype::Neutral => "neutral",
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{Archetype, CardDefinition, CardId, CardType};
///
/// let drake = CardDefinition::new(CardId::new(1), "Inferno Drake", CardType::Creature)
///     .with_stats(1800, 1200)
///     .with_level(4)
///     .with_archetype(Archetype::Fire)
///     .with_monster_type("Dragon")
///     .with_ability("When summoned: Deal 500 damage.");
///
/// assert!(drake.matches_condition("dragon"));
/// assert!(drake.matches_condition("Fire"));
/// assert!(!drake.matches_condition("spellcaster"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub attack: i64,
    pub defense: i64,
    /// Level (printed cost); drives tribute requirements.
    pub level: u32,
    pub archetype: Archetype,
    /// Monster type line, e.g. "Dragon" or "Warrior".
    pub monster_type: Option<String>,
    /// Free-text ability.
    pub ability: Option<String>,
}

impl CardDefinition {
    /// Create a definition with zero stats and no ability.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            attack: 0,
            defense: 0,
            level: 1,
            archetype: Archetype::Neutral,
            monster_type: None,
            ability: None,
        }
    }

    /// Set printed ATK/DEF.
    #[must_use]
    pub fn with_stats(mut self, attack: i64, defense: i64) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    /// Set the level.
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the archetype.
    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    /// Set the monster type line.
    #[must_use]
    pub fn with_monster_type(mut self, monster_type: impl Into<String>) -> Self {
        self.monster_type = Some(monster_type.into());
        self
    }

    /// Set the ability text.
    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    /// Whether this card satisfies a free-text effect condition.
    ///
    /// Matches case-insensitively against the monster type, the archetype
    /// and the card type. An empty condition matches everything.
    #[must_use]
    pub fn matches_condition(&self, condition: &str) -> bool {
        let condition = condition.trim().to_lowercase();
        if condition.is_empty() {
            return true;
        }
        let type_match = self
            .monster_type
            .as_deref()
            .is_some_and(|t| t.to_lowercase() == condition);
        type_match
            || self.archetype.as_str() == condition
            || self.card_type.as_str() == condition
            || self.name.to_lowercase().contains(&condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Def(7)");
    }

    #[test]
    fn test_builder_defaults() {
        let spell = CardDefinition::new(CardId::new(2), "Pot of Plenty", CardType::Spell)
            .with_ability("Draw 2 cards.");

        assert_eq!(spell.attack, 0);
        assert_eq!(spell.archetype, Archetype::Neutral);
        assert!(!spell.card_type.is_monster());
        assert_eq!(spell.ability.as_deref(), Some("Draw 2 cards."));
    }

    #[test]
    fn test_condition_matching() {
        let wyrm = CardDefinition::new(CardId::new(3), "Tidal Wyrm", CardType::Creature)
            .with_archetype(Archetype::Water)
            .with_monster_type("Sea Serpent");

        assert!(wyrm.matches_condition("sea serpent"));
        assert!(wyrm.matches_condition("water"));
        assert!(wyrm.matches_condition("wyrm"));
        assert!(wyrm.matches_condition(""));
        assert!(!wyrm.matches_condition("fire"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CardType::Creature).unwrap();
        assert_eq!(json, "\"creature\"");
    }
}
