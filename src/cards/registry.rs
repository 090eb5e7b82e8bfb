//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every printed card the engine knows about and
//! the parsed form of each card's ability. Abilities are parsed once, on
//! registration; executors and the turn engine only ever read the cache.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};
use crate::effects::{parse_multi_part_ability, ParsedAbility};

static NO_ABILITY: ParsedAbility = ParsedAbility {
    has_multi_part: false,
    effects: Vec::new(),
};

/// Registry of card definitions and their parsed abilities.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardId, CardRegistry, CardType};
/// use rust_duel::effects::EffectKind;
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardDefinition::new(CardId::new(1), "Pot of Plenty", CardType::Spell)
///         .with_ability("Draw 2 cards."),
/// );
///
/// let ability = registry.ability(CardId::new(1));
/// assert_eq!(ability.effects[0].kind, EffectKind::Draw);
/// assert_eq!(ability.effects[0].value, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    abilities: FxHashMap<CardId, ParsedAbility>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition and parse its ability.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        if let Some(text) = card.ability.as_deref() {
            let parsed = parse_multi_part_ability(text);
            if parsed.effects.is_empty() {
                tracing::debug!(card = %card.name, "ability has no mechanical effect");
            }
            self.abilities.insert(card.id, parsed);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Parsed ability of a card. Cards without text yield an empty ability.
    #[must_use]
    pub fn ability(&self, id: CardId) -> &ParsedAbility {
        self.abilities.get(&id).unwrap_or(&NO_ABILITY)
    }

    /// Display name, or a placeholder for unknown ids.
    #[must_use]
    pub fn name_of(&self, id: CardId) -> &str {
        self.cards.get(&id).map_or("Unknown Card", |c| c.name.as_str())
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }

    /// Look a card up by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.values().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectKind, Trigger};

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Test Card", CardType::Creature));

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Test Card");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(registry.name_of(CardId::new(99)), "Unknown Card");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Card A", CardType::Spell));
        registry.register(CardDefinition::new(CardId::new(1), "Card B", CardType::Spell));
    }

    #[test]
    fn test_ability_cached_on_register() {
        let mut registry = CardRegistry::new();
        registry.register(
            CardDefinition::new(CardId::new(1), "Inferno Drake", CardType::Creature)
                .with_ability("When summoned: Deal 500 damage."),
        );

        let ability = registry.ability(CardId::new(1));
        assert_eq!(ability.effects.len(), 1);
        assert_eq!(ability.effects[0].kind, EffectKind::Damage);
        assert_eq!(ability.effects[0].trigger, Some(Trigger::OnSummon));
    }

    #[test]
    fn test_missing_ability_is_empty() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Vanilla", CardType::Creature));

        assert!(registry.ability(CardId::new(1)).effects.is_empty());
        assert!(registry.ability(CardId::new(2)).effects.is_empty());
    }

    #[test]
    fn test_find_by_type_and_name() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Goblin", CardType::Creature));
        registry.register(CardDefinition::new(CardId::new(2), "Bolt", CardType::Spell));
        registry.register(CardDefinition::new(CardId::new(3), "Orc", CardType::Creature));

        assert_eq!(registry.find_by_type(CardType::Creature).count(), 2);
        assert_eq!(registry.find_by_name("Bolt").unwrap().id, CardId::new(2));
        assert!(registry.find_by_name("Dragon").is_none());
    }
}
