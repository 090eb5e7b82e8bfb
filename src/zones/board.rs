//! Field entries: monsters on the board and cards in the spell/trap zone.
//!
//! Battle stance and face orientation are separate enums; a monster set
//! face-down is `Stance::Defense` + `Orientation::FaceDown`.

use serde::{Deserialize, Serialize};

use crate::core::CardRef;

/// Battle stance of a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Attack,
    Defense,
}

impl Stance {
    /// The opposite stance.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Stance::Attack => Stance::Defense,
            Stance::Defense => Stance::Attack,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stance::Attack => "attack",
            Stance::Defense => "defense",
        }
    }
}

/// Whether a field card's identity is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    FaceUp,
    FaceDown,
}

/// Protection flags fixed when a monster hits the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Protection {
    pub cannot_be_destroyed_by_battle: bool,
    pub cannot_be_destroyed_by_effects: bool,
    pub cannot_be_targeted: bool,
}

impl Protection {
    /// No protection at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// True if any flag is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.cannot_be_destroyed_by_battle
            || self.cannot_be_destroyed_by_effects
            || self.cannot_be_targeted
    }

    /// Union of two flag sets.
    #[must_use]
    pub fn merge(self, other: Protection) -> Protection {
        Protection {
            cannot_be_destroyed_by_battle: self.cannot_be_destroyed_by_battle
                || other.cannot_be_destroyed_by_battle,
            cannot_be_destroyed_by_effects: self.cannot_be_destroyed_by_effects
                || other.cannot_be_destroyed_by_effects,
            cannot_be_targeted: self.cannot_be_targeted || other.cannot_be_targeted,
        }
    }
}

/// A monster occupying a monster zone.
///
/// `attack`/`defense` start at the printed values and absorb permanent
/// modifiers. `temp_attack` holds "until end of turn" bonuses. Continuous
/// field modifiers are never stored here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCard {
    pub card: CardRef,
    pub stance: Stance,
    pub orientation: Orientation,
    pub attack: i64,
    pub defense: i64,
    pub temp_attack: i64,
    pub has_attacked: bool,
    pub position_changed_this_turn: bool,
    pub summoned_on_turn: u32,
    pub protection: Protection,
}

impl BoardCard {
    /// A face-up monster in the given stance.
    #[must_use]
    pub fn face_up(card: CardRef, stance: Stance, attack: i64, defense: i64, turn: u32) -> Self {
        Self {
            card,
            stance,
            orientation: Orientation::FaceUp,
            attack,
            defense,
            temp_attack: 0,
            has_attacked: false,
            position_changed_this_turn: false,
            summoned_on_turn: turn,
            protection: Protection::none(),
        }
    }

    /// A face-down defense monster.
    #[must_use]
    pub fn face_down(card: CardRef, attack: i64, defense: i64, turn: u32) -> Self {
        Self {
            orientation: Orientation::FaceDown,
            ..Self::face_up(card, Stance::Defense, attack, defense, turn)
        }
    }

    /// Attach protection flags.
    #[must_use]
    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.orientation == Orientation::FaceDown
    }

    /// Legacy signed position: attack = 1, defense = -1.
    #[must_use]
    pub fn position_code(&self) -> i8 {
        match self.stance {
            Stance::Attack => 1,
            Stance::Defense => -1,
        }
    }
}

/// A card in the spell/trap zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCard {
    pub card: CardRef,
    pub orientation: Orientation,
    pub is_activated: bool,
    pub set_on_turn: u32,
}

impl ZoneCard {
    /// A freshly set, face-down card.
    #[must_use]
    pub fn set(card: CardRef, turn: u32) -> Self {
        Self {
            card,
            orientation: Orientation::FaceDown,
            is_activated: false,
            set_on_turn: turn,
        }
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.orientation == Orientation::FaceDown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_down_is_defense() {
        let card = BoardCard::face_down(CardRef::new(1), 1500, 1200, 1);
        assert!(card.is_face_down());
        assert_eq!(card.stance, Stance::Defense);
        assert_eq!(card.position_code(), -1);
    }

    #[test]
    fn test_face_up_attack_code() {
        let card = BoardCard::face_up(CardRef::new(1), Stance::Attack, 1800, 1000, 2);
        assert!(!card.is_face_down());
        assert_eq!(card.position_code(), 1);
        assert_eq!(card.summoned_on_turn, 2);
    }

    #[test]
    fn test_protection_merge() {
        let battle = Protection { cannot_be_destroyed_by_battle: true, ..Protection::none() };
        let targeted = Protection { cannot_be_targeted: true, ..Protection::none() };
        let both = battle.merge(targeted);

        assert!(both.cannot_be_destroyed_by_battle);
        assert!(both.cannot_be_targeted);
        assert!(!both.cannot_be_destroyed_by_effects);
        assert!(!Protection::none().any());
    }

    #[test]
    fn test_stance_toggle() {
        assert_eq!(Stance::Attack.toggled(), Stance::Defense);
        assert_eq!(Stance::Defense.toggled(), Stance::Attack);
    }
}
