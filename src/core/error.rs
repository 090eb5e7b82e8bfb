//! Engine error taxonomy.
//!
//! Every rejected entry-point call maps to one `EngineError`. Errors are
//! raised before any mutation is committed, so a failed call always leaves
//! the match exactly as it was.
//!
//! Soft executor failures (a protected target, an empty deck) are not errors;
//! they travel as `EffectOutcome` values inside successful results.

use serde::{Deserialize, Serialize};

use super::config::Phase;
use super::entity::{CardRef, LobbyId};
use crate::zones::Zone;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Coarse classification of an [`EngineError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorTier {
    /// The caller may not perform this action at all.
    Authorization,
    /// A referenced lobby, game or card does not exist where expected.
    NotFound,
    /// The action breaks a game rule.
    Legality,
    /// State could not be archived or restored.
    Internal,
}

/// Errors surfaced by engine entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    // === Authorization ===
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("You are not a participant in this game")]
    NotAParticipant,

    #[error("Not your turn")]
    NotYourTurn,

    // === Not found ===
    #[error("Lobby not found: {0}")]
    LobbyNotFound(LobbyId),

    #[error("Game state not found for lobby {0}")]
    GameStateNotFound(LobbyId),

    #[error("Card not found: {0}")]
    CardNotFound(CardRef),

    #[error("{card} is not in your {zone}")]
    CardNotInZone { card: CardRef, zone: Zone },

    // === Legality ===
    #[error("{zone} is full (max {max} cards)")]
    ZoneFull { zone: Zone, max: usize },

    #[error("Cannot {action} during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("You have already Normal Summoned this turn")]
    AlreadyNormalSummoned,

    #[error("This monster requires {required} tribute(s), {provided} provided")]
    TributeMismatch { required: usize, provided: usize },

    #[error("{name} is not a {expected} card")]
    WrongCardType { name: String, expected: &'static str },

    #[error("Chain error: {0}")]
    Chain(String),

    #[error("{0}")]
    Illegal(String),

    #[error("The game is already over")]
    GameOver,

    // === Internal ===
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Which tier of the taxonomy this error belongs to.
    #[must_use]
    pub fn tier(&self) -> ErrorTier {
        match self {
            EngineError::NotAuthenticated
            | EngineError::NotAParticipant
            | EngineError::NotYourTurn => ErrorTier::Authorization,
            EngineError::LobbyNotFound(_)
            | EngineError::GameStateNotFound(_)
            | EngineError::CardNotFound(_)
            | EngineError::CardNotInZone { .. } => ErrorTier::NotFound,
            EngineError::Snapshot(_) => ErrorTier::Internal,
            _ => ErrorTier::Legality,
        }
    }

    /// Stable machine-readable code for the calling layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::NotAuthenticated => "not_authenticated",
            EngineError::NotAParticipant => "not_a_participant",
            EngineError::NotYourTurn => "not_your_turn",
            EngineError::LobbyNotFound(_) => "lobby_not_found",
            EngineError::GameStateNotFound(_) => "game_state_not_found",
            EngineError::CardNotFound(_) => "card_not_found",
            EngineError::CardNotInZone { .. } => "card_not_in_zone",
            EngineError::ZoneFull { .. } => "zone_full",
            EngineError::WrongPhase { .. } => "wrong_phase",
            EngineError::AlreadyNormalSummoned => "already_normal_summoned",
            EngineError::TributeMismatch { .. } => "tribute_mismatch",
            EngineError::WrongCardType { .. } => "wrong_card_type",
            EngineError::Chain(_) => "chain_error",
            EngineError::Illegal(_) => "illegal_action",
            EngineError::GameOver => "game_over",
            EngineError::Snapshot(_) => "snapshot_error",
        }
    }

    /// Shorthand for a validator-specific rule violation.
    pub fn illegal(message: impl Into<String>) -> Self {
        EngineError::Illegal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(EngineError::NotYourTurn.tier(), ErrorTier::Authorization);
        assert_eq!(
            EngineError::LobbyNotFound(LobbyId::new("l1")).tier(),
            ErrorTier::NotFound
        );
        assert_eq!(EngineError::AlreadyNormalSummoned.tier(), ErrorTier::Legality);
        assert_eq!(EngineError::illegal("nope").tier(), ErrorTier::Legality);
    }

    #[test]
    fn test_messages() {
        let err = EngineError::ZoneFull { zone: Zone::SpellTrap, max: 5 };
        assert_eq!(err.to_string(), "Spell/Trap Zone is full (max 5 cards)");

        let err = EngineError::WrongPhase { action: "activate a Normal Spell", phase: Phase::Battle };
        assert_eq!(err.to_string(), "Cannot activate a Normal Spell during the Battle phase");

        let err = EngineError::TributeMismatch { required: 2, provided: 1 };
        assert_eq!(err.error_code(), "tribute_mismatch");
    }
}
