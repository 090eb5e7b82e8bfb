//! Identifiers for physical cards and matches.
//!
//! ## CardRef
//!
//! Every physical card in a match gets its own `CardRef` when decks are
//! dealt. Two copies of the same definition are two different refs, so
//! "a card exists in exactly one zone" can be checked by ref alone.
//!
//! ## LobbyId / GameId
//!
//! A lobby is the addressable match slot; a game id tags the events of one
//! play-through inside it.

use serde::{Deserialize, Serialize};

/// Reference to one physical card in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardRef(pub u32);

impl CardRef {
    /// Create a new card reference.
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

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Lobby identifier. Entry points address matches by lobby.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LobbyId(pub String);

impl LobbyId {
    /// Create a new lobby ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LobbyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game identifier stamped on every recorded event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ref_basics() {
        let card = CardRef::new(42);
        assert_eq!(card.raw(), 42);
        assert_eq!(format!("{}", card), "Card(42)");
    }

    #[test]
    fn test_lobby_and_game_ids() {
        let lobby = LobbyId::new("lobby-1");
        let game = GameId::new("game-1");
        assert_eq!(lobby.as_str(), "lobby-1");
        assert_eq!(format!("{}", game), "game-1");
    }
}
