//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! A duel always has exactly two seats: the lobby host and the opponent.
//! Zone selection is written once against `Seat` instead of being repeated
//! as host/opponent branches at every call site.
//!
//! ## Seats
//!
//! Per-seat storage indexed by `Seat`, backed by a fixed two-element array.
//!
//! ## Callers
//!
//! `UserId` names an account; `Caller` is the identity an entry point was
//! invoked with, which may be anonymous.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{EngineError, Result};

/// One of the two sides of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// The player who opened the lobby. Takes the first turn.
    Host,
    /// The player who joined the lobby.
    Opponent,
}

impl Seat {
    /// Both seats, host first.
    pub const BOTH: [Seat; 2] = [Seat::Host, Seat::Opponent];

    /// The other side of the table.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Host => Seat::Opponent,
            Seat::Opponent => Seat::Host,
        }
    }

    /// Array index for this seat.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::Host => 0,
            Seat::Opponent => 1,
        }
    }

    /// Lowercase label used in event metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Seat::Host => "host",
            Seat::Opponent => "opponent",
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Host => write!(f, "Host"),
            Seat::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_duel::core::{Seat, Seats};
///
/// let mut life: Seats<i64> = Seats::with_value(8000);
/// life[Seat::Opponent] -= 500;
///
/// assert_eq!(life[Seat::Host], 8000);
/// assert_eq!(life[Seat::Opponent], 7500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seats<T> {
    data: [T; 2],
}

impl<T> Seats<T> {
    /// Create from explicit host and opponent values.
    pub fn new(host: T, opponent: T) -> Self {
        Self { data: [host, opponent] }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Seat) -> T) -> Self {
        Self::new(factory(Seat::Host), factory(Seat::Opponent))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs, host first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Seat, &mut T) pairs, host first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        Seat::BOTH.into_iter().zip(self.data.iter_mut())
    }

    /// Find the seat whose entry satisfies a predicate.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<Seat> {
        self.iter().find(|(_, v)| predicate(v)).map(|(seat, _)| seat)
    }
}

impl<T: Default> Default for Seats<T> {
    fn default() -> Self {
        Self::new(T::default(), T::default())
    }
}

impl<T> Index<Seat> for Seats<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for Seats<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// Account identifier of a participant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID.
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

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// Identity attached to an incoming call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caller {
    /// An authenticated account.
    User(UserId),
    /// No session was presented.
    Anonymous,
}

impl Caller {
    /// Authenticated caller.
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Caller::User(UserId::new(id))
    }

    /// Resolve the caller's account or fail with `NotAuthenticated`.
    pub fn require(&self) -> Result<&UserId> {
        match self {
            Caller::User(id) => Ok(id),
            Caller::Anonymous => Err(EngineError::NotAuthenticated),
        }
    }
}
