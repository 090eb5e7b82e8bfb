//! Append-only event recorder for one match.
//!
//! The log stamps each `NewEvent` with the match ids, the current turn and a
//! monotonically increasing sequence number. Sequence order is insertion
//! order, and turn numbers never decrease, so the log is always ordered by
//! turn then insertion.
//!
//! Readers pull events by cursor: a cursor is the sequence number of the
//! next event the reader has not seen yet.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameId, LobbyId, Seats, UserId};

use super::event::{EventType, GameEvent, NewEvent};

/// A page of events returned to a subscriber.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    pub events: Vec<GameEvent>,

    /// Pass this back to receive only newer events.
    pub next_cursor: u64,
}

/// Aggregate counts over a match's events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub total: usize,
    pub by_type: BTreeMap<EventType, usize>,
    pub turns_played: u32,
}

/// The event stream of one match.
#[derive(Clone, Debug, PartialEq)]
pub struct EventLog {
    lobby_id: LobbyId,
    game_id: GameId,
    participants: Seats<UserId>,
    events: Vector<GameEvent>,
}

impl EventLog {
    /// An empty log for the given match.
    #[must_use]
    pub fn new(lobby_id: LobbyId, game_id: GameId, participants: Seats<UserId>) -> Self {
        Self {
            lobby_id,
            game_id,
            participants,
            events: Vector::new(),
        }
    }

    /// Append an event and return its sequence number.
    pub fn record(&mut self, turn_number: u32, event: NewEvent) -> u64 {
        let sequence = self.events.len() as u64;
        tracing::trace!(
            sequence,
            turn_number,
            event_type = %event.event_type,
            description = %event.description,
            "event recorded"
        );

        let player_id = event.seat.map(|seat| self.participants[seat].clone());
        self.events.push_back(GameEvent {
            lobby_id: self.lobby_id.clone(),
            game_id: self.game_id.clone(),
            turn_number,
            sequence,
            event_type: event.event_type,
            seat: event.seat,
            player_id,
            description: event.description,
            metadata: event.metadata,
        });
        sequence
    }

    // === Queries ===

    #[must_use]
    pub fn lobby_id(&self) -> &LobbyId {
        &self.lobby_id
    }

    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in order.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// All events, cloned.
    #[must_use]
    pub fn to_vec(&self) -> Vec<GameEvent> {
        self.events.iter().cloned().collect()
    }

    /// The last `limit` events, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<GameEvent> {
        let start = self.events.len().saturating_sub(limit);
        self.events.iter().skip(start).cloned().collect()
    }

    /// Events of one type.
    pub fn of_type(&self, event_type: EventType) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }

    /// Events recorded during `turn_number`.
    pub fn for_turn(&self, turn_number: u32) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.turn_number == turn_number)
    }

    /// Events at or after `cursor`, plus the cursor for the next call.
    #[must_use]
    pub fn subscribe(&self, cursor: u64) -> EventBatch {
        let start = usize::try_from(cursor).unwrap_or(usize::MAX).min(self.events.len());
        EventBatch {
            events: self.events.iter().skip(start).cloned().collect(),
            next_cursor: self.events.len() as u64,
        }
    }

    /// Counts by event type.
    #[must_use]
    pub fn stats(&self) -> EventStats {
        let mut by_type = BTreeMap::new();
        for event in &self.events {
            *by_type.entry(event.event_type).or_insert(0) += 1;
        }
        EventStats {
            total: self.events.len(),
            by_type,
            turns_played: self.events.back().map_or(0, |e| e.turn_number),
        }
    }
}
