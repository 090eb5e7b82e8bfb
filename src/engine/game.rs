//! The game engine: the table of live matches and the transaction wrapper
//! every turn action runs inside.
//!
//! ## Transactions
//!
//! A turn action never touches a live `Match` directly. `GameEngine::transact`
//! authenticates the caller, loads the match, checks turn ownership, then
//! hands the action a `Turn`: a working copy of the state, event log and
//! chain. The copy is O(1) (`im` collections). If the action returns `Ok`,
//! win conditions are evaluated and the copy replaces the live match; if it
//! returns `Err`, the copy is dropped and nothing happened.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::{CardDefinition, CardId, CardRegistry};
use crate::chain::Chain;
use crate::core::{
    Caller, CardRef, EngineError, GameId, GameState, LobbyId, MatchStatus, Phase, Result, RulesConfig, Seat,
    Seats, UserId, WinReason,
};
use crate::effects::{effective_attack, EffectResolver, ExecContext};
use crate::events::{EventBatch, EventLog, EventStats, EventType, GameEvent, NewEvent};
use crate::zones::Zone;

use super::results::ArchivedMatch;

/// One live duel.
#[derive(Clone, Debug)]
pub struct Match {
    pub lobby_id: LobbyId,
    pub game_id: GameId,
    pub players: Seats<UserId>,
    pub state: GameState,
    pub events: EventLog,
    pub chain: Chain,
}

impl Match {
    /// Seat of a participant.
    #[must_use]
    pub fn seat_of(&self, user: &UserId) -> Option<Seat> {
        self.players.position(|p| p == user)
    }
}

/// Who may run an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnLock {
    /// Only the turn player.
    TurnPlayer,
    /// Either participant (responses, surrender).
    AnyParticipant,
}

/// Working copy handed to a turn action.
pub(crate) struct Turn<'a> {
    /// Seat of the caller.
    pub seat: Seat,
    pub state: GameState,
    pub events: EventLog,
    pub chain: Chain,
    pub registry: &'a CardRegistry,
    pub config: &'a RulesConfig,
}

impl<'a> Turn<'a> {
    /// Append an event stamped with the current turn.
    pub fn record(&mut self, event: NewEvent) {
        self.events.record(self.state.turn_number, event);
    }

    /// Run effect code against the working copy.
    pub fn with_effects<R>(&mut self, f: impl FnOnce(&mut GameState, &mut ExecContext<'_>) -> R) -> R {
        let resolver = EffectResolver::new();
        let mut ctx = ExecContext::new(self.registry, self.config, &mut self.events, &resolver);
        f(&mut self.state, &mut ctx)
    }

    /// Printed definition of a physical card.
    pub fn definition(&self, card: CardRef) -> Result<&'a CardDefinition> {
        let registry: &'a CardRegistry = self.registry;
        self.state
            .definition_of(card)
            .and_then(|id| registry.get(id))
            .ok_or(EngineError::CardNotFound(card))
    }

    /// Require `card` to be in the caller's `zone`.
    pub fn require_own(&self, card: CardRef, zone: Zone) -> Result<()> {
        if self.state.instance(card).is_none() {
            return Err(EngineError::CardNotFound(card));
        }
        if self.state.slot(self.seat).contains(zone, card) {
            Ok(())
        } else {
            Err(EngineError::CardNotInZone { card, zone })
        }
    }

    /// End the match.
    pub fn finish(&mut self, winner: Seat, reason: WinReason) {
        self.state.status = MatchStatus::Finished { winner, reason };
        self.chain.clear(&mut self.state);
        let reason_label = match reason {
            WinReason::LifePoints => "life_points",
            WinReason::DeckOut => "deck_out",
            WinReason::Surrender => "surrender",
        };
        self.record(
            NewEvent::new(EventType::GameEnd, format!("{winner} wins ({reason_label})"))
                .with_seat(winner)
                .with_meta("winner", winner.as_str())
                .with_meta("reason", reason_label),
        );
        tracing::info!(lobby = %self.events.lobby_id(), %winner, reason = reason_label, "match finished");
    }

    /// Finish the match if a player is at zero life points.
    ///
    /// Returns true if the match is over.
    pub fn settle_life_points(&mut self) -> bool {
        if !self.state.is_active() {
            return true;
        }
        let loser = [self.state.current_turn.other(), self.state.current_turn]
            .into_iter()
            .find(|seat| self.state.slot(*seat).life_points <= 0);
        match loser {
            Some(loser) => {
                self.finish(loser.other(), WinReason::LifePoints);
                true
            }
            None => false,
        }
    }
}

/// The engine: card data, rules and every live match.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardId, CardRegistry, CardType};
/// use rust_duel::core::{Caller, GameId, LobbyId, RulesConfig, UserId};
/// use rust_duel::engine::GameEngine;
/// use rust_duel::zones::Stance;
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardDefinition::new(CardId::new(1), "Inferno Drake", CardType::Creature)
///         .with_stats(1800, 1200)
///         .with_level(4)
///         .with_ability("When summoned: Deal 500 damage."),
/// );
///
/// let mut engine = GameEngine::new(registry, RulesConfig::default());
/// let lobby = LobbyId::new("lobby-1");
/// let deck = vec![CardId::new(1); 10];
/// engine
///     .create_match(lobby.clone(), GameId::new("g1"), UserId::new("alice"), UserId::new("bob"), &deck, &deck, 42)
///     .unwrap();
///
/// let alice = Caller::user("alice");
/// let drake = engine.state(&lobby).unwrap().slot(rust_duel::core::Seat::Host).hand[0];
/// let result = engine.normal_summon(&alice, &lobby, drake, &[], Stance::Attack).unwrap();
/// assert!(result.trigger_effect.unwrap().success);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    registry: CardRegistry,
    config: RulesConfig,
    matches: FxHashMap<LobbyId, Match>,
    closed: FxHashSet<LobbyId>,
}

impl GameEngine {
    /// Create an engine with no matches.
    #[must_use]
    pub fn new(registry: CardRegistry, config: RulesConfig) -> Self {
        Self {
            registry,
            config,
            matches: FxHashMap::default(),
            closed: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    // === Lifecycle ===

    /// Start a match for a lobby.
    ///
    /// Builds both decks, shuffles them, deals opening hands and gives
    /// turn 1 to the host, who starts in Main Phase 1 (drawing first only
    /// if `first_player_draws` is set).
    #[allow(clippy::too_many_arguments)]
    pub fn create_match(
        &mut self,
        lobby_id: LobbyId,
        game_id: GameId,
        host: UserId,
        opponent: UserId,
        host_deck: &[CardId],
        opponent_deck: &[CardId],
        seed: u64,
    ) -> Result<()> {
        if self.matches.contains_key(&lobby_id) || self.closed.contains(&lobby_id) {
            return Err(EngineError::illegal(format!("Lobby {lobby_id} already has a game")));
        }
        if host == opponent {
            return Err(EngineError::illegal("A player cannot duel themselves"));
        }
        if let Some(unknown) = host_deck
            .iter()
            .chain(opponent_deck)
            .find(|id| !self.registry.contains(**id))
        {
            return Err(EngineError::illegal(format!("Unknown card definition {unknown}")));
        }

        let players = Seats::new(host, opponent);
        let mut state = GameState::new(&self.config, seed);
        for (seat, deck) in [(Seat::Host, host_deck), (Seat::Opponent, opponent_deck)] {
            for &id in deck {
                state.add_card(seat, id);
            }
            state.shuffle_deck(seat);
        }
        let mut turn = Turn {
            seat: Seat::Host,
            state,
            events: EventLog::new(lobby_id.clone(), game_id.clone(), players.clone()),
            chain: Chain::new(),
            registry: &self.registry,
            config: &self.config,
        };
        turn.record(
            NewEvent::new(EventType::GameStart, "The duel begins")
                .with_meta("host", players[Seat::Host].as_str())
                .with_meta("opponent", players[Seat::Opponent].as_str())
                .with_meta("seed", seed),
        );
        let hand_size = self.config.starting_hand_size;
        for seat in Seat::BOTH {
            turn.with_effects(|state, ctx| crate::effects::executors::execute_draw(state, ctx, seat, hand_size));
        }
        turn.record(
            NewEvent::new(EventType::TurnStart, "Turn 1 begins")
                .with_seat(Seat::Host)
                .with_meta("turnNumber", 1),
        );
        if self.config.first_player_draws {
            turn.with_effects(|state, ctx| crate::effects::executors::execute_draw(state, ctx, Seat::Host, 1));
        }
        turn.state.phase = Phase::Main1;
        turn.record(
            NewEvent::new(EventType::PhaseChanged, "Main 1 phase")
                .with_seat(Seat::Host)
                .with_meta("phase", Phase::Main1.as_str()),
        );
        let Turn { state, events, .. } = turn;

        tracing::info!(lobby = %lobby_id, game = %game_id, seed, "match created");
        self.matches.insert(
            lobby_id.clone(),
            Match {
                lobby_id,
                game_id,
                players,
                state,
                events,
                chain: Chain::new(),
            },
        );
        Ok(())
    }

    /// Run `action` as one atomic unit of work.
    pub(crate) fn transact<T>(
        &mut self,
        caller: &Caller,
        lobby: &LobbyId,
        lock: TurnLock,
        action: &'static str,
        f: impl FnOnce(&mut Turn<'_>) -> Result<T>,
    ) -> Result<T> {
        let user = caller.require()?;
        let m = match self.matches.get_mut(lobby) {
            Some(m) => m,
            None if self.closed.contains(lobby) => return Err(EngineError::GameStateNotFound(lobby.clone())),
            None => return Err(EngineError::LobbyNotFound(lobby.clone())),
        };
        let seat = m.seat_of(user).ok_or(EngineError::NotAParticipant)?;
        m.state.ensure_active()?;
        if lock == TurnLock::TurnPlayer && m.state.current_turn != seat {
            return Err(EngineError::NotYourTurn);
        }

        let mut turn = Turn {
            seat,
            state: m.state.clone(),
            events: m.events.clone(),
            chain: m.chain.clone(),
            registry: &self.registry,
            config: &self.config,
        };
        match f(&mut turn) {
            Ok(value) => {
                turn.settle_life_points();
                debug_assert!(turn.state.audit_zones().is_ok(), "zone invariant broken by {action}");
                m.state = turn.state;
                m.events = turn.events;
                m.chain = turn.chain;
                tracing::info!(lobby = %lobby, %seat, action, "action committed");
                Ok(value)
            }
            Err(error) => {
                tracing::debug!(lobby = %lobby, %seat, action, %error, "action rejected");
                Err(error)
            }
        }
    }

    /// Concede the match.
    pub fn surrender(&mut self, caller: &Caller, lobby: &LobbyId) -> Result<()> {
        self.transact(caller, lobby, TurnLock::AnyParticipant, "surrender", |turn| {
            let winner = turn.seat.other();
            turn.finish(winner, WinReason::Surrender);
            Ok(())
        })
    }

    /// Remove a finished match from the live table and archive it.
    pub fn close_match(&mut self, lobby: &LobbyId) -> Result<ArchivedMatch> {
        let m = self.get_match(lobby)?;
        let MatchStatus::Finished { winner, reason } = m.state.status else {
            return Err(EngineError::illegal("The game is still in progress"));
        };
        let snapshot = m.state.to_snapshot()?;

        let Some(m) = self.matches.remove(lobby) else {
            return Err(EngineError::LobbyNotFound(lobby.clone()));
        };
        self.closed.insert(lobby.clone());
        tracing::info!(lobby = %lobby, %winner, "match archived");
        Ok(ArchivedMatch {
            lobby_id: m.lobby_id,
            game_id: m.game_id,
            players: m.players,
            winner,
            reason,
            turns: m.state.turn_number,
            snapshot,
            events: m.events.to_vec(),
        })
    }

    // === Queries ===

    /// A live match.
    pub fn get_match(&self, lobby: &LobbyId) -> Result<&Match> {
        match self.matches.get(lobby) {
            Some(m) => Ok(m),
            None if self.closed.contains(lobby) => Err(EngineError::GameStateNotFound(lobby.clone())),
            None => Err(EngineError::LobbyNotFound(lobby.clone())),
        }
    }

    /// Current state of a live match.
    pub fn state(&self, lobby: &LobbyId) -> Result<&GameState> {
        self.get_match(lobby).map(|m| &m.state)
    }

    /// Every event of a match, in order.
    pub fn get_game_events(&self, lobby: &LobbyId) -> Result<Vec<GameEvent>> {
        self.get_match(lobby).map(|m| m.events.to_vec())
    }

    /// The last `limit` events of a match.
    pub fn get_recent_events(&self, lobby: &LobbyId, limit: usize) -> Result<Vec<GameEvent>> {
        self.get_match(lobby).map(|m| m.events.recent(limit))
    }

    /// Events at or after `cursor`, plus the cursor for the next poll.
    pub fn subscribe_to_game_events(&self, lobby: &LobbyId, cursor: u64) -> Result<EventBatch> {
        self.get_match(lobby).map(|m| m.events.subscribe(cursor))
    }

    /// Event counts by type.
    pub fn get_game_event_stats(&self, lobby: &LobbyId) -> Result<EventStats> {
        self.get_match(lobby).map(|m| m.events.stats())
    }

    /// ATK of a monster on the field with every modifier applied.
    pub fn effective_attack(&self, lobby: &LobbyId, card: CardRef) -> Result<i64> {
        let state = self.state(lobby)?;
        if state.instance(card).is_none() {
            return Err(EngineError::CardNotFound(card));
        }
        effective_attack(state, &self.registry, card).ok_or(EngineError::CardNotInZone {
            card,
            zone: Zone::Board,
        })
    }
}
