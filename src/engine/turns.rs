//! Turn structure: phase advance and the end-of-turn hand-off.

use crate::core::{Caller, CardRef, LobbyId, MatchStatus, Phase, Result, Seat, WinReason};
use crate::effects::executors::execute_draw;
use crate::effects::{fire_trigger, EffectOutcome, Trigger};
use crate::events::{EventType, NewEvent};
use crate::zones::{DeckPosition, Pile};

use super::game::{GameEngine, Turn, TurnLock};
use super::results::{EndTurnResult, PhaseResult};
use super::validator::{next_phase, require_no_chain};

/// Face-up monsters a seat controls, in board order.
fn face_up_monsters(turn: &Turn<'_>, seat: Seat) -> Vec<CardRef> {
    turn.state
        .slot(seat)
        .board
        .iter()
        .filter(|entry| !entry.is_face_down())
        .map(|entry| entry.card)
        .collect()
}

/// Fire `trigger` for each monster still face-up on `seat`'s board.
fn fire_for_board(turn: &mut Turn<'_>, seat: Seat, trigger: Trigger) -> Vec<EffectOutcome> {
    let mut outcomes = Vec::new();
    for card in face_up_monsters(turn, seat) {
        let still_face_up = turn
            .state
            .slot(seat)
            .board_card(card)
            .is_some_and(|entry| !entry.is_face_down());
        if !still_face_up {
            continue;
        }
        outcomes.extend(turn.with_effects(|state, ctx| fire_trigger(state, ctx, card, seat, trigger)));
    }
    outcomes
}

fn record_phase(turn: &mut Turn<'_>, seat: Seat, phase: Phase) {
    turn.record(
        NewEvent::new(EventType::PhaseChanged, format!("{phase} phase"))
            .with_seat(seat)
            .with_meta("phase", phase.as_str()),
    );
}

fn game_over(turn: &Turn<'_>) -> Option<(Seat, WinReason)> {
    match turn.state.status {
        MatchStatus::Finished { winner, reason } => Some((winner, reason)),
        MatchStatus::Active => None,
    }
}

/// Discard from the end of the hand down to the limit.
fn enforce_hand_limit(turn: &mut Turn<'_>, seat: Seat) -> Vec<CardRef> {
    let limit = turn.config.hand_limit;
    let mut discarded = Vec::new();
    while turn.state.slot(seat).hand.len() > limit {
        let Some(card) = turn.state.slot_mut(seat).hand.pop_back() else {
            break;
        };
        let rng = &mut turn.state.rng;
        turn.state.players[seat].push(Pile::Graveyard, card, DeckPosition::Top, rng);
        discarded.push(card);
    }
    if !discarded.is_empty() {
        let ids: Vec<u32> = discarded.iter().map(|c| c.raw()).collect();
        turn.record(
            NewEvent::new(
                EventType::HandLimitEnforced,
                format!("{seat} discarded {} card(s) to the hand limit", discarded.len()),
            )
            .with_seat(seat)
            .with_meta("limit", limit)
            .with_meta("cards", serde_json::json!(ids)),
        );
    }
    discarded
}

/// Reset per-turn flags on both sides.
fn reset_turn_flags(turn: &mut Turn<'_>) {
    for seat in Seat::BOTH {
        let slot = turn.state.slot_mut(seat);
        slot.normal_summoned_this_turn = false;
        for entry in slot.board.iter_mut() {
            entry.temp_attack = 0;
            entry.has_attacked = false;
            entry.position_changed_this_turn = false;
        }
    }
    turn.state.clear_turn_tracking();
}

impl GameEngine {
    /// Move to the next phase of the current turn.
    ///
    /// Entering the Battle Phase fires `on_battle_start` effects of the turn
    /// player's face-up monsters. The End Phase is left with `end_turn`.
    pub fn advance_phase(&mut self, caller: &Caller, lobby: &LobbyId) -> Result<PhaseResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "advance_phase", |turn| {
            require_no_chain(turn)?;
            let from = turn.state.phase;
            let to = next_phase(from)?;
            let seat = turn.seat;

            turn.state.phase = to;
            record_phase(turn, seat, to);

            let triggered = if to == Phase::Battle {
                fire_for_board(turn, seat, Trigger::OnBattleStart)
            } else {
                Vec::new()
            };
            Ok(PhaseResult { from, to, triggered })
        })
    }

    /// End the turn and run the next player's Draw Phase.
    ///
    /// In order: End Phase effects of both sides (turn player first), the
    /// hand limit, per-turn resets, the hand-off, then a one-card draw.
    /// Drawing from an empty deck loses the duel.
    pub fn end_turn(&mut self, caller: &Caller, lobby: &LobbyId) -> Result<EndTurnResult> {
        self.transact(caller, lobby, TurnLock::TurnPlayer, "end_turn", |turn| {
            require_no_chain(turn)?;
            let seat = turn.seat;
            let next = seat.other();

            if turn.state.phase != Phase::End {
                turn.state.phase = Phase::End;
                record_phase(turn, seat, Phase::End);
            }

            let mut end_phase_effects = fire_for_board(turn, seat, Trigger::OnEnd);
            end_phase_effects.extend(fire_for_board(turn, next, Trigger::OnEnd));
            if turn.settle_life_points() {
                return Ok(EndTurnResult {
                    next_player: next,
                    turn_number: turn.state.turn_number,
                    discarded: Vec::new(),
                    cards_drawn: 0,
                    end_phase_effects,
                    game_over: game_over(turn),
                });
            }

            let discarded = enforce_hand_limit(turn, seat);
            reset_turn_flags(turn);
            let ended = turn.state.turn_number;
            turn.record(
                NewEvent::new(EventType::TurnEnd, format!("Turn {ended} ends"))
                    .with_seat(seat)
                    .with_meta("turnNumber", ended),
            );

            turn.state.current_turn = next;
            turn.state.turn_number += 1;
            turn.state.phase = Phase::Draw;
            let started = turn.state.turn_number;
            turn.record(
                NewEvent::new(EventType::TurnStart, format!("Turn {started} begins"))
                    .with_seat(next)
                    .with_meta("turnNumber", started),
            );
            record_phase(turn, next, Phase::Draw);

            let mut cards_drawn = 0;
            if turn.state.slot(next).deck.is_empty() {
                tracing::info!(seat = %next, "deck out");
                turn.finish(seat, WinReason::DeckOut);
            } else {
                let before = turn.state.slot(next).hand.len();
                turn.with_effects(|state, ctx| execute_draw(state, ctx, next, 1));
                cards_drawn = turn.state.slot(next).hand.len() - before;
                turn.state.phase = Phase::Main1;
                record_phase(turn, next, Phase::Main1);
            }

            Ok(EndTurnResult {
                next_player: next,
                turn_number: started,
                discarded,
                cards_drawn,
                end_phase_effects,
                game_over: game_over(turn),
            })
        })
    }
}
