//! Chain resolution tests.
//!
//! These tests verify the chain protocol:
//! - Links resolve newest-first
//! - Priority alternates and two passes close the chain
//! - A failed or negated link does not stop the rest

use rust_duel::cards::{CardDefinition, CardId, CardRegistry, CardType};
use rust_duel::chain::{Chain, ChainState, ResolutionStatus};
use rust_duel::core::{CardRef, EngineError, GameId, GameState, LobbyId, RulesConfig, Seat, Seats, UserId};
use rust_duel::effects::{Effect, EffectResolver, ExecContext};
use rust_duel::events::{EventLog, EventType};

struct Table {
    registry: CardRegistry,
    config: RulesConfig,
    events: EventLog,
    state: GameState,
    cards: Vec<CardRef>,
}

impl Table {
    fn new() -> Self {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Quick Spark", CardType::Spell));
        let config = RulesConfig::default();
        let mut state = GameState::new(&config, 3);
        let cards = (0..4)
            .map(|i| state.add_card(if i % 2 == 0 { Seat::Host } else { Seat::Opponent }, CardId::new(1)))
            .collect();
        Self {
            registry,
            config,
            events: EventLog::new(
                LobbyId::new("lobby"),
                GameId::new("game"),
                Seats::new(UserId::new("host"), UserId::new("guest")),
            ),
            state,
            cards,
        }
    }

    fn resolve(&mut self, chain: &mut Chain) -> rust_duel::core::Result<Vec<rust_duel::chain::LinkResolution>> {
        let resolver = EffectResolver::new();
        let mut ctx = ExecContext::new(&self.registry, &self.config, &mut self.events, &resolver);
        chain.resolve(&mut self.state, &mut ctx)
    }

    fn lp_changes(&self) -> Vec<i64> {
        self.events
            .of_type(EventType::LpChanged)
            .filter_map(|e| e.metadata["change"].as_i64())
            .collect()
    }
}

/// Build A (host), B (opponent), C (host) and close the chain.
fn three_link_chain(table: &Table, b: Effect) -> Chain {
    let mut chain = Chain::new();
    chain.add_link(table.cards[0], Seat::Host, Effect::damage(100), &[]).unwrap();
    chain.add_link(table.cards[1], Seat::Opponent, b, &[]).unwrap();
    chain.add_link(table.cards[2], Seat::Host, Effect::gain_lp(300), &[]).unwrap();

    assert_eq!(
        chain.pass_priority(Seat::Opponent).unwrap(),
        ResolutionStatus::WaitingForPriority(Seat::Host)
    );
    assert_eq!(chain.pass_priority(Seat::Host).unwrap(), ResolutionStatus::ReadyToResolve);
    chain
}

// ============================================================================
// Ordering
// ============================================================================

/// Test that links A, B, C resolve as C, B, A.
#[test]
fn test_chain_resolves_lifo() {
    let mut table = Table::new();
    let mut chain = three_link_chain(&table, Effect::damage(200));

    let resolutions = table.resolve(&mut chain).unwrap();

    let order: Vec<usize> = resolutions.iter().map(|r| r.number).collect();
    assert_eq!(order, vec![3, 2, 1]);
    assert_eq!(table.lp_changes(), vec![300, -200, -100]);
    assert_eq!(table.state.slot(Seat::Host).life_points, 8100);
    assert_eq!(table.state.slot(Seat::Opponent).life_points, 7900);

    assert!(chain.is_empty());
    assert_eq!(chain.state(), ChainState::Idle);
    let resolved: Vec<_> = table.events.of_type(EventType::ChainResolved).collect();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].metadata["order"], serde_json::json!([3, 2, 1]));
}

/// Test that a failing link is reported and the chain keeps going.
#[test]
fn test_failed_link_does_not_abort() {
    let mut table = Table::new();
    let mut chain = three_link_chain(&table, Effect::destroy(1));

    let resolutions = table.resolve(&mut chain).unwrap();

    assert_eq!(resolutions.len(), 3);
    assert!(resolutions[0].outcome.success);
    assert!(!resolutions[1].outcome.success);
    assert_eq!(resolutions[1].outcome.message, "No target selected");
    assert!(resolutions[2].outcome.success);
    assert_eq!(table.lp_changes(), vec![300, -100]);

    let resolved: Vec<_> = table.events.of_type(EventType::ChainResolved).collect();
    assert_eq!(resolved[0].metadata["failed"], 1);
}

/// Test that a negated link resolves as a failure without running.
#[test]
fn test_negated_link_is_skipped() {
    let mut table = Table::new();
    let mut chain = three_link_chain(&table, Effect::damage(200));
    table.state.negated.insert(table.cards[0]);

    let resolutions = table.resolve(&mut chain).unwrap();

    let last = &resolutions[2];
    assert_eq!(last.card, table.cards[0]);
    assert!(!last.outcome.success);
    assert_eq!(last.outcome.message, "Quick Spark's effect was negated");
    assert_eq!(table.state.slot(Seat::Opponent).life_points, 8000);
}

// ============================================================================
// Priority protocol
// ============================================================================

/// Test that only the awaiting seat may respond.
#[test]
fn test_priority_alternates() {
    let table = Table::new();
    let mut chain = Chain::new();
    chain.add_link(table.cards[0], Seat::Host, Effect::damage(100), &[]).unwrap();

    assert_eq!(chain.priority_player(), Some(Seat::Opponent));
    let err = chain.add_link(table.cards[2], Seat::Host, Effect::damage(100), &[]);
    assert!(matches!(err, Err(EngineError::Chain(_))));
    assert!(matches!(chain.pass_priority(Seat::Host), Err(EngineError::Chain(_))));
    assert_eq!(chain.len(), 1);
}

/// Test that a new link resets the pass count.
#[test]
fn test_response_resets_passes() {
    let table = Table::new();
    let mut chain = Chain::new();
    chain.add_link(table.cards[0], Seat::Host, Effect::damage(100), &[]).unwrap();
    chain.pass_priority(Seat::Opponent).unwrap();
    chain.add_link(table.cards[2], Seat::Host, Effect::damage(100), &[]).unwrap();

    assert_eq!(
        chain.state(),
        ChainState::PriorityWindow {
            awaiting: Seat::Opponent,
            passes: 0
        }
    );
    assert_eq!(
        chain.pass_priority(Seat::Opponent).unwrap(),
        ResolutionStatus::WaitingForPriority(Seat::Host)
    );
}

/// Test that an open chain cannot be resolved early, and a resolving chain
/// takes no new links.
#[test]
fn test_resolve_requires_both_passes() {
    let mut table = Table::new();
    let mut chain = Chain::new();
    chain.add_link(table.cards[0], Seat::Host, Effect::damage(100), &[]).unwrap();

    assert!(table.resolve(&mut chain).is_err());
    assert_eq!(table.state.slot(Seat::Opponent).life_points, 8000);

    chain.pass_priority(Seat::Opponent).unwrap();
    chain.pass_priority(Seat::Host).unwrap();
    assert_eq!(chain.state(), ChainState::Resolving);
    assert!(chain.add_link(table.cards[1], Seat::Opponent, Effect::damage(100), &[]).is_err());
}

/// Test passing with no chain.
#[test]
fn test_pass_without_chain() {
    let mut chain = Chain::new();
    let err = chain.pass_priority(Seat::Host).unwrap_err();
    assert_eq!(err.to_string(), "Chain error: there is no chain to respond to");
}
