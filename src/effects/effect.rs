//! Effect definitions.
//!
//! An `Effect` is the structured form of one ability clause: what it does
//! (`EffectKind` + `value`), when it happens (`trigger`, `is_opt`), whether it
//! is a standing modifier (`continuous`), what it may touch (`condition`,
//! `target_location`, `target_count`) and any protection it grants.
//!
//! A card's whole ability is a `ParsedAbility`: its effects in source order.

use serde::{Deserialize, Serialize};

use crate::zones::{DeckPosition, Protection, Zone};

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Draw,
    Discard,
    Mill,
    Destroy,
    Damage,
    #[serde(rename = "gain_lp")]
    GainLp,
    ToHand,
    ToGraveyard,
    #[serde(rename = "modify_atk")]
    ModifyAtk,
    Summon,
    Search,
    Negate,
    Banish,
    ReturnToDeck,
    /// Grants protection flags only; has no action.
    Protection,
}

impl EffectKind {
    /// Snake-case label used in event metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectKind::Draw => "draw",
            EffectKind::Discard => "discard",
            EffectKind::Mill => "mill",
            EffectKind::Destroy => "destroy",
            EffectKind::Damage => "damage",
            EffectKind::GainLp => "gain_lp",
            EffectKind::ToHand => "to_hand",
            EffectKind::ToGraveyard => "to_graveyard",
            EffectKind::ModifyAtk => "modify_atk",
            EffectKind::Summon => "summon",
            EffectKind::Search => "search",
            EffectKind::Negate => "negate",
            EffectKind::Banish => "banish",
            EffectKind::ReturnToDeck => "return_to_deck",
            EffectKind::Protection => "protection",
        }
    }
}

/// When a triggered effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    OnSummon,
    OnFlip,
    OnBattleStart,
    OnBattleDestroy,
    OnDestroy,
    OnEnd,
}

impl Trigger {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Trigger::OnSummon => "on_summon",
            Trigger::OnFlip => "on_flip",
            Trigger::OnBattleStart => "on_battle_start",
            Trigger::OnBattleDestroy => "on_battle_destroy",
            Trigger::OnDestroy => "on_destroy",
            Trigger::OnEnd => "on_end",
        }
    }
}

/// Which monsters a continuous modifier reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierScope {
    /// Every matching monster on the field.
    #[default]
    Field,
    /// Only matching monsters controlled by the source's controller.
    Controller,
}

/// One structured ability clause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,

    /// Magnitude: cards, life points or ATK. Negative for ATK loss.
    pub value: i64,

    /// Timing; `None` means "on resolution".
    pub trigger: Option<Trigger>,

    /// Standing modifier evaluated on query, never applied once.
    pub continuous: bool,

    /// Once per turn per source card.
    pub is_opt: bool,

    /// Lowercase filter such as "dragon" or "fire".
    pub condition: Option<String>,

    pub protection: Protection,

    /// Zone a search, recursion or summon reads from.
    pub target_location: Option<Zone>,

    /// How many targets the effect takes.
    pub target_count: u32,

    /// The effect applies to its own source card ("This card gains ...").
    pub targets_self: bool,

    /// Hand/deck effects aimed at the opponent ("Your opponent discards ...").
    pub against_opponent: bool,

    /// ATK change expires at end of turn.
    pub until_end_of_turn: bool,

    /// For return-to-deck effects.
    pub deck_position: DeckPosition,

    pub scope: ModifierScope,

    /// The clause this effect was parsed from.
    pub text: String,
}

impl Effect {
    /// A bare effect of the given kind and value.
    #[must_use]
    pub fn new(kind: EffectKind, value: i64) -> Self {
        Self {
            kind,
            value,
            trigger: None,
            continuous: false,
            is_opt: false,
            condition: None,
            protection: Protection::none(),
            target_location: None,
            target_count: 1,
            targets_self: false,
            against_opponent: false,
            until_end_of_turn: false,
            deck_position: DeckPosition::Shuffle,
            scope: ModifierScope::Field,
            text: String::new(),
        }
    }

    // === Convenience constructors ===

    /// Draw `count` cards.
    #[must_use]
    pub fn draw(count: i64) -> Self {
        Self::new(EffectKind::Draw, count)
    }

    /// Deal `amount` damage to the opponent.
    #[must_use]
    pub fn damage(amount: i64) -> Self {
        Self::new(EffectKind::Damage, amount)
    }

    /// Gain `amount` life points.
    #[must_use]
    pub fn gain_lp(amount: i64) -> Self {
        Self::new(EffectKind::GainLp, amount)
    }

    /// Destroy `count` target cards.
    #[must_use]
    pub fn destroy(count: u32) -> Self {
        Self {
            target_count: count,
            ..Self::new(EffectKind::Destroy, 0)
        }
    }

    /// A protection-only effect.
    #[must_use]
    pub fn protection(protection: Protection) -> Self {
        Self {
            protection,
            continuous: true,
            ..Self::new(EffectKind::Protection, 0)
        }
    }

    // === Builders ===

    /// Attach a trigger.
    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Mark once-per-turn.
    #[must_use]
    pub fn once_per_turn(mut self) -> Self {
        self.is_opt = true;
        self
    }

    /// Mark as a standing modifier.
    #[must_use]
    pub fn continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    /// Set the condition filter.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Set the zone the effect reads from.
    #[must_use]
    pub fn at_location(mut self, zone: Zone) -> Self {
        self.target_location = Some(zone);
        self
    }

    /// Set the deck position for return-to-deck.
    #[must_use]
    pub fn with_deck_position(mut self, position: DeckPosition) -> Self {
        self.deck_position = position;
        self
    }

    /// Record the source clause.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Whether this effect does something when executed.
    ///
    /// Protection-only clauses and continuous modifiers are applied
    /// structurally, not executed.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.kind != EffectKind::Protection && !self.continuous
    }
}

/// All effects parsed from one ability text, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAbility {
    /// True iff two or more clauses were classified.
    pub has_multi_part: bool,
    pub effects: Vec<Effect>,
}

impl ParsedAbility {
    /// Union of every protection flag the ability grants.
    #[must_use]
    pub fn protection(&self) -> Protection {
        self.effects
            .iter()
            .fold(Protection::none(), |acc, e| acc.merge(e.protection))
    }

    /// Effects that fire on `trigger`, with their index in the ability.
    pub fn triggered(&self, trigger: Trigger) -> impl Iterator<Item = (usize, &Effect)> {
        self.effects
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.trigger == Some(trigger))
    }

    /// Effects that run when the card itself resolves (no trigger, not standing).
    pub fn on_resolution(&self) -> impl Iterator<Item = (usize, &Effect)> {
        self.effects
            .iter()
            .enumerate()
            .filter(|(_, e)| e.trigger.is_none() && e.is_executable())
    }

    /// Standing ATK modifiers.
    pub fn continuous_modifiers(&self) -> impl Iterator<Item = &Effect> {
        self.effects
            .iter()
            .filter(|e| e.continuous && e.kind == EffectKind::ModifyAtk)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
