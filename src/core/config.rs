//! Rules configuration and turn phases.
//!
//! - `Phase`: the fixed turn structure (Draw → Standby → Main 1 → Battle → Main 2 → End)
//! - `TributeTier`: level band → tributes required for a Normal Summon or Set
//! - `RulesConfig`: every tunable constant of the duel, with builder methods
//!
//! `RulesConfig` is serde-deserializable so hosts can load it from JSON.

use serde::{Deserialize, Serialize};

/// Turn phases, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Draw,
    Standby,
    Main1,
    Battle,
    Main2,
    End,
}

impl Phase {
    /// The phase after this one, or `None` after the End Phase.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Standby),
            Phase::Standby => Some(Phase::Main1),
            Phase::Main1 => Some(Phase::Battle),
            Phase::Battle => Some(Phase::Main2),
            Phase::Main2 => Some(Phase::End),
            Phase::End => None,
        }
    }

    /// Main Phase 1 or 2.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    /// Snake-case label used in event metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Draw => "draw",
            Phase::Standby => "standby",
            Phase::Main1 => "main1",
            Phase::Battle => "battle",
            Phase::Main2 => "main2",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "Draw",
            Phase::Standby => "Standby",
            Phase::Main1 => "Main 1",
            Phase::Battle => "Battle",
            Phase::Main2 => "Main 2",
            Phase::End => "End",
        };
        write!(f, "{}", name)
    }
}

/// Tributes required for monsters up to `max_level` (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TributeTier {
    pub max_level: u32,
    pub tributes: usize,
}

/// Tunable rules constants.
///
/// ## Example
///
/// ```
/// use rust_duel::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_starting_life_points(4000)
///     .with_hand_limit(7);
///
/// assert_eq!(config.starting_life_points, 4000);
/// assert_eq!(config.tributes_for_level(7), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Life points each player starts with.
    pub starting_life_points: i64,

    /// Cards dealt to each hand at match creation.
    pub starting_hand_size: usize,

    /// Monster zone capacity per player.
    pub max_monster_zones: usize,

    /// Spell/Trap zone capacity per player.
    pub max_spell_trap_zones: usize,

    /// Maximum hand size at the end of a turn.
    pub hand_limit: usize,

    /// Level bands, ascending by `max_level`. Levels above the last band use its tribute count.
    pub tribute_tiers: Vec<TributeTier>,

    /// Whether the player taking turn 1 draws.
    pub first_player_draws: bool,

    /// How deep on-destroy triggers may cascade.
    pub max_trigger_depth: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_life_points: 8000,
            starting_hand_size: 5,
            max_monster_zones: 5,
            max_spell_trap_zones: 5,
            hand_limit: 6,
            tribute_tiers: vec![
                TributeTier { max_level: 4, tributes: 0 },
                TributeTier { max_level: 6, tributes: 1 },
                TributeTier { max_level: u32::MAX, tributes: 2 },
            ],
            first_player_draws: false,
            max_trigger_depth: 8,
        }
    }
}

impl RulesConfig {
    /// Tributes required to Normal Summon or Set a monster of `level`.
    #[must_use]
    pub fn tributes_for_level(&self, level: u32) -> usize {
        self.tribute_tiers
            .iter()
            .find(|tier| level <= tier.max_level)
            .or_else(|| self.tribute_tiers.last())
            .map_or(0, |tier| tier.tributes)
    }

    /// Set starting life points.
    #[must_use]
    pub fn with_starting_life_points(mut self, lp: i64) -> Self {
        self.starting_life_points = lp;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the monster zone capacity.
    #[must_use]
    pub fn with_max_monster_zones(mut self, max: usize) -> Self {
        self.max_monster_zones = max;
        self
    }

    /// Set the spell/trap zone capacity.
    #[must_use]
    pub fn with_max_spell_trap_zones(mut self, max: usize) -> Self {
        self.max_spell_trap_zones = max;
        self
    }

    /// Set the end-of-turn hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Replace the tribute table.
    #[must_use]
    pub fn with_tribute_tiers(mut self, tiers: Vec<TributeTier>) -> Self {
        self.tribute_tiers = tiers;
        self
    }

    /// Let the first player draw on turn 1.
    #[must_use]
    pub fn with_first_player_draw(mut self, draws: bool) -> Self {
        self.first_player_draws = draws;
        self
    }

    /// Set the on-destroy cascade limit.
    #[must_use]
    pub fn with_max_trigger_depth(mut self, depth: usize) -> Self {
        self.max_trigger_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        let mut phase = Phase::Draw;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(
            seen,
            vec![Phase::Draw, Phase::Standby, Phase::Main1, Phase::Battle, Phase::Main2, Phase::End]
        );
        assert!(Phase::Main2.is_main());
        assert!(!Phase::Battle.is_main());
    }

    #[test]
    fn test_tribute_tiers() {
        let config = RulesConfig::default();
        assert_eq!(config.tributes_for_level(1), 0);
        assert_eq!(config.tributes_for_level(4), 0);
        assert_eq!(config.tributes_for_level(5), 1);
        assert_eq!(config.tributes_for_level(6), 1);
        assert_eq!(config.tributes_for_level(7), 2);
        assert_eq!(config.tributes_for_level(12), 2);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::default()
            .with_max_monster_zones(3)
            .with_first_player_draw(true)
            .with_max_trigger_depth(2);

        assert_eq!(config.max_monster_zones, 3);
        assert!(config.first_player_draws);
        assert_eq!(config.max_trigger_depth, 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"hand_limit": 8}"#).unwrap();
        assert_eq!(config.hand_limit, 8);
        assert_eq!(config.starting_life_points, 8000);
    }
}
