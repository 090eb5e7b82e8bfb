//! Ability text parser.
//!
//! Turns free-text card abilities into `Effect`s. Text is split into
//! sentences; each sentence is classified in a fixed order:
//!
//! 1. Protection phrases ("cannot be destroyed by battle", "cannot be targeted")
//! 2. Continuous field modifiers ("All Dragon-Type monsters gain 500 ATK")
//! 3. A leading timing qualifier before a colon ("When summoned:", "Once per turn:")
//! 4. The residual action verb (draw, destroy, deal damage, ...)
//!
//! Unrecognized sentences are dropped. Parsing never fails: text with no
//! mechanical content yields an empty ability.

use std::sync::LazyLock;

use regex::Regex;

use super::effect::{Effect, EffectKind, ModifierScope, ParsedAbility, Trigger};
use crate::zones::{DeckPosition, Protection, Zone};

static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").unwrap());
static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<qualifier>[^:]+):\s*(?P<body>.+)$").unwrap());

static PROTECT_BATTLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cannot be destroyed by battle").unwrap());
static PROTECT_EFFECTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"cannot be destroyed by (?:battle (?:or|and) )?(?:card |spell |trap )?effects").unwrap()
});
static PROTECT_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"cannot be targeted").unwrap());

static CONTINUOUS_ATK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^all (?:(?P<cond>[a-z][a-z ]*?)[- ]type )?monsters(?P<own> you control)? (?P<dir>gain|lose)s? (?P<n>\d+) atk",
    )
    .unwrap()
});

const COUNT: &str = r"(\d+|a|an|one|two|three|four|five)";

static DRAW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bdraws? {COUNT} cards?")).unwrap());
static DISCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bdiscards? {COUNT}(?: random)? cards?")).unwrap());
static MILL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:send the top {COUNT} cards? of (?P<whose>your opponent's|your) deck to the graveyard|mill {COUNT})"
    ))
    .unwrap()
});
static DESTROY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bdestroy\b(?: up to)?(?: {COUNT}\b)?")).unwrap());
static DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:deal|deals|inflict|inflicts) (\d+) (?:points of )?damage").unwrap()
});
static GAIN_LP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgains? (\d+) (?:lp|life points?)\b").unwrap());
static RETURN_TO_DECK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:shuffle|return|place)s?\b.*\b(?:into|to|on)\b.*\bdeck\b").unwrap()
});
static ADD_TO_HAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\badd(?: {COUNT})?\s*(?P<what>.*?)\s*from your (?P<loc>graveyard|deck) to your hand"
    ))
    .unwrap()
});
static RETURN_TO_HAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\breturns?(?: {COUNT})?(?: target)? (?:monsters?|cards?)\b.*\bto (?:its|their|the|your)(?: owner'?s'?)? hand"
    ))
    .unwrap()
});
static SPECIAL_SUMMON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\bspecial summon(?: {COUNT})?\s*(?P<what>.*?)(?:\s+from your (?P<loc>hand|graveyard|deck))?$"
    ))
    .unwrap()
});
static NEGATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bnegate\b").unwrap());
static BANISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\bbanish\b(?: {COUNT}\b)?")).unwrap());
static SEND_TO_GRAVEYARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\bsend(?: {COUNT})?\b.*\bto the graveyard")).unwrap()
});
static MODIFY_ATK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<dir>gain|lose)s? (?P<n>\d+) atk").unwrap());
static UNTIL_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"until (?:the )?end of (?:this |the )?turn").unwrap());

/// Parse a full ability into its effects.
///
/// ```
/// use rust_duel::effects::{parse_multi_part_ability, EffectKind};
///
/// let parsed = parse_multi_part_ability(
///     "Cannot be destroyed by battle. All Dragon-Type monsters gain 500 ATK.",
/// );
/// assert!(parsed.has_multi_part);
/// assert_eq!(parsed.effects.len(), 2);
/// assert_eq!(parsed.effects[1].kind, EffectKind::ModifyAtk);
/// assert!(parsed.effects[1].continuous);
/// ```
#[must_use]
pub fn parse_multi_part_ability(text: &str) -> ParsedAbility {
    let effects: Vec<Effect> = SENTENCE
        .split(text.trim())
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .filter_map(|sentence| {
            let parsed = parse_clause(sentence);
            if parsed.is_none() {
                tracing::debug!(clause = sentence, "unrecognized ability clause");
            }
            parsed
        })
        .collect();

    ParsedAbility {
        has_multi_part: effects.len() >= 2,
        effects,
    }
}

/// Parse an ability into a single effect.
///
/// Returns the first clause that does something, skipping protection-only
/// clauses; falls back to the first clause when nothing else parsed.
#[must_use]
pub fn parse_ability(text: &str) -> Option<Effect> {
    let mut effects = parse_multi_part_ability(text).effects;
    let index = effects
        .iter()
        .position(|e| e.kind != EffectKind::Protection)
        .unwrap_or(0);
    if effects.is_empty() {
        None
    } else {
        Some(effects.swap_remove(index))
    }
}

/// Classify one sentence.
fn parse_clause(sentence: &str) -> Option<Effect> {
    let lower = sentence.to_lowercase();

    if let Some(protection) = parse_protection(&lower) {
        return Some(Effect::protection(protection).with_text(sentence));
    }

    let (trigger, is_opt, body) = match QUALIFIER.captures(&lower) {
        Some(caps) => {
            let qualifier = caps["qualifier"].trim().to_string();
            let body = caps["body"].trim().to_string();
            let (trigger, is_opt) = parse_qualifier(&qualifier);
            (trigger, is_opt, body)
        }
        None => (None, false, lower.clone()),
    };

    let mut effect = parse_continuous(&body).or_else(|| parse_action(&body))?;
    effect.trigger = trigger;
    effect.is_opt = is_opt;
    Some(effect.with_text(sentence))
}

fn parse_protection(lower: &str) -> Option<Protection> {
    let protection = Protection {
        cannot_be_destroyed_by_battle: PROTECT_BATTLE.is_match(lower),
        cannot_be_destroyed_by_effects: PROTECT_EFFECTS.is_match(lower),
        cannot_be_targeted: PROTECT_TARGET.is_match(lower),
    };
    protection.any().then_some(protection)
}

fn parse_qualifier(qualifier: &str) -> (Option<Trigger>, bool) {
    let is_opt = qualifier.contains("once per turn");
    let trigger = if qualifier.contains("destroys a monster") {
        Some(Trigger::OnBattleDestroy)
    } else if qualifier.contains("is destroyed") {
        Some(Trigger::OnDestroy)
    } else if qualifier.contains("flip") {
        Some(Trigger::OnFlip)
    } else if qualifier.contains("summoned") {
        Some(Trigger::OnSummon)
    } else if qualifier.contains("end phase") {
        Some(Trigger::OnEnd)
    } else if qualifier.contains("battle phase") {
        Some(Trigger::OnBattleStart)
    } else {
        None
    };
    if trigger.is_none() && !is_opt {
        tracing::debug!(qualifier, "unknown timing qualifier");
    }
    (trigger, is_opt)
}

fn parse_continuous(body: &str) -> Option<Effect> {
    let caps = CONTINUOUS_ATK.captures(body)?;
    let amount: i64 = caps["n"].parse().ok()?;
    let value = if &caps["dir"] == "lose" { -amount } else { amount };

    let mut effect = Effect::new(EffectKind::ModifyAtk, value).continuous();
    effect.condition = caps.name("cond").map(|m| m.as_str().trim().to_string());
    if caps.name("own").is_some() {
        effect.scope = ModifierScope::Controller;
    }
    Some(effect)
}

fn parse_action(body: &str) -> Option<Effect> {
    let against_opponent = body.contains("your opponent") || body.contains("opponent's");

    if let Some(caps) = DRAW.captures(body) {
        return Some(Effect::draw(parse_count(&caps[1])?));
    }
    if let Some(caps) = DISCARD.captures(body) {
        let mut effect = Effect::new(EffectKind::Discard, parse_count(&caps[1])?);
        effect.against_opponent = against_opponent;
        return Some(effect);
    }
    if let Some(caps) = MILL.captures(body) {
        let count = caps.get(1).or_else(|| caps.get(3)).map(|m| m.as_str())?;
        let mut effect = Effect::new(EffectKind::Mill, parse_count(count)?);
        effect.against_opponent = caps.name("whose").is_some_and(|m| m.as_str() != "your");
        return Some(effect);
    }
    if let Some(caps) = DESTROY.captures(body) {
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        return Some(Effect::destroy(count as u32));
    }
    if let Some(caps) = DAMAGE.captures(body) {
        return Some(Effect::damage(caps[1].parse().ok()?));
    }
    if let Some(caps) = GAIN_LP.captures(body) {
        return Some(Effect::gain_lp(caps[1].parse().ok()?));
    }
    if RETURN_TO_DECK.is_match(body) {
        let position = if body.contains("top of") {
            DeckPosition::Top
        } else if body.contains("bottom of") {
            DeckPosition::Bottom
        } else {
            DeckPosition::Shuffle
        };
        return Some(
            Effect::new(EffectKind::ReturnToDeck, 1)
                .at_location(source_location(body).unwrap_or(Zone::Board))
                .with_deck_position(position),
        );
    }
    if let Some(caps) = ADD_TO_HAND.captures(body) {
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        let (kind, zone) = match &caps["loc"] {
            "deck" => (EffectKind::Search, Zone::Deck),
            _ => (EffectKind::ToHand, Zone::Graveyard),
        };
        let mut effect = Effect::new(kind, count).at_location(zone);
        effect.target_count = count as u32;
        effect.condition = condition_from(&caps["what"]);
        return Some(effect);
    }
    if let Some(caps) = RETURN_TO_HAND.captures(body) {
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        let mut effect = Effect::new(EffectKind::ToHand, count).at_location(Zone::Board);
        effect.target_count = count as u32;
        return Some(effect);
    }
    if let Some(caps) = SPECIAL_SUMMON.captures(body) {
        let what = caps["what"].trim();
        let zone = match caps.name("loc").map(|m| m.as_str()) {
            Some("graveyard") => Zone::Graveyard,
            Some("deck") => Zone::Deck,
            _ => Zone::Hand,
        };
        let mut effect = Effect::new(EffectKind::Summon, 1).at_location(zone);
        effect.targets_self = what == "this card";
        if !effect.targets_self {
            effect.condition = condition_from(what);
        }
        return Some(effect);
    }
    if NEGATE.is_match(body) {
        return Some(Effect::new(EffectKind::Negate, 1));
    }
    if let Some(caps) = BANISH.captures(body) {
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        let mut effect = Effect::new(EffectKind::Banish, count);
        effect.target_count = count as u32;
        effect.target_location = source_location(body);
        return Some(effect);
    }
    if let Some(caps) = SEND_TO_GRAVEYARD.captures(body) {
        let count = caps.get(1).map_or(Some(1), |m| parse_count(m.as_str()))?;
        let mut effect = Effect::new(EffectKind::ToGraveyard, count);
        effect.target_count = count as u32;
        return Some(effect);
    }
    if let Some(caps) = MODIFY_ATK.captures(body) {
        let amount: i64 = caps["n"].parse().ok()?;
        let value = if &caps["dir"] == "lose" { -amount } else { amount };
        let mut effect = Effect::new(EffectKind::ModifyAtk, value);
        effect.targets_self = body.contains("this card");
        effect.until_end_of_turn = UNTIL_END.is_match(body);
        return Some(effect);
    }
    None
}

/// "from your graveyard" / "from your hand" / "on the field".
fn source_location(body: &str) -> Option<Zone> {
    if body.contains("from your graveyard") || body.contains("in your graveyard") {
        Some(Zone::Graveyard)
    } else if body.contains("from your hand") || body.contains("in your hand") {
        Some(Zone::Hand)
    } else if body.contains("monster") || body.contains("on the field") {
        Some(Zone::Board)
    } else {
        None
    }
}

/// Reduce "dragon monster" / "fire-type cards" to "dragon" / "fire".
fn condition_from(what: &str) -> Option<String> {
    let words: Vec<&str> = what
        .split_whitespace()
        .filter(|w| !matches!(*w, "monster" | "monsters" | "card" | "cards" | "target" | "type"))
        .map(|w| w.trim_end_matches("-type"))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn parse_count(word: &str) -> Option<i64> {
    match word {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        digits => digits.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let parsed = parse_multi_part_ability("");
        assert!(parsed.effects.is_empty());
        assert!(!parsed.has_multi_part);
        assert!(parse_ability("   ").is_none());
    }

    #[test]
    fn test_flavor_text_is_ignored() {
        let parsed = parse_multi_part_ability("A fearsome beast from the northern wastes.");
        assert!(parsed.effects.is_empty());
    }

    #[test]
    fn test_count_words() {
        assert_eq!(parse_ability("Draw a card.").unwrap().value, 1);
        assert_eq!(parse_ability("Draw two cards.").unwrap().value, 2);
        assert_eq!(parse_ability("Draw 3 cards.").unwrap().value, 3);
    }

    #[test]
    fn test_gain_lp_not_confused_with_atk() {
        let lp = parse_ability("Gain 1000 LP.").unwrap();
        assert_eq!(lp.kind, EffectKind::GainLp);
        assert_eq!(lp.value, 1000);

        let atk = parse_ability("This card gains 300 ATK.").unwrap();
        assert_eq!(atk.kind, EffectKind::ModifyAtk);
        assert!(atk.targets_self);
        assert!(!atk.until_end_of_turn);
    }

    #[test]
    fn test_lose_atk_is_negative() {
        let effect = parse_ability("All Warrior-Type monsters lose 300 ATK.").unwrap();
        assert_eq!(effect.value, -300);
        assert!(effect.continuous);
        assert_eq!(effect.condition.as_deref(), Some("warrior"));
    }

    #[test]
    fn test_controller_scope() {
        let effect = parse_ability("All Fire-Type monsters you control gain 100 ATK.").unwrap();
        assert_eq!(effect.scope, ModifierScope::Controller);
    }

    #[test]
    fn test_destroy_counts() {
        assert_eq!(parse_ability("Destroy 1 target monster.").unwrap().target_count, 1);
        assert_eq!(parse_ability("Destroy 2 target monsters.").unwrap().target_count, 2);
        assert_eq!(parse_ability("Destroy target spell card.").unwrap().target_count, 1);
    }

    #[test]
    fn test_mill_and_discard() {
        let mill = parse_ability("Send the top 3 cards of your opponent's deck to the graveyard.").unwrap();
        assert_eq!(mill.kind, EffectKind::Mill);
        assert_eq!(mill.value, 3);
        assert!(mill.against_opponent);

        let own = parse_ability("Mill 2 cards.").unwrap();
        assert_eq!(own.kind, EffectKind::Mill);
        assert!(!own.against_opponent);

        let discard = parse_ability("Your opponent discards 1 random card.").unwrap();
        assert_eq!(discard.kind, EffectKind::Discard);
        assert!(discard.against_opponent);
    }

    #[test]
    fn test_search_and_recursion() {
        let search = parse_ability("Add 1 Fire monster from your deck to your hand.").unwrap();
        assert_eq!(search.kind, EffectKind::Search);
        assert_eq!(search.target_location, Some(Zone::Deck));
        assert_eq!(search.condition.as_deref(), Some("fire"));

        let recur = parse_ability("Add 1 card from your graveyard to your hand.").unwrap();
        assert_eq!(recur.kind, EffectKind::ToHand);
        assert_eq!(recur.condition, None);
    }

    #[test]
    fn test_return_effects() {
        let bounce = parse_ability("Return 1 target monster to its owner's hand.").unwrap();
        assert_eq!(bounce.kind, EffectKind::ToHand);
        assert_eq!(bounce.target_location, Some(Zone::Board));

        let spin = parse_ability("Shuffle 1 target monster into its owner's deck.").unwrap();
        assert_eq!(spin.kind, EffectKind::ReturnToDeck);
        assert_eq!(spin.deck_position, DeckPosition::Shuffle);

        let top = parse_ability("Place 1 card from your graveyard on top of your deck.").unwrap();
        assert_eq!(top.deck_position, DeckPosition::Top);
        assert_eq!(top.target_location, Some(Zone::Graveyard));
    }

    #[test]
    fn test_misc_actions() {
        let summon = parse_ability("Special Summon 1 Dragon monster from your graveyard.").unwrap();
        assert_eq!(summon.kind, EffectKind::Summon);
        assert_eq!(summon.target_location, Some(Zone::Graveyard));
        assert_eq!(summon.condition.as_deref(), Some("dragon"));

        assert_eq!(parse_ability("Negate the activation of a spell card.").unwrap().kind, EffectKind::Negate);
        assert_eq!(parse_ability("Banish 1 card from your opponent's graveyard.").unwrap().kind, EffectKind::Banish);
        assert_eq!(parse_ability("Send 1 target monster to the graveyard.").unwrap().kind, EffectKind::ToGraveyard);
    }

    #[test]
    fn test_qualifiers() {
        let flip = parse_ability("FLIP: Destroy 1 target monster.").unwrap();
        assert_eq!(flip.trigger, Some(Trigger::OnFlip));

        let on_destroy = parse_ability("When this card is destroyed: Draw 1 card.").unwrap();
        assert_eq!(on_destroy.trigger, Some(Trigger::OnDestroy));

        let opt_end = parse_ability("Once per turn, during the End Phase: Gain 200 LP.").unwrap();
        assert!(opt_end.is_opt);
        assert_eq!(opt_end.trigger, Some(Trigger::OnEnd));
    }

    #[test]
    fn test_source_text_is_kept() {
        let effect = parse_ability("Draw 2 cards.").unwrap();
        assert_eq!(effect.text, "Draw 2 cards");
    }
}
