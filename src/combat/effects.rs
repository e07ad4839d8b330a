//! Status effects system
//!
//! Tracks timed conditions on every combatant in an encounter:
//! - Stacking instances of the same condition
//! - Turn-boundary duration bookkeeping and end-of-turn saves
//! - Rule queries (advantage, movement, auto-failed saves, crits)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::conditions::{Condition, ConditionRules};
use super::dice::DiceRoller;
use crate::combatant::{Ability, Combatant, CombatantId};

/// How long an effect lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDuration {
    /// Counts down at the end of each of the bearer's turns
    Rounds(u32),
    /// Ends at the end of the bearer's current (or next) turn
    UntilEndOfTurn,
    /// Ends when the bearer's next turn starts
    UntilStartOfNextTurn,
    /// The bearer repeats the save at the end of each turn; success ends it
    UntilSave { ability: Ability, dc: i32 },
    /// Only an encounter reset clears it
    Permanent,
    /// Lasts until explicitly removed
    Indefinite,
}

impl std::fmt::Display for EffectDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectDuration::Rounds(n) => write!(f, "{} round{}", n, if *n == 1 { "" } else { "s" }),
            EffectDuration::UntilEndOfTurn => write!(f, "until end of turn"),
            EffectDuration::UntilStartOfNextTurn => write!(f, "until start of next turn"),
            EffectDuration::UntilSave { ability, dc } => write!(f, "until DC {} {} save", dc, ability),
            EffectDuration::Permanent => write!(f, "permanent"),
            EffectDuration::Indefinite => write!(f, "indefinite"),
        }
    }
}

/// A status effect instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub condition: Condition,
    pub duration: EffectDuration,
    /// Who or what applied this effect
    pub source: Option<String>,
}

impl StatusEffect {
    /// Create a new status effect
    pub fn new(condition: Condition, duration: EffectDuration) -> Self {
        Self {
            condition,
            duration,
            source: None,
        }
    }

    /// Set the source of this effect
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

/// Why an effect ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// Its round counter ran out
    DurationElapsed,
    /// A turn boundary it was tied to passed
    TurnBoundary,
    /// The bearer succeeded on the save
    SavedAgainst,
}

/// An effect removed during turn processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectExpiry {
    pub combatant: CombatantId,
    pub condition: Condition,
    pub reason: ExpiryReason,
}

impl EffectExpiry {
    /// Human-readable line naming the combatant
    pub fn describe(&self, name: &str) -> String {
        match self.reason {
            ExpiryReason::SavedAgainst => {
                format!("{} shakes off being {}.", name, self.condition.to_string().to_lowercase())
            }
            _ => format!("{} is no longer {}.", name, self.condition.to_string().to_lowercase()),
        }
    }
}

/// Effects on a single combatant
#[derive(Debug, Clone, Default)]
pub struct CombatantEffects {
    effects: Vec<StatusEffect>,
}

impl CombatantEffects {
    /// Add an effect. Instances stack; nothing is replaced.
    pub fn add(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Remove every cancellable instance of a condition
    pub fn remove(&mut self, condition: Condition) -> usize {
        let before = self.effects.len();
        self.effects
            .retain(|e| e.condition != condition || e.duration == EffectDuration::Permanent);
        before - self.effects.len()
    }

    pub fn has(&self, condition: Condition) -> bool {
        self.effects.iter().any(|e| e.condition == condition)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn active_effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    /// True if any active condition has the given rule
    fn any_rule(&self, rule: impl Fn(&ConditionRules) -> bool) -> bool {
        self.effects.iter().any(|e| rule(e.condition.rules()))
    }

    /// Drop effects that end when the bearer's turn starts
    fn start_turn(&mut self, id: CombatantId) -> Vec<EffectExpiry> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.duration == EffectDuration::UntilStartOfNextTurn {
                expired.push(EffectExpiry {
                    combatant: id,
                    condition: e.condition,
                    reason: ExpiryReason::TurnBoundary,
                });
                false
            } else {
                true
            }
        });
        expired
    }

    /// Count down, expire end-of-turn effects, and roll repeat saves
    fn end_turn(&mut self, bearer: &dyn Combatant, dice: &mut dyn DiceRoller) -> Vec<EffectExpiry> {
        let id = bearer.id();
        let auto_fail = self.any_rule(|r| r.auto_fails_str_dex_saves);
        let mut expired = Vec::new();

        self.effects.retain_mut(|e| {
            let reason = match &mut e.duration {
                EffectDuration::UntilEndOfTurn => Some(ExpiryReason::TurnBoundary),
                EffectDuration::Rounds(n) => {
                    *n = n.saturating_sub(1);
                    (*n == 0).then_some(ExpiryReason::DurationElapsed)
                }
                EffectDuration::UntilSave { ability, dc } => {
                    let saved = if auto_fail && ability.is_physical() {
                        false
                    } else {
                        dice.check_against_dc(bearer.saving_throw_modifier(*ability), *dc)
                    };
                    saved.then_some(ExpiryReason::SavedAgainst)
                }
                _ => None,
            };

            match reason {
                Some(reason) => {
                    expired.push(EffectExpiry {
                        combatant: id,
                        condition: e.condition,
                        reason,
                    });
                    false
                }
                None => true,
            }
        });
        expired
    }
}

/// Status effects for every combatant in the current encounter
#[derive(Debug, Clone, Default)]
pub struct EffectManager {
    combatants: HashMap<CombatantId, CombatantEffects>,
}

impl EffectManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect to a combatant
    pub fn apply_effect(&mut self, target: CombatantId, effect: StatusEffect) {
        debug!("Applying {} ({}) to {}", effect.condition, effect.duration, target);
        self.combatants.entry(target).or_default().add(effect);
    }

    /// Cancel every non-permanent instance of a condition. Returns how many
    /// instances were removed.
    pub fn remove_effect(&mut self, target: CombatantId, condition: Condition) -> usize {
        let removed = self
            .combatants
            .get_mut(&target)
            .map_or(0, |effects| effects.remove(condition));
        if removed > 0 {
            debug!("Removed {} from {}", condition, target);
        }
        removed
    }

    /// Start-of-turn bookkeeping for one combatant
    pub fn process_turn_start(&mut self, combatant: CombatantId) -> Vec<EffectExpiry> {
        self.combatants
            .get_mut(&combatant)
            .map(|effects| effects.start_turn(combatant))
            .unwrap_or_default()
    }

    /// End-of-turn bookkeeping for one combatant; rolls any repeat saves
    pub fn process_turn_end(
        &mut self,
        combatant: &dyn Combatant,
        dice: &mut dyn DiceRoller,
    ) -> Vec<EffectExpiry> {
        let expired = self
            .combatants
            .get_mut(&combatant.id())
            .map(|effects| effects.end_turn(combatant, dice))
            .unwrap_or_default();
        for expiry in &expired {
            debug!("{} expired on {} ({:?})", expiry.condition, combatant.name(), expiry.reason);
        }
        expired
    }

    pub fn has_condition(&self, combatant: CombatantId, condition: Condition) -> bool {
        self.combatants
            .get(&combatant)
            .is_some_and(|e| e.has(condition))
    }

    pub fn has_any_effects(&self, combatant: CombatantId) -> bool {
        self.combatants
            .get(&combatant)
            .is_some_and(|e| !e.is_empty())
    }

    /// All active effects on a combatant
    pub fn effects_on(&self, combatant: CombatantId) -> &[StatusEffect] {
        self.combatants
            .get(&combatant)
            .map(|e| e.active_effects())
            .unwrap_or(&[])
    }

    fn any_rule(&self, combatant: CombatantId, rule: impl Fn(&ConditionRules) -> bool) -> bool {
        self.combatants
            .get(&combatant)
            .is_some_and(|e| e.any_rule(rule))
    }

    /// Attacks against this combatant roll with advantage
    pub fn attacks_have_advantage_against(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.grants_advantage_to_attackers)
    }

    /// Attacks against this combatant roll with disadvantage
    pub fn attacks_have_disadvantage_against(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.imposes_disadvantage_on_attackers)
    }

    pub fn has_advantage_on_attacks(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.advantage_on_attacks)
    }

    pub fn has_disadvantage_on_attacks(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.disadvantage_on_attacks)
    }

    pub fn can_move(&self, combatant: CombatantId) -> bool {
        !self.any_rule(combatant, |r| r.prevents_movement)
    }

    /// Not incapacitated
    pub fn can_act(&self, combatant: CombatantId) -> bool {
        !self.any_rule(combatant, |r| r.incapacitates)
    }

    pub fn auto_fails_str_dex_saves(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.auto_fails_str_dex_saves)
    }

    pub fn melee_crits_on_hit(&self, combatant: CombatantId) -> bool {
        self.any_rule(combatant, |r| r.melee_crits_on_hit)
    }

    /// Roll a saving throw for a combatant, honoring auto-failed STR/DEX saves
    pub fn saving_throw(
        &self,
        combatant: &dyn Combatant,
        ability: Ability,
        dc: i32,
        dice: &mut dyn DiceRoller,
    ) -> bool {
        if ability.is_physical() && self.auto_fails_str_dex_saves(combatant.id()) {
            return false;
        }
        dice.check_against_dc(combatant.saving_throw_modifier(ability), dc)
    }

    /// Summary of a combatant's conditions for display
    pub fn status_display(&self, combatant: &dyn Combatant) -> String {
        let effects = self.effects_on(combatant.id());
        if effects.is_empty() {
            return format!("{}: no active conditions", combatant.name());
        }
        let parts: Vec<String> = effects
            .iter()
            .map(|e| format!("{} ({})", e.condition, e.duration))
            .collect();
        format!("{}: {}", combatant.name(), parts.join(", "))
    }

    /// Clear effects for one combatant
    pub fn clear(&mut self, combatant: CombatantId) {
        self.combatants.remove(&combatant);
    }

    /// Forget everything (new encounter)
    pub fn reset(&mut self) {
        self.combatants.clear();
    }
}
