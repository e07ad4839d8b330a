//! Attack resolution
//!
//! Rolls to hit and for damage for a single attack. The only side effect is
//! the defender's hit point loss; deciding whether anyone was defeated is the
//! encounter's job.

use tracing::debug;

use super::damage::{DamageProfile, DamageResult, DamageType};
use super::dice::{D20Roll, DiceRoll, DiceRoller, RollMode};
use super::effects::EffectManager;
use crate::combatant::{Ability, Combatant, CombatantId};

/// Encounter-wide attack constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRules {
    /// Natural roll that always hits and crits
    pub critical_threshold: u32,
    /// Damage dice for an unarmed strike without a better feature
    pub unarmed_damage: DiceRoll,
}

impl Default for AttackRules {
    fn default() -> Self {
        Self {
            critical_threshold: 20,
            unarmed_damage: DiceRoll::new(1, 4, 0),
        }
    }
}

/// Everything needed to roll one combatant's standard attack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackProfile {
    /// Weapon or natural attack name
    pub label: String,
    /// Ability the attack keys off (monsters bake it into `to_hit`)
    pub ability: Option<Ability>,
    /// Added to the d20
    pub to_hit: i32,
    /// Dice portion of damage (doubled on a critical)
    pub damage: DiceRoll,
    /// Flat damage (never doubled)
    pub damage_bonus: i32,
    pub damage_type: DamageType,
    /// Natural roll at or above which the attack crits
    pub critical_threshold: u32,
    pub melee: bool,
}

/// What happened when one attack was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub attacker: String,
    pub defender: String,
    pub weapon: String,
    pub roll: D20Roll,
    /// Natural roll plus to-hit bonus
    pub attack_total: i32,
    pub target_ac: i32,
    pub hit: bool,
    pub critical: bool,
    /// Present on a hit
    pub damage: Option<DamageResult>,
    /// Defender's hit points after the attack
    pub defender_hp: i32,
    pub defender_max_hp: i32,
}

impl AttackOutcome {
    /// Damage that landed, zero on a miss
    pub fn damage_dealt(&self) -> i32 {
        self.damage.map_or(0, |d| d.final_damage)
    }

    /// One-line narration of the attack
    pub fn describe(&self) -> String {
        let mode = match self.roll.mode {
            RollMode::Normal => String::new(),
            mode => format!(" with {}", mode),
        };
        let head = format!(
            "{} attacks {} with {}{}: {} (d20 {}) vs AC {}",
            self.attacker,
            self.defender,
            self.weapon,
            mode,
            self.attack_total,
            self.roll.natural,
            self.target_ac
        );

        match &self.damage {
            Some(damage) if self.critical => format!(
                "{} - CRITICAL HIT for {} {} damage! ({} HP: {}/{})",
                head, damage.final_damage, damage.damage_type, self.defender, self.defender_hp, self.defender_max_hp
            ),
            Some(damage) => format!(
                "{} - hit for {} {} damage. ({} HP: {}/{})",
                head, damage.final_damage, damage.damage_type, self.defender, self.defender_hp, self.defender_max_hp
            ),
            None => format!("{} - miss.", head),
        }
    }
}

/// Net roll mode for an attack from the conditions on both sides.
/// `defender_dodging` adds a disadvantage source.
pub fn attack_roll_mode(
    effects: &EffectManager,
    attacker: CombatantId,
    defender: CombatantId,
    defender_dodging: bool,
) -> RollMode {
    let advantage =
        effects.has_advantage_on_attacks(attacker) || effects.attacks_have_advantage_against(defender);
    let disadvantage = effects.has_disadvantage_on_attacks(attacker)
        || effects.attacks_have_disadvantage_against(defender)
        || defender_dodging;
    RollMode::from_sources(advantage, disadvantage)
}

/// Resolve one attack and apply its damage to the defender.
///
/// Hits when the total meets the defender's AC or the natural roll reaches
/// the attacker's critical threshold (always a critical). Melee hits against
/// a defender whose condition causes auto-crits are also critical. Criticals
/// double the dice, not the flat bonus.
pub fn resolve_attack(
    attacker: &dyn Combatant,
    defender: &mut dyn Combatant,
    rules: &AttackRules,
    effects: &EffectManager,
    mode: RollMode,
    dice: &mut dyn DiceRoller,
) -> AttackOutcome {
    let profile = attacker.attack_profile(rules);
    let roll = dice.roll_d20(mode);
    let attack_total = roll.natural as i32 + profile.to_hit;
    let target_ac = defender.armor_class();

    let threshold_hit = roll.natural >= profile.critical_threshold;
    let hit = threshold_hit || attack_total >= target_ac;
    let critical =
        threshold_hit || (hit && profile.melee && effects.melee_crits_on_hit(defender.id()));

    let damage = hit.then(|| {
        let rolled = profile.damage.roll_dice(dice, critical) + profile.damage_bonus;
        let normal = DamageProfile::new();
        let result = defender
            .damage_profile()
            .unwrap_or(&normal)
            .calculate_damage(rolled, profile.damage_type, critical);
        defender.take_damage(result.final_damage);
        result
    });

    debug!(
        "{} -> {}: d20={} total={} ac={} hit={} crit={} dmg={:?}",
        attacker.name(),
        defender.name(),
        roll.natural,
        attack_total,
        target_ac,
        hit,
        critical,
        damage.map(|d| d.final_damage)
    );

    AttackOutcome {
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        weapon: profile.label,
        roll,
        attack_total,
        target_ac,
        hit,
        critical,
        damage,
        defender_hp: defender.hp(),
        defender_max_hp: defender.max_hp(),
    }
}
