//! Monsters
//!
//! A monster definition doubles as a template: [`Monster::spawn`] stamps out
//! a fresh instance for an encounter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Ability, AbilityScores, Combatant, CombatantId, HitPoints};
use crate::combat::{AttackProfile, AttackRules, DamageProfile, DamageType, DiceRoll};

/// How a monster picks its action and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// Always attacks the first living target
    #[default]
    Aggressive,
    /// Flees once bloodied
    Cowardly,
    /// Picks the weakest living target
    Tactical,
    /// Dodges when bloodied, otherwise retaliates against its last attacker
    Defensive,
}

impl FromStr for Behavior {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aggressive" => Ok(Behavior::Aggressive),
            "cowardly" => Ok(Behavior::Cowardly),
            "tactical" => Ok(Behavior::Tactical),
            "defensive" => Ok(Behavior::Defensive),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Behavior::Aggressive => "aggressive",
            Behavior::Cowardly => "cowardly",
            Behavior::Tactical => "tactical",
            Behavior::Defensive => "defensive",
        };
        write!(f, "{}", s)
    }
}

/// A hostile combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    id: CombatantId,
    pub name: String,
    pub armor_class: i32,
    hit_points: HitPoints,
    pub abilities: AbilityScores,
    /// Name of the natural attack ("bite", "claws")
    pub attack_name: String,
    /// Total to-hit bonus
    pub attack_bonus: i32,
    /// Damage dice; the modifier is the flat bonus
    pub damage: DiceRoll,
    pub damage_type: DamageType,
    pub behavior: Behavior,
    /// Free-form special ability name ("Disarm", "Adhesive")
    pub special_ability: Option<String>,
    /// Experience awarded when defeated
    pub experience: u32,
    pub damage_profile: DamageProfile,
}

impl Monster {
    /// A monster with a 1d4 bludgeoning "strike" and 10s in every ability
    pub fn new(name: &str, max_hp: i32, armor_class: i32) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.to_string(),
            armor_class,
            hit_points: HitPoints::new(max_hp),
            abilities: AbilityScores::default(),
            attack_name: "strike".to_string(),
            attack_bonus: 0,
            damage: DiceRoll::new(1, 4, 0),
            damage_type: DamageType::Bludgeoning,
            behavior: Behavior::default(),
            special_ability: None,
            experience: 0,
            damage_profile: DamageProfile::new(),
        }
    }

    pub fn with_attack(mut self, name: &str, bonus: i32, damage: DiceRoll, dtype: DamageType) -> Self {
        self.attack_name = name.to_string();
        self.attack_bonus = bonus;
        self.damage = damage;
        self.damage_type = dtype;
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_special_ability(mut self, ability: &str) -> Self {
        self.special_ability = Some(ability.to_string());
        self
    }

    pub fn with_experience(mut self, xp: u32) -> Self {
        self.experience = xp;
        self
    }

    pub fn with_damage_profile(mut self, profile: DamageProfile) -> Self {
        self.damage_profile = profile;
        self
    }

    /// Copy this template into a new instance with its own identifier and
    /// full hit points. Behavior, special ability and rewards carry over.
    pub fn spawn(&self) -> Monster {
        let mut instance = self.clone();
        instance.id = CombatantId::new();
        instance.hit_points.restore();
        instance
    }

    /// Give this instance a new identifier, keeping everything else
    pub(crate) fn renew_id(&mut self) {
        self.id = CombatantId::new();
    }
}

impl Combatant for Monster {
    fn id(&self) -> CombatantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn hit_points(&self) -> &HitPoints {
        &self.hit_points
    }

    fn hit_points_mut(&mut self) -> &mut HitPoints {
        &mut self.hit_points
    }

    fn armor_class(&self) -> i32 {
        self.armor_class
    }

    fn initiative_modifier(&self) -> i32 {
        self.abilities.modifier(Ability::Dexterity)
    }

    fn attack_profile(&self, rules: &AttackRules) -> AttackProfile {
        AttackProfile {
            label: self.attack_name.clone(),
            ability: None,
            to_hit: self.attack_bonus,
            damage: self.damage.without_modifier(),
            damage_bonus: self.damage.modifier,
            damage_type: self.damage_type,
            critical_threshold: rules.critical_threshold,
            melee: true,
        }
    }

    fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    fn damage_profile(&self) -> Option<&DamageProfile> {
        Some(&self.damage_profile)
    }
}
