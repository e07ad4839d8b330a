//! Combatants
//!
//! Anything that can take part in an encounter implements [`Combatant`].
//! Player characters and monsters share no base type: each owns a
//! [`HitPoints`] value and exposes it through the trait.

mod monster;
mod player;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::{AttackProfile, AttackRules, DamageProfile};

pub use monster::{Behavior, Monster};
pub use player::{ClassFeatures, PlayerCharacter};

/// Unique identifier of one combatant instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(Uuid);

impl CombatantId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    #[serde(alias = "str")]
    Strength,
    #[serde(alias = "dex")]
    Dexterity,
    #[serde(alias = "con")]
    Constitution,
    #[serde(alias = "int")]
    Intelligence,
    #[serde(alias = "wis")]
    Wisdom,
    #[serde(alias = "cha")]
    Charisma,
}

impl Ability {
    /// Strength and Dexterity saves auto-fail under some conditions
    pub fn is_physical(&self) -> bool {
        matches!(self, Ability::Strength | Ability::Dexterity)
    }

    /// Three-letter abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Strength),
            "dex" | "dexterity" => Ok(Ability::Dexterity),
            "con" | "constitution" => Ok(Ability::Constitution),
            "int" | "intelligence" => Ok(Ability::Intelligence),
            "wis" | "wisdom" => Ok(Ability::Wisdom),
            "cha" | "charisma" => Ok(Ability::Charisma),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Raw ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl AbilityScores {
    /// Scores in STR, DEX, CON, INT, WIS, CHA order
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// floor((score - 10) / 2)
    pub fn modifier(&self, ability: Ability) -> i32 {
        (self.score(ability) - 10).div_euclid(2)
    }
}

/// Current, maximum and temporary hit points.
///
/// Invariant: `0 <= current <= max` and `temp >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    current: i32,
    max: i32,
    temp: i32,
}

impl HitPoints {
    /// Full hit points; `max` is raised to at least 1
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            temp: 0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn temp(&self) -> i32 {
        self.temp
    }

    /// Set current hit points, clamped to `[0, max]`
    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Apply damage: temporary hit points absorb first, then current hit
    /// points, floored at zero. Returns current hit points lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let absorbed = amount.min(self.temp);
        self.temp -= absorbed;

        let lost = (amount - absorbed).min(self.current);
        self.current -= lost;
        lost
    }

    /// Heal (cannot exceed max). Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    /// Temporary hit points don't stack; the larger pool wins
    pub fn grant_temp(&mut self, amount: i32) {
        self.temp = self.temp.max(amount);
    }

    /// Back to full, dropping temporary hit points
    pub fn restore(&mut self) {
        self.current = self.max;
        self.temp = 0;
    }
}

/// Capability shared by every participant in an encounter
pub trait Combatant {
    fn id(&self) -> CombatantId;

    fn name(&self) -> &str;

    fn hit_points(&self) -> &HitPoints;

    fn hit_points_mut(&mut self) -> &mut HitPoints;

    fn armor_class(&self) -> i32;

    fn initiative_modifier(&self) -> i32;

    /// Attack math for this combatant's standard attack
    fn attack_profile(&self, rules: &AttackRules) -> AttackProfile;

    fn saving_throw_modifier(&self, ability: Ability) -> i32;

    /// Resistances and immunities, if any
    fn damage_profile(&self) -> Option<&DamageProfile> {
        None
    }

    fn is_player(&self) -> bool {
        false
    }

    fn hp(&self) -> i32 {
        self.hit_points().current()
    }

    fn max_hp(&self) -> i32 {
        self.hit_points().max()
    }

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    fn is_unconscious(&self) -> bool {
        self.hp() <= 0
    }

    /// At or below half of maximum hit points
    fn is_bloodied(&self) -> bool {
        self.hp() * 2 <= self.max_hp()
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        self.hit_points_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: i32) -> i32 {
        self.hit_points_mut().heal(amount)
    }
}
