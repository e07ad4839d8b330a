//! Damage types and modifiers
//!
//! Handles damage calculation with:
//! - Weapon and natural-attack damage types (slashing, fire, poison, ...)
//! - Immunity (0% damage)
//! - Resistance (50% damage)
//! - Vulnerability (200% damage)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Types of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
    Necrotic,
    Radiant,
    Psychic,
    Force,
    Thunder,
}

impl DamageType {
    /// Whether this is weapon damage
    pub fn is_physical(&self) -> bool {
        matches!(
            self,
            DamageType::Slashing | DamageType::Piercing | DamageType::Bludgeoning
        )
    }
}

impl FromStr for DamageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slashing" => Ok(DamageType::Slashing),
            "piercing" => Ok(DamageType::Piercing),
            "bludgeoning" => Ok(DamageType::Bludgeoning),
            "fire" => Ok(DamageType::Fire),
            "cold" | "ice" => Ok(DamageType::Cold),
            "lightning" | "electric" => Ok(DamageType::Lightning),
            "acid" => Ok(DamageType::Acid),
            "poison" => Ok(DamageType::Poison),
            "necrotic" => Ok(DamageType::Necrotic),
            "radiant" => Ok(DamageType::Radiant),
            "psychic" => Ok(DamageType::Psychic),
            "force" => Ok(DamageType::Force),
            "thunder" => Ok(DamageType::Thunder),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Acid => "acid",
            DamageType::Poison => "poison",
            DamageType::Necrotic => "necrotic",
            DamageType::Radiant => "radiant",
            DamageType::Psychic => "psychic",
            DamageType::Force => "force",
            DamageType::Thunder => "thunder",
        };
        write!(f, "{}", s)
    }
}

/// Modifier for damage resistance/immunity/vulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifier {
    /// Immune - takes 0% damage
    Immune,
    /// Resistant - takes 50% damage (rounded down)
    Resistant,
    /// Normal - takes 100% damage
    Normal,
    /// Vulnerable - takes 200% damage
    Vulnerable,
}

impl DamageModifier {
    /// Apply this modifier to damage amount
    pub fn apply(&self, damage: i32) -> i32 {
        match self {
            DamageModifier::Immune => 0,
            DamageModifier::Resistant => damage / 2,
            DamageModifier::Normal => damage,
            DamageModifier::Vulnerable => damage * 2,
        }
    }
}

/// Damage from one hit, before it reaches hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// Rolled damage (dice + flat bonuses)
    pub base_damage: i32,
    /// Damage after resistance/vulnerability
    pub final_damage: i32,
    /// Type of damage dealt
    pub damage_type: DamageType,
    /// Modifier applied
    pub modifier: DamageModifier,
    /// Whether the dice were doubled for a critical hit
    pub is_critical: bool,
}

/// Damage profile for a combatant (their resistances/immunities)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageProfile {
    modifiers: HashMap<DamageType, DamageModifier>,
}

impl DamageProfile {
    /// Create a new empty damage profile (all normal)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a damage modifier for a type
    pub fn set(&mut self, dtype: DamageType, modifier: DamageModifier) {
        if modifier == DamageModifier::Normal {
            self.modifiers.remove(&dtype);
        } else {
            self.modifiers.insert(dtype, modifier);
        }
    }

    /// Get the modifier for a damage type
    pub fn get(&self, dtype: DamageType) -> DamageModifier {
        self.modifiers
            .get(&dtype)
            .copied()
            .unwrap_or(DamageModifier::Normal)
    }

    /// Builder-style immunity
    pub fn with_immunity(mut self, dtype: DamageType) -> Self {
        self.set(dtype, DamageModifier::Immune);
        self
    }

    /// Builder-style resistance
    pub fn with_resistance(mut self, dtype: DamageType) -> Self {
        self.set(dtype, DamageModifier::Resistant);
        self
    }

    /// Builder-style vulnerability
    pub fn with_vulnerability(mut self, dtype: DamageType) -> Self {
        self.set(dtype, DamageModifier::Vulnerable);
        self
    }

    /// Calculate damage after applying modifiers. Negative totals become zero.
    pub fn calculate_damage(&self, base: i32, dtype: DamageType, is_crit: bool) -> DamageResult {
        let base = base.max(0);
        let modifier = self.get(dtype);
        DamageResult {
            base_damage: base,
            final_damage: modifier.apply(base),
            damage_type: dtype,
            modifier,
            is_critical: is_crit,
        }
    }
}
