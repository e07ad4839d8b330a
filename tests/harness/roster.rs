//! Stock combatants
//!
//! Numbers are chosen so scripted dice sequences are easy to reason about.

#![allow(dead_code)]

use skirmish::combat::{DamageType, DiceRoll};
use skirmish::combatant::{AbilityScores, Behavior};
use skirmish::items::Weapon;
use skirmish::{Monster, PlayerCharacter};

pub fn longsword() -> Weapon {
    Weapon::new("Longsword", DiceRoll::new(1, 8, 0), DamageType::Slashing)
}

/// Level 1 fighter: +5 to hit, 1d8+3 damage, AC 10, 12 HP, initiative +0,
/// STR save +3
pub fn fighter() -> PlayerCharacter {
    PlayerCharacter::new("Aric", 1, AbilityScores::new(16, 10, 14, 10, 10, 10), 12).with_weapon(longsword())
}

/// AC 13, 7 HP, +4 to hit for 1d6+2, worth 50 XP
pub fn goblin() -> Monster {
    Monster::new("Goblin", 7, 13)
        .with_attack("scimitar", 4, DiceRoll::new(1, 6, 2), DamageType::Slashing)
        .with_experience(50)
}

/// AC 12, 11 HP, +5 to hit for 1d4
pub fn bandit() -> Monster {
    Monster::new("Bandit", 11, 12).with_attack("dagger", 5, DiceRoll::new(1, 4, 0), DamageType::Piercing)
}

/// AC 12, 10 HP, runs once bloodied, worth 25 XP
pub fn kobold() -> Monster {
    Monster::new("Kobold", 10, 12)
        .with_attack("spear", 4, DiceRoll::new(1, 6, 2), DamageType::Piercing)
        .with_behavior(Behavior::Cowardly)
        .with_experience(25)
}

/// AC 1, 20 HP, hits for a single point; cannot kill a fresh fighter
pub fn training_dummy() -> Monster {
    Monster::new("Training Dummy", 20, 1)
        .with_attack("wobble", 0, DiceRoll::new(1, 1, 0), DamageType::Bludgeoning)
        .with_experience(25)
}

/// AC 13, 7 HP, +30 to hit for 1d4, disarms on a hit, worth 100 XP
pub fn goblin_boss() -> Monster {
    Monster::new("Goblin Boss", 7, 13)
        .with_attack("hooked spear", 30, DiceRoll::new(1, 4, 0), DamageType::Piercing)
        .with_special_ability("Disarm")
        .with_experience(100)
}
