//! Monster special abilities
//!
//! A monster's special ability fires after each of its hits on the player.
//! The player gets one saving throw; failing it applies the ability's effect.
//! Names the engine does not know are ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::conditions::Condition;
use super::dice::DiceRoller;
use super::effects::{EffectDuration, EffectManager, StatusEffect};
use crate::combatant::{Ability, Combatant, PlayerCharacter};
use crate::items::Weapon;

/// Save a target makes against a special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRule {
    pub ability: Ability,
    pub dc: i32,
}

impl SaveRule {
    pub fn new(ability: Ability, dc: i32) -> Self {
        Self { ability, dc }
    }
}

impl std::fmt::Display for SaveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DC {} {}", self.dc, self.ability)
    }
}

/// Special abilities the engine resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialAbility {
    /// Knocks the player's weapon away
    Disarm,
    /// Sticks the player in place until they break free
    Adhesive,
    /// Poisons for two rounds
    Poison,
    /// Knocks the player prone until their next turn
    Knockdown,
}

impl SpecialAbility {
    pub const ALL: [SpecialAbility; 4] = [
        SpecialAbility::Disarm,
        SpecialAbility::Adhesive,
        SpecialAbility::Poison,
        SpecialAbility::Knockdown,
    ];

    /// Look up an ability by name, ignoring case. Unknown names give None.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "disarm" => Some(SpecialAbility::Disarm),
            "adhesive" => Some(SpecialAbility::Adhesive),
            "poison" => Some(SpecialAbility::Poison),
            "knockdown" => Some(SpecialAbility::Knockdown),
            _ => None,
        }
    }

    /// Canonical lowercase name, used as the configuration key
    pub fn key(&self) -> &'static str {
        match self {
            SpecialAbility::Disarm => "disarm",
            SpecialAbility::Adhesive => "adhesive",
            SpecialAbility::Poison => "poison",
            SpecialAbility::Knockdown => "knockdown",
        }
    }

    /// Save used when configuration does not name one
    pub fn default_save(&self) -> SaveRule {
        match self {
            SpecialAbility::Disarm => SaveRule::new(Ability::Strength, 12),
            SpecialAbility::Adhesive => SaveRule::new(Ability::Strength, 13),
            SpecialAbility::Poison => SaveRule::new(Ability::Constitution, 11),
            SpecialAbility::Knockdown => SaveRule::new(Ability::Strength, 12),
        }
    }
}

impl std::fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SpecialAbility::Disarm => "Disarm",
            SpecialAbility::Adhesive => "Adhesive",
            SpecialAbility::Poison => "Poison",
            SpecialAbility::Knockdown => "Knockdown",
        };
        write!(f, "{}", s)
    }
}

/// What a triggered ability did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityEffect {
    /// The player saved
    Resisted,
    /// The weapon was knocked away; the caller decides where it lands
    Disarmed(Weapon),
    /// Failed save against Disarm while unarmed
    NothingToDisarm,
    /// A condition was applied
    Afflicted(Condition, EffectDuration),
}

/// Record of one special-ability trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityTrigger {
    pub ability: SpecialAbility,
    pub save: SaveRule,
    pub effect: AbilityEffect,
}

impl AbilityTrigger {
    /// Narration naming the user, the ability and the target
    pub fn describe(&self, user: &str, target: &str) -> String {
        let head = format!("{} uses {}!", user, self.ability);
        match &self.effect {
            AbilityEffect::Resisted => format!("{} {} resists ({} save).", head, target, self.save),
            AbilityEffect::Disarmed(weapon) => format!(
                "{} {} fails a {} save and drops the {}!",
                head, target, self.save, weapon.name
            ),
            AbilityEffect::NothingToDisarm => {
                format!("{} {} fails a {} save, but has no weapon to lose.", head, target, self.save)
            }
            AbilityEffect::Afflicted(condition, duration) => format!(
                "{} {} fails a {} save and is {} ({}).",
                head,
                target,
                self.save,
                condition.to_string().to_lowercase(),
                duration
            ),
        }
    }
}

/// Resolve a special ability against the player.
///
/// A disarmed weapon comes out of the player's hands and is returned in the
/// trigger; the player's inventory is left alone.
pub fn trigger(
    ability: SpecialAbility,
    save: SaveRule,
    source: &str,
    player: &mut PlayerCharacter,
    effects: &mut EffectManager,
    dice: &mut dyn DiceRoller,
) -> AbilityTrigger {
    let saved = effects.saving_throw(player, save.ability, save.dc, dice);
    debug!("{} {} vs {}: saved={}", source, ability, player.name(), saved);

    let effect = if saved {
        AbilityEffect::Resisted
    } else {
        match ability {
            SpecialAbility::Disarm => match player.unequip_weapon() {
                Some(weapon) => AbilityEffect::Disarmed(weapon),
                None => AbilityEffect::NothingToDisarm,
            },
            SpecialAbility::Adhesive => afflict(
                player,
                effects,
                source,
                Condition::Restrained,
                EffectDuration::UntilSave {
                    ability: save.ability,
                    dc: save.dc,
                },
            ),
            SpecialAbility::Poison => {
                afflict(player, effects, source, Condition::Poisoned, EffectDuration::Rounds(2))
            }
            SpecialAbility::Knockdown => afflict(
                player,
                effects,
                source,
                Condition::Prone,
                EffectDuration::UntilStartOfNextTurn,
            ),
        }
    };

    AbilityTrigger {
        ability,
        save,
        effect,
    }
}

fn afflict(
    player: &PlayerCharacter,
    effects: &mut EffectManager,
    source: &str,
    condition: Condition,
    duration: EffectDuration,
) -> AbilityEffect {
    effects.apply_effect(player.id(), StatusEffect::new(condition, duration).with_source(source));
    AbilityEffect::Afflicted(condition, duration)
}
