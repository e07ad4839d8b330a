//! Combat system module
//!
//! Turn-based, D&D-style encounter resolution:
//! - Dice rolling (e.g., "2d6+3") through a swappable roller
//! - Initiative and turn order
//! - Attack resolution with advantage, criticals and damage types
//! - Immunity, resistance, and vulnerability
//! - Conditions with timed durations and saving throws
//! - Monster behavior, special abilities and flight
//! - Immutable results for a display layer

mod abilities;
mod attack;
mod behavior;
mod conditions;
mod damage;
mod dice;
mod effects;
mod error;
mod initiative;
mod result;
mod system;

pub use abilities::{trigger as trigger_special_ability, AbilityEffect, AbilityTrigger, SaveRule, SpecialAbility};
pub use attack::{attack_roll_mode, resolve_attack, AttackOutcome, AttackProfile, AttackRules};
pub use behavior::{decide_action, EncounterView, MonsterAction, TargetCandidate};
pub use conditions::{Condition, ConditionRules};
pub use damage::{DamageModifier, DamageProfile, DamageResult, DamageType};
pub use dice::{parse_dice, D20Roll, DiceError, DiceRoll, DiceRoller, RandomDice, RollMode, ScriptedDice};
pub use effects::{CombatantEffects, EffectDuration, EffectExpiry, EffectManager, ExpiryReason, StatusEffect};
pub use error::CombatError;
pub use initiative::{roll_initiative, InitiativeEntry, TurnScheduler};
pub use result::{CombatResult, ResultKind};
pub use system::{CombatSystem, EncounterState, EndReason, PlayerAction};
