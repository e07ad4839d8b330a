//! skirmish - turn-based combat engine
//!
//! Resolves encounters between one player character and a band of monsters
//! for a single-player text adventure. Everything is deterministic given the
//! dice, and every step is reported as a [`CombatResult`] for whatever layer
//! renders it.

pub mod combat;
pub mod combatant;
pub mod config;
pub mod items;

pub use combat::{CombatResult, CombatSystem, EncounterState, EndReason, PlayerAction, ResultKind};
pub use combatant::{Combatant, CombatantId, Monster, PlayerCharacter};
pub use config::{CombatConfig, ConfigError};
