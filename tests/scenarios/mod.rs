//! Scenario Tests for skirmish
//!
//! Whole-encounter play tests covering:
//! - Initiative: ordering, ties, re-rolls
//! - Attacks: hits, defeats, conditions feeding advantage
//! - Flight: player escapes and opportunity attacks, cowardly monsters
//! - Special abilities: disarm, adhesive, unknown abilities
//! - Victory: XP, defeat, state reset between encounters

pub mod attacks;
pub mod flight;
pub mod initiative;
pub mod special_abilities;
pub mod victory;
