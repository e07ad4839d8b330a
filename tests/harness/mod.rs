//! Integration Test Harness
//!
//! Shared fixtures for encounter tests:
//! - `TestArena` - a `CombatSystem` wired to scripted or seeded dice
//! - `roster` - stock player characters and monsters
//!
//! # Example
//!
//! ```rust,ignore
//! use harness::{roster, TestArena};
//!
//! #[test]
//! fn test_goblin_fight() {
//!     let mut arena = TestArena::scripted([15, 5, 15, 5]);
//!     arena.start(roster::fighter(), vec![roster::goblin()]);
//!     let result = arena.step();
//!     assert_eq!(result.kind(), ResultKind::Victory);
//! }
//! ```

mod arena;
pub mod roster;

pub use arena::TestArena;
