//! Combat engine errors
//!
//! Engine operations never fail outward. Invalid requests come back as an
//! error-kind [`CombatResult`] and leave the encounter untouched.

use thiserror::Error;

use super::result::CombatResult;

/// Rejected combat requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("you are not in combat")]
    NotInCombat,

    #[error("there are no enemies to fight")]
    NoEnemies,

    #[error("there is no player in this encounter")]
    NoPlayer,

    #[error("it is {0}'s turn, not yours")]
    NotPlayerTurn(String),

    #[error("it is the player's turn")]
    PlayerTurn,

    #[error("unknown action '{0}' (try attack, dodge or flee)")]
    UnknownAction(String),

    #[error("no enemy called '{0}' is still fighting")]
    UnknownTarget(String),
}

impl From<CombatError> for CombatResult {
    fn from(err: CombatError) -> Self {
        CombatResult::error(err.to_string())
    }
}
