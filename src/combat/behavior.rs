//! Monster decision making
//!
//! Pure functions: given a monster and a snapshot of the fight, pick what it
//! does this turn. The encounter carries the decision out.
//!
//! - Aggressive: attack the first living target
//! - Cowardly: flee once bloodied, otherwise attack like Aggressive
//! - Tactical: attack the living target with the fewest hit points
//! - Defensive: attack whoever last hurt it; once bloodied, dodge instead
//!   unless that target is bloodied too

use crate::combatant::{Behavior, Combatant, CombatantId, Monster};

/// A possible target as seen by a monster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCandidate {
    pub id: CombatantId,
    pub name: String,
    pub hp: i32,
    pub alive: bool,
    pub bloodied: bool,
}

impl TargetCandidate {
    pub fn from_combatant(combatant: &dyn Combatant) -> Self {
        Self {
            id: combatant.id(),
            name: combatant.name().to_string(),
            hp: combatant.hp(),
            alive: combatant.is_alive(),
            bloodied: combatant.is_bloodied(),
        }
    }
}

/// What the monster knows when it decides
#[derive(Debug, Clone, Default)]
pub struct EncounterView {
    /// Hostile combatants in roster order
    pub candidates: Vec<TargetCandidate>,
    /// Who most recently damaged this monster
    pub last_attacker: Option<CombatantId>,
    /// Whether the monster's conditions allow it to move
    pub can_move: bool,
}

/// A monster's chosen action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterAction {
    Attack { target: CombatantId },
    Flee,
    Dodge,
    /// No living target
    Wait,
}

/// Pick the monster's action for this turn
pub fn decide_action(monster: &Monster, view: &EncounterView) -> MonsterAction {
    let living = || view.candidates.iter().filter(|c| c.alive);

    let Some(first) = living().next() else {
        return MonsterAction::Wait;
    };

    match monster.behavior {
        Behavior::Aggressive => MonsterAction::Attack { target: first.id },
        Behavior::Cowardly => {
            if monster.is_bloodied() && view.can_move {
                MonsterAction::Flee
            } else {
                MonsterAction::Attack { target: first.id }
            }
        }
        Behavior::Tactical => {
            // min_by_key returns the first of equal minima
            let weakest = living().min_by_key(|c| c.hp).unwrap_or(first);
            MonsterAction::Attack { target: weakest.id }
        }
        Behavior::Defensive => {
            let target = view
                .last_attacker
                .and_then(|id| living().find(|c| c.id == id))
                .unwrap_or(first);
            if monster.is_bloodied() && !target.bloodied {
                MonsterAction::Dodge
            } else {
                MonsterAction::Attack { target: target.id }
            }
        }
    }
}
