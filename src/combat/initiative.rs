//! Initiative and turn order
//!
//! Initiative is rolled once per encounter. The scheduler only walks the
//! fixed order; deciding who is eligible to act belongs to the encounter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dice::DiceRoller;
use crate::combatant::{Combatant, CombatantId};

/// One combatant's place in the initiative order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    pub combatant: CombatantId,
    pub name: String,
    /// Natural d20
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
    pub is_player: bool,
}

impl std::fmt::Display for InitiativeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({}{:+})", self.name, self.total, self.roll, self.modifier)
    }
}

/// Roll 1d20 + initiative modifier for each participant and order them
/// highest first. Ties keep the order participants were given in.
pub fn roll_initiative(participants: &[&dyn Combatant], dice: &mut dyn DiceRoller) -> Vec<InitiativeEntry> {
    let mut order: Vec<InitiativeEntry> = participants
        .iter()
        .map(|c| {
            let roll = dice.roll(20);
            let modifier = c.initiative_modifier();
            InitiativeEntry {
                combatant: c.id(),
                name: c.name().to_string(),
                roll,
                modifier,
                total: roll as i32 + modifier,
                is_player: c.is_player(),
            }
        })
        .collect();

    // sort_by is stable
    order.sort_by(|a, b| b.total.cmp(&a.total));
    debug!(
        "Initiative: {}",
        order.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
    );
    order
}

/// Cursor over a fixed initiative order
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    order: Vec<InitiativeEntry>,
    cursor: usize,
    round: u32,
}

impl TurnScheduler {
    /// Start at the top of the order in round 1
    pub fn new(order: Vec<InitiativeEntry>) -> Self {
        let round = if order.is_empty() { 0 } else { 1 };
        Self {
            order,
            cursor: 0,
            round,
        }
    }

    pub fn order(&self) -> &[InitiativeEntry] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Current round, 0 before any order exists
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Entry whose turn it is
    pub fn current(&self) -> Option<&InitiativeEntry> {
        self.order.get(self.cursor)
    }

    pub fn current_id(&self) -> Option<CombatantId> {
        self.current().map(|e| e.combatant)
    }

    /// Move to the next entry, wrapping to the top. Returns true when the
    /// wrap starts a new round.
    pub fn advance(&mut self) -> bool {
        if self.order.is_empty() {
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.cursor = 0;
            self.round += 1;
            debug!("Round {} begins", self.round);
            true
        } else {
            false
        }
    }

    /// Forget the order
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
