//! Conditions and their mechanical rules
//!
//! Each condition maps to one fixed row of [`ConditionRules`]. Queries on the
//! effect manager read this table instead of matching on conditions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of conditions a combatant can suffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

/// Mechanical facts attached to a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionRules {
    /// Attack rolls against the bearer have advantage
    pub grants_advantage_to_attackers: bool,
    /// Attack rolls against the bearer have disadvantage
    pub imposes_disadvantage_on_attackers: bool,
    /// The bearer's own attack rolls have advantage
    pub advantage_on_attacks: bool,
    /// The bearer's own attack rolls have disadvantage
    pub disadvantage_on_attacks: bool,
    /// The bearer cannot move (and so cannot flee)
    pub prevents_movement: bool,
    /// The bearer cannot take actions
    pub incapacitates: bool,
    /// The bearer automatically fails Strength and Dexterity saves
    pub auto_fails_str_dex_saves: bool,
    /// Melee hits against the bearer are critical hits
    pub melee_crits_on_hit: bool,
}

const NONE: ConditionRules = ConditionRules {
    grants_advantage_to_attackers: false,
    imposes_disadvantage_on_attackers: false,
    advantage_on_attacks: false,
    disadvantage_on_attacks: false,
    prevents_movement: false,
    incapacitates: false,
    auto_fails_str_dex_saves: false,
    melee_crits_on_hit: false,
};

/// Rows indexed by `Condition as usize`
static CONDITION_RULES: [ConditionRules; 14] = [
    // Blinded
    ConditionRules {
        grants_advantage_to_attackers: true,
        disadvantage_on_attacks: true,
        ..NONE
    },
    // Charmed
    NONE,
    // Deafened
    NONE,
    // Frightened
    ConditionRules {
        disadvantage_on_attacks: true,
        ..NONE
    },
    // Grappled
    ConditionRules {
        prevents_movement: true,
        ..NONE
    },
    // Incapacitated
    ConditionRules {
        incapacitates: true,
        ..NONE
    },
    // Invisible
    ConditionRules {
        imposes_disadvantage_on_attackers: true,
        advantage_on_attacks: true,
        ..NONE
    },
    // Paralyzed
    ConditionRules {
        grants_advantage_to_attackers: true,
        prevents_movement: true,
        incapacitates: true,
        auto_fails_str_dex_saves: true,
        melee_crits_on_hit: true,
        ..NONE
    },
    // Petrified
    ConditionRules {
        grants_advantage_to_attackers: true,
        prevents_movement: true,
        incapacitates: true,
        auto_fails_str_dex_saves: true,
        ..NONE
    },
    // Poisoned
    ConditionRules {
        disadvantage_on_attacks: true,
        ..NONE
    },
    // Prone
    ConditionRules {
        grants_advantage_to_attackers: true,
        disadvantage_on_attacks: true,
        ..NONE
    },
    // Restrained
    ConditionRules {
        grants_advantage_to_attackers: true,
        disadvantage_on_attacks: true,
        prevents_movement: true,
        ..NONE
    },
    // Stunned
    ConditionRules {
        grants_advantage_to_attackers: true,
        prevents_movement: true,
        incapacitates: true,
        auto_fails_str_dex_saves: true,
        ..NONE
    },
    // Unconscious
    ConditionRules {
        grants_advantage_to_attackers: true,
        prevents_movement: true,
        incapacitates: true,
        auto_fails_str_dex_saves: true,
        melee_crits_on_hit: true,
        ..NONE
    },
];

impl Condition {
    /// Every condition, in table order
    pub const ALL: [Condition; 14] = [
        Condition::Blinded,
        Condition::Charmed,
        Condition::Deafened,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Incapacitated,
        Condition::Invisible,
        Condition::Paralyzed,
        Condition::Petrified,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
    ];

    /// The fixed rule row for this condition
    pub fn rules(&self) -> &'static ConditionRules {
        &CONDITION_RULES[*self as usize]
    }
}

impl FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blinded" | "blind" => Ok(Condition::Blinded),
            "charmed" => Ok(Condition::Charmed),
            "deafened" | "deaf" => Ok(Condition::Deafened),
            "frightened" | "afraid" => Ok(Condition::Frightened),
            "grappled" => Ok(Condition::Grappled),
            "incapacitated" => Ok(Condition::Incapacitated),
            "invisible" | "invis" => Ok(Condition::Invisible),
            "paralyzed" | "paralysed" => Ok(Condition::Paralyzed),
            "petrified" => Ok(Condition::Petrified),
            "poisoned" | "poison" => Ok(Condition::Poisoned),
            "prone" => Ok(Condition::Prone),
            "restrained" => Ok(Condition::Restrained),
            "stunned" | "stun" => Ok(Condition::Stunned),
            "unconscious" => Ok(Condition::Unconscious),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Condition::Blinded => "Blinded",
            Condition::Charmed => "Charmed",
            Condition::Deafened => "Deafened",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Incapacitated => "Incapacitated",
            Condition::Invisible => "Invisible",
            Condition::Paralyzed => "Paralyzed",
            Condition::Petrified => "Petrified",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Restrained => "Restrained",
            Condition::Stunned => "Stunned",
            Condition::Unconscious => "Unconscious",
        };
        write!(f, "{}", s)
    }
}
