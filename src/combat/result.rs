//! Combat results
//!
//! Every engine operation answers with a [`CombatResult`]: a kind tag, a
//! narrated message and whatever numbers the display layer may want. Results
//! are built inside the engine and read-only afterwards.

use serde::{Deserialize, Serialize};

use super::attack::AttackOutcome;
use super::initiative::InitiativeEntry;

/// What a result reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    CombatStart,
    TurnStart,
    AttackHit,
    AttackMiss,
    SpecialAbility,
    EnemyDefeated,
    PlayerDefeated,
    Victory,
    Fled,
    Info,
    Error,
}

impl ResultKind {
    /// Whether this result ended the encounter
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResultKind::PlayerDefeated | ResultKind::Victory | ResultKind::Fled)
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultKind::CombatStart => "combat_start",
            ResultKind::TurnStart => "turn_start",
            ResultKind::AttackHit => "attack_hit",
            ResultKind::AttackMiss => "attack_miss",
            ResultKind::SpecialAbility => "special_ability",
            ResultKind::EnemyDefeated => "enemy_defeated",
            ResultKind::PlayerDefeated => "player_defeated",
            ResultKind::Victory => "victory",
            ResultKind::Fled => "fled",
            ResultKind::Info => "info",
            ResultKind::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one engine operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    kind: ResultKind,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attacker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    defender: Option<String>,
    /// d20 plus to-hit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attack_roll: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_ac: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xp_gained: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    initiative: Option<Vec<InitiativeEntry>>,
    /// Turn-boundary narration that followed the action
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
}

impl CombatResult {
    pub(crate) fn new(kind: ResultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            attacker: None,
            defender: None,
            attack_roll: None,
            target_ac: None,
            damage: None,
            xp_gained: None,
            initiative: None,
            notes: Vec::new(),
        }
    }

    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Info, message)
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Error, message)
    }

    /// Hit or miss result carrying the attack's numbers
    pub(crate) fn from_attack(outcome: &AttackOutcome) -> Self {
        let kind = if outcome.hit {
            ResultKind::AttackHit
        } else {
            ResultKind::AttackMiss
        };
        let mut result = Self::new(kind, outcome.describe());
        result.attacker = Some(outcome.attacker.clone());
        result.defender = Some(outcome.defender.clone());
        result.attack_roll = Some(outcome.attack_total);
        result.target_ac = Some(outcome.target_ac);
        result.damage = outcome.damage.map(|d| d.final_damage);
        result
    }

    pub(crate) fn with_kind(mut self, kind: ResultKind) -> Self {
        self.kind = kind;
        self
    }

    /// Append a sentence to the message
    pub(crate) fn with_line(mut self, line: impl AsRef<str>) -> Self {
        let line = line.as_ref();
        if !line.is_empty() {
            if !self.message.is_empty() {
                self.message.push('\n');
            }
            self.message.push_str(line);
        }
        self
    }

    pub(crate) fn with_xp(mut self, xp: u32) -> Self {
        self.xp_gained = Some(xp);
        self
    }

    pub(crate) fn with_initiative(mut self, order: Vec<InitiativeEntry>) -> Self {
        self.initiative = Some(order);
        self
    }

    pub(crate) fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes.extend(notes);
        self
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attacker(&self) -> Option<&str> {
        self.attacker.as_deref()
    }

    pub fn defender(&self) -> Option<&str> {
        self.defender.as_deref()
    }

    pub fn attack_roll(&self) -> Option<i32> {
        self.attack_roll
    }

    pub fn target_ac(&self) -> Option<i32> {
        self.target_ac
    }

    pub fn damage(&self) -> Option<i32> {
        self.damage
    }

    pub fn xp_gained(&self) -> Option<u32> {
        self.xp_gained
    }

    /// Initiative order, present on combat start
    pub fn initiative(&self) -> Option<&[InitiativeEntry]> {
        self.initiative.as_deref()
    }

    /// Things that happened between this action and the next actor's turn
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResultKind::Error
    }

    pub fn ends_combat(&self) -> bool {
        self.kind.is_terminal()
    }
}

impl std::fmt::Display for CombatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n{}", note)?;
        }
        Ok(())
    }
}
