//! Engine configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `SKIRMISH_*` environment variables (`__` separates nested keys, e.g.
//! `SKIRMISH_SPECIAL_ABILITIES__DISARM__DC=14`).

use std::collections::HashMap;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{AttackRules, DiceRoll, SaveRule, SpecialAbility};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SKIRMISH_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("critical threshold must be between 2 and 20, got {0}")]
    CriticalThreshold(u32),
}

/// Combat engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Natural d20 roll that always hits and crits
    pub critical_threshold: u32,
    /// Damage for unarmed strikes, in dice notation
    pub unarmed_damage: DiceRoll,
    /// Saving throws against monster special abilities, keyed by ability name
    pub special_abilities: HashMap<String, SaveRule>,
    /// Fixed RNG seed for reproducible encounters
    pub dice_seed: Option<u64>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        let rules = AttackRules::default();
        Self {
            critical_threshold: rules.critical_threshold,
            unarmed_damage: rules.unarmed_damage,
            special_abilities: SpecialAbility::ALL
                .iter()
                .map(|a| (a.key().to_string(), a.default_save()))
                .collect(),
            dice_seed: None,
        }
    }
}

impl CombatConfig {
    /// The provider stack without extracting it
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(CombatConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, then `path` if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    /// Extract and validate a configuration
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: CombatConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=20).contains(&self.critical_threshold) {
            return Err(ConfigError::CriticalThreshold(self.critical_threshold));
        }
        Ok(())
    }

    pub fn attack_rules(&self) -> AttackRules {
        AttackRules {
            critical_threshold: self.critical_threshold,
            unarmed_damage: self.unarmed_damage,
        }
    }

    /// Save against a special ability. Keys are lowercase ability names;
    /// other spellings are matched case-insensitively. An ability missing
    /// from the table uses its built-in save.
    pub fn save_rule(&self, ability: SpecialAbility) -> SaveRule {
        self.special_abilities
            .get(ability.key())
            .or_else(|| {
                self.special_abilities
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(ability.key()))
                    .map(|(_, rule)| rule)
            })
            .copied()
            .unwrap_or_else(|| ability.default_save())
    }
}
