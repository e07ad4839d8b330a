//! Dice rolling system
//!
//! Every random number the engine consumes flows through a [`DiceRoller`], so
//! an encounter is fully determined by the sequence of die results. Parses
//! dice notation like "2d6+3", "1d20", "4d6-2".

use std::collections::VecDeque;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most dice a single roll may name
pub const MAX_DICE: u32 = 100;

/// Most sides a single die may have
pub const MAX_SIDES: u32 = 1000;

/// Errors from parsing dice notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("missing 'd' in dice notation: {0}")]
    MissingSeparator(String),

    #[error("invalid dice count: {0}")]
    InvalidCount(String),

    #[error("invalid die sides: {0}")]
    InvalidSides(String),

    #[error("invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("too many dice: {0} (at most {max})", max = MAX_DICE)]
    TooManyDice(u32),

    #[error("too many sides: {0} (at most {max})", max = MAX_SIDES)]
    TooManySides(u32),
}

/// Source of die results
pub trait DiceRoller {
    /// Roll a single die with the given number of sides (1..=sides)
    fn roll(&mut self, sides: u32) -> u32;

    /// Roll a single die and add a modifier
    fn roll_with_modifier(&mut self, sides: u32, modifier: i32) -> i32 {
        self.roll(sides) as i32 + modifier
    }

    /// Roll 1d20 + modifier against a difficulty class (meets or beats)
    fn check_against_dc(&mut self, modifier: i32, dc: i32) -> bool {
        self.roll_with_modifier(20, modifier) >= dc
    }

    /// Roll a d20, twice when advantage or disadvantage applies
    fn roll_d20(&mut self, mode: RollMode) -> D20Roll {
        let first = self.roll(20);
        match mode {
            RollMode::Normal => D20Roll {
                natural: first,
                discarded: None,
                mode,
            },
            RollMode::Advantage | RollMode::Disadvantage => {
                let second = self.roll(20);
                let (kept, dropped) = match mode {
                    RollMode::Advantage => (first.max(second), first.min(second)),
                    _ => (first.min(second), first.max(second)),
                };
                D20Roll {
                    natural: kept,
                    discarded: Some(dropped),
                    mode,
                }
            }
        }
    }
}

/// Whether a d20 is rolled straight, with advantage, or with disadvantage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollMode {
    /// Net roll mode from the presence of advantage and disadvantage sources.
    /// Any advantage and any disadvantage cancel out.
    pub fn from_sources(advantage: bool, disadvantage: bool) -> Self {
        match (advantage, disadvantage) {
            (true, false) => RollMode::Advantage,
            (false, true) => RollMode::Disadvantage,
            _ => RollMode::Normal,
        }
    }
}

impl std::fmt::Display for RollMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RollMode::Normal => "normal",
            RollMode::Advantage => "advantage",
            RollMode::Disadvantage => "disadvantage",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a d20 roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D20Roll {
    /// The die that counts
    pub natural: u32,
    /// The other die when rolling with advantage/disadvantage
    pub discarded: Option<u32>,
    /// Mode the roll was made with
    pub mode: RollMode,
}

/// Uniform random dice backed by a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// Create dice seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create reproducible dice from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRoller for RandomDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// Deterministic dice that replay a queue of results.
///
/// Each queued value is clamped to the size of the die being rolled. Once the
/// queue is exhausted every roll returns the fallback value (also clamped).
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    queue: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDice {
    /// Create scripted dice; the fallback defaults to 10
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: 10,
        }
    }

    /// Dice that always roll the same value
    pub fn constant(value: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: value,
        }
    }

    /// Set the value returned once the queue runs dry
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Queue more results
    pub fn push(&mut self, roll: u32) {
        self.queue.push_back(roll);
    }

    /// Number of queued results not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        let value = self.queue.pop_front().unwrap_or(self.fallback);
        value.clamp(1, sides.max(1))
    }
}

/// A parsed dice roll specification.
///
/// Serializes as dice notation ("2d6+3").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
    /// Modifier to add/subtract
    pub modifier: i32,
}

impl DiceRoll {
    /// Create a new dice roll
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll the dice and return the total
    pub fn roll(&self, dice: &mut dyn DiceRoller) -> i32 {
        self.roll_dice(dice, false) + self.modifier
    }

    /// Roll only the dice portion, doubling the number of dice on a critical
    pub fn roll_dice(&self, dice: &mut dyn DiceRoller, critical: bool) -> i32 {
        let count = if critical { self.count.saturating_mul(2) } else { self.count };
        (0..count).fold(0i32, |total, _| total.saturating_add(dice.roll(self.sides) as i32))
    }

    /// Roll and return individual die results plus total
    pub fn roll_detailed(&self, dice: &mut dyn DiceRoller) -> (Vec<u32>, i32) {
        let results: Vec<u32> = (0..self.count).map(|_| dice.roll(self.sides)).collect();
        let sum = results.iter().fold(0i32, |total, &r| total.saturating_add(r as i32));
        (results, sum.saturating_add(self.modifier))
    }

    /// The same dice without the flat modifier
    pub fn without_modifier(&self) -> Self {
        Self {
            modifier: 0,
            ..*self
        }
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX).saturating_add(self.modifier)
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i32 {
        let top = u64::from(self.count) * u64::from(self.sides);
        i32::try_from(top).unwrap_or(i32::MAX).saturating_add(self.modifier)
    }

    /// Get the expected average (rounded down)
    pub fn average(&self) -> i32 {
        let avg_per_die = (1.0 + self.sides as f64) / 2.0;
        (self.count as f64 * avg_per_die + self.modifier as f64) as i32
    }
}

impl FromStr for DiceRoll {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl TryFrom<String> for DiceRoll {
    type Error = DiceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_dice(&s)
    }
}

impl From<DiceRoll> for String {
    fn from(roll: DiceRoll) -> Self {
        roll.to_string()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Parse a dice notation string like "2d6+3"
pub fn parse_dice(notation: &str) -> Result<DiceRoll, DiceError> {
    let notation = notation.trim().to_lowercase();

    let d_pos = notation
        .find('d')
        .ok_or_else(|| DiceError::MissingSeparator(notation.clone()))?;

    // "d6" means "1d6"
    let count_str = &notation[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str
            .parse()
            .map_err(|_| DiceError::InvalidCount(count_str.to_string()))?
    };

    if count == 0 {
        return Err(DiceError::InvalidCount(count_str.to_string()));
    }
    if count > MAX_DICE {
        return Err(DiceError::TooManyDice(count));
    }

    let rest = &notation[d_pos + 1..];

    let (sides_str, modifier) = if let Some(plus_pos) = rest.find('+') {
        let mod_str = &rest[plus_pos + 1..];
        let modifier: i32 = mod_str
            .parse()
            .map_err(|_| DiceError::InvalidModifier(mod_str.to_string()))?;
        (&rest[..plus_pos], modifier)
    } else if let Some(minus_pos) = rest.rfind('-').filter(|&pos| pos > 0) {
        // keep the sign with the modifier
        let mod_str = &rest[minus_pos..];
        let modifier: i32 = mod_str
            .parse()
            .map_err(|_| DiceError::InvalidModifier(mod_str.to_string()))?;
        (&rest[..minus_pos], modifier)
    } else {
        (rest, 0)
    };

    let sides: u32 = sides_str
        .parse()
        .map_err(|_| DiceError::InvalidSides(sides_str.to_string()))?;

    if sides == 0 {
        return Err(DiceError::InvalidSides(sides_str.to_string()));
    }
    if sides > MAX_SIDES {
        return Err(DiceError::TooManySides(sides));
    }

    Ok(DiceRoll {
        count,
        sides,
        modifier,
    })
}
