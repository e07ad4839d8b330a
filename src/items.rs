//! Weapons, armor and the inventory/equipment collaborator
//!
//! The combat engine only needs enough of the item model to do weapon-aware
//! attack math, compute armor class, and move a weapon out of (and back into)
//! a player's possession.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{DamageType, DiceRoll};

/// Errors from equipment changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("no item named '{0}' in inventory")]
    NotFound(String),

    #[error("'{0}' cannot be equipped")]
    NotEquippable(String),
}

/// Properties that change how a weapon attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponProperty {
    /// Use the better of Strength and Dexterity
    Finesse,
    /// Attacks at range with Dexterity
    Ranged,
    Light,
    Heavy,
    TwoHanded,
    Thrown,
}

/// A weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: DiceRoll,
    pub damage_type: DamageType,
    #[serde(default)]
    pub properties: Vec<WeaponProperty>,
    /// Magic bonus applied to both attack and damage
    #[serde(default)]
    pub magic_bonus: i32,
}

impl Weapon {
    pub fn new(name: &str, damage: DiceRoll, damage_type: DamageType) -> Self {
        Self {
            name: name.to_string(),
            damage,
            damage_type,
            properties: Vec::new(),
            magic_bonus: 0,
        }
    }

    pub fn with_property(mut self, property: WeaponProperty) -> Self {
        if !self.properties.contains(&property) {
            self.properties.push(property);
        }
        self
    }

    pub fn with_magic_bonus(mut self, bonus: i32) -> Self {
        self.magic_bonus = bonus;
        self
    }

    pub fn has(&self, property: WeaponProperty) -> bool {
        self.properties.contains(&property)
    }

    pub fn is_ranged(&self) -> bool {
        self.has(WeaponProperty::Ranged)
    }

    pub fn is_finesse(&self) -> bool {
        self.has(WeaponProperty::Finesse)
    }
}

/// Armor category, which caps the Dexterity bonus to AC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorKind {
    Light,
    Medium,
    Heavy,
    Shield,
}

/// A piece of armor or a shield
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub kind: ArmorKind,
    /// Base AC for body armor; the flat bonus for a shield
    pub base_ac: i32,
    #[serde(default)]
    pub magic_bonus: i32,
}

impl Armor {
    pub fn new(name: &str, kind: ArmorKind, base_ac: i32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            base_ac,
            magic_bonus: 0,
        }
    }

    /// Armor class contributed by this piece given the wearer's Dex modifier
    pub fn armor_class(&self, dex_modifier: i32) -> i32 {
        let base = match self.kind {
            ArmorKind::Light => self.base_ac + dex_modifier,
            ArmorKind::Medium => self.base_ac + dex_modifier.min(2),
            ArmorKind::Heavy | ArmorKind::Shield => self.base_ac,
        };
        base + self.magic_bonus
    }
}

/// Anything a player can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
    Gear { name: String },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.name,
            Item::Armor(a) => &a.name,
            Item::Gear { name } => name,
        }
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Armor> for Item {
    fn from(armor: Armor) -> Self {
        Item::Armor(armor)
    }
}

/// Carried, unequipped items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    /// Find an item by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name().eq_ignore_ascii_case(name))
    }

    /// Remove and return an item by name (case-insensitive)
    pub fn take(&mut self, name: &str) -> Option<Item> {
        let pos = self
            .items
            .iter()
            .position(|i| i.name().eq_ignore_ascii_case(name))?;
        Some(self.items.remove(pos))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Worn and wielded items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    pub shield: Option<Armor>,
}

impl Equipment {
    /// Armor class from armor and shield (10 + Dex when unarmored)
    pub fn armor_class(&self, dex_modifier: i32) -> i32 {
        let body = self
            .armor
            .as_ref()
            .map(|a| a.armor_class(dex_modifier))
            .unwrap_or(10 + dex_modifier);
        let shield = self
            .shield
            .as_ref()
            .map(|s| s.armor_class(dex_modifier))
            .unwrap_or(0);
        body + shield
    }
}
