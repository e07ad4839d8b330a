//! Player characters
//!
//! Owns equipment, inventory, and the class-feature hook the combat engine
//! consults for critical range, damage and AC bonuses.

use serde::{Deserialize, Serialize};

use super::{Ability, AbilityScores, Combatant, CombatantId, HitPoints};
use crate::combat::{AttackProfile, AttackRules, DamageType, DiceRoll};
use crate::items::{Armor, ArmorKind, Equipment, Inventory, Item, ItemError, Weapon};

/// Per-class modifiers the combat engine needs.
///
/// Feature bookkeeping (uses per rest, resources) lives outside the engine;
/// callers update these numbers when a feature turns on or off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFeatures {
    /// Natural roll that scores a critical hit (e.g. 19 for Improved Critical)
    pub critical_threshold: Option<u32>,
    /// Flat bonus added to weapon damage (e.g. Rage)
    pub damage_bonus: i32,
    /// Flat bonus to armor class
    pub ac_bonus: i32,
    /// Unarmed strikes use this die and the better of STR/DEX
    pub martial_arts_die: Option<DiceRoll>,
}

/// A player-controlled combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCharacter {
    id: CombatantId,
    pub name: String,
    pub level: u32,
    pub abilities: AbilityScores,
    hit_points: HitPoints,
    pub save_proficiencies: Vec<Ability>,
    pub experience: u32,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub features: ClassFeatures,
}

impl PlayerCharacter {
    /// Create a level-`level` character at full hit points
    pub fn new(name: &str, level: u32, abilities: AbilityScores, max_hp: i32) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.to_string(),
            level: level.max(1),
            abilities,
            hit_points: HitPoints::new(max_hp),
            save_proficiencies: Vec::new(),
            experience: 0,
            equipment: Equipment::default(),
            inventory: Inventory::new(),
            features: ClassFeatures::default(),
        }
    }

    /// Builder: wield a weapon directly
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.equipment.weapon = Some(weapon);
        self
    }

    /// Builder: wear armor or a shield directly
    pub fn with_armor(mut self, armor: Armor) -> Self {
        if armor.kind == ArmorKind::Shield {
            self.equipment.shield = Some(armor);
        } else {
            self.equipment.armor = Some(armor);
        }
        self
    }

    pub fn with_features(mut self, features: ClassFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn with_save_proficiency(mut self, ability: Ability) -> Self {
        if !self.save_proficiencies.contains(&ability) {
            self.save_proficiencies.push(ability);
        }
        self
    }

    /// 2 at levels 1-4, +1 every four levels after
    pub fn proficiency_bonus(&self) -> i32 {
        2 + (self.level as i32 - 1) / 4
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.equipment.weapon.as_ref()
    }

    pub fn equipped_armor(&self) -> Option<&Armor> {
        self.equipment.armor.as_ref()
    }

    /// Equip an item from the inventory by name. Whatever occupied the slot
    /// goes back into the inventory.
    pub fn equip(&mut self, name: &str) -> Result<(), ItemError> {
        let item = self
            .inventory
            .take(name)
            .ok_or_else(|| ItemError::NotFound(name.to_string()))?;

        match item {
            Item::Weapon(weapon) => {
                if let Some(old) = self.equipment.weapon.replace(weapon) {
                    self.inventory.add(old);
                }
            }
            Item::Armor(armor) => {
                let slot = if armor.kind == ArmorKind::Shield {
                    &mut self.equipment.shield
                } else {
                    &mut self.equipment.armor
                };
                if let Some(old) = slot.replace(armor) {
                    self.inventory.add(old);
                }
            }
            gear @ Item::Gear { .. } => {
                let name = gear.name().to_string();
                self.inventory.add(gear);
                return Err(ItemError::NotEquippable(name));
            }
        }
        Ok(())
    }

    /// Remove the wielded weapon from the hand. The caller decides where it
    /// goes (inventory, the floor, ...).
    pub fn unequip_weapon(&mut self) -> Option<Weapon> {
        self.equipment.weapon.take()
    }

    /// Remove worn body armor
    pub fn unequip_armor(&mut self) -> Option<Armor> {
        self.equipment.armor.take()
    }

    pub fn gain_experience(&mut self, xp: u32) {
        self.experience = self.experience.saturating_add(xp);
    }

    /// Ability used for the current weapon: ranged uses DEX, finesse and
    /// martial-arts unarmed strikes use the better of STR/DEX, else STR.
    pub fn attack_ability(&self) -> Ability {
        let better = if self.abilities.modifier(Ability::Dexterity)
            > self.abilities.modifier(Ability::Strength)
        {
            Ability::Dexterity
        } else {
            Ability::Strength
        };

        match self.equipped_weapon() {
            Some(w) if w.is_ranged() => Ability::Dexterity,
            Some(w) if w.is_finesse() => better,
            Some(_) => Ability::Strength,
            None if self.features.martial_arts_die.is_some() => better,
            None => Ability::Strength,
        }
    }
}

impl Combatant for PlayerCharacter {
    fn id(&self) -> CombatantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn hit_points(&self) -> &HitPoints {
        &self.hit_points
    }

    fn hit_points_mut(&mut self) -> &mut HitPoints {
        &mut self.hit_points
    }

    fn armor_class(&self) -> i32 {
        let dex = self.abilities.modifier(Ability::Dexterity);
        self.equipment.armor_class(dex) + self.features.ac_bonus
    }

    fn initiative_modifier(&self) -> i32 {
        self.abilities.modifier(Ability::Dexterity)
    }

    fn attack_profile(&self, rules: &AttackRules) -> AttackProfile {
        let ability = self.attack_ability();
        let ability_modifier = self.abilities.modifier(ability);
        let critical_threshold = self
            .features
            .critical_threshold
            .map_or(rules.critical_threshold, |t| t.min(rules.critical_threshold));

        let (label, damage, damage_type, magic, melee) = match self.equipped_weapon() {
            Some(w) => (
                w.name.clone(),
                w.damage.without_modifier(),
                w.damage_type,
                w.magic_bonus + w.damage.modifier,
                !w.is_ranged(),
            ),
            None => (
                "unarmed strike".to_string(),
                self.features
                    .martial_arts_die
                    .unwrap_or(rules.unarmed_damage)
                    .without_modifier(),
                DamageType::Bludgeoning,
                0,
                true,
            ),
        };
        let to_hit_magic = self.equipped_weapon().map_or(0, |w| w.magic_bonus);

        AttackProfile {
            label,
            ability: Some(ability),
            to_hit: ability_modifier + self.proficiency_bonus() + to_hit_magic,
            damage,
            damage_bonus: ability_modifier + magic + self.features.damage_bonus,
            damage_type,
            critical_threshold,
            melee,
        }
    }

    fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        let proficiency = if self.save_proficiencies.contains(&ability) {
            self.proficiency_bonus()
        } else {
            0
        };
        self.abilities.modifier(ability) + proficiency
    }

    fn is_player(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::WeaponProperty;

    fn rules() -> AttackRules {
        AttackRules::default()
    }

    fn longsword() -> Weapon {
        Weapon::new("Longsword", DiceRoll::new(1, 8, 0), DamageType::Slashing)
    }

    fn rogue() -> PlayerCharacter {
        PlayerCharacter::new("Vex", 5, AbilityScores::new(10, 18, 12, 12, 10, 14), 30)
    }

    #[test]
    fn test_proficiency_by_level() {
        let mut pc = rogue();
        pc.level = 1;
        assert_eq!(pc.proficiency_bonus(), 2);
        pc.level = 4;
        assert_eq!(pc.proficiency_bonus(), 2);
        pc.level = 5;
        assert_eq!(pc.proficiency_bonus(), 3);
        pc.level = 17;
        assert_eq!(pc.proficiency_bonus(), 6);
    }

    #[test]
    fn test_strength_weapon_profile() {
        let pc = rogue().with_weapon(longsword());
        let profile = pc.attack_profile(&rules());
        assert_eq!(profile.ability, Some(Ability::Strength));
        assert_eq!(profile.to_hit, 3);
        assert_eq!(profile.damage_bonus, 0);
        assert!(profile.melee);
    }

    #[test]
    fn test_finesse_uses_better_ability() {
        let rapier = Weapon::new("Rapier", DiceRoll::new(1, 8, 0), DamageType::Piercing)
            .with_property(WeaponProperty::Finesse)
            .with_magic_bonus(1);
        let pc = rogue().with_weapon(rapier);
        let profile = pc.attack_profile(&rules());
        assert_eq!(profile.ability, Some(Ability::Dexterity));
        assert_eq!(profile.to_hit, 4 + 3 + 1);
        assert_eq!(profile.damage_bonus, 4 + 1);
    }

    #[test]
    fn test_ranged_uses_dexterity() {
        let mut brute = PlayerCharacter::new("Grok", 1, AbilityScores::new(18, 8, 14, 8, 10, 8), 14);
        brute = brute.with_weapon(
            Weapon::new("Shortbow", DiceRoll::new(1, 6, 0), DamageType::Piercing)
                .with_property(WeaponProperty::Ranged),
        );
        let profile = brute.attack_profile(&rules());
        assert_eq!(profile.ability, Some(Ability::Dexterity));
        assert_eq!(profile.to_hit, -1 + 2);
        assert!(!profile.melee);
    }

    #[test]
    fn test_unarmed_and_martial_arts() {
        let pc = rogue();
        let profile = pc.attack_profile(&rules());
        assert_eq!(profile.ability, Some(Ability::Strength));
        assert_eq!(profile.damage, rules().unarmed_damage);

        let monk = rogue().with_features(ClassFeatures {
            martial_arts_die: Some(DiceRoll::new(1, 6, 0)),
            ..ClassFeatures::default()
        });
        let profile = monk.attack_profile(&rules());
        assert_eq!(profile.ability, Some(Ability::Dexterity));
        assert_eq!(profile.damage, DiceRoll::new(1, 6, 0));
    }

    #[test]
    fn test_feature_hooks() {
        let champion = rogue()
            .with_weapon(longsword())
            .with_features(ClassFeatures {
                critical_threshold: Some(19),
                damage_bonus: 2,
                ac_bonus: 1,
                martial_arts_die: None,
            });
        let profile = champion.attack_profile(&rules());
        assert_eq!(profile.critical_threshold, 19);
        assert_eq!(profile.damage_bonus, 2);
        assert_eq!(champion.armor_class(), 10 + 4 + 1);
    }

    #[test]
    fn test_equip_and_unequip() {
        let mut pc = rogue().with_weapon(longsword());
        pc.inventory.add(Weapon::new("Mace", DiceRoll::new(1, 6, 0), DamageType::Bludgeoning));
        pc.inventory.add(Armor::new("Leather", ArmorKind::Light, 11));

        pc.equip("mace").unwrap();
        assert_eq!(pc.equipped_weapon().map(|w| w.name.as_str()), Some("Mace"));
        assert!(pc.inventory.contains("Longsword"));

        pc.equip("Leather").unwrap();
        assert_eq!(pc.armor_class(), 11 + 4);

        assert_eq!(pc.equip("Longbow"), Err(ItemError::NotFound("Longbow".to_string())));

        let weapon = pc.unequip_weapon().unwrap();
        assert_eq!(weapon.name, "Mace");
        assert!(pc.equipped_weapon().is_none());
    }

    #[test]
    fn test_gear_is_not_equippable() {
        let mut pc = rogue();
        pc.inventory.add(Item::Gear {
            name: "Torch".to_string(),
        });
        assert_eq!(pc.equip("torch"), Err(ItemError::NotEquippable("Torch".to_string())));
        assert!(pc.inventory.contains("Torch"));
    }

    #[test]
    fn test_saving_throws() {
        let pc = rogue().with_save_proficiency(Ability::Dexterity);
        assert_eq!(pc.saving_throw_modifier(Ability::Dexterity), 4 + 3);
        assert_eq!(pc.saving_throw_modifier(Ability::Strength), 0);
    }
}
