//! Special ability scenario tests

use crate::harness::{roster, TestArena};
use skirmish::combat::Condition;
use skirmish::items::Item;
use skirmish::{Combatant, PlayerAction, ResultKind};

/// Test: a disarmed weapon comes back after a win and can be wielded again
#[test]
fn test_disarm_then_recover_on_victory() {
    // boss first; 10 + 30 hits, d4 1; STR save 2 + 3 fails DC 12;
    // unarmed strike 15 + 5 hits, d4 4 (+3 = 7)
    let mut arena = TestArena::scripted([5, 15, 10, 1, 2, 15, 4]);
    arena.start(roster::fighter(), vec![roster::goblin_boss()]);

    let disarm = arena.combat.execute_turn();
    assert_eq!(disarm.kind(), ResultKind::SpecialAbility);
    assert!(disarm.message().contains("Goblin Boss uses Disarm!"));
    assert!(disarm.message().contains("drops the Longsword"));
    assert_eq!(arena.player_hp(), 11);
    match arena.combat.dropped_items() {
        [Item::Weapon(weapon)] => assert_eq!(weapon.name, "Longsword"),
        other => panic!("expected the longsword on the floor, got {:?}", other),
    }

    let blow = arena.combat.player_turn("attack", None);
    assert_eq!(blow.kind(), ResultKind::Victory);
    assert!(blow.message().contains("unarmed strike"));
    assert_eq!(blow.damage(), Some(7));
    assert_eq!(blow.xp_gained(), Some(100));
    assert!(blow.message().contains("Aric recovers the Longsword."));
    assert!(arena.combat.dropped_items().is_empty());

    let mut player = arena.combat.take_player().unwrap();
    assert!(player.inventory.contains("longsword"));
    assert!(player.equip("Longsword").is_ok());
    assert_eq!(player.equipped_weapon().map(|w| w.name.as_str()), Some("Longsword"));
}

/// Test: a disarmed weapon is lost when the player runs
#[test]
fn test_disarm_then_flee_leaves_weapon() {
    // disarm as above, then the boss's opportunity attack: 10 + 30, d4 1, save 15 + 3 holds
    let mut arena = TestArena::scripted([5, 15, 10, 1, 2, 10, 1, 15]);
    arena.start(roster::fighter(), vec![roster::goblin_boss()]);
    arena.combat.execute_turn();

    let result = arena.combat.player_turn("flee", None);
    assert_eq!(result.kind(), ResultKind::Fled);
    assert!(result.message().contains("resists"));
    assert!(result.message().contains("The Longsword is left behind."));

    let player = arena.combat.take_player().unwrap();
    assert!(!player.inventory.contains("Longsword"));
    assert!(player.equipped_weapon().is_none());
}

/// Test: adhesive pins the player until they save
#[test]
fn test_adhesive_restrains() {
    let mut arena = TestArena::scripted([5, 15, 10, 1, 2]);
    let jelly = roster::goblin_boss().with_special_ability("adhesive");
    arena.start(roster::fighter(), vec![jelly]);
    let player = arena.player_id();

    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::SpecialAbility);
    assert!(result.message().contains("is restrained"));
    assert!(arena.combat.effects().has_condition(player, Condition::Restrained));
    assert!(arena.combat.is_player_turn());
    assert!(!arena.combat.available_actions().contains(&PlayerAction::Flee));
    assert!(arena.combat.player().is_some_and(|p| p.equipped_weapon().is_some()));
}

/// Test: an ability the engine does not know is ignored
#[test]
fn test_unknown_ability_is_ignored() {
    let mut arena = TestArena::scripted([5, 15, 10, 1]);
    let dragon = roster::goblin_boss().with_special_ability("Fire Breath");
    arena.start(roster::fighter(), vec![dragon]);

    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::AttackHit);
    assert!(!result.message().contains("Fire Breath"));
    assert!(arena.combat.dropped_items().is_empty());
    assert!(!arena.combat.effects().has_any_effects(arena.player_id()));
}

/// Test: disarming an unarmed player still names both sides
#[test]
fn test_disarm_unarmed_player() {
    let mut arena = TestArena::scripted([5, 15, 10, 1, 2]);
    let mut fighter = roster::fighter();
    fighter.unequip_weapon();
    arena.start(fighter, vec![roster::goblin_boss()]);

    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::SpecialAbility);
    assert!(result.message().contains("Goblin Boss uses Disarm!"));
    assert!(result.message().contains("Aric fails a DC 12 STR save, but has no weapon to lose."));
    assert!(arena.combat.dropped_items().is_empty());
    assert_eq!(arena.combat.player().map(|p| p.hp()), Some(11));
}
