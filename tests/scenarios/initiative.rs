//! Initiative scenario tests

use crate::harness::{roster, TestArena};
use skirmish::ResultKind;

/// Test: order is sorted by total and stays fixed for the whole encounter
#[test]
fn test_order_fixed_for_encounter() {
    // Aric 8, Goblin 17, Bandit 12
    let mut arena = TestArena::scripted([8, 17, 12]);
    let start = arena.start(roster::fighter(), vec![roster::goblin(), roster::bandit()]);

    assert_eq!(start.kind(), ResultKind::CombatStart);
    let names: Vec<String> = start
        .initiative()
        .unwrap()
        .iter()
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(names, vec!["Goblin", "Bandit", "Aric"]);
    assert!(start.message().contains("Goblin 17 (17+0)"));
    assert_eq!(arena.combat.current_combatant().map(|c| c.name().to_string()), Some("Goblin".to_string()));

    let before = arena.combat.initiative_order().to_vec();
    arena.fight(6);
    assert_eq!(arena.combat.initiative_order(), before.as_slice());
}

/// Test: equal totals keep the player ahead of enemies supplied later
#[test]
fn test_ties_keep_supplied_order() {
    let mut arena = TestArena::scripted([12, 12, 12]);
    let start = arena.start(roster::fighter(), vec![roster::goblin(), roster::bandit()]);
    let names: Vec<&str> = start
        .initiative()
        .unwrap()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Aric", "Goblin", "Bandit"]);
    assert!(arena.combat.is_player_turn());
}

/// Test: starting again re-rolls and may reorder
#[test]
fn test_restart_rerolls() {
    let mut arena = TestArena::scripted([15, 5, 5, 15]);
    arena.start(roster::fighter(), vec![roster::goblin()]);
    assert!(arena.combat.is_player_turn());

    let player = arena.combat.take_player().unwrap();
    let enemies = arena.combat.take_enemies();
    arena.start(player, enemies);
    assert!(!arena.combat.is_player_turn());
    assert_eq!(arena.combat.initiative_order()[0].name, "Goblin");
    assert_eq!(arena.combat.round(), 1);
}

/// Test: participants are listed in initiative order
#[test]
fn test_participants_follow_order() {
    let mut arena = TestArena::scripted([3, 9, 18]);
    arena.start(roster::fighter(), vec![roster::goblin(), roster::bandit()]);
    let names: Vec<String> = arena
        .combat
        .participants()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, vec!["Bandit", "Goblin", "Aric"]);
    assert_eq!(arena.combat.living_enemies().len(), 2);
}
