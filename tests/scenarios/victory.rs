//! Encounter ending scenario tests

use crate::harness::{roster, TestArena};
use skirmish::combat::{Condition, DamageType, DiceRoll, EffectDuration, StatusEffect};
use skirmish::combatant::AbilityScores;
use skirmish::{Combatant, EncounterState, EndReason, Monster, PlayerCharacter, ResultKind};

/// Test: a fighter always beats the training dummy and collects its XP
#[test]
fn test_fighter_beats_dummy() {
    for seed in 0..20 {
        let mut arena = TestArena::seeded(seed);
        arena.start(roster::fighter(), vec![roster::training_dummy()]);

        let results = arena.fight(12);
        let last = results.last().unwrap();
        assert_eq!(last.kind(), ResultKind::Victory, "seed {}", seed);
        assert_eq!(last.xp_gained(), Some(25));
        assert_eq!(arena.combat.state(), EncounterState::Over(EndReason::Victory));
        assert_eq!(arena.combat.player().map(|p| p.experience), Some(25));
        assert!(arena.player_hp() > 0);
    }
}

/// Test: XP is the sum over every defeated enemy
#[test]
fn test_xp_sums_defeated_enemies() {
    // enough HP to outlast two dummies on any roll
    let veteran = PlayerCharacter::new("Aric", 1, AbilityScores::new(16, 10, 14, 10, 10, 10), 60)
        .with_weapon(roster::longsword());
    let mut arena = TestArena::seeded(7);
    arena.start(veteran, vec![roster::training_dummy(), roster::training_dummy()]);

    let results = arena.fight(40);
    let last = results.last().unwrap();
    assert_eq!(last.kind(), ResultKind::Victory);
    assert_eq!(last.xp_gained(), Some(50));
    assert_eq!(
        results.iter().filter(|r| r.kind() == ResultKind::EnemyDefeated).count(),
        1
    );
}

/// Test: two copies of one monster template fight as separate enemies
#[test]
fn test_cloned_template_fights_to_victory() {
    let template = roster::goblin();
    let mut arena = TestArena::scripted([15, 5, 4, 15, 5, 2, 15, 5]);
    arena.start(roster::fighter(), vec![template.clone(), template.clone()]);
    assert_ne!(arena.enemy_id(0), arena.enemy_id(1));

    let results = arena.fight(10);
    let kinds: Vec<ResultKind> = results.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![ResultKind::EnemyDefeated, ResultKind::AttackMiss, ResultKind::Victory]
    );
    assert_eq!(results[2].xp_gained(), Some(100));
    assert!(arena.combat.living_enemies().is_empty());
}

/// Test: the player dropping to 0 HP ends the encounter in defeat
#[test]
fn test_defeat() {
    // ogre first; 10 + 30 hits, 2d6 6 and 6 (+10 = 22)
    let ogre = Monster::new("Ogre", 100, 30)
        .with_attack("greatclub", 30, DiceRoll::new(2, 6, 10), DamageType::Bludgeoning)
        .with_experience(450);
    let mut arena = TestArena::scripted([5, 15, 10, 6, 6]);
    arena.start(roster::fighter(), vec![ogre]);

    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::PlayerDefeated);
    assert!(result.message().contains("Aric has been defeated."));
    assert_eq!(result.xp_gained(), None);
    assert_eq!(arena.player_hp(), 0);
    assert_eq!(arena.combat.state(), EncounterState::Over(EndReason::Defeat));
    assert!(arena.combat.execute_turn().is_error());

    // the ended encounter still reports, and a fresh one can start
    assert!(!arena.combat.end_combat().is_error());
    let player = arena.combat.take_player().unwrap();
    assert!(!player.is_alive());
}

/// Test: conditions never leak into the next encounter
#[test]
fn test_conditions_reset_between_encounters() {
    let mut arena = TestArena::scripted([15, 5, 15, 5, 15, 5]);
    arena.start(roster::fighter(), vec![roster::goblin()]);
    let player = arena.player_id();
    arena
        .combat
        .effects_mut()
        .apply_effect(player, StatusEffect::new(Condition::Deafened, EffectDuration::Permanent));

    // 15 + 5 hits the goblin, d8 5 (+3 = 8) kills it
    let result = arena.combat.player_turn("attack", None);
    assert_eq!(result.kind(), ResultKind::Victory);
    assert!(!arena.combat.effects().has_any_effects(player));

    let fighter = arena.combat.take_player().unwrap();
    let enemies = arena.combat.take_enemies();
    assert!(!enemies[0].is_alive());
    arena.start(fighter, enemies);

    assert_eq!(arena.combat.round(), 1);
    assert!(arena.combat.enemies()[0].is_alive());
    assert_eq!(arena.combat.player().map(|p| p.experience), Some(50));
    assert!(!arena.combat.effects().has_condition(player, Condition::Deafened));
}
