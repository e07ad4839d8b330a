//! Attack scenario tests
//!
//! Tests hits, misses, defeats, and conditions feeding into attack rolls

use crate::harness::{roster, TestArena};
use skirmish::combat::{Condition, EffectDuration, StatusEffect};
use skirmish::{Combatant, EncounterState, ResultKind};

/// Test: an 8 damage hit drops an AC 13, 7 HP goblin that still has friends
#[test]
fn test_hit_defeats_goblin() {
    // initiative Aric 15, Goblin 5, Bandit 4; d20 15 (+5 = 20), d8 5 (+3 = 8)
    let mut arena = TestArena::scripted([15, 5, 4, 15, 5]);
    arena.start(roster::fighter(), vec![roster::goblin(), roster::bandit()]);

    let result = arena.combat.player_turn("attack", Some("gob"));
    assert_eq!(result.kind(), ResultKind::EnemyDefeated);
    assert_eq!(result.attack_roll(), Some(20));
    assert_eq!(result.target_ac(), Some(13));
    assert_eq!(result.damage(), Some(8));
    assert_eq!(result.xp_gained(), None);
    assert_eq!(arena.combat.enemies()[0].hp(), 0);
    assert_eq!(arena.combat.state(), EncounterState::Active);

    let living: Vec<&str> = arena.combat.living_enemies().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(living, vec!["Bandit"]);
    assert_eq!(arena.combat.player().map(|p| p.experience), Some(0));
}

/// Test: a target filter picks a living enemy by name fragment
#[test]
fn test_target_filter_is_case_insensitive() {
    // d20 15 hits the bandit (AC 12), d8 1 (+3 = 4)
    let mut arena = TestArena::scripted([15, 5, 4, 15, 1]);
    arena.start(roster::fighter(), vec![roster::goblin(), roster::bandit()]);

    let result = arena.combat.player_turn("strike", Some("BAND"));
    assert_eq!(result.kind(), ResultKind::AttackHit);
    assert_eq!(result.defender(), Some("Bandit"));
    assert_eq!(arena.combat.enemies()[1].hp(), 7);
    assert_eq!(arena.combat.enemies()[0].hp(), 7);

    let bandit_id = arena.enemy_id(1);
    let aggro = arena.combat.last_attacker(bandit_id).map(|c| c.name().to_string());
    assert_eq!(aggro.as_deref(), Some("Aric"));
}

/// Test: a restrained target is attacked with advantage until it is freed
#[test]
fn test_restrained_target_grants_advantage() {
    // initiative, then advantage d20s 2 and 14 (keep 14 + 5 = 19), d8 1
    let mut arena = TestArena::scripted([15, 5, 2, 14, 1]);
    arena.start(roster::fighter(), vec![roster::bandit()]);
    let bandit = arena.enemy_id(0);

    arena
        .combat
        .effects_mut()
        .apply_effect(bandit, StatusEffect::new(Condition::Restrained, EffectDuration::Indefinite));
    assert!(arena.combat.effects().attacks_have_advantage_against(bandit));

    let result = arena.combat.player_turn("attack", None);
    assert_eq!(result.kind(), ResultKind::AttackHit);
    assert_eq!(result.attack_roll(), Some(19));
    assert!(result.message().contains("with advantage"));

    arena.combat.effects_mut().remove_effect(bandit, Condition::Restrained);
    assert!(!arena.combat.effects().attacks_have_advantage_against(bandit));
}

/// Test: a paralyzed target takes a critical from any melee hit
#[test]
fn test_paralyzed_target_is_crit() {
    // advantage d20s 9 and 3 (keep 9 + 5 = 14 vs 12), crit d8s 2 and 2 (+3)
    let mut arena = TestArena::scripted([15, 5, 9, 3, 2, 2]);
    arena.start(roster::fighter(), vec![roster::bandit()]);
    let bandit = arena.enemy_id(0);
    arena
        .combat
        .effects_mut()
        .apply_effect(bandit, StatusEffect::new(Condition::Paralyzed, EffectDuration::Rounds(1)));

    let result = arena.combat.player_turn("attack", None);
    assert_eq!(result.damage(), Some(7));
    assert!(result.message().contains("CRITICAL HIT"));
    // the bandit's turn is skipped while paralyzed, and the paralysis runs out
    assert!(result.notes().iter().any(|n| n == "Bandit is paralyzed and loses the turn."));
    assert!(!arena.combat.effects().has_any_effects(bandit));
    assert!(arena.combat.is_player_turn());
}

/// Test: a poisoned player attacks with disadvantage and the poison runs out
#[test]
fn test_poison_wears_off() {
    // disadvantage d20s 19 and 4 (keep 4 + 5 = 9 vs 12): miss
    let mut arena = TestArena::scripted([15, 5, 19, 4]);
    arena.start(roster::fighter(), vec![roster::bandit()]);
    let player = arena.player_id();
    arena
        .combat
        .effects_mut()
        .apply_effect(player, StatusEffect::new(Condition::Poisoned, EffectDuration::Rounds(1)));

    let result = arena.combat.player_turn("attack", None);
    assert_eq!(result.kind(), ResultKind::AttackMiss);
    assert!(result.message().contains("with disadvantage"));
    assert!(result.notes().iter().any(|n| n == "Aric is no longer poisoned."));
    assert!(!arena.combat.effects().has_any_effects(player));
}
