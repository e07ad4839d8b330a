//! Flight scenario tests
//!
//! Player escapes, opportunity attacks, and cowardly monsters breaking away

use crate::harness::{roster, TestArena};
use skirmish::combat::{Condition, EffectDuration, StatusEffect};
use skirmish::{Combatant, EncounterState, EndReason, PlayerAction, ResultKind};

/// Test: fleeing draws an opportunity attack, then ends the encounter
#[test]
fn test_player_flees_past_a_miss() {
    // goblin's opportunity attack: 2 + 4 vs AC 10
    let mut arena = TestArena::scripted([15, 5, 2]);
    arena.start(roster::fighter(), vec![roster::goblin()]);

    let result = arena.combat.player_turn("flee", None);
    assert_eq!(result.kind(), ResultKind::Fled);
    assert!(result.message().contains("Opportunity Attack!"));
    assert!(result.message().contains("Aric fled from combat!"));
    assert_eq!(arena.combat.state(), EncounterState::Over(EndReason::Fled));
    assert_eq!(arena.player_hp(), 12);
    assert!(arena.combat.player_turn("attack", None).is_error());
}

/// Test: every seed either escapes or dies trying, never anything else
#[test]
fn test_flight_always_resolves() {
    for seed in 0..25 {
        let mut arena = TestArena::seeded(seed);
        arena.start(roster::fighter(), vec![roster::bandit()]);
        if !arena.combat.is_player_turn() {
            let opening = arena.combat.execute_turn();
            assert!(!opening.is_error());
        }
        // a 1d4 dagger cannot drop 12 HP in one turn
        assert!(arena.combat.is_player_turn(), "seed {}", seed);

        let result = arena.combat.player_turn("run", None);
        assert!(result.message().contains("Opportunity Attack"), "seed {}", seed);
        assert!(
            matches!(result.kind(), ResultKind::Fled | ResultKind::PlayerDefeated),
            "seed {}: {}",
            seed,
            result
        );
        assert!(
            result.message().contains("fled from combat") || result.message().contains("escape failed"),
            "seed {}",
            seed
        );
        assert!(!arena.combat.is_active());
    }
}

/// Test: a restrained player cannot flee and loses the turn trying
#[test]
fn test_restrained_player_cannot_flee() {
    let mut arena = TestArena::scripted([15, 5]);
    arena.start(roster::fighter(), vec![roster::goblin()]);
    let player = arena.player_id();
    arena
        .combat
        .effects_mut()
        .apply_effect(player, StatusEffect::new(Condition::Restrained, EffectDuration::Indefinite));

    let actions = arena.combat.available_actions();
    assert!(actions.contains(&PlayerAction::Attack));
    assert!(!actions.contains(&PlayerAction::Flee));

    let result = arena.combat.player_turn("flee", None);
    assert_eq!(result.kind(), ResultKind::Info);
    assert_eq!(result.message(), "Aric cannot move and fails to flee!");
    assert!(arena.combat.is_active());
    assert!(!arena.combat.is_player_turn());
}

/// Test: a bloodied coward runs and the encounter is won without XP
#[test]
fn test_cowardly_monster_escapes() {
    // d20 15 hits (AC 12), d8 2 (+3 = 5) bloodies the kobold;
    // the parting swing rolls 1 (+5 = 6) and misses
    let mut arena = TestArena::scripted([15, 5, 15, 2, 1]);
    arena.start(roster::fighter(), vec![roster::kobold()]);
    let kobold = arena.enemy_id(0);

    let hit = arena.combat.player_turn("attack", None);
    assert_eq!(hit.kind(), ResultKind::AttackHit);
    assert_eq!(arena.combat.enemies()[0].hit_points().current(), 5);

    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::Victory);
    assert!(result.message().contains("Kobold flees from the battle!"));
    assert_eq!(result.xp_gained(), Some(0));
    assert!(arena.combat.has_fled(kobold));
    assert!(arena.combat.living_enemies().is_empty());
    assert_eq!(arena.combat.player().map(|p| p.experience), Some(0));
}

/// Test: a coward cut down by the opportunity attack still pays out
#[test]
fn test_fleeing_monster_cut_down() {
    let mut arena = TestArena::scripted([15, 5, 15, 2, 15, 8]);
    arena.start(roster::fighter(), vec![roster::kobold()]);
    let kobold = arena.enemy_id(0);

    arena.combat.player_turn("attack", None);
    let result = arena.combat.execute_turn();
    assert_eq!(result.kind(), ResultKind::Victory);
    assert!(result.message().contains("cut down before it can escape"));
    assert_eq!(result.xp_gained(), Some(25));
    assert!(!arena.combat.has_fled(kobold));
}
