//! TestArena - a combat engine with controllable dice
//!
//! The player always attacks when driven through `step`/`fight`; tests that
//! need other actions call `player_turn` on `combat` directly.

#![allow(dead_code)]

use skirmish::combat::{DiceRoller, RandomDice, ScriptedDice};
use skirmish::{CombatConfig, CombatResult, CombatSystem, Combatant, CombatantId, Monster, PlayerCharacter};

pub struct TestArena {
    pub combat: CombatSystem,
}

impl TestArena {
    /// Dice replay `rolls`, then roll 10 forever
    pub fn scripted(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self::with_dice(CombatConfig::default(), Box::new(ScriptedDice::new(rolls)))
    }

    /// Reproducible random dice
    pub fn seeded(seed: u64) -> Self {
        Self::with_dice(CombatConfig::default(), Box::new(RandomDice::seeded(seed)))
    }

    pub fn with_dice(config: CombatConfig, dice: Box<dyn DiceRoller>) -> Self {
        Self {
            combat: CombatSystem::with_dice(config, dice),
        }
    }

    pub fn start(&mut self, player: PlayerCharacter, enemies: Vec<Monster>) -> CombatResult {
        let result = self.combat.start(player, enemies);
        assert!(!result.is_error(), "start failed: {}", result.message());
        result
    }

    /// One turn: the player attacks on their turn, monsters act on theirs
    pub fn step(&mut self) -> CombatResult {
        if self.combat.is_player_turn() {
            self.combat.player_turn("attack", None)
        } else {
            self.combat.execute_turn()
        }
    }

    /// Step until the encounter ends or `max_steps` runs out
    pub fn fight(&mut self, max_steps: usize) -> Vec<CombatResult> {
        let mut results = Vec::new();
        for _ in 0..max_steps {
            let result = self.step();
            assert!(!result.is_error(), "unexpected error: {}", result.message());
            results.push(result);
            if !self.combat.is_active() {
                break;
            }
        }
        results
    }

    pub fn player_id(&self) -> CombatantId {
        self.combat.player().map(|p| p.id()).expect("no player in the arena")
    }

    pub fn player_hp(&self) -> i32 {
        self.combat.player().map(|p| p.hp()).expect("no player in the arena")
    }

    pub fn enemy_id(&self, index: usize) -> CombatantId {
        self.combat.enemies()[index].id()
    }
}
