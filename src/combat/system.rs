//! Encounter engine
//!
//! [`CombatSystem`] owns one encounter at a time: the participants, the turn
//! order, status effects, aggro and dropped items. A driver starts an
//! encounter, then feeds player actions and asks for monster turns until a
//! terminal result comes back.
//!
//! Participants are moved in by [`CombatSystem::start`] and handed back with
//! [`CombatSystem::take_player`] and [`CombatSystem::take_enemies`].

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tracing::{debug, info, warn};

use super::abilities::{self, AbilityEffect, SpecialAbility};
use super::attack::{attack_roll_mode, resolve_attack, AttackOutcome, AttackRules};
use super::behavior::{decide_action, EncounterView, MonsterAction, TargetCandidate};
use super::dice::{DiceRoller, RandomDice};
use super::effects::EffectManager;
use super::error::CombatError;
use super::initiative::{roll_initiative, InitiativeEntry, TurnScheduler};
use super::result::{CombatResult, ResultKind};
use crate::combatant::{Combatant, CombatantId, Monster, PlayerCharacter};
use crate::config::CombatConfig;
use crate::items::Item;

/// Actions the player can choose on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Attack,
    /// Attacks against the player have disadvantage until their next turn
    Dodge,
    /// Leave the encounter, provoking opportunity attacks
    Flee,
}

impl FromStr for PlayerAction {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" | "hit" | "strike" => Ok(PlayerAction::Attack),
            "dodge" | "defend" => Ok(PlayerAction::Dodge),
            "flee" | "run" | "escape" => Ok(PlayerAction::Flee),
            _ => Err(CombatError::UnknownAction(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerAction::Attack => "attack",
            PlayerAction::Dodge => "dodge",
            PlayerAction::Flee => "flee",
        };
        write!(f, "{}", s)
    }
}

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Victory,
    Defeat,
    Fled,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EndReason::Victory => "victory",
            EndReason::Defeat => "defeat",
            EndReason::Fled => "fled",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterState {
    #[default]
    NotStarted,
    Active,
    Over(EndReason),
}

/// Find a participant by id without borrowing the whole engine
fn find_combatant<'a>(
    player: &'a Option<PlayerCharacter>,
    enemies: &'a [Monster],
    id: CombatantId,
) -> Option<&'a dyn Combatant> {
    if let Some(player) = player.as_ref().filter(|p| p.id() == id) {
        return Some(player as &dyn Combatant);
    }
    enemies
        .iter()
        .find(|e| e.id() == id)
        .map(|e| e as &dyn Combatant)
}

/// The combat engine
pub struct CombatSystem {
    config: CombatConfig,
    rules: AttackRules,
    dice: Box<dyn DiceRoller>,
    state: EncounterState,
    player: Option<PlayerCharacter>,
    enemies: Vec<Monster>,
    /// Enemies that escaped; they stay in the roster but no longer fight
    fled: HashSet<CombatantId>,
    scheduler: TurnScheduler,
    effects: EffectManager,
    dropped_items: Vec<Item>,
    /// combatant -> whoever last damaged it
    last_attacker: HashMap<CombatantId, CombatantId>,
    dodging: HashSet<CombatantId>,
}

impl std::fmt::Debug for CombatSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSystem")
            .field("state", &self.state)
            .field("round", &self.scheduler.round())
            .field("player", &self.player.as_ref().map(|p| p.name.as_str()))
            .field("enemies", &self.enemies.len())
            .field("dropped_items", &self.dropped_items.len())
            .finish_non_exhaustive()
    }
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatSystem {
    /// Create an engine with random dice, seeded from the config if it has a seed
    pub fn new(config: CombatConfig) -> Self {
        let dice: Box<dyn DiceRoller> = match config.dice_seed {
            Some(seed) => Box::new(RandomDice::seeded(seed)),
            None => Box::new(RandomDice::new()),
        };
        Self::with_dice(config, dice)
    }

    /// Create an engine drawing every roll from `dice`
    pub fn with_dice(config: CombatConfig, dice: Box<dyn DiceRoller>) -> Self {
        Self {
            rules: config.attack_rules(),
            config,
            dice,
            state: EncounterState::NotStarted,
            player: None,
            enemies: Vec::new(),
            fled: HashSet::new(),
            scheduler: TurnScheduler::default(),
            effects: EffectManager::new(),
            dropped_items: Vec::new(),
            last_attacker: HashMap::new(),
            dodging: HashSet::new(),
        }
    }

    // ---- Lifecycle ----

    /// Start a new encounter.
    ///
    /// Replaces everything from any previous encounter, including participants
    /// that were never taken back. Enemies are healed to full, any enemy whose
    /// id is already taken (a cloned template) gets a fresh one, and
    /// initiative is rolled for everyone.
    pub fn start(&mut self, player: PlayerCharacter, enemies: Vec<Monster>) -> CombatResult {
        self.reset();
        self.player = Some(player);

        if enemies.is_empty() {
            warn!("Refusing to start combat without enemies");
            return CombatError::NoEnemies.into();
        }

        self.enemies = enemies;
        let mut seen: HashSet<CombatantId> = self.player.iter().map(|p| p.id()).collect();
        for enemy in &mut self.enemies {
            if !seen.insert(enemy.id()) {
                debug!("{} shares an id with another participant, issuing a new one", enemy.name);
                enemy.renew_id();
                seen.insert(enemy.id());
            }
            enemy.hit_points_mut().restore();
        }

        let order = {
            let mut participants: Vec<&dyn Combatant> = Vec::with_capacity(self.enemies.len() + 1);
            if let Some(player) = &self.player {
                participants.push(player);
            }
            participants.extend(self.enemies.iter().map(|e| e as &dyn Combatant));
            roll_initiative(&participants, self.dice.as_mut())
        };

        self.scheduler = TurnScheduler::new(order.clone());
        self.state = EncounterState::Active;

        let listing: Vec<String> = order.iter().map(|e| e.to_string()).collect();
        let first = order.first().map(|e| e.name.clone()).unwrap_or_default();
        info!(
            "Combat started: {} vs {}",
            self.player.as_ref().map(|p| p.name.as_str()).unwrap_or_default(),
            self.enemies.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(", ")
        );

        CombatResult::new(
            ResultKind::CombatStart,
            format!("Combat begins! Initiative: {}.", listing.join(", ")),
        )
        .with_line(format!("{} acts first.", first))
        .with_initiative(order)
    }

    /// Abort the current encounter. Dropped items go back to the player and
    /// all conditions are cleared; participants stay until taken.
    pub fn end_combat(&mut self) -> CombatResult {
        match self.state {
            EncounterState::NotStarted => CombatError::NotInCombat.into(),
            EncounterState::Over(reason) => {
                CombatResult::info(format!("Combat is already over ({}).", reason))
            }
            EncounterState::Active => {
                let recovered = self.return_dropped_items();
                self.effects.reset();
                self.dodging.clear();
                self.state = EncounterState::NotStarted;
                info!("Combat ended early");

                recovered
                    .into_iter()
                    .fold(CombatResult::info("Combat ends."), |result, line| result.with_line(line))
            }
        }
    }

    /// Hand the player back, ending an active encounter first
    pub fn take_player(&mut self) -> Option<PlayerCharacter> {
        if self.is_active() {
            self.end_combat();
        }
        self.player.take()
    }

    /// Hand the enemies back (dead and fled ones included), ending an active
    /// encounter first
    pub fn take_enemies(&mut self) -> Vec<Monster> {
        if self.is_active() {
            self.end_combat();
        }
        self.fled.clear();
        std::mem::take(&mut self.enemies)
    }

    fn reset(&mut self) {
        self.state = EncounterState::NotStarted;
        self.player = None;
        self.enemies.clear();
        self.fled.clear();
        self.scheduler.clear();
        self.effects.reset();
        self.dropped_items.clear();
        self.last_attacker.clear();
        self.dodging.clear();
    }

    // ---- Turns ----

    /// Take the player's turn. `target` is a case-insensitive fragment of an
    /// enemy name; without one the first living enemy is attacked.
    pub fn player_turn(&mut self, action: &str, target: Option<&str>) -> CombatResult {
        match self.try_player_turn(action, target) {
            Ok(result) => result,
            Err(err) => {
                debug!("Rejected player action '{}': {}", action, err);
                err.into()
            }
        }
    }

    /// Run the current monster's turn
    pub fn monster_turn(&mut self) -> CombatResult {
        match self.try_monster_turn() {
            Ok(result) => result,
            Err(err) => {
                debug!("Rejected monster turn: {}", err);
                err.into()
            }
        }
    }

    /// Single step for drivers: runs a monster's turn, or reports that the
    /// player is up and what they can do
    pub fn execute_turn(&mut self) -> CombatResult {
        if !self.is_active() {
            return CombatError::NotInCombat.into();
        }
        match self.scheduler.current_id() {
            Some(id) if self.is_player(id) => {
                let actions: Vec<String> = self.available_actions().iter().map(|a| a.to_string()).collect();
                CombatResult::new(
                    ResultKind::TurnStart,
                    format!(
                        "It is {}'s turn (round {}). Actions: {}.",
                        self.name_of(id),
                        self.scheduler.round(),
                        actions.join(", ")
                    ),
                )
            }
            Some(_) => self.monster_turn(),
            None => CombatError::NotInCombat.into(),
        }
    }

    fn try_player_turn(&mut self, action: &str, target: Option<&str>) -> Result<CombatResult, CombatError> {
        self.ensure_active()?;
        let player_id = self.player.as_ref().map(|p| p.id()).ok_or(CombatError::NoPlayer)?;
        let current = self.scheduler.current_id();
        if current != Some(player_id) {
            let name = current.map(|id| self.name_of(id)).unwrap_or_default();
            return Err(CombatError::NotPlayerTurn(name));
        }

        let action: PlayerAction = action.parse()?;
        let name = self.name_of(player_id);

        if !self.effects.can_act(player_id) {
            let result = CombatResult::info(format!("{} cannot act this turn.", name));
            return Ok(self.conclude_turn(result));
        }

        let result = match action {
            PlayerAction::Attack => {
                let index = self.resolve_target(target)?;
                let outcome = self.player_strike(index)?;
                let mut result = CombatResult::from_attack(&outcome);
                if !self.enemies[index].is_alive() {
                    info!("{} defeated {}", name, outcome.defender);
                    result = result
                        .with_kind(ResultKind::EnemyDefeated)
                        .with_line(format!("{} is defeated!", outcome.defender));
                }
                result
            }
            PlayerAction::Dodge => {
                self.dodging.insert(player_id);
                CombatResult::info(format!("{} takes the Dodge action.", name))
            }
            PlayerAction::Flee => return self.player_flee(),
        };

        Ok(self.conclude_turn(result))
    }

    fn try_monster_turn(&mut self) -> Result<CombatResult, CombatError> {
        self.ensure_active()?;
        let id = self.scheduler.current_id().ok_or(CombatError::NotInCombat)?;
        let index = self.enemy_index(id).ok_or(CombatError::PlayerTurn)?;
        let name = self.enemies[index].name.clone();

        if !self.effects.can_act(id) {
            let result = CombatResult::info(format!("{} cannot act this turn.", name));
            return Ok(self.conclude_turn(result));
        }

        let view = self.view_for(index);
        let action = decide_action(&self.enemies[index], &view);
        debug!("{} ({}) decides {:?}", name, self.enemies[index].behavior, action);

        let result = match action {
            MonsterAction::Attack { target } => {
                let (outcome, annotation) = self.monster_strike(index, target)?;
                let result = CombatResult::from_attack(&outcome);
                match annotation {
                    Some(line) => result.with_kind(ResultKind::SpecialAbility).with_line(line),
                    None => result,
                }
            }
            MonsterAction::Flee => self.monster_flee(index)?,
            MonsterAction::Dodge => {
                self.dodging.insert(id);
                CombatResult::info(format!("{} takes a defensive stance.", name))
            }
            MonsterAction::Wait => CombatResult::info(format!("{} has no one left to fight.", name)),
        };

        Ok(self.conclude_turn(result))
    }

    // ---- Actions ----

    /// Player attacks enemy `index`
    fn player_strike(&mut self, index: usize) -> Result<AttackOutcome, CombatError> {
        let Self {
            player,
            enemies,
            effects,
            dice,
            rules,
            dodging,
            last_attacker,
            ..
        } = self;
        let player = player.as_ref().ok_or(CombatError::NoPlayer)?;
        let enemy = &mut enemies[index];

        let mode = attack_roll_mode(effects, player.id(), enemy.id(), dodging.contains(&enemy.id()));
        let outcome = resolve_attack(player, enemy, rules, effects, mode, dice.as_mut());
        if outcome.damage_dealt() > 0 {
            last_attacker.insert(enemy.id(), player.id());
        }
        Ok(outcome)
    }

    /// Enemy `index` attacks `target`, which must be the player. Returns the
    /// special-ability narration when one fired.
    fn monster_strike(
        &mut self,
        index: usize,
        target: CombatantId,
    ) -> Result<(AttackOutcome, Option<String>), CombatError> {
        let Self {
            config,
            rules,
            player,
            enemies,
            effects,
            dice,
            dodging,
            last_attacker,
            dropped_items,
            ..
        } = self;
        let player = player
            .as_mut()
            .filter(|p| p.id() == target)
            .ok_or(CombatError::NoPlayer)?;
        let monster = &enemies[index];

        let mode = attack_roll_mode(effects, monster.id(), player.id(), dodging.contains(&player.id()));
        let outcome = resolve_attack(monster, player, rules, effects, mode, dice.as_mut());
        if outcome.damage_dealt() > 0 {
            last_attacker.insert(player.id(), monster.id());
        }

        if !outcome.hit || !player.is_alive() {
            return Ok((outcome, None));
        }
        let Some(name) = monster.special_ability.as_deref() else {
            return Ok((outcome, None));
        };
        let Some(ability) = SpecialAbility::from_name(name) else {
            debug!("{} has unknown special ability '{}'", monster.name, name);
            return Ok((outcome, None));
        };

        let trig = abilities::trigger(
            ability,
            config.save_rule(ability),
            &monster.name,
            player,
            effects,
            dice.as_mut(),
        );
        let line = trig.describe(&monster.name, &player.name);
        if let AbilityEffect::Disarmed(weapon) = trig.effect {
            info!("{} disarmed {} of {}", monster.name, player.name, weapon.name);
            dropped_items.push(Item::Weapon(weapon));
        }
        Ok((outcome, Some(line)))
    }

    /// The player tries to leave; every enemy that can act gets a swing first
    fn player_flee(&mut self) -> Result<CombatResult, CombatError> {
        let player_id = self.player.as_ref().map(|p| p.id()).ok_or(CombatError::NoPlayer)?;
        let name = self.name_of(player_id);

        if !self.effects.can_move(player_id) {
            let result = CombatResult::info(format!("{} cannot move and fails to flee!", name));
            return Ok(self.conclude_turn(result));
        }

        let attackers: Vec<usize> = (0..self.enemies.len())
            .filter(|&i| {
                let id = self.enemies[i].id();
                self.in_fight(id) && self.effects.can_act(id)
            })
            .collect();

        let mut result = CombatResult::info(format!("{} attempts to flee!", name));
        if attackers.is_empty() {
            result = result.with_line("No enemy is in a position to make an Opportunity Attack.");
        }

        for index in attackers {
            let (outcome, annotation) = self.monster_strike(index, player_id)?;
            result = result.with_line(format!("Opportunity Attack! {}", outcome.describe()));
            if let Some(line) = annotation {
                result = result.with_line(line);
            }
            if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
                break;
            }
        }

        if self.player.as_ref().is_some_and(|p| p.is_alive()) {
            Ok(self.finish(EndReason::Fled, result))
        } else {
            let result = result.with_line(format!("The escape failed: {} falls while fleeing.", name));
            Ok(self.finish(EndReason::Defeat, result))
        }
    }

    /// Enemy `index` breaks and runs; the player may strike as it goes
    fn monster_flee(&mut self, index: usize) -> Result<CombatResult, CombatError> {
        let id = self.enemies[index].id();
        let name = self.enemies[index].name.clone();
        let mut result = CombatResult::info(format!("{} tries to flee!", name));

        let player_can_react = self
            .player
            .as_ref()
            .is_some_and(|p| p.is_alive() && self.effects.can_act(p.id()));
        if player_can_react {
            let outcome = self.player_strike(index)?;
            result = result.with_line(format!("Opportunity Attack! {}", outcome.describe()));
            if !self.enemies[index].is_alive() {
                info!("{} was cut down while fleeing", name);
                return Ok(result
                    .with_kind(ResultKind::EnemyDefeated)
                    .with_line(format!("{} is cut down before it can escape!", name)));
            }
        }

        self.fled.insert(id);
        self.dodging.remove(&id);
        self.effects.clear(id);
        info!("{} fled the encounter", name);
        Ok(result.with_line(format!("{} flees from the battle!", name)))
    }

    // ---- Turn bookkeeping ----

    /// Check for an ending; otherwise close the current turn and move on
    fn conclude_turn(&mut self, result: CombatResult) -> CombatResult {
        if let Some(reason) = self.check_end() {
            return self.finish(reason, result);
        }
        let notes = self.end_turn_and_advance();
        result.with_notes(notes)
    }

    fn check_end(&self) -> Option<EndReason> {
        let player_down = self.player.as_ref().map_or(true, |p| !p.is_alive());
        if player_down {
            Some(EndReason::Defeat)
        } else if self.living_enemies().is_empty() {
            Some(EndReason::Victory)
        } else {
            None
        }
    }

    /// Move to a terminal state and fold the ending into `result`
    fn finish(&mut self, reason: EndReason, result: CombatResult) -> CombatResult {
        self.state = EncounterState::Over(reason);
        self.effects.reset();
        self.dodging.clear();
        let name = self.player.as_ref().map(|p| p.name.clone()).unwrap_or_default();

        match reason {
            EndReason::Victory => {
                let xp: u32 = self
                    .enemies
                    .iter()
                    .filter(|e| !e.is_alive())
                    .map(|e| e.experience)
                    .sum();
                if let Some(player) = self.player.as_mut() {
                    player.gain_experience(xp);
                }
                let recovered = self.return_dropped_items();
                info!("Victory for {} ({} XP)", name, xp);

                recovered.into_iter().fold(
                    result
                        .with_kind(ResultKind::Victory)
                        .with_line(format!("Victory! {} gains {} XP.", name, xp))
                        .with_xp(xp),
                    |result, line| result.with_line(line),
                )
            }
            EndReason::Defeat => {
                self.forfeit_dropped_items();
                info!("{} was defeated", name);
                result
                    .with_kind(ResultKind::PlayerDefeated)
                    .with_line(format!("{} has been defeated.", name))
            }
            EndReason::Fled => {
                let lost = self.forfeit_dropped_items();
                info!("{} fled the encounter", name);
                lost.into_iter().fold(
                    result
                        .with_kind(ResultKind::Fled)
                        .with_line(format!("{} fled from combat!", name)),
                    |result, line| result.with_line(line),
                )
            }
        }
    }

    /// End the current combatant's turn and move the cursor to the next one
    /// able to act
    fn end_turn_and_advance(&mut self) -> Vec<String> {
        let mut notes = Vec::new();
        if let Some(id) = self.scheduler.current_id() {
            notes.extend(self.run_turn_end(id));
        }
        notes.extend(self.advance_to_next_actor());
        notes
    }

    /// Advance past the dead and fled silently. Incapacitated combatants still
    /// get both turn boundaries so their conditions can run out.
    fn advance_to_next_actor(&mut self) -> Vec<String> {
        let mut notes = Vec::new();
        for _ in 0..self.scheduler.len() {
            self.scheduler.advance();
            let Some(id) = self.scheduler.current_id() else {
                break;
            };
            if !self.in_fight(id) {
                continue;
            }

            let name = self.name_of(id);
            notes.extend(
                self.effects
                    .process_turn_start(id)
                    .iter()
                    .map(|expiry| expiry.describe(&name)),
            );
            self.dodging.remove(&id);

            if self.effects.can_act(id) {
                break;
            }

            let condition = self
                .effects
                .effects_on(id)
                .iter()
                .find(|e| e.condition.rules().incapacitates)
                .map(|e| e.condition.to_string().to_lowercase())
                .unwrap_or_else(|| "incapacitated".to_string());
            debug!("Skipping {} ({})", name, condition);
            notes.push(format!("{} is {} and loses the turn.", name, condition));
            notes.extend(self.run_turn_end(id));
        }
        notes
    }

    fn run_turn_end(&mut self, id: CombatantId) -> Vec<String> {
        let Self {
            player,
            enemies,
            effects,
            dice,
            ..
        } = self;
        let Some(bearer) = find_combatant(player, enemies, id) else {
            return Vec::new();
        };
        effects
            .process_turn_end(bearer, dice.as_mut())
            .iter()
            .map(|expiry| expiry.describe(bearer.name()))
            .collect()
    }

    /// Move dropped items back into the player's inventory
    fn return_dropped_items(&mut self) -> Vec<String> {
        let items: Vec<Item> = self.dropped_items.drain(..).collect();
        let Some(player) = self.player.as_mut() else {
            return Vec::new();
        };
        items
            .into_iter()
            .map(|item| {
                let line = format!("{} recovers the {}.", player.name, item.name());
                player.inventory.add(item);
                line
            })
            .collect()
    }

    fn forfeit_dropped_items(&mut self) -> Vec<String> {
        self.dropped_items
            .drain(..)
            .map(|item| format!("The {} is left behind.", item.name()))
            .collect()
    }

    // ---- Helpers ----

    fn ensure_active(&self) -> Result<(), CombatError> {
        match self.state {
            EncounterState::Active => Ok(()),
            _ => Err(CombatError::NotInCombat),
        }
    }

    fn combatant(&self, id: CombatantId) -> Option<&dyn Combatant> {
        find_combatant(&self.player, &self.enemies, id)
    }

    fn is_player(&self, id: CombatantId) -> bool {
        self.player.as_ref().is_some_and(|p| p.id() == id)
    }

    fn enemy_index(&self, id: CombatantId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id() == id)
    }

    fn name_of(&self, id: CombatantId) -> String {
        self.combatant(id).map(|c| c.name().to_string()).unwrap_or_default()
    }

    /// Alive and still part of the encounter
    fn in_fight(&self, id: CombatantId) -> bool {
        !self.fled.contains(&id) && self.combatant(id).is_some_and(|c| c.is_alive())
    }

    /// Index of the enemy a player attack lands on
    fn resolve_target(&self, filter: Option<&str>) -> Result<usize, CombatError> {
        let mut living = self
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| self.in_fight(e.id()));

        match filter.map(str::trim).filter(|f| !f.is_empty()) {
            None => living.next().map(|(i, _)| i).ok_or(CombatError::NoEnemies),
            Some(filter) => {
                let needle = filter.to_lowercase();
                living
                    .find(|(_, e)| e.name.to_lowercase().contains(&needle))
                    .map(|(i, _)| i)
                    .ok_or_else(|| CombatError::UnknownTarget(filter.to_string()))
            }
        }
    }

    fn view_for(&self, index: usize) -> EncounterView {
        let id = self.enemies[index].id();
        EncounterView {
            candidates: self
                .player
                .iter()
                .map(|p| TargetCandidate::from_combatant(p))
                .collect(),
            last_attacker: self.last_attacker.get(&id).copied(),
            can_move: self.effects.can_move(id),
        }
    }

    // ---- Queries ----

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == EncounterState::Active
    }

    /// Current round, 0 before the first encounter starts
    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    /// Whose turn it is while combat is active
    pub fn current_combatant(&self) -> Option<&dyn Combatant> {
        if !self.is_active() {
            return None;
        }
        self.scheduler.current_id().and_then(|id| self.combatant(id))
    }

    pub fn is_player_turn(&self) -> bool {
        self.is_active() && self.scheduler.current_id().is_some_and(|id| self.is_player(id))
    }

    /// Every participant, in initiative order once rolled
    pub fn participants(&self) -> Vec<&dyn Combatant> {
        if self.scheduler.is_empty() {
            let player = self.player.iter().map(|p| p as &dyn Combatant);
            return player.chain(self.enemies.iter().map(|e| e as &dyn Combatant)).collect();
        }
        self.scheduler
            .order()
            .iter()
            .filter_map(|entry| self.combatant(entry.combatant))
            .collect()
    }

    /// All enemies, including the defeated and the fled
    pub fn enemies(&self) -> &[Monster] {
        &self.enemies
    }

    /// Enemies still alive and still fighting
    pub fn living_enemies(&self) -> Vec<&Monster> {
        self.enemies
            .iter()
            .filter(|e| e.is_alive() && !self.fled.contains(&e.id()))
            .collect()
    }

    pub fn player(&self) -> Option<&PlayerCharacter> {
        self.player.as_ref()
    }

    pub fn initiative_order(&self) -> &[InitiativeEntry] {
        self.scheduler.order()
    }

    /// Whoever most recently damaged `id`
    pub fn last_attacker(&self, id: CombatantId) -> Option<&dyn Combatant> {
        self.last_attacker.get(&id).and_then(|attacker| self.combatant(*attacker))
    }

    /// Items knocked loose this encounter
    pub fn dropped_items(&self) -> &[Item] {
        &self.dropped_items
    }

    pub fn has_fled(&self, id: CombatantId) -> bool {
        self.fled.contains(&id)
    }

    pub fn is_dodging(&self, id: CombatantId) -> bool {
        self.dodging.contains(&id)
    }

    pub fn effects(&self) -> &EffectManager {
        &self.effects
    }

    /// For applying or clearing conditions from outside the engine
    pub fn effects_mut(&mut self) -> &mut EffectManager {
        &mut self.effects
    }

    /// Condition summary for a participant
    pub fn status_display(&self, id: CombatantId) -> Option<String> {
        self.combatant(id).map(|c| self.effects.status_display(c))
    }

    /// What the player may do right now
    pub fn available_actions(&self) -> Vec<PlayerAction> {
        let Some(player) = &self.player else {
            return Vec::new();
        };
        if !self.is_active() || !self.effects.can_act(player.id()) {
            return Vec::new();
        }
        let mut actions = vec![PlayerAction::Attack, PlayerAction::Dodge];
        if self.effects.can_move(player.id()) {
            actions.push(PlayerAction::Flee);
        }
        actions
    }
}
