//! skirmish - headless encounter simulator
//!
//! Runs one encounter with a stock fighter against a pack of goblins and
//! prints every result. Useful for eyeballing balance changes and for
//! replaying a seed.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use skirmish::combat::{DamageType, DiceRoll};
use skirmish::combatant::{Ability, AbilityScores, Behavior};
use skirmish::items::{Armor, ArmorKind, Weapon};
use skirmish::{CombatConfig, CombatResult, CombatSystem, Combatant, Monster, PlayerCharacter};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Headless combat simulator
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Simulate a skirmish encounter")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dice seed (overrides the configuration)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of goblins to fight
    #[arg(short, long, default_value_t = 2)]
    goblins: usize,

    /// Give up after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: usize,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    /// Write logs to stderr as JSON
    #[arg(long)]
    json_logs: bool,
}

fn hero() -> PlayerCharacter {
    PlayerCharacter::new("Aric", 3, AbilityScores::new(16, 13, 14, 10, 12, 8), 28)
        .with_weapon(Weapon::new("Longsword", DiceRoll::new(1, 8, 0), DamageType::Slashing))
        .with_armor(Armor::new("Chain Mail", ArmorKind::Heavy, 16))
        .with_save_proficiency(Ability::Strength)
        .with_save_proficiency(Ability::Constitution)
}

fn goblin_pack(count: usize) -> Vec<Monster> {
    let template = Monster::new("Goblin", 7, 15)
        .with_attack("scimitar", 4, DiceRoll::new(1, 6, 2), DamageType::Slashing)
        .with_abilities(AbilityScores::new(8, 14, 10, 10, 8, 8))
        .with_behavior(Behavior::Cowardly)
        .with_experience(50);
    let boss = Monster::new("Goblin Boss", 21, 17)
        .with_attack("hooked spear", 4, DiceRoll::new(1, 8, 2), DamageType::Piercing)
        .with_abilities(AbilityScores::new(10, 14, 10, 10, 8, 10))
        .with_behavior(Behavior::Tactical)
        .with_special_ability("Disarm")
        .with_experience(200);

    let mut pack: Vec<Monster> = (1..=count)
        .map(|n| {
            let mut goblin = template.spawn();
            goblin.name = format!("Goblin {}", n);
            goblin
        })
        .collect();
    pack.push(boss.spawn());
    pack
}

fn emit(result: &CombatResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else {
        println!("{}\n", result);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=info".into()),
        )
        .with(
            args.json_logs
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!args.json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    if let Some(path) = &args.config {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let mut config = CombatConfig::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.dice_seed = args.seed;
    }
    info!("Dice seed: {:?}", config.dice_seed);

    let mut combat = CombatSystem::new(config);
    let start = combat.start(hero(), goblin_pack(args.goblins));
    emit(&start, args.json)?;
    if start.is_error() {
        bail!("{}", start.message());
    }

    for _ in 0..args.max_turns {
        let result = if combat.is_player_turn() {
            combat.player_turn("attack", None)
        } else {
            combat.execute_turn()
        };
        emit(&result, args.json)?;

        if result.is_error() {
            bail!("{}", result.message());
        }
        if !combat.is_active() {
            break;
        }
    }

    if combat.is_active() {
        let ended = combat.end_combat();
        emit(&ended, args.json)?;
    }

    if let Some(player) = combat.take_player() {
        info!(
            "{} finished with {}/{} HP and {} XP",
            player.name,
            player.hit_points().current(),
            player.hit_points().max(),
            player.experience
        );
    }
    Ok(())
}
