//! Headless arena simulator.
//!
//! Loads combat content, runs a scripted player against the boss brain at
//! the configured tick rate, logs presentation events and prints the outcome
//! with the final state digest.
//!
//! # Examples
//!
//! ```bash
//! # Bundled content, scripted duel
//! cargo run -p arena-headless -- --seconds 90
//!
//! # Custom tuning, idle player, JSON summary
//! RUST_LOG=debug cargo run -p arena-headless -- --config combat.toml --script idle --json
//! ```
mod script;
mod sink;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use combat_content::{
    ArenaLoader, ArenaSpec, BindingsLoader, BoundsSpec, ConfigLoader, ContentFactory,
};
use combat_core::{ActorId, BoundInputSource, CombatConfig, InputBindings};
use runtime::{Arena, ArenaEvent, CircleArena, EncounterOutcome, FixedSpawns, RectArena};

use script::{Script, ScriptKind};
use sink::TracingSink;

#[derive(Debug, Parser)]
#[command(name = "arena-sim", about = "Run a headless boss encounter")]
struct Args {
    /// Directory holding combat.toml, bindings.ron and arena.ron
    #[arg(long, env = "ARENA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Combat tuning (TOML); overrides the data directory
    #[arg(long, env = "ARENA_CONFIG")]
    config: Option<PathBuf>,

    /// Input bindings (RON); overrides the data directory
    #[arg(long, env = "ARENA_BINDINGS")]
    bindings: Option<PathBuf>,

    /// Arena layout (RON); overrides the data directory
    #[arg(long, env = "ARENA_LAYOUT")]
    arena: Option<PathBuf>,

    /// Simulated seconds before giving up on a decision
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Scripted player behaviour
    #[arg(long, value_enum, default_value_t = ScriptKind::Duel)]
    script: ScriptKind,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

struct Content {
    config: CombatConfig,
    bindings: InputBindings,
    arena: ArenaSpec,
}

#[derive(Debug, Serialize)]
struct Summary {
    outcome: Option<EncounterOutcome>,
    ticks: u64,
    seconds: f32,
    player_health: f32,
    boss_health: f32,
    boss_phase: u8,
    player_hits: usize,
    boss_hits: usize,
    position_corrections: usize,
    digest: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let content = load_content(&args)?;
    let summary = run(&args, content)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        match summary.outcome {
            Some(EncounterOutcome::PlayerVictory) => println!("Boss defeated"),
            Some(EncounterOutcome::PlayerDefeated) => println!("You died"),
            None => println!("Undecided after {:.1}s", summary.seconds),
        }
        println!(
            "ticks={} player_hp={:.0} boss_hp={:.0} boss_phase={} hits={}/{}",
            summary.ticks,
            summary.player_health,
            summary.boss_health,
            summary.boss_phase,
            summary.player_hits,
            summary.boss_hits
        );
        println!("digest={}", summary.digest);
    }
    Ok(())
}

fn load_content(args: &Args) -> Result<Content> {
    let factory = args.data_dir.as_ref().map(ContentFactory::new);
    if let Some(factory) = &factory {
        tracing::info!("Loading content from {}", factory.data_dir().display());
    }

    let config = match (&args.config, &factory) {
        (Some(path), _) => ConfigLoader::load(path)?,
        (None, Some(factory)) => factory.load_config()?,
        (None, None) => combat_content::bundled_config()?,
    };
    let bindings = match (&args.bindings, &factory) {
        (Some(path), _) => BindingsLoader::load(path)?,
        (None, Some(factory)) => factory.load_bindings()?,
        (None, None) => combat_content::bundled_bindings()?,
    };
    let arena = match (&args.arena, &factory) {
        (Some(path), _) => ArenaLoader::load(path)?,
        (None, Some(factory)) => factory.load_arena()?,
        (None, None) => combat_content::bundled_arena()?,
    };

    Ok(Content {
        config,
        bindings,
        arena,
    })
}

fn build_arena(content: &Content) -> Result<Arena> {
    let spec = &content.arena;
    let builder = Arena::builder()
        .combat(content.config.clone())
        .spawns(FixedSpawns::new(spec.player_spawn.into(), spec.boss_spawn.into()));
    let builder = match spec.bounds {
        BoundsSpec::Circle { center, radius } => {
            builder.bounds(CircleArena::new(center.into(), radius))
        }
        BoundsSpec::Rect { min, max } => builder.bounds(RectArena::new(min.into(), max.into())),
    };
    Ok(builder.build()?)
}

fn run(args: &Args, content: Content) -> Result<Summary> {
    let mut arena = build_arena(&content)?;
    let mut input = BoundInputSource::new(content.bindings.clone())?;
    let mut script = args.script.build(content.bindings);
    let mut sink = TracingSink::default();

    let max_ticks = (args.seconds.max(0.0) / arena.dt()).ceil() as u64;
    let mut player_hits = 0;
    let mut boss_hits = 0;
    let mut position_corrections = 0;

    tracing::info!(
        "Running {:?} script for up to {} ticks ({:.1}s)",
        args.script,
        max_ticks,
        args.seconds
    );

    while arena.tick() < max_ticks {
        let raw = script.frame(&arena);
        let intent = input.update(&raw);
        let report = arena.step(&intent);
        sink.set_tick(report.tick);
        report.dispatch(&mut sink);

        for hit in &report.hits {
            if hit.attacker == ActorId::PLAYER {
                player_hits += 1;
            } else {
                boss_hits += 1;
            }
        }
        position_corrections += report
            .arena_events
            .iter()
            .filter(|event| matches!(event, ArenaEvent::PositionCorrected { .. }))
            .count();

        if arena.is_over() {
            break;
        }
    }

    Ok(Summary {
        outcome: arena.outcome(),
        ticks: arena.tick(),
        seconds: arena.tick() as f32 * arena.dt(),
        player_health: arena.player().actor().health().current(),
        boss_health: arena.boss().actor().health().current(),
        boss_phase: arena.boss().current_phase(),
        player_hits,
        boss_hits,
        position_corrections,
        digest: hex::encode(arena.digest()),
    })
}
