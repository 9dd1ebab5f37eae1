//! Breath simulation runner.
//!
//! Drives one engine over a scripted subject and environment and prints what
//! it would have drawn. Useful for tuning configuration files without a game
//! client.

use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use breath_core::{
    default_config_toml, BreathConfig, DebugCategory, Engine, FabricSeasons, FabricState,
    PlaceholderSeasons, SereneSeasons, SereneState, VanillaSeasons,
};
use breath_events::{
    days_elapsed, BreathEvent, EmitKind, EnvironmentSample, SeasonMod, SeasonPhase, SubjectState,
    SEASON_PHASE_COUNT, TICKS_PER_DAY,
};

/// Scripted subject behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Standing still at full health
    Rest,
    /// Sprinting for the first half, then resting
    Sprint,
    /// Standing still at low health
    Wounded,
    /// Submerged the whole time
    Dive,
    /// Resting through the condensation window in a mild biome
    Dawn,
    /// Rest, sprint, wounded and dive in equal quarters
    Mixed,
}

/// Season provider to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeasonProvider {
    None,
    Placeholder,
    Serene,
    Fabric,
}

/// Command line arguments for the breath simulation
#[derive(Parser, Debug)]
#[command(name = "breath_sim")]
#[command(about = "Simulates breath eligibility and scheduling for one subject")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1200)]
    ticks: u64,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scripted subject behaviour
    #[arg(long, value_enum, default_value_t = Scenario::Rest)]
    scenario: Scenario,

    /// Biome temperature (defaults depend on the scenario)
    #[arg(long)]
    temperature: Option<f64>,

    /// World time of the first tick
    #[arg(long, default_value_t = 0)]
    start_time: u64,

    /// Season provider to simulate
    #[arg(long, value_enum, default_value_t = SeasonProvider::None)]
    seasons: SeasonProvider,

    /// Print outcomes and breath events as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the final status snapshot
    #[arg(long)]
    status: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => BreathConfig::from_file(path)?,
        None => BreathConfig::default(),
    };

    let mut engine = Engine::with_seed(args.seed);
    match args.seasons {
        SeasonProvider::None => engine.set_season_source(Box::new(VanillaSeasons)),
        SeasonProvider::Placeholder => {
            engine.set_season_source(Box::new(PlaceholderSeasons::new(SeasonMod::SereneSeasons)))
        }
        SeasonProvider::Serene => engine.set_season_source(Box::new(SereneSeasons::from_fn(
            |world_time| Ok(Some(scripted_serene_state(world_time))),
        ))),
        SeasonProvider::Fabric => engine.set_season_source(Box::new(FabricSeasons::from_fn(
            |world_time| Ok(Some(scripted_fabric_state(world_time))),
        ))),
    }

    let events = Rc::new(RefCell::new(Vec::<BreathEvent>::new()));
    let sink = Rc::clone(&events);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    if !args.json {
        println!("Breath Simulation");
        println!("=================");
        println!("Seed: {}", args.seed);
        println!("Ticks: {}", args.ticks);
        println!("Scenario: {:?}", args.scenario);
        println!("Seasons: {:?}", args.seasons);
        println!();
    }

    let mut air = 0u64;
    let mut bubbles = 0u64;
    let mut last_env = scripted_environment(args, 0);
    let mut last_subject = scripted_subject(args.scenario, 0, args.ticks);

    for t in 0..args.ticks {
        let env = scripted_environment(args, t);
        let subject = scripted_subject(args.scenario, t, args.ticks);
        let outcome = engine.step(&env, &subject, &config);

        if outcome.emitted {
            match outcome.emit_kind {
                EmitKind::Air => air += 1,
                EmitKind::Underwater => bubbles += 1,
                EmitKind::None => {}
            }
            if args.json {
                println!("{}", serde_json::to_string(&outcome)?);
            } else {
                println!("tick {:>6}: {:?}", env.world_time, outcome.emit_kind);
            }
        }

        for event in events.borrow_mut().drain(..) {
            if args.json {
                println!("{}", event.to_jsonl()?);
            }
        }

        last_env = env;
        last_subject = subject;
    }

    if !args.json {
        println!();
        println!("Air puffs: {}", air);
        println!("Bubbles: {}", bubbles);
        println!("Last eligibility: {}", engine.explain(&last_env, &last_subject, &config));
    }

    if args.status {
        let status = engine.status(&last_env, &last_subject, &config);
        if args.json {
            println!("{}", serde_json::to_string(&status)?);
        } else {
            println!();
            for category in DebugCategory::all() {
                println!("[{}]", category.title());
                for line in status.lines_for(*category) {
                    println!("  {}", line.text);
                }
            }
        }
    }

    Ok(())
}

fn default_temperature(scenario: Scenario) -> f64 {
    match scenario {
        Scenario::Dawn => 0.5,
        _ => 0.1,
    }
}

fn scripted_environment(args: &Args, t: u64) -> EnvironmentSample {
    let temperature = args
        .temperature
        .unwrap_or_else(|| default_temperature(args.scenario));
    let start_day_time = match args.scenario {
        Scenario::Dawn => 22_000,
        _ => args.start_time % TICKS_PER_DAY,
    };
    EnvironmentSample::new(args.start_time + t, temperature).with_day_time(start_day_time + t)
}

fn scripted_subject(scenario: Scenario, t: u64, total: u64) -> SubjectState {
    let resting = SubjectState::resting();
    match scenario {
        Scenario::Rest | Scenario::Dawn => resting,
        Scenario::Sprint => resting.sprinting(t < total / 2),
        Scenario::Wounded => resting.with_health(4.0, 20.0),
        Scenario::Dive => resting.submerged(true),
        Scenario::Mixed => match t * 4 / total.max(1) {
            0 => resting,
            1 => resting.sprinting(true),
            2 => resting.with_health(4.0, 20.0),
            _ => resting.submerged(true),
        },
    }
}

/// One sub-season per in-game day over a 96-day cycle.
fn scripted_serene_state(world_time: u64) -> SereneState {
    let day = days_elapsed(world_time);
    let phase = SeasonPhase::from_ordinal((day % SEASON_PHASE_COUNT as u64) as usize);
    SereneState {
        sub_season: phase.to_string().replace(' ', "_").to_uppercase(),
        day: (day % 96) as u32,
        cycle_ticks: (TICKS_PER_DAY * 96) as u32,
    }
}

/// One season per in-game day. Indices run winter, autumn, spring, summer.
fn scripted_fabric_state(world_time: u64) -> FabricState {
    let (season, index) = match days_elapsed(world_time) % 4 {
        0 => ("SPRING", 2),
        1 => ("SUMMER", 3),
        2 => ("FALL", 1),
        _ => ("WINTER", 0),
    };
    FabricState {
        season: season.to_string(),
        temperature_index: Some(index),
    }
}
