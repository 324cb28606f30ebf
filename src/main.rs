use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use space_tactics::cli::Args;
use space_tactics::config::SettingsStore;
use space_tactics::models::errors::GameResult;
use space_tactics::services::game::Game;
use space_tactics::GameEngine;

fn settings_store(args: &Args) -> SettingsStore {
    let mut store = SettingsStore::new();
    if let Some(path) = &args.config {
        store.set_location(path);
    } else if let Some(home) = std::env::var_os("HOME") {
        store.set_location(PathBuf::from(home).join(".space-tactics").join("settings.json"));
    }
    store
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(args: Args) -> GameResult<()> {
    let settings = settings_store(&args).load_or_create()?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("starting with seed {}", seed);

    let mut engine = GameEngine::new(settings, args.skill.into(), args.length.into(), seed);
    if let Some(path) = &args.save {
        engine = engine.with_save_path(path);
    }
    if let Some(path) = &args.load {
        engine.restore(&fs::read_to_string(path)?)?;
    }

    println!("*** SPACE TACTICS ***");
    println!();
    Game::console(engine).run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
