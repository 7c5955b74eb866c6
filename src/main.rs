//! Queue Duel CLI - automated duel runner
//!
//! Loads settings from the JSON file given as the first argument (defaults
//! otherwise) and plays the duel between two automated playstyles.

use std::process::ExitCode;

use queue_duel::config::Settings;
use queue_duel::game::Side;
use queue_duel::Duel;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    if let Err(e) = settings.ensure_automated() {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    println!("Queue Duel");
    println!("==========");
    println!();
    println!("  - First:  {} ({:?})", settings.first.name, settings.first.playstyle);
    println!("  - Second: {} ({:?})", settings.second.name, settings.second.playstyle);
    match settings.search.depth_limit {
        Some(limit) => println!("  - Search depth limit: {}", limit),
        None => println!("  - Search depth limit: none"),
    }
    println!();

    let mut duel = Duel::new(settings);
    let summary = duel.run();

    println!("Final state after {} turns:", summary.turns);
    println!("  {}", duel.queue().character(Side::First));
    println!("  {}", duel.queue().character(Side::Second));
    match summary.winner {
        Some(side) => println!("Winner: {}", duel.queue().character(side).name()),
        None if summary.finished => println!("Tie"),
        None => println!("No result: the duel was stopped early"),
    }

    ExitCode::SUCCESS
}
