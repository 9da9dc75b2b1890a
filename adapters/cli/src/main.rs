#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Tilemerge in the terminal.
//!
//! Gestures are read line by line from stdin, the board is drawn to stdout
//! and diagnostics go to stderr through `tracing`.

mod input;
mod presenter;
mod settings;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tilemerge_core::{Event, MoveRejection};
use tilemerge_rendering::{Presenter, Scene, TilePalette};
use tilemerge_system_bootstrap::Bootstrap;
use tilemerge_world::{self as world, query, World};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    input::{parse_input, InputEvent, CONTROLS},
    presenter::{LedPresenter, PlainPresenter},
    settings::{Args, Settings},
};

/// Entry point for the Tilemerge command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    initialize_tracing();

    let settings = Settings::resolve(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    debug!(seed, "seeding random source");

    let mut events = Vec::new();
    let mut world = World::start(settings.game.clone(), seed, &mut events)
        .context("failed to start a new game")?;
    let mut presenter: Box<dyn Presenter> = if args.plain {
        Box::new(PlainPresenter::new(io::stdout()))
    } else {
        Box::new(LedPresenter::new(
            io::stdout(),
            TilePalette::classic(),
            settings.display.width,
            settings.display.height,
        ))
    };

    let bootstrap = Bootstrap;
    println!("{}", bootstrap.greeting(&world));
    println!("{CONTROLS}");
    report(&world, &events);
    present(presenter.as_mut(), &world)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read player input")?;
        let input = match parse_input(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(error) => {
                warn!(%error, "ignoring input");
                println!("{error}. {CONTROLS}");
                continue;
            }
        };

        match input {
            InputEvent::Quit => break,
            InputEvent::ToggleBrightness => presenter.toggle_low_light(),
            InputEvent::Command(command) => {
                let mut events = Vec::new();
                world::apply(&mut world, command, &mut events)?;
                report(&world, &events);
            }
        }
        present(presenter.as_mut(), &world)?;
    }

    print_summary(&world);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn present(presenter: &mut dyn Presenter, world: &World) -> Result<()> {
    presenter
        .present(&Scene::from_state(query::state(world)))
        .context("failed to draw the board")
}

fn report(world: &World, events: &[Event]) {
    let won = query::has_won(world);
    for message in events.iter().filter_map(|event| describe(event, won)) {
        println!("{message}");
    }
}

/// Player-facing line for `event`, if it deserves one.
fn describe(event: &Event, won: bool) -> Option<String> {
    match event {
        Event::BoardShifted { score_delta, .. } if *score_delta > 0 => {
            Some(format!("+{score_delta} points!"))
        }
        Event::MoveRejected {
            direction,
            reason: MoveRejection::Blocked,
        } => Some(format!("Nothing moves {direction}.")),
        Event::MoveRejected {
            reason: MoveRejection::GameOver,
            ..
        } => Some("The game is over. Undo a move or start a new game.".to_owned()),
        Event::MoveUndone { .. } => Some("Took back a move.".to_owned()),
        Event::NothingToUndo => Some("Nothing to undo.".to_owned()),
        Event::GameStarted => Some("New game!".to_owned()),
        Event::GameOver { score } => {
            let verdict = if won { "You won!" } else { "Game over!" };
            Some(format!("{verdict} Final score: {score}"))
        }
        Event::BoardShifted { .. } | Event::TileSpawned { .. } => None,
    }
}

fn print_summary(world: &World) {
    let best = query::best_tile(world).map_or(0, |tile| tile.value());
    println!(
        "Final score: {}  Moves: {}  Best tile: {best}",
        query::score(world),
        query::move_count(world)
    );
    if query::has_won(world) {
        println!("You won!");
    }
}
