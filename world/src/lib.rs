#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Tilemerge.
//!
//! The [`World`] owns the current [`GameState`], the undo history and the
//! seeded random source. Every mutation goes through [`apply`], which either
//! commits a command completely or leaves the world untouched.

mod history;

pub use history::HistoryStack;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tilemerge_core::{
    Command, ConfigIssue, Direction, EngineError, Event, GameConfig, Grid, MoveRejection,
    WELCOME_BANNER,
};
use tilemerge_system_movement as movement;
use tilemerge_system_spawning::Spawner;
use tracing::{debug, info};

/// Whether the game still accepts moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// At least one direction changes the board.
    Playing,
    /// No direction changes the board.
    GameOver,
}

/// Immutable value describing one point in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    grid: Grid,
    score: u64,
    move_count: u64,
    game_over: bool,
}

impl GameState {
    /// Creates a state from its parts, deriving the game-over flag from the grid.
    pub fn from_parts(grid: Grid, score: u64, move_count: u64) -> Result<Self, EngineError> {
        let game_over = movement::is_terminal(&grid)?;
        Ok(Self {
            grid,
            score,
            move_count,
            game_over,
        })
    }

    /// Board contents.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Number of successful moves.
    #[must_use]
    pub const fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Reports whether no move can change the board.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Current phase of the game.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }
}

/// State captured before a move, together with the random source at that
/// point, so undo reproduces later spawns exactly.
#[derive(Clone, Debug)]
struct Snapshot {
    state: GameState,
    rng: ChaCha8Rng,
}

/// Represents the authoritative Tilemerge game.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    spawner: Spawner,
    state: GameState,
    history: HistoryStack<Snapshot>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world from `config` and seeds the initial tiles using a
    /// random source derived from `seed`.
    ///
    /// Use [`World::start`] to receive the events describing the first board.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Self::start(config, seed, &mut Vec::new())
    }

    /// Creates a world like [`World::new`] and reports the first board
    /// through the same events a [`Command::NewGame`] emits.
    pub fn start(
        config: GameConfig,
        seed: u64,
        out_events: &mut Vec<Event>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let spawner = Spawner::new(&config.value_distribution)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut events = Vec::new();
        let state = seed_board(&config, &spawner, &mut rng, &mut events)?;
        out_events.extend(events);

        Ok(Self {
            banner: WELCOME_BANNER,
            history: HistoryStack::new(config.max_undo_depth),
            config,
            spawner,
            state,
            rng,
        })
    }

    /// Creates a world that resumes from an existing state.
    ///
    /// The state's board must match the configured dimensions.
    pub fn from_state(config: GameConfig, seed: u64, state: GameState) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = state.grid();
        if grid.width() != config.board_width || grid.height() != config.board_height {
            return Err(ConfigIssue::DimensionMismatch {
                width: grid.width(),
                height: grid.height(),
                expected_width: config.board_width,
                expected_height: config.board_height,
            }
            .into());
        }

        Ok(Self {
            banner: WELCOME_BANNER,
            spawner: Spawner::new(&config.value_distribution)?,
            history: HistoryStack::new(config.max_undo_depth),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            state,
        })
    }

    fn apply_move(
        &mut self,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<(), EngineError> {
        if self.state.game_over {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::GameOver,
            });
            return Ok(());
        }

        let outcome = movement::apply(&self.state.grid, direction)?;
        if !outcome.changed {
            debug!(%direction, "move left the board unchanged");
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::Blocked,
            });
            return Ok(());
        }

        let mut rng = self.rng.clone();
        let spawn = self.spawner.place(&outcome.grid, &mut rng)?;
        let next = GameState::from_parts(
            spawn.grid,
            self.state.score.saturating_add(outcome.score_delta),
            self.state.move_count.saturating_add(1),
        )?;

        let previous = Snapshot {
            state: std::mem::replace(&mut self.state, next),
            rng: std::mem::replace(&mut self.rng, rng),
        };
        self.history.push(previous);

        debug!(
            %direction,
            score_delta = outcome.score_delta,
            score = self.state.score,
            move_count = self.state.move_count,
            "board shifted"
        );
        out_events.push(Event::BoardShifted {
            direction,
            score_delta: outcome.score_delta,
        });
        if let Some(placed) = spawn.placed {
            out_events.push(Event::TileSpawned {
                cell: placed.cell,
                tile: placed.tile,
            });
        }
        if self.state.game_over {
            info!(
                score = self.state.score,
                move_count = self.state.move_count,
                "game over"
            );
            out_events.push(Event::GameOver {
                score: self.state.score,
            });
        }
        Ok(())
    }

    fn undo(&mut self, out_events: &mut Vec<Event>) {
        let Some(snapshot) = self.history.pop() else {
            debug!("nothing to undo");
            out_events.push(Event::NothingToUndo);
            return;
        };

        self.state = snapshot.state;
        self.rng = snapshot.rng;
        debug!(
            move_count = self.state.move_count,
            remaining = self.history.len(),
            "move undone"
        );
        out_events.push(Event::MoveUndone {
            move_count: self.state.move_count,
        });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) -> Result<(), EngineError> {
        let mut rng = self.rng.clone();
        let mut events = Vec::new();
        let state = seed_board(&self.config, &self.spawner, &mut rng, &mut events)?;

        self.state = state;
        self.rng = rng;
        self.history.clear();
        info!(
            width = self.config.board_width,
            height = self.config.board_height,
            "new game started"
        );

        out_events.extend(events);
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Moves that leave the board unchanged, moves after the game ended and undo
/// requests with an empty history are reported through events rather than
/// errors. An error means the world was left exactly as it was.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    match command {
        Command::Move { direction } => world.apply_move(direction, out_events),
        Command::Undo => {
            world.undo(out_events);
            Ok(())
        }
        Command::NewGame => world.restart(out_events),
    }
}

/// Seeds a fresh board, reporting `GameStarted`, every placed tile and
/// `GameOver` when the new board is already terminal.
fn seed_board(
    config: &GameConfig,
    spawner: &Spawner,
    rng: &mut ChaCha8Rng,
    out_events: &mut Vec<Event>,
) -> Result<GameState, EngineError> {
    out_events.push(Event::GameStarted);
    let mut grid = Grid::new(config.board_width, config.board_height)?;
    for _ in 0..config.initial_tiles {
        let outcome = spawner.place(&grid, rng)?;
        if let Some(placed) = outcome.placed {
            out_events.push(Event::TileSpawned {
                cell: placed.cell,
                tile: placed.tile,
            });
        }
        grid = outcome.grid;
    }

    let state = GameState::from_parts(grid, 0, 0)?;
    if state.game_over {
        out_events.push(Event::GameOver { score: 0 });
    }
    Ok(state)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{GameState, Phase, World};
    use tilemerge_core::{GameConfig, Grid, Tile, WINNING_TILE};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Provides read-only access to the current game state.
    #[must_use]
    pub fn state(world: &World) -> &GameState {
        &world.state
    }

    /// Provides read-only access to the current board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        world.state.grid()
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.state.score()
    }

    /// Number of successful moves in the current state.
    #[must_use]
    pub fn move_count(world: &World) -> u64 {
        world.state.move_count()
    }

    /// Current phase of the game.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.state.phase()
    }

    /// Reports whether the game has ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.state.is_game_over()
    }

    /// Number of moves that can currently be undone.
    #[must_use]
    pub fn history_depth(world: &World) -> usize {
        world.history.len()
    }

    /// Reports whether an undo would restore a previous state.
    #[must_use]
    pub fn can_undo(world: &World) -> bool {
        !world.history.is_empty()
    }

    /// Largest tile on the board, if any.
    #[must_use]
    pub fn best_tile(world: &World) -> Option<Tile> {
        world.state.grid().highest_tile()
    }

    /// Reports whether the board holds a tile of at least [`WINNING_TILE`].
    #[must_use]
    pub fn has_won(world: &World) -> bool {
        best_tile(world).is_some_and(|tile| tile.value() >= WINNING_TILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge_core::{SpawnWeight, ValueDistribution};

    fn config(width: u32, height: u32) -> GameConfig {
        GameConfig {
            board_width: width,
            board_height: height,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_world_seeds_initial_tiles() {
        let world = World::new(GameConfig::default(), 42).expect("valid config");

        assert_eq!(query::grid(&world).area() - query::grid(&world).empty_count(), 2);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::move_count(&world), 0);
        assert_eq!(query::phase(&world), Phase::Playing);
        assert!(!query::can_undo(&world));
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn start_reports_the_first_board() {
        let mut events = Vec::new();
        let world = World::start(GameConfig::default(), 42, &mut events).expect("valid config");

        assert_eq!(events.first(), Some(&Event::GameStarted));
        let spawned: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::TileSpawned { cell, tile } => Some((*cell, *tile)),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2);
        for (cell, tile) in spawned {
            assert_eq!(query::grid(&world).get(cell), Ok(Some(tile)));
        }
        let silent = World::new(GameConfig::default(), 42).expect("valid config");
        assert_eq!(query::state(&world), query::state(&silent));
    }

    #[test]
    fn start_on_terminal_board_reports_game_over() {
        let mut events = Vec::new();
        let config = GameConfig {
            initial_tiles: 1,
            ..config(1, 1)
        };
        let _world = World::start(config, 3, &mut events).expect("valid config");

        assert_eq!(events.first(), Some(&Event::GameStarted));
        assert_eq!(events.last(), Some(&Event::GameOver { score: 0 }));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let error = World::new(config(0, 4), 1).expect_err("zero width must fail");
        assert_eq!(error, EngineError::InvalidConfiguration(ConfigIssue::ZeroWidth));

        let empty = GameConfig {
            value_distribution: ValueDistribution::new(Vec::new()),
            ..GameConfig::default()
        };
        assert!(matches!(
            World::new(empty, 1),
            Err(EngineError::InvalidConfiguration(ConfigIssue::EmptyDistribution))
        ));
    }

    #[test]
    fn single_cell_board_starts_terminal() {
        let world = World::new(
            GameConfig {
                initial_tiles: 1,
                ..config(1, 1)
            },
            3,
        )
        .expect("valid config");

        assert!(query::is_game_over(&world));
    }

    #[test]
    fn from_state_requires_matching_dimensions() {
        let grid = Grid::from_rows(&[&[2, 0]]).expect("valid rows");
        let state = GameState::from_parts(grid, 0, 0).expect("valid state");

        assert!(matches!(
            World::from_state(config(4, 4), 1, state),
            Err(EngineError::InvalidConfiguration(ConfigIssue::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn failed_move_leaves_history_untouched() {
        let grid = Grid::from_rows(&[&[2, 0], &[4, 0]]).expect("valid rows");
        let state = GameState::from_parts(grid, 0, 0).expect("valid state");
        let only_twos = GameConfig {
            value_distribution: ValueDistribution::new(vec![SpawnWeight::new(2, 1)]),
            ..config(2, 2)
        };
        let mut world = World::from_state(only_twos, 5, state.clone()).expect("valid world");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Move {
                direction: Direction::Left,
            },
            &mut events,
        )
        .expect("move applies");

        assert_eq!(
            events,
            vec![Event::MoveRejected {
                direction: Direction::Left,
                reason: MoveRejection::Blocked,
            }]
        );
        assert_eq!(query::state(&world), &state);
        assert_eq!(query::history_depth(&world), 0);
    }
}
