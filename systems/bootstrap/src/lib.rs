#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Tilemerge session.

use tilemerge_core::Grid;
use tilemerge_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the session starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Builds the full greeting, including the board size and how many moves
    /// can be taken back.
    #[must_use]
    pub fn greeting(&self, world: &World) -> String {
        let config = query::config(world);
        let undo = match config.max_undo_depth {
            0 => "Undo is disabled.".to_owned(),
            1 => "You can undo your last move.".to_owned(),
            depth => format!("You can undo up to {depth} moves."),
        };
        format!(
            "{} Playing on a {}x{} board. {undo}",
            self.welcome_banner(world),
            config.board_width,
            config.board_height,
        )
    }

    /// Exposes the board required for rendering.
    #[must_use]
    pub fn grid<'world>(&self, world: &'world World) -> &'world Grid {
        query::grid(world)
    }
}
