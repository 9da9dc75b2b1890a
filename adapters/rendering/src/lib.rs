#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tilemerge adapters.
//!
//! Boards are presented on a small LED matrix where every tile value maps to
//! one colour and each cell is drawn as a solid block of pixels.

use anyhow::Result as AnyResult;
use thiserror::Error;
use tilemerge_core::{CellCoord, Tile};
use tilemerge_world::GameState;

/// RGB color of a single LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// LED switched off.
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns a new color darkened towards black by the provided amount.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: darken_channel(self.red, amount),
            green: darken_channel(self.green, amount),
            blue: darken_channel(self.blue, amount),
        }
    }
}

fn darken_channel(channel: u8, amount: f32) -> u8 {
    (f32::from(channel) * (1.0 - amount)).round() as u8
}

/// Maps tile values to LED colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePalette {
    empty: Color,
    fallback: Color,
    entries: Vec<(Tile, Color)>,
}

impl TilePalette {
    /// Creates a palette from explicit colors.
    ///
    /// `fallback` is used for tiles that have no entry.
    #[must_use]
    pub fn new(empty: Color, fallback: Color, entries: Vec<(Tile, Color)>) -> Self {
        Self {
            empty,
            fallback,
            entries,
        }
    }

    /// Palette covering every tile from 2 to 131072.
    #[must_use]
    pub fn classic() -> Self {
        const TABLE: [(u8, u8, u8); 17] = [
            (255, 255, 255),
            (255, 255, 0),
            (255, 127, 0),
            (255, 0, 0),
            (255, 0, 191),
            (127, 0, 255),
            (0, 0, 191),
            (0, 127, 255),
            (0, 255, 255),
            (0, 255, 0),
            (0, 95, 0),
            (0, 95, 95),
            (0, 0, 95),
            (95, 0, 95),
            (95, 0, 0),
            (95, 95, 0),
            (95, 95, 95),
        ];

        let entries = (1u64..)
            .filter_map(|exponent| Tile::new(1 << exponent))
            .zip(TABLE)
            .map(|(tile, (red, green, blue))| (tile, Color::from_rgb_u8(red, green, blue)))
            .collect();

        Self::new(Color::BLACK, Color::from_rgb_u8(255, 127, 127), entries)
    }

    /// Color shown for the provided cell contents.
    #[must_use]
    pub fn color_for(&self, tile: Option<Tile>) -> Color {
        let Some(tile) = tile else {
            return self.empty;
        };
        self.entries
            .iter()
            .find(|(entry, _)| *entry == tile)
            .map_or(self.fallback, |(_, color)| *color)
    }

    /// Returns a copy of the palette with every color darkened by `amount`.
    #[must_use]
    pub fn darken(&self, amount: f32) -> Self {
        Self {
            empty: self.empty.darken(amount),
            fallback: self.fallback.darken(amount),
            entries: self
                .entries
                .iter()
                .map(|(tile, color)| (*tile, color.darken(amount)))
                .collect(),
        }
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Snapshot of everything an adapter needs to present one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of columns on the board.
    pub width: u32,
    /// Number of rows on the board.
    pub height: u32,
    /// Cell contents in row-major order.
    pub cells: Vec<Option<Tile>>,
    /// Accumulated score.
    pub score: u64,
    /// Number of successful moves.
    pub move_count: u64,
    /// Whether no move can change the board.
    pub game_over: bool,
    /// Largest tile on the board.
    pub best_tile: Option<Tile>,
}

impl Scene {
    /// Captures the provided game state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let grid = state.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().map(|(_, tile)| tile).collect(),
            score: state.score(),
            move_count: state.move_count(),
            game_over: state.is_game_over(),
            best_tile: grid.highest_tile(),
        }
    }

    /// Tile stored at `cell`, or `None` when it is empty or off the board.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }
        let index = cell.row() as usize * self.width as usize + cell.column() as usize;
        self.cells.get(index).copied().flatten()
    }

    /// Iterates the rows of the board from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

/// Pixel buffer for an LED matrix, row-major from the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedFrame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl LedFrame {
    /// Draws every cell of `scene` as a solid block of pixels.
    ///
    /// The display dimensions must be non-zero multiples of the board
    /// dimensions.
    pub fn rasterize(
        scene: &Scene,
        palette: &TilePalette,
        display_width: u32,
        display_height: u32,
    ) -> Result<Self, RenderingError> {
        let divisible = |display: u32, cells: u32| display != 0 && cells != 0 && display % cells == 0;
        if !divisible(display_width, scene.width) || !divisible(display_height, scene.height) {
            return Err(RenderingError::Indivisible {
                display_width,
                display_height,
                board_width: scene.width,
                board_height: scene.height,
            });
        }

        let block_width = display_width / scene.width;
        let block_height = display_height / scene.height;
        let mut pixels = Vec::with_capacity(display_width as usize * display_height as usize);
        for y in 0..display_height {
            for x in 0..display_width {
                let cell = CellCoord::new(x / block_width, y / block_height);
                pixels.push(palette.color_for(scene.tile(cell)));
            }
        }

        Ok(Self {
            width: display_width,
            height: display_height,
            pixels,
        })
    }

    /// Width of the display in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the display in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Color of the pixel at `(x, y)`, if it lies on the display.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterates the pixel rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> + '_ {
        self.pixels.chunks(self.width as usize)
    }
}

/// Output surface capable of presenting Tilemerge scenes.
pub trait Presenter {
    /// Presents the provided scene, replacing whatever was shown before.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Switches between normal and reduced brightness.
    ///
    /// Surfaces without brightness control ignore the request.
    fn toggle_low_light(&mut self) {}
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The display cannot be split into equally sized cell blocks.
    #[error(
        "a {display_width}x{display_height} display cannot show a {board_width}x{board_height} board"
    )]
    Indivisible {
        /// Display width in pixels.
        display_width: u32,
        /// Display height in pixels.
        display_height: u32,
        /// Board width in cells.
        board_width: u32,
        /// Board height in cells.
        board_height: u32,
    },
}
