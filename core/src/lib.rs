#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilemerge engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure systems. Adapters submit [`Command`]
//! values describing player gestures, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values describing what
//! happened. Systems operate on [`Grid`] values only and never own game state.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tilemerge!";

/// Face value of the tile that counts as a win.
pub const WINNING_TILE: u64 = 2048;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Slides and merges every line of the board toward one edge.
    Move {
        /// Edge the tiles travel toward.
        direction: Direction,
    },
    /// Restores the state captured before the most recent successful move.
    Undo,
    /// Discards the current game and seeds a fresh board.
    NewGame,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A fresh board was seeded and history was cleared.
    GameStarted,
    /// A move changed the board.
    BoardShifted {
        /// Direction of the move.
        direction: Direction,
        /// Sum of all tiles created by merges during the move.
        score_delta: u64,
    },
    /// A new tile was placed on the board.
    TileSpawned {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Tile that was placed.
        tile: Tile,
    },
    /// A move request left the board untouched.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
        /// Why the move had no effect.
        reason: MoveRejection,
    },
    /// The most recent history snapshot was restored.
    MoveUndone {
        /// Move counter of the restored state.
        move_count: u64,
    },
    /// An undo was requested while the history was empty.
    NothingToUndo,
    /// The board reached a state from which no move can change it.
    GameOver {
        /// Final score of the game.
        score: u64,
    },
}

/// Reasons a move leaves the board unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// No tile can slide or merge in the requested direction.
    Blocked,
    /// The game is over; only undo or a new game can continue play.
    GameOver,
}

/// Edge of the board that tiles travel toward during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward row zero.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column zero.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// Every direction, in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Lower-case name used in text input and log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(EngineError::InvalidDirection(value.to_owned())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    /// Decodes `0 = Up, 1 = Down, 2 = Left, 3 = Right`.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

/// A tile holding a power-of-two face value of at least two.
///
/// The value is stored as its binary exponent, so doubling is an increment
/// and the largest representable tile is `2^63`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Tile {
    rank: u8,
}

impl Tile {
    /// The smallest tile.
    pub const TWO: Tile = Tile { rank: 1 };

    /// The second smallest tile.
    pub const FOUR: Tile = Tile { rank: 2 };

    /// Creates a tile from its face value, rejecting anything that is not a
    /// power of two of at least two.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self {
                rank: value.trailing_zeros() as u8,
            })
        } else {
            None
        }
    }

    /// Face value of the tile.
    #[must_use]
    pub const fn value(self) -> u64 {
        1u64 << self.rank
    }

    /// Binary exponent of the face value.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Tile produced by merging two copies of this tile, if representable.
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        if self.rank >= 63 {
            None
        } else {
            Some(Self {
                rank: self.rank + 1,
            })
        }
    }

    /// Reports whether this tile and `other` combine when pushed together.
    #[must_use]
    pub const fn merges_with(self, other: Tile) -> bool {
        self.rank == other.rank && self.rank < 63
    }
}

impl TryFrom<u64> for Tile {
    type Error = EngineError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Tile::new(value).ok_or(EngineError::InvalidConfiguration(
            ConfigIssue::NotPowerOfTwo { value },
        ))
    }
}

impl From<Tile> for u64 {
    fn from(tile: Tile) -> Self {
        tile.value()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Fixed-size board of optional tiles stored in row-major order.
///
/// The grid is a passive container: it offers bounds-checked access and
/// structural equality but never slides or merges tiles itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 {
            return Err(ConfigIssue::ZeroWidth.into());
        }
        if height == 0 {
            return Err(ConfigIssue::ZeroHeight.into());
        }

        let area = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| ConfigIssue::BoardTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![None; area],
        })
    }

    /// Builds a grid from rows of face values where `0` marks an empty cell.
    pub fn from_rows(rows: &[&[u64]]) -> Result<Self, EngineError> {
        let first = rows.first().ok_or(ConfigIssue::RaggedRows)?;
        if first.is_empty() || rows.iter().any(|row| row.len() != first.len()) {
            return Err(ConfigIssue::RaggedRows.into());
        }

        let width = u32::try_from(first.len()).map_err(|_| ConfigIssue::RaggedRows)?;
        let height = u32::try_from(rows.len()).map_err(|_| ConfigIssue::RaggedRows)?;
        let mut grid = Self::new(width, height)?;
        for (slot, value) in grid.cells.iter_mut().zip(rows.iter().flat_map(|row| row.iter())) {
            *slot = match *value {
                0 => None,
                value => Some(Tile::try_from(value)?),
            };
        }
        Ok(grid)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Returns the tile stored at the provided cell.
    pub fn get(&self, cell: CellCoord) -> Result<Option<Tile>, EngineError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Stores `tile` at the provided cell, replacing any previous content.
    pub fn set(&mut self, cell: CellCoord, tile: Option<Tile>) -> Result<(), EngineError> {
        let index = self.index(cell)?;
        self.cells[index] = tile;
        Ok(())
    }

    /// Iterates every cell with its coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Option<Tile>)> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
            .zip(self.cells.iter().copied())
    }

    /// Coordinates of all empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellCoord> {
        self.cells()
            .filter(|(_, tile)| tile.is_none())
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|tile| tile.is_none()).count()
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Sum of the face values of all tiles.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells
            .iter()
            .flatten()
            .fold(0u64, |sum, tile| sum.saturating_add(tile.value()))
    }

    /// Largest tile on the board, if any.
    #[must_use]
    pub fn highest_tile(&self) -> Option<Tile> {
        self.cells.iter().flatten().copied().max()
    }

    /// Face values of each row, with `0` marking empty cells.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u64>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|tile| tile.map_or(0, Tile::value)).collect())
            .collect()
    }

    fn index(&self, cell: CellCoord) -> Result<usize, EngineError> {
        if !self.contains(cell) {
            return Err(EngineError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }

        let row = cell.row() as usize;
        let column = cell.column() as usize;
        Ok(row * self.width as usize + column)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = EngineError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(raw.width, raw.height)?;
        if raw.cells.len() != grid.cells.len() {
            return Err(ConfigIssue::RaggedRows.into());
        }
        grid.cells = raw.cells;
        Ok(grid)
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

/// Relative likelihood of spawning a particular face value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnWeight {
    /// Face value of the spawned tile.
    pub value: u64,
    /// Relative weight of the value; zero disables it.
    pub weight: u32,
}

impl SpawnWeight {
    /// Creates a new weight entry.
    #[must_use]
    pub const fn new(value: u64, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// Weighted distribution over the face values of newly spawned tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueDistribution {
    entries: Vec<SpawnWeight>,
}

impl ValueDistribution {
    /// Creates a distribution from raw entries. Validation happens in
    /// [`ValueDistribution::resolve`].
    #[must_use]
    pub fn new(entries: Vec<SpawnWeight>) -> Self {
        Self { entries }
    }

    /// Nine twos for every four.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(vec![SpawnWeight::new(2, 9), SpawnWeight::new(4, 1)])
    }

    /// Raw entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[SpawnWeight] {
        &self.entries
    }

    /// Validates the entries and converts them into tiles with weights.
    pub fn resolve(&self) -> Result<Vec<(Tile, u32)>, EngineError> {
        if self.entries.is_empty() {
            return Err(ConfigIssue::EmptyDistribution.into());
        }

        let mut seen = BTreeSet::new();
        let mut total = 0u64;
        let mut resolved = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let tile = Tile::try_from(entry.value)?;
            if !seen.insert(tile) {
                return Err(ConfigIssue::DuplicateValue { value: entry.value }.into());
            }
            total += u64::from(entry.weight);
            resolved.push((tile, entry.weight));
        }

        if total == 0 {
            return Err(ConfigIssue::ZeroTotalWeight.into());
        }
        Ok(resolved)
    }
}

impl Default for ValueDistribution {
    fn default() -> Self {
        Self::classic()
    }
}

/// Structured configuration consumed by the engine at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of columns on the board.
    pub board_width: u32,
    /// Number of rows on the board.
    pub board_height: u32,
    /// Weighted face values used when spawning tiles.
    pub value_distribution: ValueDistribution,
    /// Maximum number of moves that can be taken back; zero disables undo.
    pub max_undo_depth: usize,
    /// Number of tiles placed on a fresh board.
    pub initial_tiles: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 4,
            board_height: 4,
            value_distribution: ValueDistribution::classic(),
            max_undo_depth: 4,
            initial_tiles: 2,
        }
    }
}

impl GameConfig {
    /// Checks every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_width == 0 {
            return Err(ConfigIssue::ZeroWidth.into());
        }
        if self.board_height == 0 {
            return Err(ConfigIssue::ZeroHeight.into());
        }

        let _ = self.value_distribution.resolve()?;

        let capacity = u64::from(self.board_width) * u64::from(self.board_height);
        if self.initial_tiles == 0 || u64::from(self.initial_tiles) > capacity {
            return Err(ConfigIssue::InitialTiles {
                requested: self.initial_tiles,
                capacity,
            }
            .into());
        }
        Ok(())
    }
}

/// Specific configuration problems reported by [`EngineError::InvalidConfiguration`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// The board has no columns.
    #[error("board width must be positive")]
    ZeroWidth,
    /// The board has no rows.
    #[error("board height must be positive")]
    ZeroHeight,
    /// The board cannot be addressed on this platform.
    #[error("a {width}x{height} board is too large")]
    BoardTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The spawn distribution lists no values.
    #[error("value distribution lists no values")]
    EmptyDistribution,
    /// Every spawn weight is zero.
    #[error("value distribution weights sum to zero")]
    ZeroTotalWeight,
    /// A tile value is not a power of two of at least two.
    #[error("{value} is not a power of two of at least 2")]
    NotPowerOfTwo {
        /// Offending value.
        value: u64,
    },
    /// A spawn value was listed twice.
    #[error("value {value} appears more than once in the distribution")]
    DuplicateValue {
        /// Repeated value.
        value: u64,
    },
    /// The number of initial tiles is zero or exceeds the board.
    #[error("{requested} initial tiles do not fit a board of {capacity} cells")]
    InitialTiles {
        /// Requested tile count.
        requested: u32,
        /// Cells available on the board.
        capacity: u64,
    },
    /// Row data was empty or of unequal lengths.
    #[error("grid rows must be non-empty and equally long")]
    RaggedRows,
    /// A supplied board does not match the configured dimensions.
    #[error("a {width}x{height} board does not match the configured {expected_width}x{expected_height}")]
    DimensionMismatch {
        /// Width of the supplied board.
        width: u32,
        /// Height of the supplied board.
        height: u32,
        /// Configured width.
        expected_width: u32,
        /// Configured height.
        expected_height: u32,
    },
}

/// Errors raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Construction-time configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    /// A direction outside of up, down, left and right was supplied.
    #[error("`{0}` is not one of up, down, left or right")]
    InvalidDirection(String),
    /// A grid accessor was handed a coordinate outside the board.
    #[error("cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, ConfigIssue, Direction, EngineError, GameConfig, Grid, RawGrid, SpawnWeight,
        Tile, ValueDistribution,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_accepts_only_powers_of_two() {
        assert_eq!(Tile::new(2), Some(Tile::TWO));
        assert_eq!(Tile::new(2048).map(Tile::value), Some(2048));
        assert_eq!(Tile::new(0), None);
        assert_eq!(Tile::new(1), None);
        assert_eq!(Tile::new(6), None);
    }

    #[test]
    fn largest_tile_cannot_double() {
        let largest = Tile::new(1 << 63).expect("2^63 is a tile");
        assert_eq!(largest.doubled(), None);
        assert!(!largest.merges_with(largest));
        assert_eq!(Tile::TWO.doubled(), Some(Tile::FOUR));
    }

    #[test]
    fn direction_parses_names_case_insensitively() {
        assert_eq!(" Left ".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(EngineError::InvalidDirection("sideways".to_owned()))
        );
    }

    #[test]
    fn direction_decodes_raw_bytes() {
        assert_eq!(Direction::try_from(0), Ok(Direction::Up));
        assert_eq!(Direction::try_from(3), Ok(Direction::Right));
        assert!(matches!(
            Direction::try_from(4),
            Err(EngineError::InvalidDirection(_))
        ));
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(3, 2).expect("valid dimensions");
        assert_eq!(grid.empty_count(), 6);
        assert_eq!(grid.area(), 6);
        assert!(grid.cells().all(|(_, tile)| tile.is_none()));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(EngineError::InvalidConfiguration(ConfigIssue::ZeroWidth))
        );
        assert_eq!(
            Grid::new(4, 0),
            Err(EngineError::InvalidConfiguration(ConfigIssue::ZeroHeight))
        );
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut grid = Grid::new(2, 3).expect("valid dimensions");
        let inside = CellCoord::new(1, 2);
        grid.set(inside, Some(Tile::FOUR)).expect("cell inside grid");
        assert_eq!(grid.get(inside), Ok(Some(Tile::FOUR)));

        let outside = CellCoord::new(2, 0);
        assert_eq!(
            grid.get(outside),
            Err(EngineError::OutOfBounds {
                cell: outside,
                width: 2,
                height: 3,
            })
        );
        assert!(grid.set(CellCoord::new(0, 3), Some(Tile::TWO)).is_err());
    }

    #[test]
    fn from_rows_reads_row_major_values() {
        let grid = Grid::from_rows(&[&[2, 0, 4], &[0, 8, 0]]).expect("valid rows");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(CellCoord::new(1, 1)), Ok(Tile::new(8)));
        assert_eq!(grid.rows(), vec![vec![2, 0, 4], vec![0, 8, 0]]);
        assert_eq!(
            grid.empty_cells(),
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
            ]
        );
        assert_eq!(grid.tile_sum(), 14);
        assert_eq!(grid.highest_tile(), Tile::new(8));
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert!(Grid::from_rows(&[]).is_err());
        assert!(Grid::from_rows(&[&[2, 2], &[2]]).is_err());
        assert_eq!(
            Grid::from_rows(&[&[3]]),
            Err(EngineError::InvalidConfiguration(
                ConfigIssue::NotPowerOfTwo { value: 3 }
            ))
        );
    }

    #[test]
    fn grids_compare_structurally() {
        let first = Grid::from_rows(&[&[2, 4]]).expect("valid rows");
        let mut second = Grid::new(2, 1).expect("valid dimensions");
        assert_ne!(first, second);
        second.set(CellCoord::new(0, 0), Some(Tile::TWO)).expect("in bounds");
        second.set(CellCoord::new(1, 0), Some(Tile::FOUR)).expect("in bounds");
        assert_eq!(first, second);
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        let grid = Grid::from_rows(&[&[2, 0], &[0, 1024]]).expect("valid rows");
        assert_round_trip(&grid);
    }

    #[test]
    fn grid_deserialization_rejects_mismatched_cells() {
        let raw = RawGrid {
            width: 2,
            height: 2,
            cells: vec![None; 3],
        };
        let bytes = bincode::serialize(&raw).expect("serialize");
        assert!(bincode::deserialize::<Grid>(&bytes).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_round_trip(&config);
    }

    #[test]
    fn distribution_rejects_invalid_entries() {
        let empty = ValueDistribution::new(Vec::new());
        assert_eq!(
            empty.resolve(),
            Err(EngineError::from(ConfigIssue::EmptyDistribution))
        );

        let zero = ValueDistribution::new(vec![SpawnWeight::new(2, 0), SpawnWeight::new(4, 0)]);
        assert_eq!(zero.resolve(), Err(EngineError::from(ConfigIssue::ZeroTotalWeight)));

        let odd = ValueDistribution::new(vec![SpawnWeight::new(6, 1)]);
        assert_eq!(
            odd.resolve(),
            Err(EngineError::from(ConfigIssue::NotPowerOfTwo { value: 6 }))
        );

        let repeated = ValueDistribution::new(vec![SpawnWeight::new(2, 1), SpawnWeight::new(2, 3)]);
        assert_eq!(
            repeated.resolve(),
            Err(EngineError::from(ConfigIssue::DuplicateValue { value: 2 }))
        );
    }

    #[test]
    fn distribution_keeps_zero_weights_when_total_is_positive() {
        let distribution =
            ValueDistribution::new(vec![SpawnWeight::new(2, 0), SpawnWeight::new(8, 5)]);
        assert_eq!(
            distribution.resolve(),
            Ok(vec![(Tile::TWO, 0), (Tile::new(8).expect("tile"), 5)])
        );
    }

    #[test]
    fn config_rejects_initial_tiles_outside_board() {
        let config = GameConfig {
            board_width: 1,
            board_height: 2,
            initial_tiles: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(EngineError::from(ConfigIssue::InitialTiles {
                requested: 3,
                capacity: 2,
            }))
        );

        let none = GameConfig {
            initial_tiles: 0,
            ..GameConfig::default()
        };
        assert!(none.validate().is_err());
    }
}
