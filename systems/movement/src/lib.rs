#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that slides and merges tiles.
//!
//! Every move is decomposed into independent lines: rows for horizontal moves
//! and columns for vertical ones. Each line is read starting at the edge the
//! tiles travel toward, so a single [`merge_line`] routine serves all four
//! directions and only the traversal order differs between them.

use tilemerge_core::{CellCoord, Direction, EngineError, Grid, Tile};

/// Result of applying a move to a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Grid after sliding and merging.
    pub grid: Grid,
    /// Sum of the tiles created by merges.
    pub score_delta: u64,
    /// Whether any cell differs from the input grid.
    pub changed: bool,
}

/// Result of merging a single line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMerge {
    /// Compacted tiles, destination edge first.
    pub tiles: Vec<Tile>,
    /// Sum of the tiles created by merges.
    pub score_delta: u64,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    tile: Tile,
    merged: bool,
}

/// Compacts and merges a line whose tiles are listed destination edge first.
///
/// A tile that was produced by a merge is marked and never merges again in
/// the same pass, so `[2, 2, 2, 2]` becomes `[4, 4]` rather than `[8]`.
#[must_use]
pub fn merge_line<I>(tiles: I) -> LineMerge
where
    I: IntoIterator<Item = Tile>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut score_delta = 0u64;

    for tile in tiles {
        if let Some(last) = slots.last_mut() {
            if !last.merged && last.tile.merges_with(tile) {
                if let Some(doubled) = last.tile.doubled() {
                    last.tile = doubled;
                    last.merged = true;
                    score_delta = score_delta.saturating_add(doubled.value());
                    continue;
                }
            }
        }
        slots.push(Slot {
            tile,
            merged: false,
        });
    }

    LineMerge {
        tiles: slots.into_iter().map(|slot| slot.tile).collect(),
        score_delta,
    }
}

/// Slides and merges every line of `grid` toward the edge named by `direction`.
pub fn apply(grid: &Grid, direction: Direction) -> Result<MoveOutcome, EngineError> {
    let mut next = grid.clone();
    let mut score_delta = 0u64;

    for index in 0..line_count(grid, direction) {
        let cells = line_cells(grid, direction, index);

        let mut occupied = Vec::with_capacity(cells.len());
        for cell in &cells {
            if let Some(tile) = grid.get(*cell)? {
                occupied.push(tile);
            }
        }

        let merged = merge_line(occupied);
        score_delta = score_delta.saturating_add(merged.score_delta);
        for (position, cell) in cells.iter().enumerate() {
            next.set(*cell, merged.tiles.get(position).copied())?;
        }
    }

    let changed = next != *grid;
    Ok(MoveOutcome {
        grid: next,
        score_delta,
        changed,
    })
}

/// Reports whether a move in `direction` would change the grid.
pub fn can_move(grid: &Grid, direction: Direction) -> Result<bool, EngineError> {
    apply(grid, direction).map(|outcome| outcome.changed)
}

/// Lists the directions that would change the grid, in [`Direction::ALL`] order.
pub fn available_moves(grid: &Grid) -> Result<Vec<Direction>, EngineError> {
    let mut moves = Vec::with_capacity(Direction::ALL.len());
    for direction in Direction::ALL {
        if can_move(grid, direction)? {
            moves.push(direction);
        }
    }
    Ok(moves)
}

/// Reports whether no move can change the grid.
///
/// The board is terminal when it has no empty cell and no two horizontally or
/// vertically adjacent tiles can merge.
pub fn is_terminal(grid: &Grid) -> Result<bool, EngineError> {
    if grid.empty_count() > 0 {
        return Ok(false);
    }

    for (cell, tile) in grid.cells() {
        let Some(tile) = tile else {
            continue;
        };

        let right = CellCoord::new(cell.column() + 1, cell.row());
        if grid.contains(right) && grid.get(right)?.is_some_and(|other| tile.merges_with(other)) {
            return Ok(false);
        }

        let below = CellCoord::new(cell.column(), cell.row() + 1);
        if grid.contains(below) && grid.get(below)?.is_some_and(|other| tile.merges_with(other)) {
            return Ok(false);
        }
    }

    Ok(true)
}

fn line_count(grid: &Grid, direction: Direction) -> u32 {
    match direction {
        Direction::Left | Direction::Right => grid.height(),
        Direction::Up | Direction::Down => grid.width(),
    }
}

/// Coordinates of line `index`, ordered from the destination edge outward.
fn line_cells(grid: &Grid, direction: Direction, index: u32) -> Vec<CellCoord> {
    let width = grid.width();
    let height = grid.height();
    match direction {
        Direction::Left => (0..width).map(|column| CellCoord::new(column, index)).collect(),
        Direction::Right => (0..width)
            .rev()
            .map(|column| CellCoord::new(column, index))
            .collect(),
        Direction::Up => (0..height).map(|row| CellCoord::new(index, row)).collect(),
        Direction::Down => (0..height)
            .rev()
            .map(|row| CellCoord::new(index, row))
            .collect(),
    }
}
