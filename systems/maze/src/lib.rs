#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid maze generator that lays out the room structure of a level.
//!
//! The generator carves a square grid of open and wall cells starting from
//! the centre cell, sprinkles extra openings to create loops, and finishes
//! with a repair pass that guarantees every open cell is reachable from the
//! centre through 4-connected open cells.

use std::collections::VecDeque;

use dimension_shooter_core::CellCoord;
use rand::Rng;

/// Largest grid side length the generator ever produces.
pub const MAX_GRID_SIZE: u32 = 5;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Cell realized as a wall block.
    Wall,
    /// Walkable cell.
    Open,
}

/// Square grid of cells addressed by column (`x`) and row (`y`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the provided side length filled with walls.
    #[must_use]
    pub fn filled(size: u32) -> Self {
        let capacity = usize::try_from(u64::from(size) * u64::from(size)).unwrap_or(0);
        Self {
            size,
            cells: vec![Cell::Wall; capacity],
        }
    }

    /// Builds a grid from textual rows where `#` marks a wall and any other
    /// character an open cell.
    ///
    /// Returns `None` when the rows do not describe a square grid.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = u32::try_from(rows.len()).ok()?;
        let mut grid = Self::filled(size);
        for (row, text) in rows.iter().enumerate() {
            if text.chars().count() != rows.len() {
                return None;
            }
            for (column, symbol) in text.chars().enumerate() {
                if symbol != '#' {
                    let cell = CellCoord::new(u32::try_from(column).ok()?, u32::try_from(row).ok()?);
                    grid.set(cell, Cell::Open);
                }
            }
        }
        Some(grid)
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Centre cell of the grid, where the player spawns.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.size / 2, self.size / 2)
    }

    /// Returns the state of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        self.index(coord).map(|index| self.cells[index])
    }

    /// Reports whether the provided cell exists and is open.
    #[must_use]
    pub fn is_open(&self, coord: CellCoord) -> bool {
        self.cell(coord) == Some(Cell::Open)
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index % size, index / size), *cell)
        })
    }

    /// Number of open cells in the grid.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Open).count()
    }

    fn set(&mut self, coord: CellCoord, cell: Cell) {
        if let Some(index) = self.index(coord) {
            self.cells[index] = cell;
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.column() < self.size && coord.row() < self.size {
            let width = usize::try_from(self.size).ok()?;
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn is_interior(&self, coord: CellCoord) -> bool {
        coord.column() > 0
            && coord.row() > 0
            && coord.column() + 1 < self.size
            && coord.row() + 1 < self.size
    }

    fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        const OFFSETS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
        OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let column = u32::try_from(i64::from(coord.column()) + dx).ok()?;
            let row = u32::try_from(i64::from(coord.row()) + dy).ok()?;
            (column < self.size && row < self.size).then_some(CellCoord::new(column, row))
        })
    }
}

/// Grid side length used for the provided level.
#[must_use]
pub fn grid_size(level: u32) -> u32 {
    MAX_GRID_SIZE.min(2 + level / 3)
}

/// Number of extra opening attempts made for the provided level.
#[must_use]
pub fn opening_attempts(level: u32) -> u32 {
    level / 2 + 2
}

/// Generates the maze grid for the provided level.
///
/// Every open cell of the returned grid is 4-connected to the centre.
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Grid {
    let mut grid = Grid::filled(grid_size(level));
    let center = grid.center();
    grid.set(center, Cell::Open);

    carve(&mut grid, center, rng);
    open_random_cells(&mut grid, opening_attempts(level), rng);
    repair_connectivity(&mut grid);

    grid
}

/// Enumerates open cells that cannot be reached from the centre.
#[must_use]
pub fn unreachable_open_cells(grid: &Grid) -> Vec<CellCoord> {
    let reachable = flood_from_center(grid);
    grid.iter()
        .filter(|(coord, cell)| {
            *cell == Cell::Open && !grid.index(*coord).map_or(false, |index| reachable[index])
        })
        .map(|(coord, _)| coord)
        .collect()
}

fn carve<R: Rng + ?Sized>(grid: &mut Grid, start: CellCoord, rng: &mut R) {
    let mut visited = vec![false; grid.cells.len()];
    if let Some(index) = grid.index(start) {
        visited[index] = true;
    }

    let mut stack = vec![start];
    while let Some(current) = stack.last().copied() {
        let candidates: Vec<CellCoord> = grid
            .neighbors(current)
            .filter(|neighbor| grid.index(*neighbor).map_or(false, |index| !visited[index]))
            .collect();

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let next = candidates[rng.gen_range(0..candidates.len())];
        if let Some(index) = grid.index(next) {
            visited[index] = true;
        }
        grid.set(next, Cell::Open);
        stack.push(next);
    }
}

fn open_random_cells<R: Rng + ?Sized>(grid: &mut Grid, attempts: u32, rng: &mut R) {
    let center = grid.center();
    for _ in 0..attempts {
        let column = rng.gen_range(0..grid.size);
        let row = rng.gen_range(0..grid.size);
        let coord = CellCoord::new(column, row);
        if coord != center && grid.is_interior(coord) {
            grid.set(coord, Cell::Open);
        }
    }
}

fn repair_connectivity(grid: &mut Grid) {
    let mut reachable = vec![false; grid.cells.len()];
    if let Some(index) = grid.index(grid.center()) {
        reachable[index] = true;
    }

    let max_passes = grid.size.saturating_mul(grid.size);
    for _ in 0..max_passes {
        let mut changed = false;
        for index in 0..grid.cells.len() {
            if grid.cells[index] != Cell::Open || reachable[index] {
                continue;
            }
            let coord = CellCoord::new(index as u32 % grid.size, index as u32 / grid.size);
            let joins_reachable = grid
                .neighbors(coord)
                .any(|neighbor| grid.index(neighbor).map_or(false, |other| reachable[other]));
            if joins_reachable {
                reachable[index] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for (index, cell) in grid.cells.iter_mut().enumerate() {
        if *cell == Cell::Open && !reachable[index] {
            *cell = Cell::Wall;
        }
    }
}

fn flood_from_center(grid: &Grid) -> Vec<bool> {
    let mut reachable = vec![false; grid.cells.len()];
    let center = grid.center();
    let Some(start) = grid.index(center) else {
        return reachable;
    };
    if grid.cells[start] != Cell::Open {
        return reachable;
    }

    reachable[start] = true;
    let mut frontier = VecDeque::from([center]);
    while let Some(current) = frontier.pop_front() {
        for neighbor in grid.neighbors(current) {
            if let Some(index) = grid.index(neighbor) {
                if grid.cells[index] == Cell::Open && !reachable[index] {
                    reachable[index] = true;
                    frontier.push_back(neighbor);
                }
            }
        }
    }
    reachable
}
