//! Tile grid
//!
//! Levels are stored as a row-major string with one character per cell:
//! - `'0'..='9'`: ice of strength `(digit + 1) * 10`
//! - `'X'` / `'x'`: camera (goal)
//! - `'S'`: penguin start
//! - `'#'`: snow
//! - anything else (including space): open water
//!
//! Strings shorter than `width * height` are padded with water; extra
//! characters are ignored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GRID_CELLS, MAX_STRENGTH, STRENGTH_STEP};
use crate::error::GridError;

/// A single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Open water, lethal
    Water,
    /// Packed snow, never erodes
    Snow,
    /// Spawn marker, behaves like snow
    Start,
    /// Camera not yet photographed
    Goal,
    /// Camera already visited
    GoalDone,
    /// Ice with residual strength. Strength 0 is water in all but name.
    Ice(u8),
}

impl Tile {
    /// Decode one map character
    pub fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => {
                let digit = c as u8 - b'0';
                Tile::Ice((digit + 1) * STRENGTH_STEP)
            }
            'X' | 'x' => Tile::Goal,
            'S' => Tile::Start,
            '#' => Tile::Snow,
            _ => Tile::Water,
        }
    }

    /// Does standing here end the attempt?
    pub fn is_hazard(self) -> bool {
        matches!(self, Tile::Water | Tile::Ice(0))
    }

    /// Category tag for renderers
    pub fn kind(self) -> TileKind {
        match self {
            Tile::Water => TileKind::Water,
            Tile::Snow => TileKind::Snow,
            Tile::Start => TileKind::Start,
            Tile::Goal => TileKind::Goal,
            Tile::GoalDone => TileKind::GoalDone,
            Tile::Ice(_) => TileKind::Ice,
        }
    }

    /// Shade in `[0, 1]`: residual ice strength, 1 for solid tiles, 0 for water
    pub fn shade(self) -> f32 {
        match self {
            Tile::Ice(strength) => strength as f32 / MAX_STRENGTH as f32,
            Tile::Water => 0.0,
            _ => 1.0,
        }
    }
}

/// Tile category without strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Water,
    Snow,
    Start,
    Goal,
    GoalDone,
    Ice,
}

/// Why a position is lethal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardCause {
    Water,
    OutOfBounds,
}

/// Result of the penguin standing on a cell for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEffect {
    /// Position maps outside the grid
    OutOfBounds,
    /// Water or fully eroded ice
    Hazard,
    /// Ice lost strength; `remaining` is what is left
    Eroded { remaining: u8 },
    /// A camera was photographed
    GoalReached { all_goals_reached: bool },
    /// Snow, start, or an already-visited camera
    Neutral,
}

/// The level's mutable terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    cells: Vec<Tile>,
    goals_total: u32,
    goals_completed: u32,
    goal_cells: Vec<(usize, usize)>,
    spawn_point: Vec2,
}

impl TileGrid {
    /// Build a grid from its encoded form
    ///
    /// The first `'S'` in row-major order sets the spawn point; without one the
    /// penguin spawns at the center of cell (0, 0).
    pub fn decode(
        width: usize,
        height: usize,
        encoded: &str,
        tile_size: f32,
    ) -> Result<Self, GridError> {
        let count = Self::cell_count(width, height)?;
        let mut cells = Vec::with_capacity(count);
        cells.extend(encoded.chars().take(count).map(Tile::from_char));
        cells.resize(count, Tile::Water);

        let mut grid = Self {
            width,
            height,
            tile_size,
            cells,
            goals_total: 0,
            goals_completed: 0,
            goal_cells: Vec::new(),
            spawn_point: Vec2::splat(tile_size / 2.0),
        };

        let mut spawn = None;
        for (i, tile) in grid.cells.iter().enumerate() {
            let (col, row) = (i % width, i / width);
            match tile {
                Tile::Goal => {
                    grid.goals_total += 1;
                    grid.goal_cells.push((col, row));
                }
                Tile::Start if spawn.is_none() => spawn = Some((col, row)),
                _ => {}
            }
        }
        if let Some((col, row)) = spawn {
            grid.spawn_point = grid.cell_center(col, row);
        }

        Ok(grid)
    }

    /// Number of cells in a `width` x `height` grid, rejecting empty and oversized grids
    pub fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
        width
            .checked_mul(height)
            .filter(|&count| (1..=MAX_GRID_CELLS).contains(&count))
            .ok_or(GridError::InvalidDimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn goals_total(&self) -> u32 {
        self.goals_total
    }

    pub fn goals_completed(&self) -> u32 {
        self.goals_completed
    }

    /// Coordinates of every camera, in map order
    pub fn goal_cells(&self) -> &[(usize, usize)] {
        &self.goal_cells
    }

    /// Pixel center of the start tile
    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Grid extent in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Pixel center of a cell
    pub fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Tile> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Cell under a pixel position, `None` if outside the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = (x / self.tile_size).floor();
        let row = (y / self.tile_size).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// Apply one tick of the penguin standing at a pixel position
    pub fn occupy(&mut self, x: f32, y: f32, erosion: u32) -> TileEffect {
        let Some((col, row)) = self.cell_at(x, y) else {
            return TileEffect::OutOfBounds;
        };
        let idx = row * self.width + col;
        let tile = self.cells[idx];

        if tile.is_hazard() {
            return TileEffect::Hazard;
        }

        match tile {
            Tile::Ice(strength) => {
                let loss = erosion.min(strength as u32) as u8;
                let remaining = strength - loss;
                self.cells[idx] = Tile::Ice(remaining);
                TileEffect::Eroded { remaining }
            }
            Tile::Goal => {
                self.cells[idx] = Tile::GoalDone;
                self.goals_completed = (self.goals_completed + 1).min(self.goals_total);
                TileEffect::GoalReached {
                    all_goals_reached: self.all_goals_reached(),
                }
            }
            _ => TileEffect::Neutral,
        }
    }

    /// True once every camera has been visited
    pub fn all_goals_reached(&self) -> bool {
        self.goals_completed >= self.goals_total
    }
}
