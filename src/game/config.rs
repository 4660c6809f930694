use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;

/// Configuration for a round. Fixed at round start, not runtime-tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of one grid cell in world units.
    pub cell_size: i32,
    /// Width of the play field in cells.
    pub grid_width: u32,
    /// Height of the play field in cells.
    pub grid_height: u32,
    /// Seconds between simulation ticks.
    pub tick_interval: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            grid_width: 20,
            grid_height: 15,
            tick_interval: 0.5,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size in cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing.
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Play-field width in world units. Always a multiple of the cell size.
    pub fn width_units(&self) -> i32 {
        self.grid_width as i32 * self.cell_size
    }

    /// Play-field height in world units.
    pub fn height_units(&self) -> i32 {
        self.grid_height as i32 * self.cell_size
    }

    /// Where the head starts: two cells in from the bottom-left corner,
    /// facing right, with the initial two-segment body behind it.
    pub fn initial_head(&self) -> Position {
        Position::new(self.cell_size * 2, 0)
    }

    pub fn initial_direction(&self) -> Direction {
        Direction::Right
    }

    /// Reject malformed setups eagerly rather than producing undefined
    /// wraparound behavior later.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            bail!("cell size must be positive, got {}", self.cell_size);
        }
        if self.grid_width < 3 {
            bail!(
                "grid must be at least 3 cells wide to fit the starting snake, got {}",
                self.grid_width
            );
        }
        if self.grid_height < 1 {
            bail!("grid height must be at least 1 cell, got {}", self.grid_height);
        }
        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            bail!("tick interval must be positive, got {}", self.tick_interval);
        }
        Ok(())
    }
}
