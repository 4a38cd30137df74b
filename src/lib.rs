//! Penguin Lure - ice-floe puzzle simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, penguin physics, bait, game state)
//! - `levels`: Level definitions and level packs
//! - `settings`: Immutable engine configuration
//! - `platform`: Pointer input edges and fixed-step scheduling
//! - `error`: Error taxonomy shared by the modules above

pub mod error;
pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{GridError, LevelError, SettingsError};
pub use levels::{LevelDef, LevelPack};
pub use settings::{BaitOrder, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (every published variant runs at 30 Hz)
    pub const TICKS_PER_SECOND: u32 = 30;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the scheduler will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions the levels are authored for
    pub const CANVAS_WIDTH: u32 = 640;
    pub const CANVAS_HEIGHT: u32 = 480;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Ice strength ceiling (digit 9 decodes to this)
    pub const MAX_STRENGTH: u8 = 100;
    /// Largest level a pack may declare, in cells
    pub const MAX_GRID_CELLS: usize = 1 << 16;
    /// Strength added per encoded digit step
    pub const STRENGTH_STEP: u8 = 10;

    /// Penguin defaults (pixels and ticks)
    pub const PENGUIN_ACCELERATION: f32 = 4.0;
    pub const PENGUIN_MAX_SPEED: f32 = 10.0;
    pub const PENGUIN_DRAG: f32 = 1.0;
    pub const PENGUIN_RADIUS: f32 = 8.0;
    pub const PENGUIN_START_WEIGHT: u32 = 1;
    /// Weight added per fish eaten
    pub const WEIGHT_GAIN: u32 = 1;
    /// Ice strength removed per unit of weight per tick
    pub const EROSION_RATE: u32 = 1;

    /// A second tap within this distance of a fish picks it back up
    pub const BAIT_PICKUP_RADIUS: f32 = 20.0;
}

/// Squared distance between two points (no square root)
#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Heading of a vector in radians, `atan2(y, x)`
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Move `value` toward zero by `amount` without crossing it
#[inline]
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    let amount = amount.abs();
    if value.abs() <= amount {
        0.0
    } else {
        value - amount * value.signum()
    }
}
