//! Engine settings
//!
//! One immutable configuration value, built once and handed to each
//! component at construction. Nothing here is mutated while a level runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Which placed fish the penguin goes for first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BaitOrder {
    /// Oldest fish first (new fish are appended)
    #[default]
    Fifo,
    /// Newest fish first (new fish are prepended)
    Lifo,
}

impl BaitOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaitOrder::Fifo => "FIFO",
            BaitOrder::Lifo => "LIFO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fifo" | "oldest" => Some(BaitOrder::Fifo),
            "lifo" | "newest" => Some(BaitOrder::Lifo),
            _ => None,
        }
    }
}

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Tile edge length in pixels
    pub tile_size: f32,

    // === Penguin ===
    /// Thrust magnitude toward the target fish (pixels/tick²)
    pub acceleration: f32,
    /// Speed limit along the current heading (pixels/tick)
    pub max_speed: f32,
    /// Friction removed from speed each tick (pixels/tick²)
    pub drag: f32,
    /// Eating radius
    pub actor_radius: f32,
    /// Weight at level start
    pub initial_weight: u32,
    /// Weight added per fish eaten
    pub weight_gain: u32,
    /// Ice strength lost per unit of weight per tick
    pub erosion_rate: u32,

    // === Bait ===
    /// A tap this close to a fish removes it instead of placing a new one
    pub bait_pickup_radius: f32,
    /// Consumption priority
    pub bait_order: BaitOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,

            acceleration: PENGUIN_ACCELERATION,
            max_speed: PENGUIN_MAX_SPEED,
            drag: PENGUIN_DRAG,
            actor_radius: PENGUIN_RADIUS,
            initial_weight: PENGUIN_START_WEIGHT,
            weight_gain: WEIGHT_GAIN,
            erosion_rate: EROSION_RATE,

            bait_pickup_radius: BAIT_PICKUP_RADIUS,
            bait_order: BaitOrder::Fifo,
        }
    }
}

impl Settings {
    /// Default settings with a different consumption priority
    pub fn with_bait_order(order: BaitOrder) -> Self {
        Self {
            bait_order: order,
            ..Self::default()
        }
    }

    /// Ice strength removed per tick by a penguin of the given weight
    pub fn erosion_for(&self, weight: u32) -> u32 {
        weight.saturating_mul(self.erosion_rate)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("tile_size", self.tile_size)?;
        positive("max_speed", self.max_speed)?;
        positive("actor_radius", self.actor_radius)?;
        positive("bait_pickup_radius", self.bait_pickup_radius)?;
        non_negative("acceleration", self.acceleration)?;
        non_negative("drag", self.drag)?;
        Ok(())
    }

    /// Parse and validate settings JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: "must be non-negative and finite",
        })
    }
}
