//! Game state and core simulation types
//!
//! `GameState` owns the level pack, the settings, and, while a level is
//! loaded, the `Session` (grid + penguin + fish) being played.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::bait::BaitQueue;
use super::grid::TileGrid;
use super::tick::PointerEdge;
use crate::error::LevelError;
use crate::levels::LevelPack;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for assets and a tap
    Start,
    /// Level prompt, waiting for a tap
    Ready,
    /// Active simulation
    Play,
    /// Level cleared
    Victory,
    /// Penguin fell in
    Defeat,
    /// Every level cleared
    UltraVictory,
}

/// Everything that lives exactly as long as one attempt at a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub grid: TileGrid,
    pub actor: Actor,
    pub bait: BaitQueue,
}

impl Session {
    /// Fresh attempt: penguin at the spawn point, no fish
    pub fn new(grid: TileGrid, settings: &Settings) -> Self {
        let actor = Actor::new(grid.spawn_point(), settings);
        Self {
            grid,
            actor,
            bait: BaitQueue::new(settings),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Level being (or about to be) played
    pub level_index: usize,
    /// Times the current level has been started
    pub attempts: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pointer edge seen by the most recent tick
    pub last_input: PointerEdge,
    /// Present while a level is loaded (Play, Victory, Defeat)
    pub session: Option<Session>,
    pub levels: LevelPack,
    pub settings: Settings,
}

impl GameState {
    pub fn new(levels: LevelPack, settings: Settings) -> Self {
        Self {
            phase: GamePhase::Start,
            level_index: 0,
            attempts: 0,
            time_ticks: 0,
            last_input: PointerEdge::Idle,
            session: None,
            levels,
            settings,
        }
    }

    pub fn has_more_levels(&self) -> bool {
        self.level_index < self.levels.len()
    }

    /// Decode the current level into a fresh session
    pub fn load_session(&self) -> Result<Session, LevelError> {
        let level = self.levels.get(self.level_index)?;
        let grid = level.decode(self.settings.tile_size)?;
        Ok(Session::new(grid, &self.settings))
    }

    pub fn level_name(&self) -> Option<&str> {
        self.levels
            .levels
            .get(self.level_index)
            .map(|l| l.name.as_str())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(LevelPack::builtin(), Settings::default())
    }
}
