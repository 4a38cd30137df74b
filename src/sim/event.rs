//! Events emitted during a simulation tick.
//! Renderers and sound consume these; the simulation never reads them back.

use glam::Vec2;
use serde::Serialize;

use super::grid::HazardCause;
use super::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelStarted { index: usize },
    LevelRejected { index: usize, reason: String },
    BaitPlaced { pos: Vec2 },
    BaitRemoved { pos: Vec2 },
    BaitConsumed { pos: Vec2, weight: u32 },
    IceEroded { col: usize, row: usize, remaining: u8 },
    GoalReached { col: usize, row: usize, completed: u32, total: u32 },
    Hazard { cause: HazardCause },
}
