//! Read-only view of the game for renderers
//!
//! Built after each tick; the simulation never draws.

use glam::Vec2;
use serde::Serialize;

use super::grid::{TileGrid, TileKind};
use super::state::{GamePhase, GameState};
use super::tick::PointerEdge;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellView {
    pub kind: TileKind,
    /// Normalized strength for shading
    pub shade: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    /// Row-major
    pub cells: Vec<CellView>,
}

impl From<&TileGrid> for GridView {
    fn from(grid: &TileGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            tile_size: grid.tile_size(),
            cells: grid
                .cells()
                .iter()
                .map(|t| CellView {
                    kind: t.kind(),
                    shade: t.shade(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub weight: u32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: Option<String>,
    pub attempts: u32,
    /// Pointer edge seen by the most recent tick
    pub last_input: PointerEdge,
    pub grid: Option<GridView>,
    pub actor: Option<ActorView>,
    /// Fish in placement order
    pub bait: Vec<Vec2>,
    /// Fish the penguin is chasing
    pub target: Option<Vec2>,
    pub goals_completed: u32,
    pub goals_total: u32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let session = state.session.as_ref();
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            level_index: state.level_index,
            level_count: state.levels.len(),
            level_name: state.level_name().map(str::to_string),
            attempts: state.attempts,
            last_input: state.last_input,
            grid: session.map(|s| GridView::from(&s.grid)),
            actor: session.map(|s| ActorView {
                pos: s.actor.pos,
                vel: s.actor.vel,
                angle: s.actor.angle,
                weight: s.actor.weight,
                radius: s.actor.radius,
            }),
            bait: session
                .map(|s| s.bait.iter().map(|b| b.pos).collect())
                .unwrap_or_default(),
            target: session.and_then(|s| s.bait.target()),
            goals_completed: session.map_or(0, |s| s.grid.goals_completed()),
            goals_total: session.map_or(0, |s| s.grid.goals_total()),
        }
    }
}
