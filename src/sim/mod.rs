//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, no clock reads
//! - No randomness
//! - Stable iteration order (fish in placement order, cells row-major)
//! - No rendering or platform dependencies

pub mod actor;
pub mod bait;
pub mod event;
pub mod grid;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorUpdate};
pub use bait::{Bait, BaitChange, BaitQueue};
pub use event::GameEvent;
pub use grid::{HazardCause, Tile, TileEffect, TileGrid, TileKind};
pub use snapshot::{ActorView, CellView, GridView, RenderSnapshot};
pub use state::{GamePhase, GameState, Session};
pub use tick::{PointerEdge, TickInput, tick};
