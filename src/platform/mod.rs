//! Platform abstraction layer
//!
//! Turns what the host delivers into what the simulation consumes:
//! - Raw pointer events -> one `PointerEdge` per tick
//! - Real elapsed time -> a whole number of fixed ticks

pub mod input;
pub mod time;

pub use input::{PointerSample, PointerTracker};
pub use time::TickScheduler;
