//! Pointer input edges
//!
//! Mouse and touch handlers call into `PointerTracker` whenever the host
//! fires an event; the game loop calls `sample` exactly once per tick.
//! A press and release that both land between two ticks still produce one
//! `Released` sample, so very short taps are never lost.

use glam::Vec2;

use crate::sim::{PointerEdge, TickInput};

/// One finished press
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stroke {
    start: Vec2,
    end: Vec2,
    held_ticks: u32,
}

/// Pointer state as seen by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub edge: PointerEdge,
    /// Current (or release) position in canvas space
    pub pos: Vec2,
    /// Where the press began
    pub start: Vec2,
    /// Ticks the press was observed as held
    pub held_ticks: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Canvas origin in client coordinates
    offset: Vec2,
    pressed: bool,
    start: Vec2,
    current: Vec2,
    held_ticks: u32,
    released: Option<Stroke>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas origin in client coordinates (update on scroll/resize)
    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = Vec2::new(x, y);
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn to_canvas(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) - self.offset
    }

    /// Mouse down / touch start, client coordinates
    pub fn press(&mut self, x: f32, y: f32) {
        let pos = self.to_canvas(x, y);
        self.pressed = true;
        self.start = pos;
        self.current = pos;
        self.held_ticks = 0;
    }

    /// Mouse / touch move. Ignored while not pressed.
    pub fn moved(&mut self, x: f32, y: f32) {
        if self.pressed {
            self.current = self.to_canvas(x, y);
        }
    }

    /// Mouse up with coordinates
    pub fn release(&mut self, x: f32, y: f32) {
        if self.pressed {
            self.current = self.to_canvas(x, y);
            self.finish();
        }
    }

    /// Touch end / cancel, or the pointer leaving the canvas: release where it last was
    pub fn leave(&mut self) {
        if self.pressed {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.pressed = false;
        self.released = Some(Stroke {
            start: self.start,
            end: self.current,
            held_ticks: self.held_ticks,
        });
    }

    /// Consume the pointer state for this tick
    pub fn sample(&mut self) -> PointerSample {
        if let Some(stroke) = self.released.take() {
            return PointerSample {
                edge: PointerEdge::Released,
                pos: stroke.end,
                start: stroke.start,
                held_ticks: stroke.held_ticks,
            };
        }

        let edge = if self.pressed {
            self.held_ticks += 1;
            PointerEdge::Held
        } else {
            PointerEdge::Idle
        };
        PointerSample {
            edge,
            pos: self.current,
            start: self.start,
            held_ticks: self.held_ticks,
        }
    }
}

impl TickInput {
    pub fn from_sample(sample: &PointerSample, assets_loaded: bool) -> Self {
        Self {
            pointer: sample.edge,
            pointer_pos: sample.pos,
            assets_loaded,
        }
    }
}
