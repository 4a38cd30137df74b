//! Fish placed by the player
//!
//! A tap near an existing fish picks it back up; a tap anywhere else drops a
//! new one. The penguin always chases the designated fish: the oldest under
//! `BaitOrder::Fifo`, the newest under `BaitOrder::Lifo`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::distance_sq;
use crate::settings::{BaitOrder, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bait {
    pub id: u32,
    pub pos: Vec2,
}

/// Outcome of a tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaitChange {
    Placed(Bait),
    Removed(Bait),
}

/// Active fish in placement order (oldest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaitQueue {
    items: Vec<Bait>,
    order: BaitOrder,
    pickup_radius: f32,
    next_id: u32,
}

impl BaitQueue {
    pub fn new(settings: &Settings) -> Self {
        Self {
            items: Vec::new(),
            order: settings.bait_order,
            pickup_radius: settings.bait_pickup_radius,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn order(&self) -> BaitOrder {
        self.order
    }

    /// Fish in placement order
    pub fn iter(&self) -> impl Iterator<Item = &Bait> {
        self.items.iter()
    }

    /// Toggle a fish at the release point
    pub fn handle_release(&mut self, pos: Vec2) -> BaitChange {
        let reach_sq = self.pickup_radius * self.pickup_radius;
        if let Some(idx) = self
            .items
            .iter()
            .position(|b| distance_sq(b.pos, pos) <= reach_sq)
        {
            let bait = self.items.remove(idx);
            log::debug!("Picked up fish {} at ({:.1}, {:.1})", bait.id, bait.pos.x, bait.pos.y);
            return BaitChange::Removed(bait);
        }

        let bait = Bait {
            id: self.next_id,
            pos,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(bait);
        log::debug!("Placed fish {} at ({:.1}, {:.1})", bait.id, pos.x, pos.y);
        BaitChange::Placed(bait)
    }

    fn designated_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        match self.order {
            BaitOrder::Fifo => Some(0),
            BaitOrder::Lifo => Some(self.items.len() - 1),
        }
    }

    /// The fish the penguin is chasing
    pub fn designated(&self) -> Option<&Bait> {
        self.designated_index().map(|i| &self.items[i])
    }

    /// Position of the fish the penguin is chasing
    pub fn target(&self) -> Option<Vec2> {
        self.designated().map(|b| b.pos)
    }

    /// Remove the designated fish after it was eaten
    pub fn consume(&mut self) -> Option<Bait> {
        let idx = self.designated_index()?;
        Some(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
