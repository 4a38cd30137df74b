//! The penguin
//!
//! Per-tick physics, in order:
//! 1. Face the target fish; eat it if within `radius`, otherwise thrust toward it
//! 2. No target: no thrust
//! 3. `vel += accel`
//! 4. Cap speed along the current heading (circular limit)
//! 5. Drag along the heading, per component, never crossing zero
//! 6. `pos += vel`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::{approach_zero, heading};

/// What the physics update did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorUpdate {
    /// Thrusting toward a fish
    Chasing,
    /// The target fish is within reach and should be removed by the caller
    BaitConsumed,
    /// No fish anywhere: sliding to a stop
    Coasting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Facing (radians)
    pub angle: f32,
    pub weight: u32,
    pub radius: f32,
    acceleration_rating: f32,
    max_speed: f32,
    drag: f32,
}

impl Actor {
    /// Spawn at rest
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            angle: 0.0,
            weight: settings.initial_weight,
            radius: settings.actor_radius,
            acceleration_rating: settings.acceleration,
            max_speed: settings.max_speed,
            drag: settings.drag,
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Eat a fish
    pub fn gain_weight(&mut self, gain: u32) {
        self.weight = self.weight.saturating_add(gain);
    }

    /// Advance one tick toward `target`
    pub fn update(&mut self, target: Option<Vec2>) -> ActorUpdate {
        let outcome = match target {
            Some(target) => {
                let offset = target - self.pos;
                self.angle = heading(offset);
                if offset.length_squared() <= self.radius * self.radius {
                    self.accel = Vec2::ZERO;
                    ActorUpdate::BaitConsumed
                } else {
                    self.accel = offset.normalize_or_zero() * self.acceleration_rating;
                    ActorUpdate::Chasing
                }
            }
            None => {
                self.accel = Vec2::ZERO;
                ActorUpdate::Coasting
            }
        };

        self.vel += self.accel;
        self.cap_speed();
        self.apply_drag();
        self.pos += self.vel;

        outcome
    }

    fn cap_speed(&mut self) {
        let speed = self.vel.length();
        if speed > self.max_speed {
            // Same as clamping each component to max_speed * (cos, sin) of the heading
            self.vel *= self.max_speed / speed;
        }
    }

    fn apply_drag(&mut self) {
        let friction = self.vel.normalize_or_zero() * self.drag;
        self.vel.x = approach_zero(self.vel.x, friction.x);
        self.vel.y = approach_zero(self.vel.y, friction.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn penguin_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2::new(x, y), &Settings::default())
    }

    #[test]
    fn test_spawn_at_rest() {
        let actor = penguin_at(16.0, 16.0);
        assert_eq!(actor.vel, Vec2::ZERO);
        assert_eq!(actor.weight, Settings::default().initial_weight);
        assert_eq!(actor.radius, Settings::default().actor_radius);
    }

    #[test]
    fn test_chases_target() {
        let mut actor = penguin_at(0.0, 0.0);
        let outcome = actor.update(Some(Vec2::new(100.0, 0.0)));
        assert_eq!(outcome, ActorUpdate::Chasing);
        assert!(actor.angle.abs() < 1e-6);
        // accel 4, drag 1: three pixels on the first tick
        assert!((actor.vel.x - 3.0).abs() < 1e-5);
        assert!((actor.pos.x - 3.0).abs() < 1e-5);
        assert_eq!(actor.pos.y, 0.0);
    }

    #[test]
    fn test_consumes_target_within_radius() {
        let mut actor = penguin_at(10.0, 10.0);
        actor.vel = Vec2::new(2.0, 0.0);
        let outcome = actor.update(Some(Vec2::new(15.0, 10.0)));
        assert_eq!(outcome, ActorUpdate::BaitConsumed);
        assert_eq!(actor.accel, Vec2::ZERO);
        // Still coasts this tick
        assert!((actor.vel.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_on_top_of_actor() {
        let mut actor = penguin_at(50.0, 50.0);
        let outcome = actor.update(Some(Vec2::new(50.0, 50.0)));
        assert_eq!(outcome, ActorUpdate::BaitConsumed);
        assert_eq!(actor.vel, Vec2::ZERO);
        assert_eq!(actor.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_coasts_to_stop() {
        let mut actor = penguin_at(0.0, 0.0);
        actor.vel = Vec2::new(-4.0, 0.0);
        let mut ticks = 0;
        while actor.vel != Vec2::ZERO {
            assert_eq!(actor.update(None), ActorUpdate::Coasting);
            assert!(actor.vel.x <= 0.0);
            ticks += 1;
            assert!(ticks < 20, "penguin never stopped");
        }
        assert_eq!(ticks, 4);
        assert_eq!(actor.pos.x, -6.0);
    }

    #[test]
    fn test_speed_capped_along_heading() {
        let mut actor = penguin_at(0.0, 0.0);
        for _ in 0..50 {
            actor.update(Some(Vec2::new(10_000.0, 10_000.0)));
        }
        // Diagonal travel stays on the diagonal: a circular limit, not a box
        assert_eq!(actor.vel.x, actor.vel.y);
        let settings = Settings::default();
        assert!((actor.speed() - (settings.max_speed - settings.drag)).abs() < 1e-3);
    }

    #[test]
    fn test_gain_weight() {
        let mut actor = penguin_at(0.0, 0.0);
        actor.gain_weight(2);
        assert_eq!(actor.weight, Settings::default().initial_weight + 2);
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_max(
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            target in prop::option::of((-500.0f32..500.0, -500.0f32..500.0)),
        ) {
            let mut actor = penguin_at(0.0, 0.0);
            actor.vel = Vec2::new(vx, vy);
            actor.update(target.map(|(x, y)| Vec2::new(x, y)));
            prop_assert!(actor.speed() <= actor.max_speed() * (1.0 + 1e-5));
        }

        #[test]
        fn prop_drag_never_reverses(
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
        ) {
            let mut actor = penguin_at(0.0, 0.0);
            actor.vel = Vec2::new(vx, vy);
            actor.update(None);
            prop_assert!(actor.vel.x * vx >= 0.0);
            prop_assert!(actor.vel.y * vy >= 0.0);
            prop_assert!(actor.vel.x.abs() <= vx.abs());
            prop_assert!(actor.vel.y.abs() <= vy.abs());
        }
    }
}
