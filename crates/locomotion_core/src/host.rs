//! Host-side collision interface.
//!
//! The locomotion core never owns collision resolution. Each physics tick it
//! hands the desired velocity to a [`CharacterBody`] and reads back the
//! resolved velocity and floor-contact state. The renderer/physics layer
//! implements this against real static geometry; [`FlatGround`] is the test
//! double used by unit tests and the headless harness.

use glam::Vec3;

/// Kinematic move-and-collide resolution supplied by the host.
pub trait CharacterBody {
    /// Move by `velocity * dt`, resolving against static geometry, and
    /// return the adjusted velocity.
    fn move_and_slide(&mut self, velocity: Vec3, dt: f32) -> Vec3;
    /// Floor contact state after the last move.
    fn is_on_floor(&self) -> bool;
    fn position(&self) -> Vec3;
}

/// Infinite flat ground at a fixed height. No walls, no slopes.
#[derive(Debug, Clone, Copy)]
pub struct FlatGround {
    pub pos: Vec3,
    pub ground_y: f32,
    on_floor: bool,
}

impl FlatGround {
    #[must_use]
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            ground_y: 0.0,
            on_floor: pos.y <= 0.0,
        }
    }

    /// Start the body airborne at the given height.
    #[must_use]
    pub fn airborne_at(pos: Vec3) -> Self {
        Self {
            pos,
            ground_y: 0.0,
            on_floor: false,
        }
    }
}

impl CharacterBody for FlatGround {
    fn move_and_slide(&mut self, velocity: Vec3, dt: f32) -> Vec3 {
        self.pos += velocity * dt;
        let mut v = velocity;
        if self.pos.y <= self.ground_y {
            self.pos.y = self.ground_y;
            if v.y < 0.0 {
                v.y = 0.0;
            }
            self.on_floor = true;
        } else {
            self.on_floor = false;
        }
        v
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn position(&self) -> Vec3 {
        self.pos
    }
}
