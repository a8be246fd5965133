//! Ladder: locked horizontal movement plus a rung-by-rung climbing loop.
//!
//! The outer loop pins velocity to zero and blends a climb direction toward
//! the vertical input. Once the blend saturates it hands one rung's worth of
//! travel to a sub-task that ramps speed toward the ladder speed and
//! accumulates distance until the bar spacing is covered, then control
//! returns to the loop.

use core_math::smooth_factor;
use glam::Vec3;
use task_core::{Commands, Segment, Step, Task};

use super::{State, StateCtx};
use crate::player::PlayerState;

/// Outer climbing loop (physics segment).
pub const LADDER_LOOP: &str = "ladder-climb";
/// Single-rung climb sub-task (physics segment).
pub const LADDER_RUNG: &str = "ladder-rung";

/// Base smoothing speed; climbing blends run at four times this.
const LERP_SPEED: f32 = 5.0;
/// Vertical input below this is ignored.
const INPUT_THRESHOLD: f32 = 0.1;
/// Climb direction saturation that triggers a rung climb.
const SATURATION: f32 = 0.95;

pub(super) struct Ladder;

impl State for Ladder {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        ctx.state.movement.set_current_speed(0.0);
        ctx.state.camera.set_mode_ladder();
        ctx.sched
            .run(LADDER_LOOP, Segment::Physics, ClimbLoop::default());
        None
    }

    fn exit(&mut self, ctx: &mut StateCtx) {
        ctx.state.camera.set_mode_normal();
        ctx.sched.cancel(LADDER_LOOP);
        ctx.sched.cancel(LADDER_RUNG);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, _dt: f32) -> Option<&'static str> {
        if ctx.state.movement.is_on_floor() {
            return Some("Idle");
        }
        // Jumping off, or drifting out of the ladder volume, kicks upward
        // and hands over to Air.
        if ctx.state.input.jump_pressed || !ctx.state.on_ladder {
            let impulse = ctx.state.cfg.ladder_jump_velocity;
            ctx.state.movement.set_y_velocity(impulse);
            return Some("Air");
        }
        None
    }
}

/// Outer climbing loop task.
#[derive(Default)]
struct ClimbLoop {
    climb_direction: Vec3,
}

impl Task<PlayerState> for ClimbLoop {
    fn step(&mut self, ctx: &mut PlayerState, cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        ctx.movement.set_velocity(Vec3::ZERO);
        let input_y = ctx.input.axis.y;
        if input_y.abs() > INPUT_THRESHOLD {
            // Forward input (negative y) climbs up.
            let target = Vec3::new(0.0, -input_y, 0.0).normalize_or_zero();
            self.climb_direction = self
                .climb_direction
                .lerp(target, smooth_factor(dt, LERP_SPEED * 4.0));
            if self.climb_direction.y.abs() >= SATURATION {
                cmds.run(
                    LADDER_RUNG,
                    Segment::Physics,
                    RungClimb::new(self.climb_direction.y),
                );
                return Step::Await(LADDER_RUNG);
            }
        }
        Step::Continue
    }
}

/// One rung's worth of climbing.
struct RungClimb {
    direction_y: f32,
    travelled: f32,
}

impl RungClimb {
    fn new(direction_y: f32) -> Self {
        Self {
            direction_y,
            travelled: 0.0,
        }
    }
}

impl Task<PlayerState> for RungClimb {
    fn step(&mut self, ctx: &mut PlayerState, _cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        let ladder_speed = ctx.cfg.ladder_speed;
        let blended = ctx.movement.current_speed()
            + (ladder_speed - ctx.movement.current_speed()) * smooth_factor(dt, LERP_SPEED * 4.0);
        ctx.movement.set_current_speed(blended);
        let velocity = Vec3::new(0.0, blended * self.direction_y, 0.0);
        ctx.movement.set_velocity(velocity);
        self.travelled += velocity.length() * dt;
        if self.travelled >= ctx.cfg.bar_spacing {
            Step::Done
        } else {
            Step::Continue
        }
    }
}
