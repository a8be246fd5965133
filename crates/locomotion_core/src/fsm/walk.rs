//! Walk: held-back ground movement. Reachable when sprint is released on the
//! floor; the default Idle flow goes straight to Sprint.

use glam::Vec2;

use super::{State, StateCtx};
use crate::tasks;

pub(super) struct Walk;

impl State for Walk {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        tasks::start_standing(ctx.sched, ctx.state.cfg.stand_duration);
        None
    }

    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        let intensity = ctx.state.cfg.walk_head_bob_intensity;
        let speed = ctx.state.cfg.walk_head_bob_speed;
        let has_input = ctx.state.input.axis != Vec2::ZERO;
        ctx.state.camera.set_head_bob(intensity, speed, dt);
        ctx.state.camera.head_bob(has_input, dt);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, dt: f32) -> Option<&'static str> {
        let walk_speed = ctx.state.cfg.walk_speed;
        let accel_time = ctx.state.cfg.walk_acceleration_time;
        ctx.state.movement.accelerate(dt, walk_speed, accel_time);

        let on_floor = ctx.state.movement.is_on_floor();
        if on_floor && ctx.state.input.crouch {
            return Some("Crouch");
        }
        if ctx.state.input.jump_pressed {
            return Some("Jump");
        }
        if on_floor && ctx.state.input.sprint {
            return Some("Sprint");
        }
        if ctx.state.input.axis == Vec2::ZERO {
            return Some("Idle");
        }
        if !on_floor {
            return Some("Air");
        }
        None
    }
}
