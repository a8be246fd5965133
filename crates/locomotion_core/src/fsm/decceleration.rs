//! Decceleration: bleeding off ground speed after input release, using the
//! speed captured at entry as the rate reference.

use glam::Vec2;

use super::{State, StateCtx};

#[derive(Default)]
pub(super) struct Decceleration {
    previous_speed: f32,
}

impl State for Decceleration {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        self.previous_speed = ctx.state.movement.current_speed();
        None
    }

    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        ctx.state.camera.head_bob(false, dt);
        ctx.state.camera.follow_mesh_to_neck(dt);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, dt: f32) -> Option<&'static str> {
        let decel_time = ctx.state.cfg.deceleration_time;
        ctx.state
            .movement
            .decelerate(dt, self.previous_speed, decel_time);

        // Threshold speed before it settles into idle.
        if ctx.state.movement.current_speed().round() <= 0.0 {
            ctx.state.movement.set_current_speed(0.0);
            return Some("Idle");
        }
        if !ctx.state.movement.is_on_floor() {
            return Some("Air");
        }
        if ctx.state.input.jump_pressed {
            return Some("Jump");
        }
        if ctx.state.input.axis != Vec2::ZERO {
            return Some("Sprint");
        }
        None
    }
}
