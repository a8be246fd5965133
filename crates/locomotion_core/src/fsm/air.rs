//! Air: gravity integration, reduced steering, and the coyote-time window.
//!
//! Gravity is asymmetric: full strength while ascending, multiplied while
//! descending so the fall reads snappier than the rise.

use glam::Vec2;

use super::{State, StateCtx, StateId};
use crate::input::is_mainly_forward;
use crate::tasks;

const FORWARD_CONE_DEG: f32 = 45.0;
/// Air steering reacts faster than ground steering.
const AIR_DIRECTION_TIME_SCALE: f32 = 0.5;

#[derive(Default)]
pub(super) struct Air {
    air_time: f32,
    coyote_armed: bool,
}

impl State for Air {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        tasks::start_standing(ctx.sched, ctx.state.cfg.stand_duration);
        let control = ctx.state.cfg.air_control;
        let change_time = ctx.state.cfg.direction_change_time * AIR_DIRECTION_TIME_SCALE;
        ctx.state.movement.set_direction_control(control);
        ctx.state.movement.set_direction_change_time(change_time);
        self.air_time = 0.0;
        // Falling off an edge keeps a jump grace window; a jump that is
        // already airborne must not grant a second one.
        self.coyote_armed = ctx.previous != StateId::Jump;
        None
    }

    fn exit(&mut self, ctx: &mut StateCtx) {
        let change_time = ctx.state.cfg.direction_change_time;
        ctx.state.movement.set_direction_change_time(change_time);
        ctx.state.movement.set_direction_control(1.0);
    }

    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        ctx.state.camera.follow_mesh_to_neck(dt);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, dt: f32) -> Option<&'static str> {
        let gravity = ctx.state.movement.gravity;
        let multiplier = ctx.state.cfg.gravity_multiplier;
        let vy = ctx.state.movement.velocity().y;
        let vy = if vy > 0.0 {
            vy - gravity * dt
        } else {
            vy - gravity * multiplier * dt
        };
        ctx.state.movement.set_y_velocity(vy);
        self.air_time += dt;

        let forward = is_mainly_forward(ctx.state.input.axis, FORWARD_CONE_DEG);
        let factor = if forward {
            1.0
        } else {
            ctx.state.cfg.air_change_factor
        };
        let target = ctx.state.cfg.air_speed * factor;
        let accel_time = ctx.state.cfg.air_acceleration_time * factor;
        if ctx.state.movement.current_speed() < target {
            ctx.state.movement.accelerate(dt, target, accel_time);
        } else {
            ctx.state.movement.decelerate_toward(dt, target, accel_time);
        }

        if ctx.state.movement.is_on_floor() {
            return if ctx.state.input.axis != Vec2::ZERO {
                Some("Sprint")
            } else {
                Some("Decceleration")
            };
        }
        if self.coyote_armed && self.air_time <= ctx.state.cfg.coyote_time
            && ctx.state.input.jump_pressed
        {
            self.coyote_armed = false;
            return Some("Jump");
        }
        None
    }
}
