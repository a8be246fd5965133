//! Sprint: the main ground movement state. Off-forward input pays a speed
//! and acceleration penalty through the sprint change factor.

use glam::Vec2;

use super::{State, StateCtx};
use crate::input::is_mainly_forward;
use crate::tasks;

/// Half-angle of the "mainly forward" cone.
const FORWARD_CONE_DEG: f32 = 45.0;

pub(super) struct Sprint;

impl State for Sprint {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        tasks::start_standing(ctx.sched, ctx.state.cfg.stand_duration);
        let change_time = ctx.state.cfg.sprint_direction_change_time;
        let control = ctx.state.cfg.sprint_direction_control;
        ctx.state.movement.set_direction_change_time(change_time);
        ctx.state.movement.set_direction_control(control);
        None
    }

    fn exit(&mut self, ctx: &mut StateCtx) {
        // Sprint's loosened steering applies only while sprinting.
        let change_time = ctx.state.cfg.direction_change_time;
        ctx.state.movement.set_direction_change_time(change_time);
        ctx.state.movement.set_direction_control(1.0);
    }

    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        let intensity = ctx.state.cfg.head_bob_intensity;
        let speed = ctx.state.cfg.head_bob_speed;
        let axis = ctx.state.input.axis;
        ctx.state.camera.set_head_bob(intensity, speed, dt);
        ctx.state.camera.head_bob(axis != Vec2::ZERO, dt);
        ctx.state.camera.rotate_body_mesh_to_input(axis, dt);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, dt: f32) -> Option<&'static str> {
        let cfg = &ctx.state.cfg;
        let forward = is_mainly_forward(ctx.state.input.axis, FORWARD_CONE_DEG);
        let factor = if forward { 1.0 } else { cfg.sprint_change_factor };
        let target = cfg.sprinting_speed * factor;
        let accel_time = cfg.sprint_acceleration_time * factor;

        if ctx.state.movement.current_speed() < target {
            ctx.state.movement.accelerate(dt, target, accel_time);
        } else {
            ctx.state.movement.decelerate_toward(dt, target, accel_time);
        }

        if ctx.state.input.axis == Vec2::ZERO {
            return Some("Decceleration");
        }
        if !ctx.state.movement.is_on_floor() {
            return Some("Air");
        }
        if ctx.state.input.jump_pressed {
            return Some("Jump");
        }
        None
    }
}
