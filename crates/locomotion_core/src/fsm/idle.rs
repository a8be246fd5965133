//! Idle: standing still. The auto-facing supervisor owns mesh rotation while
//! no movement state is steering it.

use glam::Vec2;
use task_core::Segment;

use super::{State, StateCtx};
use crate::tasks::{self, AutoFace};

pub(super) struct Idle;

impl State for Idle {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        tasks::start_standing(ctx.sched, ctx.state.cfg.stand_duration);
        ctx.sched.run(tasks::AUTO_FACE, Segment::Update, AutoFace::new());
        None
    }

    fn exit(&mut self, ctx: &mut StateCtx) {
        ctx.sched.cancel(tasks::AUTO_FACE);
        ctx.sched.cancel(tasks::MESH_ALIGN);
    }

    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        // Settle any residual head bob while standing still.
        ctx.state.camera.head_bob(false, dt);
    }

    fn physics_update(&mut self, ctx: &mut StateCtx, _dt: f32) -> Option<&'static str> {
        if ctx.state.input.crouch {
            return Some("Crouch");
        }
        if ctx.state.input.jump_pressed {
            return Some("Jump");
        }
        if ctx.state.input.axis != Vec2::ZERO {
            return Some("Sprint");
        }
        if !ctx.state.movement.is_on_floor() {
            return Some("Air");
        }
        None
    }
}
