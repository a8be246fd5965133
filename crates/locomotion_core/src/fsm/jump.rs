//! Jump: a one-tick impulse state. Gravity itself is derived once at machine
//! construction (`Fsm::new`) from jump height and time-to-peak; Enter only
//! applies the vertical impulse and immediately hands off to Air.

use super::{State, StateCtx};
use crate::tasks;

pub(super) struct Jump;

impl State for Jump {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        tasks::start_standing(ctx.sched, ctx.state.cfg.stand_duration);
        let gravity = ctx.state.movement.gravity;
        let jump_velocity = (2.0 * gravity * ctx.state.cfg.jump_height).sqrt();
        ctx.state.movement.set_y_velocity(jump_velocity);
        Some("Air")
    }

    fn physics_update(&mut self, _ctx: &mut StateCtx, _dt: f32) -> Option<&'static str> {
        // Never reached: Enter transitions out on the same tick.
        None
    }
}
