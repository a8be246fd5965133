//! Long-running camera behaviors as cooperative tasks.
//!
//! Each behavior runs under a fixed key so restarting one replaces the live
//! instance instead of racing it (one writer per output). Cancellation leaves
//! partial values in place; the standing transition in particular must be
//! cancellable mid-flight without snapping.

use core_math::smooth_factor;
use task_core::{Commands, Segment, Step, Task};

use crate::camera::{ALIGN_SMOOTH_SPEED, STANDING_HEAD_HEIGHT};
use crate::input::MIN_DURATION;
use crate::player::PlayerState;

/// Standing transition (physics segment).
pub const STAND: &str = "stand";
/// Auto-facing supervisor (update segment).
pub const AUTO_FACE: &str = "auto-face";
/// Whichever mesh alignment pass the supervisor spawned (update segment).
pub const MESH_ALIGN: &str = "mesh-align";

/// Mesh angle beyond which the supervisor re-aligns.
const ANGLE_THRESHOLD_DEG: f32 = 90.0;
/// Angular velocity above which alignment switches to the constant blend.
const ANGULAR_VELOCITY_THRESHOLD: f32 = 500.0;
/// Duration of the discrete alignment pass.
const DISCRETE_ALIGN_DURATION: f32 = 0.3;
/// Constant alignment stops below this angular error.
const ALIGN_STOP_DEG: f32 = 5.0;

/// Start (or restart) the standing transition.
pub fn start_standing(sched: &mut task_core::Scheduler<PlayerState>, duration: f32) {
    sched.run(STAND, Segment::Physics, Stand::new(duration));
}

/// Cancel the standing transition, keeping the partial head height.
pub fn stop_standing(sched: &mut task_core::Scheduler<PlayerState>) {
    sched.cancel(STAND);
}

/// Lerp the head height to the standing offset over a fixed duration.
pub struct Stand {
    duration: f32,
    elapsed: f32,
    started: bool,
}

impl Stand {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            started: false,
        }
    }
}

impl Task<PlayerState> for Stand {
    fn step(&mut self, ctx: &mut PlayerState, _cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        if !self.started {
            self.started = true;
            ctx.movement.set_collider_state(true);
        }
        self.elapsed += dt;
        let t = (self.elapsed / self.duration.max(MIN_DURATION)).min(1.0);
        let mut head = ctx.camera.head_position();
        head.y += (STANDING_HEAD_HEIGHT - head.y) * t;
        ctx.camera.set_head_position(head);
        if self.elapsed >= self.duration {
            Step::Done
        } else {
            Step::Continue
        }
    }
}

/// Discrete alignment: linear blend of the body mesh toward the neck over a
/// fixed wall-clock duration.
pub struct AlignMeshDiscrete {
    duration: f32,
    elapsed: f32,
}

impl AlignMeshDiscrete {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }
}

impl Task<PlayerState> for AlignMeshDiscrete {
    fn step(&mut self, ctx: &mut PlayerState, _cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        self.elapsed += dt;
        let t = self.elapsed / self.duration.max(MIN_DURATION);
        ctx.camera.blend_body_mesh_to_neck(t);
        if self.elapsed >= self.duration {
            Step::Done
        } else {
            Step::Continue
        }
    }
}

/// Constant alignment: exponential blend until the angular error falls below
/// the stop threshold.
#[derive(Default)]
pub struct AlignMeshConstant;

impl Task<PlayerState> for AlignMeshConstant {
    fn step(&mut self, ctx: &mut PlayerState, _cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        ctx.camera
            .blend_body_mesh_to_neck(smooth_factor(dt, ALIGN_SMOOTH_SPEED));
        ctx.camera.refresh_mesh_angle();
        if ctx.camera.current_angle_deg().abs() <= ALIGN_STOP_DEG {
            Step::Done
        } else {
            Step::Continue
        }
    }
}

enum AutoFacePhase {
    /// Initial catch-up alignment before monitoring begins.
    Start,
    Monitor,
}

/// Auto-facing supervisor: watches the neck-vs-mesh angle every update tick
/// and re-aligns once the player has turned past the threshold. Slow turns
/// get the discrete 0.3 s pass; fast continuous turning gets the constant
/// blend so the supervisor never fights the player's own rotation.
pub struct AutoFace {
    phase: AutoFacePhase,
}

impl AutoFace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: AutoFacePhase::Start,
        }
    }
}

impl Default for AutoFace {
    fn default() -> Self {
        Self::new()
    }
}

impl Task<PlayerState> for AutoFace {
    fn step(&mut self, ctx: &mut PlayerState, cmds: &mut Commands<PlayerState>, dt: f32) -> Step {
        match self.phase {
            AutoFacePhase::Start => {
                self.phase = AutoFacePhase::Monitor;
                cmds.run(MESH_ALIGN, Segment::Update, AlignMeshConstant);
                Step::Await(MESH_ALIGN)
            }
            AutoFacePhase::Monitor => {
                let angle = ctx.camera.current_angle_deg().abs();
                let rate = ctx.camera.sample_angle_rate(dt);
                if angle > ANGLE_THRESHOLD_DEG {
                    if rate < ANGULAR_VELOCITY_THRESHOLD {
                        cmds.run(
                            MESH_ALIGN,
                            Segment::Update,
                            AlignMeshDiscrete::new(DISCRETE_ALIGN_DURATION),
                        );
                    } else {
                        cmds.run(MESH_ALIGN, Segment::Update, AlignMeshConstant);
                    }
                    return Step::Await(MESH_ALIGN);
                }
                Step::Continue
            }
        }
    }
}
