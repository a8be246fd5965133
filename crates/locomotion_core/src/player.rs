//! Player aggregate: shared state, scheduler, and state machine wired to the
//! host's two-tick frame loop.
//!
//! Tick contract (mirrors the host engine):
//! - `update(dt)`: variable rate; input smoothing, camera smoothing, the
//!   active state's update hook, then update-segment tasks.
//! - `physics_update(body, dt)`: fixed rate; physics-segment tasks, then
//!   direction blending + velocity integration through the host body, then
//!   the active state's physics hook and transition resolution.
//!
//! All mutation happens on these ticks; nothing here is thread-aware.

use glam::{Vec2, Vec3};
use task_core::{Scheduler, Segment};

use crate::camera::CameraState;
use crate::fsm::{Fsm, StateId};
use crate::host::CharacterBody;
use crate::input::{InputState, SmoothedInput};
use crate::movement::MovementState;
use data_runtime::configs::locomotion::LocomotionCfg;

/// Shared mutable state the states and tasks operate on. Created once at
/// character spawn and lives for the character's lifetime.
pub struct PlayerState {
    pub cfg: LocomotionCfg,
    pub input: InputState,
    pub smoothed: SmoothedInput,
    pub movement: MovementState,
    pub camera: CameraState,
    /// Whether the character currently overlaps ladder geometry; fed by the
    /// host's collision layer.
    pub on_ladder: bool,
}

/// Locomotion driver for one player character.
pub struct Player {
    pub state: PlayerState,
    sched: Scheduler<PlayerState>,
    fsm: Fsm,
}

impl Player {
    #[must_use]
    pub fn new(cfg: LocomotionCfg) -> Self {
        let camera = CameraState::new(&cfg);
        let mut state = PlayerState {
            cfg,
            input: InputState::default(),
            smoothed: SmoothedInput::default(),
            movement: MovementState::new(),
            camera,
            on_ladder: false,
        };
        let mut sched = Scheduler::new();
        let mut fsm = Fsm::new(&mut state);
        fsm.start(&mut state, &mut sched);
        Self { state, sched, fsm }
    }

    /// Feed a mouse delta (display counts) into the camera.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.state.camera.apply_look(dx, dy);
    }

    /// Variable-rate tick.
    pub fn update(&mut self, dt: f32) {
        let raw = self.state.input.axis;
        let response = self.state.cfg.input_response_time;
        self.state.smoothed.step(raw, dt, response);

        self.state.camera.refresh_mesh_angle();
        self.state.camera.smooth_visuals(dt);

        self.fsm.update(&mut self.state, &mut self.sched, dt);
        self.sched.tick(Segment::Update, &mut self.state, dt);
    }

    /// Fixed-rate tick. `body` is the host's kinematic collision resolver.
    pub fn physics_update(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        self.sched.tick(Segment::Physics, &mut self.state, dt);

        if self.fsm.current() == StateId::Ladder {
            // The climbing loop owns the full velocity vector.
            self.state.movement.apply_velocity(body, dt);
        } else {
            let yaw = self.state.camera.yaw();
            self.state
                .movement
                .change_direction_with_input(self.state.input.axis, yaw);
            self.state.movement.apply_delayed_direction(dt);
            self.state.movement.integrate(body, dt);
        }

        self.fsm.physics_update(&mut self.state, &mut self.sched, dt);
    }

    /// Named transition signal from the host (e.g. a ladder volume trigger).
    pub fn request_transition(&mut self, name: &'static str) {
        self.fsm.request(name, &mut self.state, &mut self.sched);
    }

    #[must_use]
    pub fn current_state(&self) -> StateId {
        self.fsm.current()
    }

    #[must_use]
    pub fn previous_state(&self) -> StateId {
        self.fsm.previous()
    }

    // Facade accessors consumed by animation and UI debug overlays.

    #[must_use]
    pub fn current_speed(&self) -> f32 {
        self.state.movement.current_speed()
    }

    pub fn set_current_speed(&mut self, speed: f32) {
        self.state.movement.set_current_speed(speed);
    }

    #[must_use]
    pub fn local_velocity(&self) -> Vec3 {
        self.state.movement.velocity()
    }

    pub fn set_local_velocity(&mut self, velocity: Vec3) {
        self.state.movement.set_velocity(velocity);
    }

    #[must_use]
    pub fn player_direction(&self) -> Vec3 {
        self.state.movement.player_direction()
    }

    pub fn set_player_direction(&mut self, direction: Vec3) {
        self.state.movement.set_player_direction(direction);
    }

    #[must_use]
    pub fn smoothed_input(&self) -> Vec2 {
        self.state.smoothed.get()
    }

    #[must_use]
    pub fn head_position(&self) -> Vec3 {
        self.state.camera.head_position()
    }

    pub fn set_head_position(&mut self, position: Vec3) {
        self.state.camera.set_head_position(position);
    }
}
