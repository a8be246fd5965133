//! Locomotion state machine.
//!
//! States are a closed set of tagged variants with small per-case scratch
//! payloads. Per-state logic is pure with respect to notification: a physics
//! update returns at most one transition request (first matching condition
//! wins), and the driver performs the swap. Exit of the outgoing state
//! always runs before Enter of the incoming one, and no hook runs outside
//! its state's Enter/Exit window.
//!
//! Transition requests are resolved by name. An unregistered name (states
//! may request "Crouch", which has no handler here) is a programming error:
//! it is logged and ignored, never a crash.

mod air;
mod decceleration;
mod idle;
mod jump;
mod ladder;
mod sprint;
mod walk;

pub use ladder::{LADDER_LOOP, LADDER_RUNG};

use task_core::Scheduler;

use crate::input::MIN_DURATION;
use crate::player::PlayerState;

/// Tag for the active locomotion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Idle,
    Walk,
    Sprint,
    Decceleration,
    Air,
    Jump,
    Ladder,
}

impl StateId {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StateId::Idle => "Idle",
            StateId::Walk => "Walk",
            StateId::Sprint => "Sprint",
            StateId::Decceleration => "Decceleration",
            StateId::Air => "Air",
            StateId::Jump => "Jump",
            StateId::Ladder => "Ladder",
        }
    }

    fn from_name(name: &str) -> Option<StateId> {
        match name {
            "Idle" => Some(StateId::Idle),
            "Walk" => Some(StateId::Walk),
            "Sprint" => Some(StateId::Sprint),
            "Decceleration" => Some(StateId::Decceleration),
            "Air" => Some(StateId::Air),
            "Jump" => Some(StateId::Jump),
            "Ladder" => Some(StateId::Ladder),
            _ => None,
        }
    }
}

/// Everything a state hook may touch: the shared player state, the task
/// scheduler, and the identity of the previously active state.
pub struct StateCtx<'a> {
    pub state: &'a mut PlayerState,
    pub sched: &'a mut Scheduler<PlayerState>,
    pub previous: StateId,
}

/// Shared operation set for the tagged variants. Enter may itself request a
/// follow-up transition (the jump impulse does), which the driver chains.
pub(crate) trait State {
    fn enter(&mut self, ctx: &mut StateCtx) -> Option<&'static str> {
        let _ = ctx;
        None
    }
    fn exit(&mut self, ctx: &mut StateCtx) {
        let _ = ctx;
    }
    fn update(&mut self, ctx: &mut StateCtx, dt: f32) {
        let _ = (ctx, dt);
    }
    fn physics_update(&mut self, ctx: &mut StateCtx, dt: f32) -> Option<&'static str>;
}

/// State machine driver. Owns one instance of every state's scratch data;
/// transitions swap the active tag, never allocate.
pub struct Fsm {
    current: StateId,
    previous: StateId,
    idle: idle::Idle,
    walk: walk::Walk,
    sprint: sprint::Sprint,
    decceleration: decceleration::Decceleration,
    air: air::Air,
    jump: jump::Jump,
    ladder: ladder::Ladder,
}

impl Fsm {
    /// Build the machine and run the one-time jump setup: gravity is derived
    /// from jump height and time-to-peak by projectile kinematics. This is
    /// the only writer of `MovementState::gravity`.
    #[must_use]
    pub fn new(state: &mut PlayerState) -> Self {
        let t = state.cfg.time_to_peak.max(MIN_DURATION);
        state.movement.gravity = 2.0 * state.cfg.jump_height / (t * t);
        Self {
            current: StateId::Idle,
            previous: StateId::Idle,
            idle: idle::Idle,
            walk: walk::Walk,
            sprint: sprint::Sprint,
            decceleration: decceleration::Decceleration::default(),
            air: air::Air::default(),
            jump: jump::Jump,
            ladder: ladder::Ladder,
        }
    }

    /// Enter the initial state. Separate from `new` so the scheduler exists
    /// before Idle spawns its tasks.
    pub fn start(&mut self, state: &mut PlayerState, sched: &mut Scheduler<PlayerState>) {
        let mut ctx = StateCtx {
            state: &mut *state,
            sched: &mut *sched,
            previous: self.previous,
        };
        let current = self.current;
        let follow_up = self.state_mut(current).enter(&mut ctx);
        if let Some(name) = follow_up {
            self.resolve(name, state, sched);
        }
    }

    #[must_use]
    pub fn current(&self) -> StateId {
        self.current
    }

    #[must_use]
    pub fn previous(&self) -> StateId {
        self.previous
    }

    /// Variable-rate hook for the active state (camera smoothing, head bob).
    pub fn update(&mut self, state: &mut PlayerState, sched: &mut Scheduler<PlayerState>, dt: f32) {
        let mut ctx = StateCtx {
            state: &mut *state,
            sched: &mut *sched,
            previous: self.previous,
        };
        let current = self.current;
        self.state_mut(current).update(&mut ctx, dt);
    }

    /// Fixed-rate hook: per-state physics plus transition evaluation. At most
    /// one transition request is produced per tick; Enter-time follow-ups
    /// (jump → air) are chained within the same tick.
    pub fn physics_update(
        &mut self,
        state: &mut PlayerState,
        sched: &mut Scheduler<PlayerState>,
        dt: f32,
    ) {
        let mut ctx = StateCtx {
            state: &mut *state,
            sched: &mut *sched,
            previous: self.previous,
        };
        let current = self.current;
        let request = self.state_mut(current).physics_update(&mut ctx, dt);
        if let Some(name) = request {
            self.resolve(name, state, sched);
        }
    }

    /// Host-facing named transition signal (ladder volume triggers, scripted
    /// sequences). Unregistered names are logged and ignored.
    pub fn request(
        &mut self,
        name: &'static str,
        state: &mut PlayerState,
        sched: &mut Scheduler<PlayerState>,
    ) {
        self.resolve(name, state, sched);
    }

    fn resolve(
        &mut self,
        name: &'static str,
        state: &mut PlayerState,
        sched: &mut Scheduler<PlayerState>,
    ) {
        let mut pending = Some(name);
        let mut depth = 0;
        while let Some(n) = pending.take() {
            depth += 1;
            if depth > 8 {
                log::error!("transition chain from {} exceeded depth limit", self.current.name());
                break;
            }
            let Some(target) = StateId::from_name(n) else {
                log::warn!(
                    "unregistered transition target '{n}' requested from {}; staying put",
                    self.current.name()
                );
                break;
            };
            log::debug!("transition {} -> {}", self.current.name(), target.name());
            let mut ctx = StateCtx {
                state: &mut *state,
                sched: &mut *sched,
                previous: self.previous,
            };
            let current = self.current;
            self.state_mut(current).exit(&mut ctx);
            self.previous = self.current;
            self.current = target;
            let mut ctx = StateCtx {
                state: &mut *state,
                sched: &mut *sched,
                previous: self.previous,
            };
            pending = self.state_mut(target).enter(&mut ctx);
        }
    }

    fn state_mut(&mut self, id: StateId) -> &mut dyn State {
        match id {
            StateId::Idle => &mut self.idle,
            StateId::Walk => &mut self.walk,
            StateId::Sprint => &mut self.sprint,
            StateId::Decceleration => &mut self.decceleration,
            StateId::Air => &mut self.air,
            StateId::Jump => &mut self.jump,
            StateId::Ladder => &mut self.ladder,
        }
    }
}
