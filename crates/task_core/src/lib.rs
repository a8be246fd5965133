//! task_core: cooperative, single-threaded resumable tasks.
//!
//! The host frame loop issues two ordered ticks, a variable-rate `Update`
//! tick and a fixed-rate `Physics` tick. Long-running behaviors (standing
//! transitions, mesh alignment, ladder climbing) are modeled as named tasks
//! stepped once per matching tick. A task suspends by returning from `step`
//! and resumes on the next tick; it can also suspend until another named task
//! finishes. Tasks never run concurrently and are never preempted mid-step,
//! so no locking is needed.
//!
//! Cancellation is explicit and keyed by name. Cancelling leaves whatever
//! partial value the task had written; no rollback. Starting a task under a
//! key that already has a live task cancels the existing one first, so a key
//! never has two competing writers.

/// Which of the two host ticks a task is stepped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Variable-rate tick (visual smoothing, rotation, head bob).
    Update,
    /// Fixed-rate tick (velocity integration, state machine, climbing).
    Physics,
}

/// Result of stepping a task once.
pub enum Step {
    /// Run again on the next matching tick.
    Continue,
    /// Suspend until the task under the given key finishes or is cancelled,
    /// then resume on the following matching tick.
    Await(&'static str),
    /// Finished; remove from the scheduler.
    Done,
}

/// A resumable task. `step` is called once per matching tick with the tick's
/// delta time; side effects go through `ctx`, and new tasks are requested
/// through `cmds` (applied after the current pass completes).
pub trait Task<C> {
    fn step(&mut self, ctx: &mut C, cmds: &mut Commands<C>, dt: f32) -> Step;
}

enum Op<C> {
    Run {
        key: &'static str,
        segment: Segment,
        task: Box<dyn Task<C>>,
    },
    Cancel(&'static str),
}

/// Deferred scheduler operations requested from inside a task step.
///
/// A task cannot mutate the scheduler that is currently stepping it, so
/// spawn/cancel requests are queued here and applied once the pass ends.
pub struct Commands<C> {
    ops: Vec<Op<C>>,
}

impl<C> Commands<C> {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Queue a task to run under `key` (replacing any live task on that key).
    pub fn run(&mut self, key: &'static str, segment: Segment, task: impl Task<C> + 'static) {
        self.ops.push(Op::Run {
            key,
            segment,
            task: Box::new(task),
        });
    }

    /// Queue a cancellation of the task under `key`.
    pub fn cancel(&mut self, key: &'static str) {
        self.ops.push(Op::Cancel(key));
    }
}

struct Slot<C> {
    key: &'static str,
    segment: Segment,
    task: Box<dyn Task<C>>,
    waiting_on: Option<&'static str>,
    done: bool,
}

/// Cooperative scheduler. Tasks are stepped in spawn order within a segment.
pub struct Scheduler<C> {
    slots: Vec<Slot<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Scheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Start a task under `key`, cancelling any live task under the same key
    /// first.
    pub fn run(&mut self, key: &'static str, segment: Segment, task: impl Task<C> + 'static) {
        self.run_boxed(key, segment, Box::new(task));
    }

    pub fn run_boxed(&mut self, key: &'static str, segment: Segment, task: Box<dyn Task<C>>) {
        self.cancel(key);
        self.slots.push(Slot {
            key,
            segment,
            task,
            waiting_on: None,
            done: false,
        });
    }

    /// Cancel the task under `key` immediately. Partial effects stand.
    pub fn cancel(&mut self, key: &'static str) {
        self.slots.retain(|s| s.key != key);
    }

    #[must_use]
    pub fn is_running(&self, key: &'static str) -> bool {
        self.slots.iter().any(|s| s.key == key && !s.done)
    }

    /// Step every live task registered on `segment`, in spawn order, then
    /// apply any run/cancel requests the tasks queued.
    pub fn tick(&mut self, segment: Segment, ctx: &mut C, dt: f32) {
        let mut cmds = Commands::new();
        for i in 0..self.slots.len() {
            if self.slots[i].segment != segment || self.slots[i].done {
                continue;
            }
            if let Some(key) = self.slots[i].waiting_on {
                if self.is_running(key) {
                    continue;
                }
                self.slots[i].waiting_on = None;
            }
            match self.slots[i].task.step(ctx, &mut cmds, dt) {
                Step::Continue => {}
                Step::Await(key) => self.slots[i].waiting_on = Some(key),
                Step::Done => self.slots[i].done = true,
            }
        }
        self.slots.retain(|s| !s.done);
        for op in cmds.ops {
            match op {
                Op::Run { key, segment, task } => self.run_boxed(key, segment, task),
                Op::Cancel(key) => self.cancel(key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        entries: Vec<&'static str>,
        value: f32,
    }

    struct Emit(&'static str, u32);
    impl Task<Log> for Emit {
        fn step(&mut self, ctx: &mut Log, _cmds: &mut Commands<Log>, _dt: f32) -> Step {
            ctx.entries.push(self.0);
            self.1 -= 1;
            if self.1 == 0 {
                Step::Done
            } else {
                Step::Continue
            }
        }
    }

    #[test]
    fn steps_in_spawn_order_and_removes_done() {
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("a", Segment::Update, Emit("a", 1));
        sched.run("b", Segment::Update, Emit("b", 2));
        sched.tick(Segment::Update, &mut log, 0.016);
        assert_eq!(log.entries, ["a", "b"]);
        assert!(!sched.is_running("a"));
        assert!(sched.is_running("b"));
        sched.tick(Segment::Update, &mut log, 0.016);
        assert!(!sched.is_running("b"));
    }

    #[test]
    fn segments_are_independent() {
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("phys", Segment::Physics, Emit("phys", 1));
        sched.tick(Segment::Update, &mut log, 0.016);
        assert!(log.entries.is_empty());
        sched.tick(Segment::Physics, &mut log, 0.016);
        assert_eq!(log.entries, ["phys"]);
    }

    #[test]
    fn run_replaces_live_task_under_same_key() {
        struct Add(f32);
        impl Task<Log> for Add {
            fn step(&mut self, ctx: &mut Log, _cmds: &mut Commands<Log>, _dt: f32) -> Step {
                ctx.value += self.0;
                Step::Continue
            }
        }
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("writer", Segment::Update, Add(1.0));
        sched.tick(Segment::Update, &mut log, 0.016);
        sched.run("writer", Segment::Update, Add(10.0));
        sched.tick(Segment::Update, &mut log, 0.016);
        // Only the replacement ran on the second tick; one writer per key.
        assert!((log.value - 11.0).abs() < 1e-6);
    }

    #[test]
    fn cancel_leaves_partial_value() {
        struct Ramp;
        impl Task<Log> for Ramp {
            fn step(&mut self, ctx: &mut Log, _cmds: &mut Commands<Log>, dt: f32) -> Step {
                ctx.value += dt;
                Step::Continue
            }
        }
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("ramp", Segment::Update, Ramp);
        sched.tick(Segment::Update, &mut log, 0.5);
        sched.cancel("ramp");
        sched.tick(Segment::Update, &mut log, 0.5);
        assert!((log.value - 0.5).abs() < 1e-6, "no rollback on cancel");
    }

    #[test]
    fn await_suspends_until_subtask_finishes() {
        struct Outer {
            spawned: bool,
        }
        impl Task<Log> for Outer {
            fn step(&mut self, ctx: &mut Log, cmds: &mut Commands<Log>, _dt: f32) -> Step {
                if self.spawned {
                    ctx.entries.push("outer-resumed");
                    return Step::Done;
                }
                self.spawned = true;
                ctx.entries.push("outer-spawn");
                cmds.run("inner", Segment::Update, Emit("inner", 2));
                Step::Await("inner")
            }
        }
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("outer", Segment::Update, Outer { spawned: false });
        // Tick 1: outer spawns + suspends; inner not yet live (applied post-pass).
        sched.tick(Segment::Update, &mut log, 0.016);
        // Ticks 2-3: inner runs to completion while outer stays suspended.
        sched.tick(Segment::Update, &mut log, 0.016);
        sched.tick(Segment::Update, &mut log, 0.016);
        // Tick 4: outer resumes.
        sched.tick(Segment::Update, &mut log, 0.016);
        assert_eq!(
            log.entries,
            ["outer-spawn", "inner", "inner", "outer-resumed"]
        );
    }

    #[test]
    fn await_on_missing_key_resumes_next_tick() {
        struct Waiter {
            waited: bool,
        }
        impl Task<Log> for Waiter {
            fn step(&mut self, ctx: &mut Log, _cmds: &mut Commands<Log>, _dt: f32) -> Step {
                if self.waited {
                    ctx.entries.push("resumed");
                    return Step::Done;
                }
                self.waited = true;
                Step::Await("never-registered")
            }
        }
        let mut sched = Scheduler::new();
        let mut log = Log::default();
        sched.run("w", Segment::Update, Waiter { waited: false });
        sched.tick(Segment::Update, &mut log, 0.016);
        sched.tick(Segment::Update, &mut log, 0.016);
        assert_eq!(log.entries, ["resumed"]);
    }
}
