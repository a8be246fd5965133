//! Input snapshot and filtering.
//!
//! Axes follow the screen convention of the input layer: `x` is positive to
//! the right, `y` is positive backward, so straight forward is `(0, -1)`.
//! The combined magnitude is at most 1 (the host normalizes diagonals).

use glam::Vec2;

/// Forward unit vector in input space.
pub const FORWARD: Vec2 = Vec2::new(0.0, -1.0);

/// Guard for time divisors coming from configuration.
pub(crate) const MIN_DURATION: f32 = 1e-4;

/// Input snapshot for one frame of local player intent.
///
/// `jump_pressed` is a one-shot: the host sets it on key-press and clears it
/// after the snapshot has been consumed by a physics tick, so holding the key
/// does not repeat-jump.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub crouch: bool,
    pub sprint: bool,
}

impl InputState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Response-time-based input smoothing.
///
/// A ramp factor climbs from 0 to 1 over `response_time` seconds while input
/// is held, and the smoothed vector lerps toward the raw input by that
/// factor. Releasing input resets the ramp and snaps the output to zero on
/// the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothedInput {
    factor: f32,
    current: Vec2,
}

impl SmoothedInput {
    /// Advance the ramp by `dt` and return the smoothed vector.
    pub fn step(&mut self, raw: Vec2, dt: f32, response_time: f32) -> Vec2 {
        if raw == Vec2::ZERO {
            self.factor = 0.0;
            self.current = Vec2::ZERO;
        } else {
            self.factor = (self.factor + dt / response_time.max(MIN_DURATION)).min(1.0);
            self.current = self.current.lerp(raw, self.factor);
        }
        self.current
    }

    #[must_use]
    pub fn get(&self) -> Vec2 {
        self.current
    }
}

/// Snap raw input to one of three effective directions: forward,
/// forward-left, forward-right.
///
/// The signed angle of the (normalized) input is measured from the forward
/// axis. Within ±100° the input passes through unchanged; between 130° and
/// 180° the input is treated as backward-sector and negated onto the nearest
/// forward diagonal; the 100°–130° band is a dead zone that collapses to
/// straight forward. The band edges are a deliberate policy, not rounding.
#[must_use]
pub fn filtered_sector_input(raw: Vec2) -> Vec2 {
    if raw.length_squared() < 1e-8 {
        return Vec2::ZERO;
    }
    let d = raw.normalize();
    let angle = (-d.x).atan2(-d.y);
    let pass_band = 100.0f32.to_radians();
    if angle.abs() <= pass_band {
        return d;
    }
    let mirror_start = 130.0f32.to_radians();
    if angle.abs() >= mirror_start {
        return -d;
    }
    FORWARD
}

/// Whether the input direction lies within `angle_deg` of straight forward.
/// Zero input is never "mainly forward".
#[must_use]
pub fn is_mainly_forward(raw: Vec2, angle_deg: f32) -> bool {
    if raw.length_squared() < 1e-8 {
        return false;
    }
    let d = raw.normalize();
    let cos = d.dot(FORWARD).clamp(-1.0, 1.0);
    cos.acos() <= angle_deg.to_radians()
}
