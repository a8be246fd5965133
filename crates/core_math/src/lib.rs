//! core_math: direction/rotation math shared by the locomotion crates.
//!
//! Scope
//! - Signed planar (XZ) angles between facing vectors, with degenerate-input
//!   guards so callers never see NaN.
//! - `Basis3`: a rotation + non-uniform scale pair with spherical blending
//!   that never blends scale. This is the single rotation-smoothing
//!   primitive used for head tilt, mesh alignment, and ladder facing.
//! - Frame-rate-independent exponential smoothing weights.
//!
//! Keep this crate small and renderer-agnostic; it only depends on `glam`.

use glam::{Quat, Vec3};

/// Wrap an angle in radians to `[-PI, PI]`.
#[must_use]
pub fn wrap_angle(a: f32) -> f32 {
    let mut x = a;
    while x > std::f32::consts::PI {
        x -= std::f32::consts::TAU;
    }
    while x < -std::f32::consts::PI {
        x += std::f32::consts::TAU;
    }
    x
}

/// Signed angle in radians between two facing vectors projected onto the XZ
/// plane.
///
/// The magnitude is `acos` of the dot product of the projected, normalized
/// vectors; the sign comes from the Y component of their cross product. For
/// `+Z`-column facing vectors (the convention used by the camera rig) a
/// positive result means `b` lies to the right of `a`.
///
/// Returns `0.0` when either projection is near zero length; never NaN.
#[must_use]
pub fn signed_planar_angle(a: Vec3, b: Vec3) -> f32 {
    let fa = Vec3::new(a.x, 0.0, a.z);
    let fb = Vec3::new(b.x, 0.0, b.z);
    if fa.length_squared() < 1e-8 || fb.length_squared() < 1e-8 {
        return 0.0;
    }
    let fa = fa.normalize();
    let fb = fb.normalize();
    let angle = fa.dot(fb).clamp(-1.0, 1.0).acos();
    let sign = fa.cross(fb).y;
    if sign < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Frame-rate-independent exponential blend weight: `1 - 0.5^(dt * k)`.
///
/// `k` reads as a smoothing speed; larger converges faster. Using this as the
/// lerp/slerp `t` each frame makes the blend half-life independent of tick
/// rate, unlike a fixed lerp constant.
#[must_use]
pub fn smooth_factor(dt: f32, k: f32) -> f32 {
    1.0 - 0.5f32.powf(dt * k)
}

/// Angular rate of change in degrees per second.
///
/// State threading is explicit: the caller keeps `prev_deg` and updates it
/// after each call; this function never mutates hidden state.
#[must_use]
pub fn angular_rate_of_change(current_deg: f32, prev_deg: f32, dt: f32) -> f32 {
    if dt <= f32::EPSILON {
        return 0.0;
    }
    (current_deg - prev_deg).abs() / dt
}

/// A rotation paired with a non-uniform scale, standing in for the basis part
/// of a node transform. Blending goes through the rotation only; the scale of
/// `self` is always reapplied untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis3 {
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Basis3 {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Basis3 {
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Facing column (`+Z` axis) of this basis, matching the convention the
    /// camera rig uses for mesh-vs-neck angle measurement.
    #[must_use]
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Spherically interpolate toward `target`'s rotation by `t` in `[0, 1]`.
    /// The original scale of `self` is preserved; scale is never blended.
    #[must_use]
    pub fn slerp_toward(&self, target: &Basis3, t: f32) -> Basis3 {
        Basis3 {
            rotation: self.rotation.slerp(target.rotation, t.clamp(0.0, 1.0)),
            scale: self.scale,
        }
    }

    /// Spherically interpolate toward the yaw that faces `dir` (planar), by
    /// `t`. Pitch/roll of the target are identity; scale is preserved. A
    /// near-zero `dir` projection leaves the basis unchanged.
    #[must_use]
    pub fn slerp_toward_direction(&self, dir: Vec3, t: f32) -> Basis3 {
        if Vec3::new(dir.x, 0.0, dir.z).length_squared() < 1e-8 {
            return *self;
        }
        let d = dir.normalize();
        let target = Quat::from_rotation_y(yaw_from_direction(d));
        Basis3 {
            rotation: self.rotation.slerp(target, t.clamp(0.0, 1.0)),
            scale: self.scale,
        }
    }
}

/// Yaw in radians that faces the given world direction (`-Z` forward,
/// CCW-positive around `+Y`).
#[must_use]
pub fn yaw_from_direction(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}
