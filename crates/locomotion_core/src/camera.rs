//! Camera rig: mouse look, head bob, and body-mesh orientation outputs.
//!
//! The rig owns no scene nodes. It keeps yaw/pitch accumulators plus a small
//! block of transform outputs (head position, head-mesh and body-mesh bases,
//! eyes offset) that the render layer reads each frame. The body/head mesh
//! outputs live behind an optional binding: when the host has not bound a
//! visual rig, the alignment operations degrade to a logged no-op instead of
//! faulting the frame loop.

use core_math::{angular_rate_of_change, signed_planar_angle, smooth_factor, Basis3};
use glam::{Quat, Vec2, Vec3};

use crate::input::filtered_sector_input;
use data_runtime::configs::locomotion::LocomotionCfg;

/// Pitch clamp applied in every camera mode.
pub const PITCH_LIMIT_DEG: f32 = 89.0;
/// Yaw half-window while on a ladder.
pub const LADDER_YAW_LIMIT_DEG: f32 = 60.0;
/// Head height the standing transition settles at.
pub const STANDING_HEAD_HEIGHT: f32 = 1.7;

/// Smoothing speed for head-mesh tilt and constant mesh alignment.
pub(crate) const ALIGN_SMOOTH_SPEED: f32 = 15.0;
/// Smoothing speed for the slower mesh-follows-neck blend.
const FOLLOW_SMOOTH_SPEED: f32 = 5.0;
/// Smoothing speed for head-bob offset blending.
const HEAD_BOB_LERP_SPEED: f32 = 5.0;

/// Camera constraint mode. Ladder narrows yaw to a window around the yaw at
/// entry; the pitch clamp is shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Normal,
    Ladder { yaw_center: f32 },
}

/// Visual mesh orientation outputs, optional so a headless host can run the
/// core without binding them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualRig {
    pub head_mesh: Basis3,
    pub body_mesh: Basis3,
}

#[derive(Debug, Clone)]
pub struct CameraState {
    yaw: f32,
    pitch: f32,
    mode: CameraMode,
    sensitivity_x: f32,
    sensitivity_y: f32,

    head_position: Vec3,
    eyes_offset: Vec2,
    bob_phase: f32,
    bob_intensity: f32,

    rig: Option<VisualRig>,
    current_angle_deg: f32,
    previous_angle_deg: f32,

    fov_deg: f32,
    near: f32,
    far: f32,
}

impl CameraState {
    #[must_use]
    pub fn new(cfg: &LocomotionCfg) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            mode: CameraMode::Normal,
            sensitivity_x: cfg.mouse_sensitivity_x,
            sensitivity_y: cfg.mouse_sensitivity_y,
            head_position: Vec3::new(0.0, STANDING_HEAD_HEIGHT, 0.0),
            eyes_offset: Vec2::ZERO,
            bob_phase: 0.0,
            bob_intensity: 0.0,
            rig: Some(VisualRig::default()),
            current_angle_deg: 0.0,
            previous_angle_deg: 0.0,
            fov_deg: 75.0,
            near: 0.05,
            far: 500.0,
        }
    }

    /// Accumulate mouse-look rotation. Yaw turns the neck around world up;
    /// pitch is clamped and rebuilt from identity so roll can never drift in.
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        self.yaw += (-dx * self.sensitivity_x).to_radians();
        if let CameraMode::Ladder { yaw_center } = self.mode {
            let half = LADDER_YAW_LIMIT_DEG.to_radians();
            self.yaw = self.yaw.clamp(yaw_center - half, yaw_center + half);
        }
        self.pitch = (self.pitch + (-dy * self.sensitivity_y).to_radians()).clamp(
            -PITCH_LIMIT_DEG.to_radians(),
            PITCH_LIMIT_DEG.to_radians(),
        );
    }

    pub fn set_mode_ladder(&mut self) {
        self.mode = CameraMode::Ladder {
            yaw_center: self.yaw,
        };
    }

    pub fn set_mode_normal(&mut self) {
        self.mode = CameraMode::Normal;
    }

    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Authoritative neck orientation (yaw only).
    #[must_use]
    pub fn neck_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Authoritative head orientation: neck yaw composed with pitch-only
    /// local rotation.
    #[must_use]
    pub fn head_rotation(&self) -> Quat {
        self.neck_rotation() * Quat::from_rotation_x(self.pitch)
    }

    /// Per-frame visual smoothing: blend the head mesh toward the
    /// authoritative head orientation.
    pub fn smooth_visuals(&mut self, dt: f32) {
        let target = Basis3::from_rotation(self.head_rotation());
        let Some(rig) = &mut self.rig else {
            log::warn!("head mesh output not bound; skipping head smoothing");
            return;
        };
        rig.head_mesh = rig
            .head_mesh
            .slerp_toward(&target, smooth_factor(dt, ALIGN_SMOOTH_SPEED));
    }

    /// Refresh the signed neck-vs-body-mesh angle (degrees). Call once per
    /// update tick before any consumer runs.
    pub fn refresh_mesh_angle(&mut self) {
        let Some(rig) = &self.rig else {
            self.current_angle_deg = 0.0;
            return;
        };
        let neck = Basis3::from_rotation(self.neck_rotation());
        self.current_angle_deg =
            signed_planar_angle(neck.facing(), rig.body_mesh.facing()).to_degrees();
    }

    #[must_use]
    pub fn current_angle_deg(&self) -> f32 {
        self.current_angle_deg
    }

    /// Angular velocity of the mesh angle in deg/s, threading the previous
    /// sample forward.
    pub fn sample_angle_rate(&mut self, dt: f32) -> f32 {
        let rate = angular_rate_of_change(
            self.current_angle_deg.abs(),
            self.previous_angle_deg,
            dt,
        );
        self.previous_angle_deg = self.current_angle_deg.abs();
        rate
    }

    /// Blend the body mesh toward the neck orientation by `t`. Shared by the
    /// discrete and constant alignment tasks.
    pub fn blend_body_mesh_to_neck(&mut self, t: f32) {
        let neck = Basis3::from_rotation(self.neck_rotation());
        let Some(rig) = &mut self.rig else {
            log::warn!("body mesh output not bound; skipping alignment");
            return;
        };
        rig.body_mesh = rig.body_mesh.slerp_toward(&neck, t);
    }

    /// Slow continuous follow used while airborne or decelerating.
    pub fn follow_mesh_to_neck(&mut self, dt: f32) {
        self.blend_body_mesh_to_neck(smooth_factor(dt, FOLLOW_SMOOTH_SPEED));
    }

    /// Rotate the body mesh toward an explicit world direction.
    pub fn rotate_body_mesh_to_direction(&mut self, dir: Vec3, dt: f32) {
        let Some(rig) = &mut self.rig else {
            log::warn!("body mesh output not bound; skipping alignment");
            return;
        };
        rig.body_mesh = rig
            .body_mesh
            .slerp_toward_direction(dir, smooth_factor(dt, ALIGN_SMOOTH_SPEED));
    }

    /// Rotate the body mesh toward the sector-filtered input direction
    /// (forward, forward-left, forward-right), camera-relative.
    pub fn rotate_body_mesh_to_input(&mut self, raw: Vec2, dt: f32) {
        let filtered = filtered_sector_input(raw);
        if filtered == Vec2::ZERO {
            return;
        }
        let world = self.neck_rotation() * Vec3::new(filtered.x, 0.0, filtered.y);
        self.rotate_body_mesh_to_direction(world, dt);
    }

    /// Advance the head-bob phase while input is held.
    pub fn set_head_bob(&mut self, intensity: f32, speed: f32, dt: f32) {
        self.bob_intensity = intensity;
        self.bob_phase += speed * dt;
    }

    /// Blend the eyes offset toward the bob target (input held) or back to
    /// zero (released). Always exponential decay, never a snap.
    pub fn head_bob(&mut self, has_input: bool, dt: f32) {
        let f = smooth_factor(dt, HEAD_BOB_LERP_SPEED);
        let target = if has_input {
            Vec2::new(
                ((self.bob_phase / 2.0).sin() + 0.5) * self.bob_intensity,
                self.bob_phase.sin() * (self.bob_intensity / 2.0),
            )
        } else {
            Vec2::ZERO
        };
        self.eyes_offset = self.eyes_offset.lerp(target, f);
    }

    #[must_use]
    pub fn eyes_offset(&self) -> Vec2 {
        self.eyes_offset
    }

    #[must_use]
    pub fn head_position(&self) -> Vec3 {
        self.head_position
    }

    pub fn set_head_position(&mut self, position: Vec3) {
        self.head_position = position;
    }

    #[must_use]
    pub fn rig(&self) -> Option<&VisualRig> {
        self.rig.as_ref()
    }

    /// Detach the visual rig (headless host); alignment ops become no-ops.
    pub fn unbind_rig(&mut self) {
        self.rig = None;
    }

    #[must_use]
    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    pub fn set_fov_deg(&mut self, fov: f32) {
        self.fov_deg = fov;
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> CameraState {
        CameraState::new(&LocomotionCfg::default())
    }

    #[test]
    fn pitch_is_clamped() {
        let mut c = cam();
        c.apply_look(0.0, -10_000.0);
        assert!(c.pitch() <= PITCH_LIMIT_DEG.to_radians() + 1e-6);
        c.apply_look(0.0, 10_000.0);
        assert!(c.pitch() >= -PITCH_LIMIT_DEG.to_radians() - 1e-6);
    }

    #[test]
    fn ladder_mode_narrows_yaw() {
        let mut c = cam();
        c.apply_look(100.0, 0.0);
        let entry_yaw = c.yaw();
        c.set_mode_ladder();
        c.apply_look(-100_000.0, 0.0);
        let half = LADDER_YAW_LIMIT_DEG.to_radians();
        assert!((c.yaw() - (entry_yaw + half)).abs() < 1e-4);
        c.set_mode_normal();
        c.apply_look(-100.0, 0.0);
        assert!(c.yaw() > entry_yaw + half, "normal mode unclamped again");
    }

    #[test]
    fn mesh_angle_tracks_neck_turn() {
        let mut c = cam();
        c.refresh_mesh_angle();
        assert!(c.current_angle_deg().abs() < 1e-4);
        // Turn the neck 120° right of the (identity) mesh.
        c.yaw = -120.0f32.to_radians();
        c.refresh_mesh_angle();
        assert!((c.current_angle_deg().abs() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn head_bob_decays_to_zero_without_input() {
        let mut c = cam();
        let dt = 1.0 / 60.0;
        for _ in 0..30 {
            c.set_head_bob(0.2, 22.0, dt);
            c.head_bob(true, dt);
        }
        assert!(c.eyes_offset().length() > 1e-3);
        let mut last = c.eyes_offset().length();
        for _ in 0..240 {
            c.head_bob(false, dt);
            let now = c.eyes_offset().length();
            assert!(now <= last + 1e-6, "monotone decay");
            last = now;
        }
        assert!(last < 1e-3, "settles near zero, got {last}");
    }

    #[test]
    fn unbound_rig_degrades_to_noop() {
        let mut c = cam();
        c.unbind_rig();
        c.refresh_mesh_angle();
        c.blend_body_mesh_to_neck(0.5);
        c.follow_mesh_to_neck(0.016);
        c.smooth_visuals(0.016);
        assert_eq!(c.current_angle_deg(), 0.0);
        assert!(c.rig().is_none());
    }

    #[test]
    fn constant_blend_converges_mesh_to_neck() {
        let mut c = cam();
        c.yaw = 150.0f32.to_radians();
        let dt = 1.0 / 60.0;
        for _ in 0..300 {
            c.blend_body_mesh_to_neck(smooth_factor(dt, ALIGN_SMOOTH_SPEED));
        }
        c.refresh_mesh_angle();
        assert!(c.current_angle_deg().abs() < 1.0);
    }
}
