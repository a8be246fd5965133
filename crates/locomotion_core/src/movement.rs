//! Movement controller: speed shaping, direction blending, and velocity
//! integration.
//!
//! Direction handling keeps three vectors with different jobs:
//! - `stable_direction`: last non-zero input direction in world space, held
//!   while input is zero;
//! - `player_direction`: blended toward stable by `direction_control` each
//!   physics tick; its XZ components (times speed) drive velocity;
//! - `delayed_direction`: lags stable by `direction_change_time` via a
//!   blend-factor ramp; used only for mesh facing so visual turning can lag
//!   physical turning.

use glam::{Quat, Vec2, Vec3};

use crate::host::CharacterBody;
use crate::input::MIN_DURATION;

/// Default downward acceleration before the jump state derives its own.
pub const DEFAULT_GRAVITY: f32 = 9.8;

/// Safety ceiling for the free-form deceleration clamp.
const SPEED_CEILING: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct MovementState {
    current_speed: f32,
    /// Downward acceleration. Single-writer discipline: only the state
    /// machine's jump setup derives and writes this; everyone else reads.
    pub gravity: f32,
    velocity: Vec3,
    on_floor: bool,

    player_direction: Vec3,
    stable_direction: Vec3,
    previous_direction: Vec3,
    delayed_direction: Vec3,
    direction_blend_factor: f32,
    direction_change_time: f32,
    direction_control: f32,

    collider_active: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_speed: 0.0,
            gravity: DEFAULT_GRAVITY,
            velocity: Vec3::ZERO,
            on_floor: true,
            player_direction: Vec3::ZERO,
            stable_direction: Vec3::ZERO,
            previous_direction: Vec3::ZERO,
            delayed_direction: Vec3::ZERO,
            direction_blend_factor: 0.0,
            direction_change_time: 0.3,
            direction_control: 1.0,
            collider_active: true,
        }
    }

    /// Ramp speed toward `desired_speed` over `acceleration_time`.
    ///
    /// The effective target is scaled by the delayed-direction magnitude, so
    /// speed saturates only once the facing has caught up with the input.
    /// Never overshoots the target and never drops below zero.
    pub fn accelerate(&mut self, dt: f32, desired_speed: f32, acceleration_time: f32) {
        let desired = desired_speed * self.delayed_direction.length();
        let rate = desired / acceleration_time.max(MIN_DURATION);
        self.current_speed = (self.current_speed + rate * dt).clamp(0.0, desired.max(0.0));
    }

    /// Shed speed at `reference_speed / deceleration_time`, clamped to
    /// `[0, 100]`. Used when slowing toward a stop with the entry speed as
    /// the rate reference.
    pub fn decelerate(&mut self, dt: f32, reference_speed: f32, deceleration_time: f32) {
        let rate = reference_speed / deceleration_time.max(MIN_DURATION);
        self.current_speed = (self.current_speed - rate * dt).clamp(0.0, SPEED_CEILING);
    }

    /// Shed speed toward `target_speed`, clamped to `[target, current]` so
    /// deceleration can never undershoot the target. Used when a moving state
    /// lowers its effective speed cap.
    pub fn decelerate_toward(&mut self, dt: f32, target_speed: f32, deceleration_time: f32) {
        let rate = target_speed / deceleration_time.max(MIN_DURATION);
        let upper = self.current_speed.max(target_speed);
        self.current_speed = (self.current_speed - rate * dt).clamp(target_speed, upper);
    }

    /// Fold raw input into the direction trio. `yaw` is the camera neck yaw
    /// that makes input camera-relative.
    pub fn change_direction_with_input(&mut self, raw: Vec2, yaw: f32) {
        let world = Quat::from_rotation_y(yaw) * Vec3::new(raw.x, 0.0, raw.y);
        if raw != Vec2::ZERO {
            self.stable_direction = world.normalize_or_zero();
        }
        self.player_direction = self
            .player_direction
            .lerp(self.stable_direction, self.direction_control);
    }

    /// Advance the delayed direction toward the stable direction. The blend
    /// factor ramp resets whenever the stable direction changes discretely.
    pub fn apply_delayed_direction(&mut self, dt: f32) {
        if self.previous_direction != self.stable_direction {
            self.direction_blend_factor = 0.0;
            self.previous_direction = self.stable_direction;
        }
        self.direction_blend_factor = (self.direction_blend_factor
            + dt / self.direction_change_time.max(MIN_DURATION))
        .min(1.0);
        self.delayed_direction = self
            .delayed_direction
            .lerp(self.stable_direction, self.direction_blend_factor);
    }

    /// Write the planar velocity from direction and speed, then run the
    /// host's move-and-slide. The vertical component is owned by gravity and
    /// jump logic and passes through untouched.
    pub fn integrate(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        self.velocity.x = self.player_direction.x * self.current_speed;
        self.velocity.z = self.player_direction.z * self.current_speed;
        self.apply_velocity(body, dt);
    }

    /// Move with the current velocity as-is (ladder climbing owns all three
    /// components).
    pub fn apply_velocity(&mut self, body: &mut dyn CharacterBody, dt: f32) {
        self.velocity = body.move_and_slide(self.velocity, dt);
        self.on_floor = body.is_on_floor();
    }

    #[must_use]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn set_current_speed(&mut self, speed: f32) {
        self.current_speed = speed.max(0.0);
    }

    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn set_y_velocity(&mut self, y: f32) {
        self.velocity.y = y;
    }

    #[must_use]
    pub fn xz_velocity(&self) -> Vec2 {
        Vec2::new(self.velocity.x, self.velocity.z)
    }

    #[must_use]
    pub fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    /// Normalized blended direction (the raw, sub-unit vector drives
    /// velocity internally).
    #[must_use]
    pub fn player_direction(&self) -> Vec3 {
        self.player_direction.normalize_or_zero()
    }

    pub fn set_player_direction(&mut self, direction: Vec3) {
        self.player_direction = direction;
    }

    #[must_use]
    pub fn delayed_direction(&self) -> Vec3 {
        self.delayed_direction
    }

    #[must_use]
    pub fn direction_change_time(&self) -> f32 {
        self.direction_change_time
    }

    pub fn set_direction_change_time(&mut self, time: f32) {
        self.direction_change_time = time;
    }

    pub fn set_direction_control(&mut self, value: f32) {
        self.direction_control = value.clamp(0.0, 1.0);
    }

    /// Toggle the standing collision volume output.
    pub fn set_collider_state(&mut self, active: bool) {
        self.collider_active = active;
    }

    #[must_use]
    pub fn collider_active(&self) -> bool {
        self.collider_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FlatGround;

    fn saturated() -> MovementState {
        let mut m = MovementState::new();
        // Walk the delayed direction to saturation so accelerate targets the
        // full desired speed.
        m.change_direction_with_input(Vec2::new(0.0, -1.0), 0.0);
        for _ in 0..100 {
            m.apply_delayed_direction(1.0 / 60.0);
        }
        m
    }

    #[test]
    fn accelerate_never_overshoots_desired() {
        let mut m = saturated();
        for _ in 0..1000 {
            m.accelerate(0.016, 6.0, 0.2);
            assert!(m.current_speed() <= 6.0 + 1e-6);
        }
        assert!((m.current_speed() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn decelerate_never_goes_negative() {
        let mut m = saturated();
        m.set_current_speed(3.0);
        for _ in 0..1000 {
            m.decelerate(0.016, 3.0, 0.1);
            assert!(m.current_speed() >= 0.0);
        }
        assert_eq!(m.current_speed(), 0.0);
    }

    #[test]
    fn decelerate_toward_stops_at_target() {
        let mut m = saturated();
        m.set_current_speed(8.0);
        for _ in 0..1000 {
            m.decelerate_toward(0.016, 5.2, 0.5);
            assert!(m.current_speed() >= 5.2 - 1e-6);
        }
        assert!((m.current_speed() - 5.2).abs() < 1e-4);
    }

    #[test]
    fn accelerate_scales_with_delayed_direction() {
        let mut m = MovementState::new();
        m.change_direction_with_input(Vec2::new(0.0, -1.0), 0.0);
        m.apply_delayed_direction(0.016); // barely ramped
        m.accelerate(10.0, 6.0, 0.2); // huge dt: lands on the clamp
        assert!(
            m.current_speed() < 6.0,
            "speed cap follows direction saturation, got {}",
            m.current_speed()
        );
    }

    #[test]
    fn stable_direction_held_on_zero_input() {
        let mut m = MovementState::new();
        m.change_direction_with_input(Vec2::new(0.0, -1.0), 0.0);
        let held = m.stable_direction;
        m.change_direction_with_input(Vec2::ZERO, 0.0);
        assert_eq!(m.stable_direction, held);
    }

    #[test]
    fn direction_is_camera_relative() {
        let mut m = MovementState::new();
        // Forward input with the camera turned 90° right (yaw = -PI/2).
        m.change_direction_with_input(Vec2::new(0.0, -1.0), -std::f32::consts::FRAC_PI_2);
        let d = m.stable_direction;
        assert!((d.x - 1.0).abs() < 1e-5, "expected +X, got {d:?}");
        assert!(d.z.abs() < 1e-5);
    }

    #[test]
    fn integrate_preserves_vertical_velocity() {
        let mut m = saturated();
        m.set_current_speed(2.0);
        m.set_y_velocity(7.5);
        let mut body = FlatGround::airborne_at(glam::Vec3::new(0.0, 1.0, 0.0));
        m.integrate(&mut body, 0.016);
        assert!((m.velocity().y - 7.5).abs() < 1e-6);
        assert!(m.xz_velocity().length() > 0.0);
    }
}
