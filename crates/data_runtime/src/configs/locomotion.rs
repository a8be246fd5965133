//! Locomotion tunables loaded from data/config/locomotion.toml with sensible
//! defaults, clamping, and optional env overrides for quick tuning.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Per-state locomotion tunables. Speeds are meters per second, times are
/// seconds, factors are unitless blend weights.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionCfg {
    pub max_speed: f32,
    pub acceleration_time: f32,
    pub deceleration_time: f32,
    pub direction_change_time: f32,
    pub input_response_time: f32,

    pub mouse_sensitivity_x: f32,
    pub mouse_sensitivity_y: f32,
    pub stand_duration: f32,

    pub walk_speed: f32,
    pub walk_acceleration_time: f32,
    pub walk_head_bob_speed: f32,
    pub walk_head_bob_intensity: f32,

    pub sprinting_speed: f32,
    pub sprint_acceleration_time: f32,
    /// Speed/accel reduction applied when sprint input is not mainly forward.
    pub sprint_change_factor: f32,
    pub sprint_direction_change_time: f32,
    pub sprint_direction_control: f32,
    pub head_bob_speed: f32,
    pub head_bob_intensity: f32,

    pub jump_height: f32,
    pub time_to_peak: f32,

    pub air_speed: f32,
    pub air_acceleration_time: f32,
    /// Direction-control blend weight while airborne (lower = floatier).
    pub air_control: f32,
    /// Air target speed/accel reduction when input is not mainly forward.
    pub air_change_factor: f32,
    /// Extra gravity factor while descending.
    pub gravity_multiplier: f32,
    pub coyote_time: f32,

    pub ladder_speed: f32,
    pub bar_spacing: f32,
    pub ladder_jump_velocity: f32,
}

impl Default for LocomotionCfg {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            acceleration_time: 0.5,
            deceleration_time: 0.5,
            direction_change_time: 0.3,
            input_response_time: 0.2,

            mouse_sensitivity_x: 0.25,
            mouse_sensitivity_y: 0.2,
            stand_duration: 0.5,

            walk_speed: 4.0,
            walk_acceleration_time: 0.5,
            walk_head_bob_speed: 14.0,
            walk_head_bob_intensity: 0.1,

            sprinting_speed: 8.0,
            sprint_acceleration_time: 2.0,
            sprint_change_factor: 0.65,
            sprint_direction_change_time: 0.3,
            sprint_direction_control: 0.15,
            head_bob_speed: 22.0,
            head_bob_intensity: 0.2,

            jump_height: 3.0,
            time_to_peak: 1.0,

            air_speed: 5.0,
            air_acceleration_time: 1.0,
            air_control: 0.05,
            air_change_factor: 0.65,
            gravity_multiplier: 1.5,
            coyote_time: 0.15,

            ladder_speed: 2.0,
            bar_spacing: 1.0,
            ladder_jump_velocity: 4.5,
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}

fn clamp(mut cfg: LocomotionCfg) -> LocomotionCfg {
    // Factors are blend weights; out-of-range values produce feedback loops.
    cfg.sprint_direction_control = cfg.sprint_direction_control.clamp(0.0, 1.0);
    cfg.air_control = cfg.air_control.clamp(0.0, 1.0);
    cfg.sprint_change_factor = cfg.sprint_change_factor.clamp(0.0, 1.0);
    cfg.air_change_factor = cfg.air_change_factor.clamp(0.0, 1.0);
    if cfg.gravity_multiplier < 1.0 {
        cfg.gravity_multiplier = 1.0;
    }
    cfg
}

/// Load the locomotion config from the default location, falling back to
/// defaults when the file is absent.
pub fn load_default() -> Result<LocomotionCfg> {
    let path = data_root().join("config/locomotion.toml");
    let mut cfg = if path.is_file() {
        let txt =
            std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<LocomotionCfg>(&txt).context("parse locomotion TOML")?
    } else {
        LocomotionCfg::default()
    };
    // Env overrides for quick tuning (optional)
    if let Ok(s) = std::env::var("MOUSE_SENS_X") {
        if let Ok(v) = s.parse() {
            cfg.mouse_sensitivity_x = v;
        }
    }
    if let Ok(s) = std::env::var("MOUSE_SENS_Y") {
        if let Ok(v) = s.parse() {
            cfg.mouse_sensitivity_y = v;
        }
    }
    if let Ok(s) = std::env::var("SPRINT_SPEED") {
        if let Ok(v) = s.parse() {
            cfg.sprinting_speed = v;
        }
    }
    if let Ok(s) = std::env::var("JUMP_HEIGHT") {
        if let Ok(v) = s.parse() {
            cfg.jump_height = v;
        }
    }
    if let Ok(s) = std::env::var("COYOTE_TIME") {
        if let Ok(v) = s.parse() {
            cfg.coyote_time = v;
        }
    }
    Ok(clamp(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = LocomotionCfg::default();
        assert!(cfg.sprinting_speed > cfg.walk_speed);
        assert!(cfg.time_to_peak > 0.0);
        assert!((0.0..=1.0).contains(&cfg.sprint_change_factor));
    }

    #[test]
    fn partial_toml_merges_with_defaults() {
        let cfg: LocomotionCfg = toml::from_str("sprinting_speed = 12.5").expect("parse");
        assert!((cfg.sprinting_speed - 12.5).abs() < 1e-6);
        assert_eq!(cfg.bar_spacing, LocomotionCfg::default().bar_spacing);
    }

    #[test]
    fn clamp_rejects_feedback_factors() {
        let cfg = clamp(LocomotionCfg {
            air_control: 3.0,
            gravity_multiplier: 0.2,
            ..LocomotionCfg::default()
        });
        assert!(cfg.air_control <= 1.0);
        assert!(cfg.gravity_multiplier >= 1.0);
    }
}
